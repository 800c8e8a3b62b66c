//! Client-side preflight checks
//!
//! Mirrors the backend's input rules so obvious mistakes are reported before
//! the upload starts. The backend stays authoritative.

use crate::error::SubmitError;
use crate::operation::Operation;
use crate::upload::{format_file_size, SelectedFileEntry};

/// Form values the preflight looks at
#[derive(Debug, Clone, Default)]
pub struct PreflightInput<'a> {
    pub files: &'a [SelectedFileEntry],
    pub page_range: Option<&'a str>,
    pub angle: Option<&'a str>,
}

/// Check a form before it is sent
pub fn preflight(
    op: Operation,
    input: &PreflightInput<'_>,
    max_bytes: u64,
) -> Result<(), SubmitError> {
    if input.files.is_empty() {
        return Err(SubmitError::Validation("No files selected".to_string()));
    }

    if op.allows_multiple() {
        // The backend skips non-PDF parts of a merge
        if !input.files.iter().any(|f| has_pdf_extension(&f.name)) {
            return Err(SubmitError::Validation("No PDF files selected".to_string()));
        }
    } else if let Some(file) = input.files.iter().find(|f| !has_pdf_extension(&f.name)) {
        return Err(SubmitError::Validation(format!(
            "Invalid file: {}",
            file.name
        )));
    }

    // The limit applies to the whole request body
    let total = input
        .files
        .iter()
        .fold(0u64, |sum, f| sum.saturating_add(f.size));
    if total > max_bytes {
        return Err(SubmitError::Validation(format!(
            "Upload too large: {} selected, max {}",
            format_file_size(total),
            format_file_size(max_bytes)
        )));
    }

    match op {
        Operation::Split => {
            if let Some(range) = input.page_range.filter(|r| !r.trim().is_empty()) {
                parse_page_range(range).map_err(SubmitError::Validation)?;
            }
        }
        Operation::Rotate => {
            if let Some(angle) = input.angle.filter(|a| !a.trim().is_empty()) {
                validate_angle(angle).map_err(SubmitError::Validation)?;
            }
        }
        _ => {}
    }

    Ok(())
}

fn has_pdf_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Parse a split range like "1-3,5,7-9" into sorted, merged 1-based
/// inclusive spans. Work is proportional to the number of parts, not pages.
pub fn parse_page_range(input: &str) -> Result<Vec<(u32, u32)>, String> {
    let mut spans = Vec::new();

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some((start, end)) = part.split_once('-') {
            let start = parse_page(start)?;
            let end = parse_page(end)?;
            if start > end {
                return Err(format!("Invalid page range: {} > {}", start, end));
            }
            spans.push((start, end));
        } else {
            let page = parse_page(part)?;
            spans.push((page, page));
        }
    }

    if spans.is_empty() {
        return Err("Invalid page range: no pages given".to_string());
    }

    spans.sort_unstable();
    let mut merged: Vec<(u32, u32)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1.saturating_add(1) => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }

    Ok(merged)
}

fn parse_page(s: &str) -> Result<u32, String> {
    let s = s.trim();
    match s.parse::<u32>() {
        Ok(0) => Err("Invalid page range: pages start at 1".to_string()),
        Ok(page) => Ok(page),
        Err(_) => Err(format!("Invalid page range: '{}' is not a page number", s)),
    }
}

fn validate_angle(s: &str) -> Result<i32, String> {
    let angle: i32 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid angle: {}", s.trim()))?;
    if angle % 90 != 0 {
        return Err(format!("Invalid angle: {} is not a multiple of 90", angle));
    }
    Ok(angle)
}
