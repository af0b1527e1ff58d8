//! Textile composition formatting.
//!
//! Turns free-form input like `"95% cotton, 5% elastane"` into label lines
//! `["95% COTTON", "5% ELASTANE"]`.

/// Maximum number of material lines that fit on the label.
pub const MAX_LINES: usize = 5;

/// Format a comma-separated composition string into at most
/// [`MAX_LINES`] display lines.
///
/// Each entry is split on its first `%`. Entries without a `%` are passed
/// through uppercased.
pub fn format_composition(input: &str) -> Vec<String> {
    format_composition_capped(input, MAX_LINES)
}

/// Same as [`format_composition`] with an explicit line cap.
pub fn format_composition_capped(input: &str, max_lines: usize) -> Vec<String> {
    if input.is_empty() {
        log::warn!("Composition is empty");
        return Vec::new();
    }

    let lines: Vec<String> = input.split(',').map(format_entry).collect();
    log::debug!("Parsed {} composition entries", lines.len());

    lines.into_iter().take(max_lines).collect()
}

fn format_entry(entry: &str) -> String {
    let entry = entry.trim();
    match entry.split_once('%') {
        Some((percentage, material)) => {
            format!("{}% {}", percentage.trim(), material.trim().to_uppercase())
        }
        None => entry.to_uppercase(),
    }
}
