//! Text and number formatting for display
//!
//! Helpers for dashboard stat cards and table cells.

/// Format a count with thousands separators (12540 -> "12,540")
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Abbreviate a large number for stat cards (12540 -> "12.5K")
pub fn format_large_number(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Format a price in dollars with two decimal places
pub fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}

/// Format a percentage with at most one decimal place
pub fn format_percentage(value: f64) -> String {
    if (value - value.trunc()).abs() < f64::EPSILON {
        format!("{:.0}%", value)
    } else {
        format!("{:.1}%", value)
    }
}

/// Parse a "#RRGGBB" color into its channel components
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Truncate long text for a table cell, appending an ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}
