//! Shared formatting helpers for terminal output

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct > 0.0 && pct < 0.1 {
        format!("{:.2}%", pct)
    } else if pct.fract().abs() < f64::EPSILON {
        format!("{:.0}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

/// Progress bar for a 0-100 percentage
pub fn format_bar(percent: f64, width: usize) -> String {
    if percent <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a header line with an underline of the same width
pub fn format_header(title: &str) -> String {
    format!("{}\n{}\n", title, "=".repeat(title.chars().count()))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to at most `max_chars` characters
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(50.0), "50%");
        assert_eq!(format_percentage(33.3), "33.3%");
        assert_eq!(format_percentage(0.05), "0.05%");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(50.0, 10), "█████░░░░░");
        assert_eq!(format_bar(0.0, 4), "░░░░");
        assert_eq!(format_bar(250.0, 4), "████");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Short", 10), "Short");
        let result = truncate("A very long description", 10);
        assert_eq!(result.chars().count(), 10);
        assert!(result.ends_with("..."));
        assert_eq!(truncate("Café au lait", 7), "Café...");
    }

    #[test]
    fn test_format_header() {
        assert_eq!(format_header("Wallet"), "Wallet\n======\n");
    }
}
