//! Table formatting utilities for CLI output.

use astel_core::{PageMeta, Pager};

/// Truncates a string to a maximum number of characters, adding "..." if needed.
///
/// # Examples
///
/// ```rust
/// use astel_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// assert_eq!(truncate_string("João Conceição", 8), "João ...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Format an optional value for table display, returning a default if None.
pub fn format_optional<T: std::fmt::Display>(value: &Option<T>, default: &str) -> String {
    match value {
        Some(v) => v.to_string(),
        None => default.to_string(),
    }
}

/// Format a money amount with two decimals and a comma separator.
pub fn format_money(value: f64) -> String {
    format!("R$ {value:.2}").replace('.', ",")
}

/// Footer line for a paged listing.
pub fn page_footer(meta: &PageMeta) -> String {
    let mut footer = format!(
        "Page {} of {} ({} record(s), {} per page)",
        meta.current_page, meta.total_pages, meta.total_count, meta.page_size
    );
    if let Some(sum) = meta.sum_paid {
        footer.push_str(&format!(" | Total paid: {}", format_money(sum)));
    }
    footer
}

/// `--page` values for the pages around the current one, if any.
pub fn page_navigation(meta: &PageMeta) -> Option<String> {
    let mut pager = Pager::new(meta.page_size);
    pager.apply(meta);

    let mut hints = Vec::new();
    let mut back = pager;
    if back.previous() {
        hints.push(format!("previous: --page {}", back.page()));
    }
    let mut forward = pager;
    if forward.next() {
        hints.push(format!("next: --page {}", forward.page()));
    }
    (!hints.is_empty()).then(|| hints.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(sum_paid: Option<f64>) -> PageMeta {
        PageMeta {
            total_count: 35,
            total_pages: 4,
            current_page: 2,
            page_size: 10,
            sum_paid,
        }
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate_string("Conceição", 9), "Conceição");
        assert_eq!(truncate_string("Conceição", 6), "Con...");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(&Some(3), "--"), "3");
        assert_eq!(format_optional::<i64>(&None, "--"), "--");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.5), "R$ 1234,50");
    }

    #[test]
    fn test_page_footer() {
        assert_eq!(
            page_footer(&meta(None)),
            "Page 2 of 4 (35 record(s), 10 per page)"
        );
        assert!(page_footer(&meta(Some(80.0))).ends_with("| Total paid: R$ 80,00"));
    }

    #[test]
    fn test_page_navigation() {
        assert_eq!(
            page_navigation(&meta(None)).as_deref(),
            Some("previous: --page 1 | next: --page 3")
        );

        let first = PageMeta {
            current_page: 1,
            ..meta(None)
        };
        assert_eq!(page_navigation(&first).as_deref(), Some("next: --page 2"));

        let past_end = PageMeta {
            current_page: 9,
            ..meta(None)
        };
        assert_eq!(page_navigation(&past_end).as_deref(), Some("previous: --page 3"));

        let single = PageMeta {
            total_count: 3,
            total_pages: 1,
            current_page: 1,
            page_size: 10,
            sum_paid: None,
        };
        assert_eq!(page_navigation(&single), None);
    }
}
