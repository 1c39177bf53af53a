use chrono::NaiveDate;

/// Number of words shown in a listing excerpt
pub const EXCERPT_WORDS: usize = 25;

/// First `max_words` space-separated words, with `...` appended when the
/// text was cut
pub fn excerpt(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split(' ').collect();
    if words.len() <= max_words {
        return text.to_string();
    }
    format!("{}...", words[..max_words].join(" "))
}

/// Long-form date, e.g. `January 1, 2024`
pub fn format_published(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `H:MM:SS` for an hour or more, `M:SS` otherwise
pub fn format_duration(duration_ms: u64) -> String {
    let total_secs = duration_ms / 1000;
    let (hours, minutes, seconds) = (total_secs / 3600, (total_secs % 3600) / 60, total_secs % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_keeps_short_text() {
        assert_eq!(excerpt("a few words", 25), "a few words");
        assert_eq!(excerpt("", 25), "");
    }

    #[test]
    fn excerpt_truncates_long_text() {
        let text = (1..=30).map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
        let expected = (1..=25).map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
        assert_eq!(excerpt(&text, EXCERPT_WORDS), format!("{expected}..."));
    }

    #[test]
    fn excerpt_at_exact_limit_has_no_ellipsis() {
        assert_eq!(excerpt("one two three", 3), "one two three");
    }

    #[test]
    fn formats_long_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(format_published(date), "January 1, 2024");
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(65_000), "1:05");
        assert_eq!(format_duration(3_723_999), "1:02:03");
    }
}
