use regex::Regex;

/// Cuts the first bin code out of `text`, returning the remaining text and the code.
pub fn remove_bin_code(text: &str, pattern: &Regex) -> (String, Option<String>) {
    match pattern.find(text) {
        Some(m) => {
            let mut remaining = String::with_capacity(text.len() - m.len());
            remaining.push_str(&text[..m.start()]);
            remaining.push_str(&text[m.end()..]);
            (remaining, Some(m.as_str().to_string()))
        }
        None => (text.to_string(), None),
    }
}

pub fn clean_description(text: &str, strip_phrase: &str) -> String {
    let stripped = if strip_phrase.is_empty() {
        text.to_string()
    } else {
        text.replace(strip_phrase, "")
    };

    stripped
        .trim_matches(|c: char| c == ',' || c == '.' || c.is_whitespace())
        .to_string()
}

/// First comma segment, plus the second one when the first is shorter than `min_length` characters.
pub fn short_description(description: &str, min_length: usize) -> String {
    let mut segments = description.split(',');
    let first = segments.next().unwrap_or_default().trim();
    let mut short = first.to_string();

    if first.chars().count() < min_length {
        if let Some(second) = segments.next() {
            short.push_str(", ");
            short.push_str(second.trim());
        }
    }

    short
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin_pattern() -> Regex {
        Regex::new(r"[A-Z]-[0-9]{3}-[0-9]{3}-[0-9]{2}-[0-9]{2}").unwrap()
    }

    #[test]
    fn test_remove_bin_code() {
        let (text, code) = remove_bin_code("BOLT, HEX HEAD A-123-456-78-90 ZINC", &bin_pattern());
        assert_eq!(text, "BOLT, HEX HEAD  ZINC");
        assert_eq!(code.as_deref(), Some("A-123-456-78-90"));
    }

    #[test]
    fn test_remove_bin_code_first_occurrence_only() {
        let (text, code) =
            remove_bin_code("A-111-222-33-44 SEAL B-555-666-77-88", &bin_pattern());
        assert_eq!(text, " SEAL B-555-666-77-88");
        assert_eq!(code.as_deref(), Some("A-111-222-33-44"));
    }

    #[test]
    fn test_remove_bin_code_without_match() {
        let (text, code) = remove_bin_code("a-123-456-78-90 LOWERCASE", &bin_pattern());
        assert_eq!(text, "a-123-456-78-90 LOWERCASE");
        assert!(code.is_none());
    }

    #[test]
    fn test_clean_description() {
        assert_eq!(
            clean_description(" ., FILTER, AIR OEM ONLY, ., ", "OEM ONLY"),
            "FILTER, AIR"
        );
        assert_eq!(clean_description("VALVE.", ""), "VALVE");
    }

    #[test]
    fn test_short_description_appends_second_segment() {
        assert_eq!(short_description("LAMP, MINIATURE, 12V", 15), "LAMP, MINIATURE");
    }

    #[test]
    fn test_short_description_keeps_long_first_segment() {
        assert_eq!(
            short_description("HEAVY DUTY BRAKE ASSEMBLY, FRONT", 15),
            "HEAVY DUTY BRAKE ASSEMBLY"
        );
    }

    #[test]
    fn test_short_description_single_segment() {
        assert_eq!(short_description("  GROMMET  ", 15), "GROMMET");
        assert_eq!(short_description("", 15), "");
    }
}
