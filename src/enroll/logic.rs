// classdb-tools/src/enroll/logic.rs
use regex::Regex;
use std::sync::LazyLock;

// GitHub usernames: 1-39 characters, ASCII letters, digits, or hyphens.
static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]{1,39}$").expect("username pattern is valid"));

/// What to do with one line of the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    /// Blank line or `#` comment, nothing to do.
    Skip,
    /// Fails username validation; warn and move on.
    Invalid(String),
    /// Valid username, normalized to lowercase and ready to insert.
    Insert(String),
}

/// Classifies one raw input line: trim, drop blanks/comments, validate
/// against the username pattern, normalize to lowercase.
pub fn classify_line(raw: &str) -> LineAction {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return LineAction::Skip;
    }
    if !USERNAME_PATTERN.is_match(line) {
        return LineAction::Invalid(line.to_string());
    }
    LineAction::Insert(line.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        assert_eq!(classify_line(""), LineAction::Skip);
        assert_eq!(classify_line("   "), LineAction::Skip);
        assert_eq!(classify_line("\t"), LineAction::Skip);
        assert_eq!(classify_line("# roster for fall term"), LineAction::Skip);
        assert_eq!(classify_line("  # indented comment"), LineAction::Skip);
    }

    #[test]
    fn test_valid_usernames_are_lowercased() {
        assert_eq!(
            classify_line("Alice"),
            LineAction::Insert("alice".to_string())
        );
        assert_eq!(classify_line("bob"), LineAction::Insert("bob".to_string()));
        assert_eq!(
            classify_line("  Octo-Cat-99  "),
            LineAction::Insert("octo-cat-99".to_string())
        );
    }

    #[test]
    fn test_invalid_characters_are_flagged_not_fatal() {
        assert_eq!(
            classify_line("not_a_valid_name!"),
            LineAction::Invalid("not_a_valid_name!".to_string())
        );
        assert_eq!(
            classify_line("two words"),
            LineAction::Invalid("two words".to_string())
        );
        assert_eq!(
            classify_line("name@host"),
            LineAction::Invalid("name@host".to_string())
        );
    }

    #[test]
    fn test_length_limit_is_thirty_nine() {
        let max = "a".repeat(39);
        assert_eq!(classify_line(&max), LineAction::Insert(max.clone()));

        let too_long = "a".repeat(40);
        assert_eq!(classify_line(&too_long), LineAction::Invalid(too_long));
    }

    #[test]
    fn test_duplicate_case_variants_normalize_to_one_value() {
        assert_eq!(classify_line("Alice"), classify_line("ALICE"));
    }
}
