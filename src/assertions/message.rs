//! Expectations on error messages.

use std::fmt;

use regex::Regex;

/// What an error message must look like.
#[derive(Debug, Clone, Default)]
pub enum ExpectedMessage {
    /// Any message is accepted.
    #[default]
    Any,
    /// The message must contain this text.
    Substring(String),
    /// The message must match this pattern.
    Pattern(Regex),
}

impl ExpectedMessage {
    /// Check a message against the expectation.
    #[must_use]
    pub fn matches(&self, message: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Substring(expected) => message.contains(expected.as_str()),
            Self::Pattern(pattern) => pattern.is_match(message),
        }
    }

    /// Describe why `message` did not satisfy the expectation.
    #[must_use]
    pub fn describe_mismatch(&self, message: &str) -> String {
        match self {
            Self::Any => format!("Unexpected mismatch for \"{message}\""),
            Self::Substring(expected) => {
                format!("Expected error message to include \"{expected}\", got \"{message}\"")
            }
            Self::Pattern(pattern) => {
                format!("Expected error message to match /{pattern}/, got \"{message}\"")
            }
        }
    }
}

impl fmt::Display for ExpectedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any message"),
            Self::Substring(expected) => write!(f, "message including \"{expected}\""),
            Self::Pattern(pattern) => write!(f, "message matching /{pattern}/"),
        }
    }
}

impl From<&str> for ExpectedMessage {
    fn from(expected: &str) -> Self {
        Self::Substring(expected.to_string())
    }
}

impl From<String> for ExpectedMessage {
    fn from(expected: String) -> Self {
        Self::Substring(expected)
    }
}

impl From<Regex> for ExpectedMessage {
    fn from(pattern: Regex) -> Self {
        Self::Pattern(pattern)
    }
}

impl<T: Into<ExpectedMessage>> From<Option<T>> for ExpectedMessage {
    fn from(expected: Option<T>) -> Self {
        expected.map_or(Self::Any, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring() {
        let expected = ExpectedMessage::from("boo");
        assert!(expected.matches("boom"));
        assert!(!expected.matches("bam"));
        assert_eq!(
            expected.describe_mismatch("bam"),
            "Expected error message to include \"boo\", got \"bam\""
        );
    }

    #[test]
    fn test_pattern() {
        let expected = ExpectedMessage::from(Regex::new(r"^code \d+$").unwrap());
        assert!(expected.matches("code 42"));
        assert!(!expected.matches("code x"));
        assert_eq!(
            expected.describe_mismatch("code x"),
            "Expected error message to match /^code \\d+$/, got \"code x\""
        );
    }

    #[test]
    fn test_none_accepts_anything() {
        let expected = ExpectedMessage::from(None::<&str>);
        assert!(expected.matches(""));
        assert_eq!(expected.to_string(), "any message");
    }
}
