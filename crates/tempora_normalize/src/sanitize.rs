//! Character sanitizing and the two cleaning passes tried when the raw value
//! matches nothing.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

const CIRCA: &str = r"(?:(?:circa|ca|c)\s+|(?:ca|c)\.\s*)";

static STARTING_TEXT_UNTIL_FIRST_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^:]*:\s*(.+)$").unwrap());
static STARTING_PARENTHESES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\([^()]*\)\s*)+([^(\s].*)$").unwrap());
static SQUARE_BRACKETS_AND_CIRCA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^\[\s*{CIRCA}([^\[\]]+?)\s*\]$")).unwrap()
});
static CIRCA_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)^{CIRCA}([^\s.].*)$")).unwrap());
static SQUARE_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\s*([^\[\]]+?)\s*\]$").unwrap());
static PARENTHESES_AND_CIRCA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^\(\s*{CIRCA}([^()]+?)\s*\)$")).unwrap()
});
static PARENTHESES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\s*([^()]+?)\s*\)$").unwrap());
static TRAILING_QUESTION_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\[\]]+\?)\]$").unwrap());
static TRAILING_PARENTHESIS_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+\([^()]*\)$").unwrap());
static TRAILING_BRACKET_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\[[^\[\]]*\]$").unwrap());
static ENDING_DOT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.+?)\s*\.$").unwrap());

/// Trims, turns no-break spaces into spaces and en dashes into hyphens.
pub fn sanitize_characters(input: &str) -> String {
    input.trim().replace('\u{00a0}', " ").replace('\u{2013}', "-")
}

/// A rewrite applied to a value that matched nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleanOperation {
    /// `Date: 1946`
    StartingTextUntilFirstColon,
    /// `(printed) 1946`
    StartingParentheses,
    /// `1946 (printed)`
    TrailingParenthesisText,
    /// `[ca. 1946]`
    SquareBracketsAndCirca,
    /// `[1946]`
    SquareBrackets,
    /// `ca. 1946`, `ca 1946`, `circa 1946`, `c. 1946`, `c 1946`
    Circa,
    /// `1651?]`
    TrailingQuestionBracket,
    /// `1946.`
    EndingDot,
    /// `1946 [printed]`, `1946[printed]`
    TrailingBracketText,
    /// `(circa 1946)`
    ParenthesesAndCirca,
    /// `(1946)`
    Parentheses,
}

impl CleanOperation {
    /// Tried on the sanitized value; the first that applies wins.
    pub const FIRST_PASS: [CleanOperation; 8] = [
        CleanOperation::StartingTextUntilFirstColon,
        CleanOperation::StartingParentheses,
        CleanOperation::TrailingParenthesisText,
        CleanOperation::SquareBracketsAndCirca,
        CleanOperation::SquareBrackets,
        CleanOperation::Circa,
        CleanOperation::TrailingQuestionBracket,
        CleanOperation::EndingDot,
    ];

    /// Tried on the first pass's output, or on the sanitized value when the
    /// first pass changed nothing.
    pub const SECOND_PASS: [CleanOperation; 3] = [
        CleanOperation::TrailingBracketText,
        CleanOperation::ParenthesesAndCirca,
        CleanOperation::Parentheses,
    ];

    /// The single pass used for generic properties.
    pub const GENERIC_PROPERTY: [CleanOperation; 2] =
        [CleanOperation::SquareBrackets, CleanOperation::Parentheses];

    /// Operations that mark the result approximate.
    pub fn is_approximate(self) -> bool {
        matches!(
            self,
            CleanOperation::SquareBracketsAndCirca
                | CleanOperation::Circa
                | CleanOperation::ParenthesesAndCirca
        )
    }

    pub fn id(self) -> &'static str {
        match self {
            CleanOperation::StartingTextUntilFirstColon => "starting-text-until-first-colon",
            CleanOperation::StartingParentheses => "starting-parentheses",
            CleanOperation::TrailingParenthesisText => "trailing-parenthesis-text",
            CleanOperation::SquareBracketsAndCirca => "square-brackets-and-circa",
            CleanOperation::SquareBrackets => "square-brackets",
            CleanOperation::Circa => "circa",
            CleanOperation::TrailingQuestionBracket => "trailing-question-bracket",
            CleanOperation::EndingDot => "ending-dot",
            CleanOperation::TrailingBracketText => "trailing-bracket-text",
            CleanOperation::ParenthesesAndCirca => "parentheses-and-circa",
            CleanOperation::Parentheses => "parentheses",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            CleanOperation::StartingTextUntilFirstColon => &STARTING_TEXT_UNTIL_FIRST_COLON,
            CleanOperation::StartingParentheses => &STARTING_PARENTHESES,
            CleanOperation::TrailingParenthesisText => &TRAILING_PARENTHESIS_TEXT,
            CleanOperation::SquareBracketsAndCirca => &SQUARE_BRACKETS_AND_CIRCA,
            CleanOperation::SquareBrackets => &SQUARE_BRACKETS,
            CleanOperation::Circa => &CIRCA_PREFIX,
            CleanOperation::TrailingQuestionBracket => &TRAILING_QUESTION_BRACKET,
            CleanOperation::EndingDot => &ENDING_DOT,
            CleanOperation::TrailingBracketText => &TRAILING_BRACKET_TEXT,
            CleanOperation::ParenthesesAndCirca => &PARENTHESES_AND_CIRCA,
            CleanOperation::Parentheses => &PARENTHESES,
        }
    }

    /// The cleaned value, or `None` if this operation does not apply.
    pub fn apply(self, value: &str) -> Option<String> {
        let captures = self.pattern().captures(value)?;
        let cleaned = captures.get(1)?.as_str().trim();
        (!cleaned.is_empty()).then(|| cleaned.to_string())
    }
}

impl fmt::Display for CleanOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cleaned {
    pub value: String,
    pub operation: CleanOperation,
}

/// Applies the first operation in `operations` that changes `value`.
pub fn clean(value: &str, operations: &[CleanOperation]) -> Option<Cleaned> {
    operations.iter().find_map(|&operation| {
        operation
            .apply(value)
            .filter(|cleaned| cleaned != value)
            .map(|value| Cleaned { value, operation })
    })
}
