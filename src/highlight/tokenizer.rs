//! Line tokenizer for snippet highlighting
//!
//! Splits one line of JavaScript-flavoured snippet text into [`Token`]s tagged with a
//! [`TokenKind`]. The concatenated token text always reproduces the input line; the
//! single exception is the empty line, which yields one [`PLACEHOLDER`] token so the
//! rendered row keeps its height.

use regex::Regex;
use std::sync::OnceLock;

/// Text emitted for an empty line (a non-breaking space)
pub const PLACEHOLDER: &str = "\u{00A0}";

/// Classification of a token, in overlap priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    Keyword,
    Function,
    String,
    Comment,
    Default,
}

impl TokenKind {
    /// Rank used to break ties between matches starting at the same offset.
    /// Lower ranks win.
    pub fn priority(self) -> u8 {
        match self {
            TokenKind::Keyword => 0,
            TokenKind::Function => 1,
            TokenKind::String => 2,
            TokenKind::Comment => 3,
            TokenKind::Default => 4,
        }
    }
}

/// A classified slice of one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

impl<'a> Token<'a> {
    fn new(text: &'a str, kind: TokenKind) -> Self {
        Token { text, kind }
    }

    /// Whether this token stands in for an empty line
    pub fn is_placeholder(&self) -> bool {
        self.text == PLACEHOLDER && self.kind == TokenKind::Default
    }
}

/// A span found by a single classifier.
///
/// `start`/`end` are byte offsets into the line, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Match<'a> {
    start: usize,
    end: usize,
    text: &'a str,
    kind: TokenKind,
}

static KEYWORD_REGEX: OnceLock<Regex> = OnceLock::new();
static FUNCTION_REGEX: OnceLock<Regex> = OnceLock::new();
static STRING_REGEX: OnceLock<Regex> = OnceLock::new();
static COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();

fn keyword_regex() -> &'static Regex {
    KEYWORD_REGEX.get_or_init(|| {
        // `await` is intentionally absent: it renders as plain text
        Regex::new(
            r"\b(import|from|const|let|var|async|function|return|try|catch|if|else)\b",
        )
        .expect("Failed to compile keyword regex")
    })
}

fn function_regex() -> &'static Regex {
    FUNCTION_REGEX.get_or_init(|| {
        Regex::new(
            r"(?x)
            \b(
                getAuth | getFirestore | collection | addDoc | getDocs | doc
              | updateDoc | deleteDoc | onSnapshot | query | orderBy
              | createUserWithEmailAndPassword | signInWithEmailAndPassword
              | signOut | onAuthStateChanged | initializeApp | serverTimestamp
            )\b
            ",
        )
        .expect("Failed to compile function regex")
    })
}

fn string_regex() -> &'static Regex {
    // Opening and closing quote characters are not required to agree
    STRING_REGEX
        .get_or_init(|| Regex::new(r#"['"`][^'"`]*['"`]"#).expect("Failed to compile string regex"))
}

fn comment_regex() -> &'static Regex {
    COMMENT_REGEX.get_or_init(|| Regex::new(r"//.*").expect("Failed to compile comment regex"))
}

/// Classifiers in priority order
fn classifiers() -> [(&'static Regex, TokenKind); 4] {
    [
        (keyword_regex(), TokenKind::Keyword),
        (function_regex(), TokenKind::Function),
        (string_regex(), TokenKind::String),
        (comment_regex(), TokenKind::Comment),
    ]
}

/// Collect every classifier's matches, ordered by `(start, priority)`
fn pooled_matches(line: &str) -> Vec<Match<'_>> {
    let mut matches: Vec<Match<'_>> = classifiers()
        .into_iter()
        .flat_map(|(re, kind)| {
            re.find_iter(line).map(move |m| Match {
                start: m.start(),
                end: m.end(),
                text: m.as_str(),
                kind,
            })
        })
        .collect();

    matches.sort_by_key(|m| (m.start, m.kind.priority()));
    matches
}

/// Tokenize a single line (no newline characters).
///
/// Matches are accepted greedily from the left: a match is taken only if it starts
/// at or after the end of the previously accepted one. Gaps become
/// [`TokenKind::Default`] tokens.
pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    if line.is_empty() {
        return vec![Token::new(PLACEHOLDER, TokenKind::Default)];
    }

    let mut tokens = Vec::new();
    let mut cursor = 0;

    for m in pooled_matches(line) {
        if m.start < cursor {
            continue;
        }
        if m.start > cursor {
            tokens.push(Token::new(&line[cursor..m.start], TokenKind::Default));
        }
        tokens.push(Token::new(m.text, m.kind));
        cursor = m.end;
    }

    if cursor < line.len() {
        tokens.push(Token::new(&line[cursor..], TokenKind::Default));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds<'a>(tokens: &[Token<'a>]) -> Vec<(&'a str, TokenKind)> {
        tokens.iter().map(|t| (t.text, t.kind)).collect()
    }

    #[test]
    fn test_keyword_and_gaps() {
        let tokens = tokenize("const app = initializeApp(config)");
        assert_eq!(
            kinds(&tokens),
            vec![
                ("const", TokenKind::Keyword),
                (" app = ", TokenKind::Default),
                ("initializeApp", TokenKind::Function),
                ("(config)", TokenKind::Default),
            ]
        );
    }

    #[test]
    fn test_comment_swallows_keyword() {
        let tokens = tokenize("const x = 1 // return");
        assert_eq!(
            kinds(&tokens),
            vec![
                ("const", TokenKind::Keyword),
                (" x = 1 ", TokenKind::Default),
                ("// return", TokenKind::Comment),
            ]
        );
    }

    #[test]
    fn test_string_claims_inner_keyword() {
        let tokens = tokenize(r#"const s = "return value""#);
        assert_eq!(
            kinds(&tokens),
            vec![
                ("const", TokenKind::Keyword),
                (" s = ", TokenKind::Default),
                ("\"return value\"", TokenKind::String),
            ]
        );
    }

    #[test]
    fn test_await_is_not_a_keyword() {
        let tokens = tokenize("await addDoc(col, data)");
        assert_eq!(tokens[0], Token::new("await ", TokenKind::Default));
        assert_eq!(tokens[1], Token::new("addDoc", TokenKind::Function));
        assert_eq!(tokens[2], Token::new("(col, data)", TokenKind::Default));
    }

    #[test]
    fn test_keyword_inside_identifier_is_ignored() {
        let tokens = tokenize("imported");
        assert_eq!(kinds(&tokens), vec![("imported", TokenKind::Default)]);
    }

    #[test]
    fn test_mixed_quotes_close_string() {
        // The string classifier does not require matching quote characters
        let tokens = tokenize(r#"x = 'a" + b"#);
        assert_eq!(tokens[1], Token::new("'a\"", TokenKind::String));
    }

    #[test]
    fn test_empty_line_placeholder() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_placeholder());
    }

    #[test]
    fn test_whitespace_line_single_token() {
        let tokens = tokenize("    ");
        assert_eq!(tokens, vec![Token::new("    ", TokenKind::Default)]);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(TokenKind::Keyword.priority() < TokenKind::Function.priority());
        assert!(TokenKind::Function.priority() < TokenKind::String.priority());
        assert!(TokenKind::String.priority() < TokenKind::Comment.priority());
        assert!(TokenKind::Comment.priority() < TokenKind::Default.priority());
    }

    #[test]
    fn test_comment_match_starting_inside_string_is_dropped() {
        // The comment classifier's only match begins at the `//` inside the URL,
        // which the string has already claimed, so the trailing comment stays plain.
        let tokens = tokenize(r#"const url = "http://x" // note"#);
        assert_eq!(
            kinds(&tokens),
            vec![
                ("const", TokenKind::Keyword),
                (" url = ", TokenKind::Default),
                ("\"http://x\"", TokenKind::String),
                (" // note", TokenKind::Default),
            ]
        );
    }
}
