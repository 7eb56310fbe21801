// Integration tests for snippet highlighting

use spojen::highlight::{tokenize, TokenKind, PLACEHOLDER};
use spojen::snippets::{snippet, SnippetKey};

fn kinds(line: &str) -> Vec<(&str, TokenKind)> {
    tokenize(line).into_iter().map(|t| (t.text, t.kind)).collect()
}

#[test]
fn test_every_snippet_line_round_trips() {
    for key in SnippetKey::ALL {
        for line in snippet(key).split('\n') {
            let tokens = tokenize(line);
            assert!(!tokens.is_empty(), "no tokens for {:?} line {:?}", key, line);

            let joined: String = tokens.iter().map(|t| t.text).collect();
            if line.is_empty() {
                assert_eq!(joined, PLACEHOLDER);
            } else {
                assert_eq!(joined, line, "{:?}", key);
                assert!(tokens.iter().all(|t| !t.text.is_empty()));
            }
        }
    }
}

#[test]
fn test_default_tokens_fill_gaps_only() {
    // Two default tokens are never adjacent: gaps are emitted as one span
    for key in SnippetKey::ALL {
        for line in snippet(key).split('\n') {
            let tokens = tokenize(line);
            for pair in tokens.windows(2) {
                assert!(
                    !(pair[0].kind == TokenKind::Default && pair[1].kind == TokenKind::Default),
                    "adjacent default tokens in {:?}",
                    line
                );
            }
        }
    }
}

const AWKWARD_LINES: &[&str] = &[
    "",
    " ",
    "\t\t",
    "čćž const đ = 'šđ' // komentar ž",
    "数据 return 値",
    r#"const s = "open"#,
    r#"const s = 'mixed""#,
    r#""a // b" // real comment"#,
    "doc.doc",
    "getDocs(getDocs(doc))",
    "constant lets important",
    "//",
    "``''\"\"",
    "if(x){return}else{try{}catch(e){}}",
    "🔥 addDoc 🔥",
];

#[test]
fn test_awkward_lines_round_trip() {
    for line in AWKWARD_LINES {
        let tokens = tokenize(line);
        assert!(!tokens.is_empty(), "no tokens for {:?}", line);

        let joined: String = tokens.iter().map(|t| t.text).collect();
        if line.is_empty() {
            assert_eq!(joined, PLACEHOLDER);
            continue;
        }
        assert_eq!(joined, *line);
        assert!(
            tokens.iter().all(|t| !t.text.is_empty()),
            "empty token in {:?}",
            line
        );
        for pair in tokens.windows(2) {
            assert!(
                !(pair[0].kind == TokenKind::Default && pair[1].kind == TokenKind::Default),
                "adjacent default tokens in {:?}",
                line
            );
        }
    }
}

#[test]
fn test_back_to_back_functions() {
    assert_eq!(
        kinds("doc.doc"),
        vec![
            ("doc", TokenKind::Function),
            (".", TokenKind::Default),
            ("doc", TokenKind::Function),
        ]
    );
}

#[test]
fn test_whitespace_only_line_is_one_token() {
    assert_eq!(kinds("\t\t"), vec![("\t\t", TokenKind::Default)]);
}

#[test]
fn test_unterminated_quote_is_plain_text() {
    assert_eq!(
        kinds(r#"const s = "open"#),
        vec![("const", TokenKind::Keyword), (r#" s = "open"#, TokenKind::Default)]
    );
}

#[test]
fn test_keywords_need_word_boundaries() {
    assert_eq!(
        kinds("constant lets important"),
        vec![("constant lets important", TokenKind::Default)]
    );
}

#[test]
fn test_keyword_in_string_stays_string() {
    assert_eq!(
        kinds(r#"const s = "return value""#),
        vec![
            ("const", TokenKind::Keyword),
            (" s = ", TokenKind::Default),
            (r#""return value""#, TokenKind::String),
        ]
    );
}

#[test]
fn test_trailing_comment_claims_keyword() {
    assert_eq!(
        kinds("const x = 1 // return"),
        vec![
            ("const", TokenKind::Keyword),
            (" x = 1 ", TokenKind::Default),
            ("// return", TokenKind::Comment),
        ]
    );
}

#[test]
fn test_await_call() {
    let tokens = kinds("await addDoc(col, data)");
    assert_eq!(tokens[0], ("await ", TokenKind::Default));
    assert_eq!(tokens[1], ("addDoc", TokenKind::Function));
    assert_eq!(tokens[2], ("(col, data)", TokenKind::Default));
}

#[test]
fn test_snippets_highlight_their_api_calls() {
    let has = |key: SnippetKey, text: &str, kind: TokenKind| {
        snippet(key)
            .split('\n')
            .flat_map(tokenize)
            .any(|t| t.text == text && t.kind == kind)
    };

    assert!(has(SnippetKey::Init, "initializeApp", TokenKind::Function));
    assert!(has(SnippetKey::AddDoc, "addDoc", TokenKind::Function));
    assert!(has(SnippetKey::AddDoc, "serverTimestamp", TokenKind::Function));
    assert!(has(SnippetKey::OnSnapshot, "onSnapshot", TokenKind::Function));
    assert!(has(SnippetKey::Login, "signInWithEmailAndPassword", TokenKind::Function));
    assert!(has(SnippetKey::GetDocs, "\"messages\"", TokenKind::String));
    assert!(has(SnippetKey::Init, "'firebase/app'", TokenKind::String));
}
