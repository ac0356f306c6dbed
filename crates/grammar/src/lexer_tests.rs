use super::*;

fn kinds(input: &str) -> (Vec<TokenKind>, Option<usize>) {
    let (tokens, unparsed) = tokenize(input);
    (tokens.into_iter().map(|t| t.kind).collect(), unparsed)
}

#[test]
fn bare_command_with_no_path() {
    let (kinds, unparsed) = kinds("ls");
    assert_eq!(kinds, vec![TokenKind::Command]);
    assert_eq!(unparsed, None);
}

#[test]
fn path_then_command() {
    let (kinds, _) = kinds("/a/x cd");
    assert_eq!(kinds, vec![TokenKind::Path, TokenKind::Command]);
}

#[test]
fn path_only_no_command() {
    let (kinds, _) = kinds("/a/*");
    assert_eq!(kinds, vec![TokenKind::Path]);
}

#[test]
fn command_with_positional_and_keyword_params() {
    let (tokens, _) = tokenize("greet world loud=true");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].kind, TokenKind::Command);
    assert_eq!(tokens[1].kind, TokenKind::PParam);
    assert!(matches!(tokens[2].kind, TokenKind::KParam { .. }));
}

#[test]
fn kparam_keyword_end_points_at_equals_sign() {
    let (tokens, _) = tokenize("greet loud=true");
    let kparam = &tokens[1];
    assert_eq!(kparam.text("greet loud=true"), "loud=true");
    match kparam.kind {
        TokenKind::KParam { keyword_end } => {
            assert_eq!(&"greet loud=true"[keyword_end..keyword_end + 1], "=");
        }
        ref other => panic!("expected kparam, got {other:?}"),
    }
}

#[test]
fn bookmark_reference_is_a_path() {
    let (kinds, _) = kinds("@here cd");
    assert_eq!(kinds, vec![TokenKind::Path, TokenKind::Command]);
}

#[test]
fn dotdot_is_a_path() {
    let (kinds, _) = kinds(".. ls");
    assert_eq!(kinds, vec![TokenKind::Path, TokenKind::Command]);
}

#[test]
fn unparseable_tail_reports_its_offset() {
    let (tokens, unparsed) = tokenize("set key===bad");
    assert_eq!(tokens, vec![Token::new(TokenKind::Command, Span::new(0, 3))]);
    assert_eq!(unparsed, Some(4));
}

#[test]
fn empty_line_yields_no_tokens() {
    let (tokens, unparsed) = tokenize("");
    assert!(tokens.is_empty());
    assert_eq!(unparsed, None);
}

#[test]
fn whitespace_only_yields_no_tokens() {
    let (tokens, unparsed) = tokenize("   \t  ");
    assert!(tokens.is_empty());
    assert_eq!(unparsed, None);
}

#[test]
fn tokenize_is_deterministic() {
    let a = tokenize("/a/x set foo=bar baz");
    let b = tokenize("/a/x set foo=bar baz");
    assert_eq!(a, b);
}

#[test]
fn pparam_charset_allows_punctuation() {
    let (kinds, unparsed) = kinds("cmd foo.bar+baz<1>~2:3%4-5");
    assert_eq!(kinds, vec![TokenKind::Command, TokenKind::PParam]);
    assert_eq!(unparsed, None);
}

#[test]
fn kparam_split_requires_nonempty_keyword() {
    assert_eq!(kparam_split("=value"), None);
    assert_eq!(kparam_split("key="), Some(3));
    assert_eq!(kparam_split("ke-y=value"), Some(4));
}
