use super::*;

#[test]
fn parse_splits_into_flattened_view() {
    let parsed = parse("/a/x set foo=bar baz");
    assert_eq!(parsed.path_text("/a/x set foo=bar baz"), Some("/a/x"));
    assert_eq!(parsed.command_text("/a/x set foo=bar baz"), Some("set"));
    assert_eq!(parsed.pparam_texts("/a/x set foo=bar baz"), vec!["baz"]);
    let kw = parsed.kparams_parsed("/a/x set foo=bar baz");
    assert_eq!(kw.len(), 1);
    assert_eq!(kw[0].keyword, "foo");
    assert_eq!(kw[0].value, "bar");
}

#[test]
fn parse_is_pure_and_deterministic() {
    let a = parse("greet world loud=true");
    let b = parse("greet world loud=true");
    assert_eq!(a, b);
}

#[test]
fn parse_empty_line_is_no_actionable_command() {
    let parsed = parse("");
    assert!(parsed.tokens.is_empty());
    assert!(parsed.path.is_none());
    assert!(parsed.command.is_none());
}

#[test]
fn parse_surfaces_unparsed_tail_offset() {
    let parsed = parse("cd key===bad");
    assert_eq!(parsed.command_text("cd key===bad"), Some("cd"));
    assert_eq!(parsed.unparsed_offset, Some(3));
}

#[test]
fn token_at_locates_cursor_span() {
    let input = "/a/x cd";
    let parsed = parse(input);
    let found = parsed.token_at(5, 7).unwrap();
    assert_eq!(found.text(input), "cd");
}
