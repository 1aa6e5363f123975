use super::*;

#[test]
fn clean_routine_passes() {
    let src = "fn animate(ctx, w, h, data, p) { ctx.fill_rect(0, 0, w * p, 10); }";
    assert_eq!(scan(src), Ok(()));
}

#[test]
fn network_token_is_denied() {
    let src = "fn animate(ctx, w, h, data, p) { fetch(\"http://x\"); }";
    assert_eq!(scan(src), Err(CompileError::Denied { token: "fetch(" }));
}

#[test]
fn every_listed_token_is_denied() {
    for token in DENY_LIST {
        let src = format!("fn animate(ctx, w, h, data, p) {{ {token} }}");
        assert!(matches!(scan(&src), Err(CompileError::Denied { .. })), "{token} passed the scan");
    }
}

#[test]
fn tokens_inside_strings_and_comments_still_count() {
    assert!(scan("// never eval anything\nfn animate(a, b, c, d, e) {}").is_err());
    assert!(scan("fn animate(a, b, c, d, e) { let s = \"window.open\"; }").is_err());
}

#[test]
fn first_match_in_list_order_is_reported() {
    let src = "setTimeout( fetch(";
    assert_eq!(scan(src), Err(CompileError::Denied { token: "fetch(" }));
}

#[test]
fn tokens_inside_longer_words_pass() {
    let src = "// evaluate the easing; important: reimport nothing\nfn animate(a, b, c, d, e) { let recall = 1; let my_window = 2; }";
    assert_eq!(scan(src), Ok(()));
}

#[test]
fn tokens_at_word_boundaries_are_denied() {
    assert_eq!(scan("x = eval(\"1\")"), Err(CompileError::Denied { token: "eval" }));
    assert_eq!(scan("import \"fs\" as fs;"), Err(CompileError::Denied { token: "import" }));
    assert_eq!(scan("ctx.call(f)"), Err(CompileError::Denied { token: "call(" }));
}
