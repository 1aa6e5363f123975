use super::*;

#[test]
fn plain_routine_passes_through() {
    let src = "fn animate(ctx, w, h, data, p) {\n    ctx.fill_rect(0, 0, 1, 1);\n}";
    assert_eq!(extract_routine(src).unwrap(), src);
}

#[test]
fn fences_and_prose_are_dropped() {
    let raw = "Here is your animation:\n```rhai\nfn animate(ctx, w, h, data, p) {\n}\n```\nEnjoy!";
    assert_eq!(extract_routine(raw).unwrap(), "fn animate(ctx, w, h, data, p) {\n}\nEnjoy!");
}

#[test]
fn extra_spacing_is_accepted() {
    let raw = "fn   animate (ctx, w, h, data, p) {}";
    assert_eq!(extract_routine(raw).unwrap(), raw);
}

#[test]
fn helpers_before_entry_point_are_cut() {
    let raw = "fn lerp(a, b, t) { a + (b - a) * t }\nfn animate(ctx, w, h, d, p) { }";
    assert_eq!(extract_routine(raw).unwrap(), "fn animate(ctx, w, h, d, p) { }");
}

#[test]
fn missing_entry_point_is_rejected() {
    assert_eq!(extract_routine("fn draw(ctx) {}"), Err(CompileError::MissingEntryPoint));
    assert_eq!(extract_routine(""), Err(CompileError::MissingEntryPoint));
}

#[test]
fn similar_names_do_not_match() {
    assert_eq!(extract_routine("fn animated(ctx) {}"), Err(CompileError::MissingEntryPoint));
    assert_eq!(extract_routine("fnanimate(ctx) {}"), Err(CompileError::MissingEntryPoint));
    assert_eq!(extract_routine("xfn animate(ctx) {}"), Err(CompileError::MissingEntryPoint));
}

#[test]
fn stroke_usage_detection() {
    assert!(reads_strokes("for s in frame_data.strokes {}"));
    assert!(reads_strokes("let s = frame_data[\"strokes\"];"));
    assert!(!reads_strokes("ctx.fill_rect(0, 0, 10, 10);"));
}
