#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::input::{Key, Modifiers, Pointer, Tool, WheelDelta};

// =============================================================
// Helpers
// =============================================================

fn engine() -> Engine {
    Engine::new(300, 200).unwrap()
}

fn samples(from: (f64, f64), to: (f64, f64), steps: u32) -> Vec<SamplePoint> {
    (0..=steps)
        .map(|i| {
            let t = f64::from(i) / f64::from(steps);
            SamplePoint { x: from.0 + (to.0 - from.0) * t, y: from.1 + (to.1 - from.1) * t, pressure: 0.5 }
        })
        .collect()
}

fn commit_line(e: &mut Engine, tool: StrokeTool, from: (f64, f64), to: (f64, f64), size: f64) -> StrokeId {
    let actions = e.commit(samples(from, to, 25), tool, "#112233", size, 1.0);
    committed_id(&actions)
}

fn committed_id(actions: &[Action]) -> StrokeId {
    actions
        .iter()
        .find_map(|a| match a {
            Action::StrokeCommitted(s) => Some(s.id()),
            _ => None,
        })
        .expect("no stroke committed")
}

fn no_modifiers() -> Modifiers {
    Modifiers::default()
}

fn ctrl_modifier() -> Modifiers {
    Modifiers { ctrl: true, ..Default::default() }
}

fn key(name: &str) -> Key {
    Key(name.to_owned())
}

fn has_action<F>(actions: &[Action], pred: F) -> bool
where
    F: Fn(&Action) -> bool,
{
    actions.iter().any(pred)
}

fn has_render_needed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::RenderNeeded))
}

fn has_committed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::StrokeCommitted(_)))
}

/// Pointer-down at `from`, one move per point, pointer-up at the last point.
fn gesture(e: &mut Engine, points: &[(f64, f64)], start_ms: f64, end_ms: f64) -> Vec<Action> {
    let (first, rest) = points.split_first().expect("gesture needs points");
    e.on_pointer_down(Pointer::new(first.0, first.1, start_ms));
    let step = if rest.is_empty() { 0.0 } else { (end_ms - start_ms) / rest.len() as f64 };
    for (i, p) in rest.iter().enumerate() {
        e.on_pointer_move(Pointer::new(p.0, p.1, start_ms + step * (i + 1) as f64));
    }
    let last = points[points.len() - 1];
    e.on_pointer_up(Pointer::new(last.0, last.1, end_ms))
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_engine_is_empty() {
    let e = engine();
    assert!(e.strokes().is_empty());
    assert!(e.selection().is_none());
    assert!(e.content().is_blank());
    assert!(e.halo().is_blank());
    assert_eq!(e.core.ui.tool, Tool::Pencil);
}

#[test]
fn zero_size_engine_is_rejected() {
    assert!(Engine::new(0, 100).is_err());
}

// =============================================================
// commit / add_text
// =============================================================

#[test]
fn commit_appends_and_renders() {
    let mut e = engine();
    let actions = e.commit(samples((20.0, 50.0), (200.0, 50.0), 20), StrokeTool::Brush, "#000", 14.0, 1.0);
    assert!(has_committed(&actions));
    assert!(has_render_needed(&actions));
    assert_eq!(e.strokes().len(), 1);
    assert!(e.content().alpha_at(100.0, 50.0) > 0);
}

#[test]
fn commit_single_point_is_kept() {
    let mut e = engine();
    let id = committed_id(&e.commit(vec![SamplePoint::new(40.0, 40.0, None)], StrokeTool::Pencil, "#000", 10.0, 1.0));
    assert_eq!(e.hit_test(40.0, 40.0), Some(id));
}

#[test]
fn add_text_appends_text_stroke() {
    let mut e = engine();
    let id = committed_id(&e.add_text("hi", 10.0, 10.0, 20.0, "#000"));
    assert!(e.strokes()[0].is_text());
    assert_eq!(e.hit_test(15.0, 15.0), Some(id));
    assert_eq!(e.hit_test(200.0, 150.0), None);
}

#[test]
fn committed_ids_are_unique() {
    let mut e = engine();
    let a = commit_line(&mut e, StrokeTool::Pencil, (10.0, 10.0), (50.0, 10.0), 4.0);
    let b = commit_line(&mut e, StrokeTool::Pencil, (10.0, 10.0), (50.0, 10.0), 4.0);
    assert_ne!(a, b);
}

// =============================================================
// undo
// =============================================================

#[test]
fn undo_on_empty_history_is_noop() {
    let mut e = engine();
    assert!(e.undo().is_empty());
}

#[test]
fn undo_walks_back_one_stroke_at_a_time() {
    let mut e = engine();
    let a = commit_line(&mut e, StrokeTool::Pencil, (10.0, 10.0), (50.0, 10.0), 4.0);
    let b = commit_line(&mut e, StrokeTool::Pencil, (10.0, 30.0), (50.0, 30.0), 4.0);
    assert!(has_action(&e.undo(), |x| *x == Action::StrokeDeleted { id: b }));
    assert!(has_action(&e.undo(), |x| *x == Action::StrokeDeleted { id: a }));
    assert!(e.strokes().is_empty());
    assert!(e.content().is_blank());
}

#[test]
fn undo_clears_selection_and_halo() {
    let mut e = engine();
    let a = commit_line(&mut e, StrokeTool::Brush, (20.0, 100.0), (200.0, 100.0), 14.0);
    commit_line(&mut e, StrokeTool::Brush, (20.0, 150.0), (200.0, 150.0), 14.0);
    e.select(Some(a));
    assert!(!e.halo().is_blank());
    let actions = e.undo();
    assert!(has_action(&actions, |x| *x == Action::SelectionChanged(None)));
    assert!(e.selection().is_none());
    assert!(e.halo().is_blank());
}

#[test]
fn undoing_eraser_restores_erased_stroke() {
    let mut e = engine();
    let a = commit_line(&mut e, StrokeTool::Pencil, (20.0, 100.0), (200.0, 100.0), 10.0);
    commit_line(&mut e, StrokeTool::Eraser, (110.0, 20.0), (110.0, 180.0), 30.0);
    assert_eq!(e.hit_test(110.0, 100.0), None);
    assert_eq!(e.content().alpha_at(110.0, 100.0), 0);
    e.undo();
    assert_eq!(e.hit_test(110.0, 100.0), Some(a));
    assert!(e.content().alpha_at(110.0, 100.0) > 0);
}

// =============================================================
// Hit priority / move
// =============================================================

#[test]
fn overlapping_strokes_hit_the_later_one() {
    let mut e = engine();
    commit_line(&mut e, StrokeTool::Brush, (20.0, 100.0), (200.0, 100.0), 14.0);
    let b = commit_line(&mut e, StrokeTool::Brush, (20.0, 100.0), (200.0, 100.0), 14.0);
    assert_eq!(e.hit_test(110.0, 100.0), Some(b));
}

#[test]
fn move_preserves_shape() {
    let mut e = engine();
    let id = commit_line(&mut e, StrokeTool::Brush, (20.0, 50.0), (120.0, 50.0), 14.0);
    assert_eq!(e.hit_test(70.0, 50.0), Some(id));
    let actions = e.move_stroke(id, 40.0, 80.0);
    assert!(has_action(&actions, |a| *a == Action::StrokeMoved { id, dx: 40.0, dy: 80.0 }));
    assert_eq!(e.hit_test(110.0, 130.0), Some(id));
    assert_eq!(e.hit_test(70.0, 50.0), None);
    assert_eq!(e.content().alpha_at(70.0, 50.0), 0);
}

#[test]
fn move_text_moves_anchor() {
    let mut e = engine();
    let id = committed_id(&e.add_text("hi", 10.0, 10.0, 20.0, "#000"));
    e.move_stroke(id, 100.0, 100.0);
    assert_eq!(e.hit_test(15.0, 15.0), None);
    assert_eq!(e.hit_test(115.0, 115.0), Some(id));
}

#[test]
fn move_unknown_stroke_is_noop() {
    let mut e = engine();
    assert!(e.move_stroke(Uuid::new_v4(), 1.0, 1.0).is_empty());
}

#[test]
fn move_selected_redraws_halo_at_new_position() {
    let mut e = engine();
    let id = commit_line(&mut e, StrokeTool::Brush, (20.0, 50.0), (120.0, 50.0), 14.0);
    e.select(Some(id));
    assert!(e.halo().alpha_at(70.0, 50.0) > 0);
    let actions = e.move_stroke(id, 0.0, 100.0);
    assert!(has_action(&actions, |a| matches!(a, Action::HaloNeeded)));
    assert_eq!(e.halo().alpha_at(70.0, 50.0), 0);
    assert!(e.halo().alpha_at(70.0, 150.0) > 0);
}

// =============================================================
// delete_selected / clear / load
// =============================================================

#[test]
fn delete_without_selection_is_noop() {
    let mut e = engine();
    commit_line(&mut e, StrokeTool::Pencil, (10.0, 10.0), (50.0, 10.0), 4.0);
    assert!(e.delete_selected().is_empty());
    assert_eq!(e.strokes().len(), 1);
}

#[test]
fn delete_selected_removes_from_middle() {
    let mut e = engine();
    let a = commit_line(&mut e, StrokeTool::Pencil, (10.0, 10.0), (50.0, 10.0), 4.0);
    let b = commit_line(&mut e, StrokeTool::Pencil, (10.0, 30.0), (50.0, 30.0), 4.0);
    let c = commit_line(&mut e, StrokeTool::Pencil, (10.0, 50.0), (50.0, 50.0), 4.0);
    e.select(Some(b));
    let actions = e.delete_selected();
    assert!(has_action(&actions, |x| *x == Action::StrokeDeleted { id: b }));
    let ids: Vec<_> = e.strokes().iter().map(CompletedStroke::id).collect();
    assert_eq!(ids, vec![a, c]);
    assert!(e.selection().is_none());
}

#[test]
fn deleting_eraser_restores_erased_stroke() {
    let mut e = engine();
    let a = commit_line(&mut e, StrokeTool::Pencil, (20.0, 100.0), (200.0, 100.0), 10.0);
    let eraser = commit_line(&mut e, StrokeTool::Eraser, (110.0, 20.0), (110.0, 180.0), 30.0);
    commit_line(&mut e, StrokeTool::Pencil, (20.0, 20.0), (60.0, 20.0), 4.0);
    e.core.ui.selected_id = Some(eraser);
    e.delete_selected();
    assert_eq!(e.hit_test(110.0, 100.0), Some(a));
}

#[test]
fn clear_empties_history_and_surfaces() {
    let mut e = engine();
    let id = commit_line(&mut e, StrokeTool::Brush, (20.0, 100.0), (200.0, 100.0), 14.0);
    e.select(Some(id));
    e.clear();
    assert!(e.strokes().is_empty());
    assert!(e.selection().is_none());
    assert!(e.content().is_blank());
    assert!(e.halo().is_blank());
}

#[test]
fn load_replaces_history_and_renders() {
    let mut e = engine();
    let old = commit_line(&mut e, StrokeTool::Pencil, (10.0, 10.0), (50.0, 10.0), 4.0);
    e.select(Some(old));
    let text: CompletedStroke = TextStroke::new(Uuid::new_v4(), "I", 100.0, 100.0, 16.0, "#000").into();
    let actions = e.load(vec![text.clone()]);
    assert!(has_action(&actions, |a| matches!(a, Action::HistoryReplaced)));
    assert_eq!(e.strokes(), &[text]);
    assert!(e.selection().is_none());
    assert!(e.content().alpha_at(104.0, 101.0) > 0);
}

#[test]
fn snapshot_is_png_of_content() {
    let mut e = engine();
    commit_line(&mut e, StrokeTool::Brush, (20.0, 100.0), (200.0, 100.0), 14.0);
    let png = e.snapshot().unwrap();
    let decoded = Surface::decode_png(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (300, 200));
    assert_eq!(decoded.alpha_at(100.0, 100.0), 255);
    assert_eq!(decoded.alpha_at(100.0, 20.0), 0);
}

#[test]
fn render_twice_is_identical() {
    let mut e = engine();
    commit_line(&mut e, StrokeTool::Brush, (20.0, 100.0), (200.0, 100.0), 14.0);
    commit_line(&mut e, StrokeTool::Highlighter, (20.0, 20.0), (200.0, 180.0), 22.0);
    commit_line(&mut e, StrokeTool::Eraser, (100.0, 20.0), (100.0, 180.0), 18.0);
    let first = e.content().clone();
    e.render();
    assert_eq!(&first, e.content());
}

// =============================================================
// Gestures: tap vs commit
// =============================================================

#[test]
fn small_quick_gesture_is_tap_not_commit() {
    let mut e = engine();
    let actions = gesture(&mut e, &[(100.0, 100.0), (104.0, 100.0)], 0.0, 150.0);
    assert!(!has_committed(&actions));
    assert!(e.strokes().is_empty());
}

#[test]
fn six_unit_gesture_commits() {
    let mut e = engine();
    let actions = gesture(&mut e, &[(100.0, 100.0), (106.0, 100.0)], 0.0, 150.0);
    assert!(has_committed(&actions));
    assert_eq!(e.strokes().len(), 1);
}

#[test]
fn slow_still_press_commits_a_dot() {
    let mut e = engine();
    let actions = gesture(&mut e, &[(100.0, 100.0)], 0.0, 400.0);
    assert!(has_committed(&actions));
    let CompletedStroke::Freehand(f) = &e.strokes()[0] else { panic!("expected freehand") };
    assert_eq!(f.points.len(), 1);
    assert_eq!(f.points[0].pressure, 0.5);
}

#[test]
fn commit_uses_current_pen_settings() {
    let mut e = engine();
    e.set_tool(Tool::Highlighter);
    e.core.ui.color = "#ffcc00".into();
    e.core.ui.stroke_width = 22.0;
    gesture(&mut e, &[(20.0, 100.0), (60.0, 100.0), (100.0, 100.0)], 0.0, 300.0);
    let CompletedStroke::Freehand(f) = &e.strokes()[0] else { panic!("expected freehand") };
    assert_eq!(f.tool, StrokeTool::Highlighter);
    assert_eq!(f.color, "#ffcc00");
    assert_eq!(f.size, 22.0);
    assert_eq!(f.points.len(), 3);
}

#[test]
fn reported_pressure_is_recorded() {
    let mut e = engine();
    e.on_pointer_down(Pointer::new(20.0, 20.0, 0.0).with_pressure(0.9));
    e.on_pointer_move(Pointer::new(80.0, 20.0, 100.0).with_pressure(0.0));
    e.on_pointer_up(Pointer::new(80.0, 20.0, 300.0));
    let CompletedStroke::Freehand(f) = &e.strokes()[0] else { panic!("expected freehand") };
    assert_eq!(f.points[0].pressure, 0.9);
    assert_eq!(f.points[1].pressure, 0.5);
}

#[test]
fn tap_on_stroke_selects_it() {
    let mut e = engine();
    let id = commit_line(&mut e, StrokeTool::Brush, (20.0, 100.0), (200.0, 100.0), 14.0);
    let actions = gesture(&mut e, &[(100.0, 100.0)], 0.0, 50.0);
    assert!(has_action(&actions, |a| *a == Action::SelectionChanged(Some(id))));
    assert_eq!(e.selection(), Some(id));
    assert!(!e.halo().is_blank());
    assert_eq!(e.strokes().len(), 1);
}

#[test]
fn tap_on_empty_space_deselects_and_discards_buffer() {
    let mut e = engine();
    let id = commit_line(&mut e, StrokeTool::Brush, (20.0, 100.0), (200.0, 100.0), 14.0);
    e.select(Some(id));
    let actions = gesture(&mut e, &[(250.0, 20.0), (252.0, 21.0)], 0.0, 100.0);
    assert!(has_action(&actions, |a| *a == Action::SelectionChanged(None)));
    assert!(e.selection().is_none());
    assert!(e.halo().is_blank());
    assert_eq!(e.strokes().len(), 1);
    assert!(e.core.buffer.is_empty());
    assert_eq!(e.content().alpha_at(250.0, 20.0), 0);
}

#[test]
fn tap_ignores_erasers() {
    let mut e = engine();
    commit_line(&mut e, StrokeTool::Eraser, (20.0, 100.0), (200.0, 100.0), 18.0);
    gesture(&mut e, &[(100.0, 100.0)], 0.0, 50.0);
    assert!(e.selection().is_none());
}

#[test]
fn text_tool_tap_requests_text() {
    let mut e = engine();
    e.set_tool(Tool::Text);
    e.core.ui.stroke_width = 30.0;
    let actions = gesture(&mut e, &[(40.0, 60.0)], 0.0, 50.0);
    assert!(has_action(&actions, |a| *a == Action::TextRequested { x: 40.0, y: 60.0, font_size: 41.0 }));
    assert!(e.strokes().is_empty());
}

#[test]
fn select_tool_drag_on_empty_space_draws_nothing() {
    let mut e = engine();
    e.set_tool(Tool::Select);
    let actions = gesture(&mut e, &[(20.0, 20.0), (80.0, 80.0)], 0.0, 300.0);
    assert!(actions.is_empty());
    assert!(e.strokes().is_empty());
}

// =============================================================
// Gestures: dragging the selection
// =============================================================

#[test]
fn drag_on_selected_stroke_moves_it() {
    let mut e = engine();
    let id = commit_line(&mut e, StrokeTool::Brush, (20.0, 100.0), (120.0, 100.0), 14.0);
    e.select(Some(id));
    let actions = gesture(&mut e, &[(70.0, 100.0), (80.0, 120.0), (90.0, 140.0)], 0.0, 300.0);
    assert!(!has_committed(&actions));
    assert_eq!(e.strokes().len(), 1);
    assert_eq!(e.hit_test(90.0, 140.0), Some(id));
    assert_eq!(e.hit_test(70.0, 100.0), None);
    assert_eq!(e.selection(), Some(id));
}

#[test]
fn drag_moves_emit_stroke_moved_per_step() {
    let mut e = engine();
    let id = commit_line(&mut e, StrokeTool::Brush, (20.0, 100.0), (120.0, 100.0), 14.0);
    e.select(Some(id));
    e.on_pointer_down(Pointer::new(70.0, 100.0, 0.0));
    let actions = e.on_pointer_move(Pointer::new(75.0, 103.0, 16.0));
    assert!(has_action(&actions, |a| *a == Action::StrokeMoved { id, dx: 5.0, dy: 3.0 }));
    let actions = e.on_pointer_move(Pointer::new(77.0, 103.0, 32.0));
    assert!(has_action(&actions, |a| *a == Action::StrokeMoved { id, dx: 2.0, dy: 0.0 }));
    assert!(e.on_pointer_up(Pointer::new(77.0, 103.0, 48.0)).is_empty());
}

#[test]
fn drag_on_unselected_stroke_draws_instead_of_moving() {
    let mut e = engine();
    let id = commit_line(&mut e, StrokeTool::Brush, (20.0, 100.0), (120.0, 100.0), 14.0);
    gesture(&mut e, &[(70.0, 100.0), (70.0, 150.0)], 0.0, 300.0);
    assert_eq!(e.strokes().len(), 2);
    assert_eq!(e.strokes()[0].id(), id);
    let CompletedStroke::Freehand(f) = &e.strokes()[0] else { panic!("expected freehand") };
    assert_eq!(f.points[0].y, 100.0);
}

// =============================================================
// Live buffer / frames
// =============================================================

#[test]
fn live_stroke_painted_on_frame_without_touching_history() {
    let mut e = engine();
    e.on_pointer_down(Pointer::new(20.0, 50.0, 0.0));
    e.on_pointer_move(Pointer::new(100.0, 50.0, 16.0));
    assert!(e.content().is_blank());
    assert!(e.on_frame());
    assert!(e.content().alpha_at(60.0, 50.0) > 0);
    assert!(e.strokes().is_empty());
    assert!(!e.on_frame());
}

#[test]
fn pointer_cancel_discards_live_stroke() {
    let mut e = engine();
    e.on_pointer_down(Pointer::new(20.0, 50.0, 0.0));
    e.on_pointer_move(Pointer::new(100.0, 50.0, 16.0));
    e.on_frame();
    let actions = e.on_pointer_cancel();
    assert!(has_render_needed(&actions));
    assert!(e.content().is_blank());
    assert!(e.on_pointer_up(Pointer::new(100.0, 50.0, 400.0)).is_empty());
    assert!(e.strokes().is_empty());
}

#[test]
fn pointer_move_without_press_is_ignored() {
    let mut e = engine();
    assert!(e.on_pointer_move(Pointer::new(10.0, 10.0, 0.0)).is_empty());
    assert!(!e.on_frame());
}

// =============================================================
// Tool changes and keys
// =============================================================

#[test]
fn set_tool_clears_selection() {
    let mut e = engine();
    let id = commit_line(&mut e, StrokeTool::Brush, (20.0, 100.0), (200.0, 100.0), 14.0);
    e.select(Some(id));
    e.set_tool(Tool::Eraser);
    assert!(e.selection().is_none());
    assert!(e.halo().is_blank());
}

#[test]
fn select_unknown_id_deselects() {
    let mut e = engine();
    e.select(Some(Uuid::new_v4()));
    assert!(e.selection().is_none());
}

#[test]
fn shortcut_keys_switch_tools() {
    let mut e = engine();
    e.on_key_down(&key("b"), no_modifiers());
    assert_eq!(e.core.ui.tool, Tool::Brush);
    e.on_key_down(&key("v"), no_modifiers());
    assert_eq!(e.core.ui.tool, Tool::Select);
    e.on_key_down(&key("t"), no_modifiers());
    assert_eq!(e.core.ui.tool, Tool::Text);
}

#[test]
fn ctrl_z_undoes() {
    let mut e = engine();
    commit_line(&mut e, StrokeTool::Pencil, (10.0, 10.0), (50.0, 10.0), 4.0);
    e.on_key_down(&key("z"), ctrl_modifier());
    assert!(e.strokes().is_empty());
}

#[test]
fn meta_z_undoes() {
    let mut e = engine();
    commit_line(&mut e, StrokeTool::Pencil, (10.0, 10.0), (50.0, 10.0), 4.0);
    e.on_key_down(&key("Z"), Modifiers { meta: true, ..Default::default() });
    assert!(e.strokes().is_empty());
}

#[test]
fn ctrl_shortcut_letter_does_not_switch_tool() {
    let mut e = engine();
    e.on_key_down(&key("b"), ctrl_modifier());
    assert_eq!(e.core.ui.tool, Tool::Pencil);
}

#[test]
fn delete_and_backspace_delete_selection() {
    for name in ["Delete", "Backspace"] {
        let mut e = engine();
        let id = commit_line(&mut e, StrokeTool::Pencil, (10.0, 10.0), (50.0, 10.0), 4.0);
        e.select(Some(id));
        e.on_key_down(&key(name), no_modifiers());
        assert!(e.strokes().is_empty(), "{name}");
    }
}

#[test]
fn escape_deselects() {
    let mut e = engine();
    let id = commit_line(&mut e, StrokeTool::Pencil, (10.0, 10.0), (50.0, 10.0), 4.0);
    e.select(Some(id));
    e.on_key_down(&key("Escape"), no_modifiers());
    assert!(e.selection().is_none());
    assert_eq!(e.strokes().len(), 1);
}

// =============================================================
// Camera
// =============================================================

#[test]
fn ctrl_wheel_zooms() {
    let mut e = engine();
    e.on_wheel(WheelDelta { dx: 0.0, dy: -1.0 }, ctrl_modifier());
    assert!((e.core.camera.zoom - 1.1).abs() < 1e-12);
    e.on_wheel(WheelDelta { dx: 0.0, dy: 1.0 }, ctrl_modifier());
    assert!((e.core.camera.zoom - 0.99).abs() < 1e-12);
}

#[test]
fn plain_wheel_pans() {
    let mut e = engine();
    let actions = e.on_wheel(WheelDelta { dx: 10.0, dy: 20.0 }, no_modifiers());
    assert_eq!(actions, vec![Action::ViewChanged]);
    assert_eq!(e.core.camera.pan_x, -10.0);
    assert_eq!(e.core.camera.pan_y, -20.0);
}

#[test]
fn reset_view_restores_identity() {
    let mut e = engine();
    e.on_wheel(WheelDelta { dx: 10.0, dy: 20.0 }, no_modifiers());
    e.on_wheel(WheelDelta { dx: 0.0, dy: -1.0 }, ctrl_modifier());
    e.reset_view();
    assert_eq!(e.core.camera.zoom, 1.0);
    assert_eq!(e.core.camera.pan_x, 0.0);
}

#[test]
fn pointer_positions_go_through_camera() {
    let mut e = engine();
    e.core.camera = Camera { pan_x: 100.0, pan_y: 0.0, zoom: 2.0 };
    gesture(&mut e, &[(140.0, 100.0), (240.0, 100.0)], 0.0, 300.0);
    let CompletedStroke::Freehand(f) = &e.strokes()[0] else { panic!("expected freehand") };
    assert_eq!((f.points[0].x, f.points[0].y), (20.0, 50.0));
    assert_eq!((f.points[1].x, f.points[1].y), (70.0, 50.0));
}
