use uuid::Uuid;

use super::*;
use crate::doc::{FreehandStroke, SamplePoint, StrokeTool, TextStroke};

fn freehand(tool: StrokeTool, points: &[(f64, f64)]) -> CompletedStroke {
    FreehandStroke {
        id: Uuid::new_v4(),
        points: points.iter().map(|&(x, y)| SamplePoint { x, y, pressure: 0.5 }).collect(),
        color: "#ff0000".into(),
        size: 4.0,
        opacity: 1.0,
        tool,
    }
    .into()
}

#[test]
fn empty_canvas() {
    assert_eq!(summarize(&[]), "Canvas is empty.");
}

#[test]
fn text_line_format() {
    let t: CompletedStroke = TextStroke::new(Uuid::new_v4(), "hi", 10.0, 12.5, 20.0, "#00f").into();
    assert_eq!(summarize(&[t]), "Canvas elements (1 total):\n[0] Text \"hi\" at (10,12.5) fontSize:20px color:#00f");
}

#[test]
fn freehand_line_format() {
    let s = freehand(StrokeTool::Brush, &[(10.2, 20.7), (30.5, 5.0), (19.0, 40.4)]);
    assert_eq!(
        summarize(&[s]),
        "Canvas elements (1 total):\n[0] brush stroke bbox:(10,5)-(31,40) center:(20,23) color:#ff0000"
    );
}

#[test]
fn empty_stroke_line() {
    let s = freehand(StrokeTool::Pencil, &[]);
    assert_eq!(summarize(&[s]), "Canvas elements (1 total):\n[0] Empty stroke");
}

#[test]
fn lines_are_indexed_in_paint_order() {
    let strokes = vec![
        freehand(StrokeTool::Pencil, &[(0.0, 0.0)]),
        freehand(StrokeTool::Eraser, &[(1.0, 1.0)]),
        TextStroke::new(Uuid::new_v4(), "x", 0.0, 0.0, 12.0, "#000").into(),
    ];
    let out = summarize(&strokes);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Canvas elements (3 total):");
    assert!(lines[1].starts_with("[0] pencil stroke"));
    assert!(lines[2].starts_with("[1] eraser stroke"));
    assert!(lines[3].starts_with("[2] Text \"x\""));
}

#[test]
fn halves_round_up_even_when_negative() {
    let s = freehand(StrokeTool::Pencil, &[(-2.5, -0.5), (2.5, 0.5)]);
    assert_eq!(
        summarize(&[s]),
        "Canvas elements (1 total):\n[0] pencil stroke bbox:(-2,0)-(3,1) center:(0,0) color:#ff0000"
    );
}
