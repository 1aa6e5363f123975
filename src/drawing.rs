//! Drawing files: the stroke list saved by the drawing tool.

#[cfg(test)]
#[path = "drawing_test.rs"]
mod drawing_test;

use canvas::doc::CompletedStroke;
use serde::Deserialize;

/// Either a bare stroke array or a saved document with a `strokes` field.
#[derive(Deserialize)]
#[serde(untagged)]
enum DrawingFile {
    Strokes(Vec<CompletedStroke>),
    Saved { strokes: Vec<CompletedStroke> },
}

/// Parse a drawing file into strokes, in paint order.
pub fn parse(json: &str) -> Result<Vec<CompletedStroke>, serde_json::Error> {
    let file: DrawingFile = serde_json::from_str(json)?;
    Ok(match file {
        DrawingFile::Strokes(strokes) | DrawingFile::Saved { strokes } => strokes,
    })
}

/// Timestamp of frame `index` on a synthetic clock running at `fps`.
pub fn frame_time_ms(index: u32, fps: f64) -> f64 {
    f64::from(index) * 1000.0 / fps
}

/// File name for frame `index` inside the output directory.
pub fn frame_file_name(index: u32) -> String {
    format!("frame_{index:05}.png")
}
