//! Read-only stroke data handed to routines as `frame_data`.
//!
//! `#{ strokes: [...] }`, one map per stroke in paint order, shaped exactly
//! like the stroke JSON: freehand entries carry `id, points, color, size,
//! opacity, tool`; text entries carry `id, type: "text", text, x, y,
//! fontSize, color`.

#[cfg(test)]
#[path = "frame_data_test.rs"]
mod frame_data_test;

use canvas::doc::CompletedStroke;
use rhai::{Dynamic, Map};

use crate::error::FrameError;

/// Build the `frame_data` argument for `strokes`.
///
/// # Errors
///
/// Returns [`FrameError::FrameData`] if a stroke cannot be converted.
pub fn frame_data(strokes: &[CompletedStroke]) -> Result<Dynamic, FrameError> {
    let list = rhai::serde::to_dynamic(strokes).map_err(|e| FrameError::FrameData(e.to_string()))?;
    let mut map = Map::new();
    map.insert("strokes".into(), list);
    Ok(Dynamic::from_map(map))
}
