//! Routine text clean-up ahead of scanning and compiling.
//!
//! Generated routines often arrive wrapped in Markdown fences or preceded by
//! prose. Extraction drops fence lines and keeps everything from the
//! `fn animate` definition onward.

#[cfg(test)]
#[path = "source_test.rs"]
mod source_test;

use crate::error::CompileError;

/// Name of the routine's entry point.
pub const ENTRY_POINT: &str = "animate";

/// Strip code fences and leading prose, returning text starting at `fn animate`.
///
/// # Errors
///
/// Returns [`CompileError::MissingEntryPoint`] if no `fn animate(` is present.
pub fn extract_routine(raw: &str) -> Result<String, CompileError> {
    let unfenced: Vec<&str> = raw.lines().filter(|line| !line.trim_start().starts_with("```")).collect();
    let text = unfenced.join("\n");
    let start = find_entry_point(&text).ok_or(CompileError::MissingEntryPoint)?;
    Ok(text[start..].trim().to_owned())
}

/// Byte offset of the `fn` keyword that opens the entry point definition.
fn find_entry_point(text: &str) -> Option<usize> {
    text.match_indices("fn").map(|(i, _)| i).find(|&i| {
        let before_ok = text[..i].chars().next_back().is_none_or(|c| !is_ident(c));
        before_ok && entry_follows(&text[i + 2..])
    })
}

/// `rest` is the text after `fn`: whitespace, the entry name, optional whitespace, `(`.
fn entry_follows(rest: &str) -> bool {
    let name = rest.trim_start();
    if name.len() == rest.len() {
        return false;
    }
    let Some(after) = name.strip_prefix(ENTRY_POINT) else {
        return false;
    };
    after.trim_start().starts_with('(')
}

fn is_ident(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether the routine reads the stroke list at all. Routines that ignore it
/// usually animate something unrelated to the drawing.
#[must_use]
pub fn reads_strokes(source: &str) -> bool {
    source.contains(".strokes") || source.contains("[\"strokes\"]")
}
