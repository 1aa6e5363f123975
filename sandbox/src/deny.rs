//! Static deny-list scan over raw routine text.
//!
//! A substring match at identifier boundaries, run before anything is
//! compiled: `eval` is caught, `evaluate` is not. It catches
//! honest mistakes and obvious escape attempts; string building or other
//! obfuscation evades it. Containment comes from the script engine
//! configuration in [`crate::compile`], not from this list.

#[cfg(test)]
#[path = "deny_test.rs"]
mod deny_test;

use crate::error::CompileError;

/// Banned substrings: network calls, dynamic loading, global-scope objects,
/// string evaluation, and timer scheduling.
pub const DENY_LIST: &[&str] = &[
    // network
    "fetch(",
    "XMLHttpRequest",
    "WebSocket",
    // dynamic loading
    "import",
    "require(",
    // global scope
    "document.",
    "window.",
    "globalThis",
    "localStorage",
    "sessionStorage",
    // string evaluation
    "eval",
    "Function(",
    "Fn(",
    "call(",
    // timers
    "setTimeout(",
    "setInterval(",
    "requestAnimationFrame(",
];

/// Reject `source` if it contains any banned token.
///
/// # Errors
///
/// Returns [`CompileError::Denied`] naming the first banned token found.
pub fn scan(source: &str) -> Result<(), CompileError> {
    match DENY_LIST.iter().find(|token| contains_token(source, token)) {
        Some(token) => {
            tracing::warn!(token, "routine rejected by deny-list");
            Err(CompileError::Denied { token })
        }
        None => Ok(()),
    }
}

fn is_ident(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `token` occurs in `source` without an identifier character glued to
/// either end. Tokens ending in punctuation (`fetch(`, `window.`) only need
/// the leading boundary.
fn contains_token(source: &str, token: &str) -> bool {
    let open_end = token.chars().next_back().is_some_and(is_ident);
    source.match_indices(token).any(|(at, _)| {
        let before = source[..at].chars().next_back();
        let after = source[at + token.len()..].chars().next();
        !before.is_some_and(is_ident) && !(open_end && after.is_some_and(is_ident))
    })
}
