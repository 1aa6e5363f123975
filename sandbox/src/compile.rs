//! Routine compilation and the per-frame call boundary.
//!
//! Compiling runs extraction, the deny-list scan, and a Rhai parse, in that
//! order, and checks the `animate` entry point. The result is a
//! [`CompiledRoutine`], which the player only sees through the narrow
//! [`FrameRenderer`] trait.
//!
//! The script engine is configured as the real containment layer: no module
//! resolver, `eval` disabled, bounded call depth, expression depth and
//! string/array/map sizes, an operation cap, and a wall-clock deadline
//! checked from the progress callback.

#[cfg(test)]
#[path = "compile_test.rs"]
mod compile_test;

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use canvas::doc::CompletedStroke;
use canvas::surface::Surface;
use rhai::module_resolvers::DummyModuleResolver;
use rhai::{AST, CallFnOptions, Dynamic, Engine, EvalAltResult, Position, Scope};

use crate::config::AnimatorConfig;
use crate::context::{self, DrawContext};
use crate::deny;
use crate::error::{CompileError, FrameError};
use crate::frame_data::frame_data;
use crate::source::{ENTRY_POINT, extract_routine, reads_strokes};

/// `animate(ctx, width, height, frame_data, progress)`.
pub const ENTRY_POINT_ARITY: usize = 5;

const MAX_CALL_LEVELS: usize = 32;
const MAX_EXPR_DEPTH: usize = 64;
const MAX_FN_EXPR_DEPTH: usize = 32;
const MAX_STRING_SIZE: usize = 16 * 1024;
const MAX_ARRAY_SIZE: usize = 10_000;
const MAX_MAP_SIZE: usize = 1_000;

/// The deadline is checked once per this many script operations.
const DEADLINE_CHECK_INTERVAL: u64 = 256;

/// Everything a single frame invocation sees besides the drawing surface.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub width: u32,
    pub height: u32,
    pub strokes: &'a [CompletedStroke],
    /// Position within the current cycle, in `[0, 1)`.
    pub progress: f64,
}

/// Capability boundary between the player and whatever draws a frame.
pub trait FrameRenderer {
    /// Draw one frame on top of `canvas` (already holding the background).
    ///
    /// # Errors
    ///
    /// Any error is a transient frame failure: the player discards the
    /// returned canvas and counts the failure toward its fuse.
    fn render_frame(&mut self, canvas: Surface, frame: &FrameInput<'_>) -> Result<Surface, FrameError>;
}

/// A routine that passed extraction, the deny-list, and compilation.
pub struct CompiledRoutine {
    engine: Engine,
    ast: AST,
    deadline: Rc<Cell<Option<Instant>>>,
    budget: Duration,
}

impl std::fmt::Debug for CompiledRoutine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledRoutine").field("budget", &self.budget).finish_non_exhaustive()
    }
}

/// Extract, scan, and compile routine text.
///
/// # Errors
///
/// - [`CompileError::MissingEntryPoint`] when there is no `fn animate`.
/// - [`CompileError::Denied`] when the text contains a banned token.
/// - [`CompileError::Syntax`] when the script does not parse.
/// - [`CompileError::EntryPointArity`] when `animate` takes the wrong number of parameters.
pub fn compile(raw: &str, config: &AnimatorConfig) -> Result<CompiledRoutine, CompileError> {
    let source = extract_routine(raw)?;
    deny::scan(&source)?;
    if !reads_strokes(&source) {
        tracing::warn!("routine never reads frame_data.strokes");
    }

    let deadline = Rc::new(Cell::new(None));
    let engine = sandboxed_engine(config, Rc::clone(&deadline));
    let ast = engine.compile(&source).map_err(|e| {
        tracing::warn!(error = %e, "routine failed to compile");
        CompileError::Syntax(e.to_string())
    })?;
    check_entry_point(&ast)?;

    tracing::debug!(bytes = source.len(), "routine compiled");
    Ok(CompiledRoutine { engine, ast, deadline, budget: config.frame_budget })
}

fn check_entry_point(ast: &AST) -> Result<(), CompileError> {
    let mut found = None;
    for f in ast.iter_functions().filter(|f| f.name == ENTRY_POINT) {
        if f.params.len() == ENTRY_POINT_ARITY {
            return Ok(());
        }
        found = Some(f.params.len());
    }
    match found {
        Some(found) => Err(CompileError::EntryPointArity { found }),
        None => Err(CompileError::MissingEntryPoint),
    }
}

fn sandboxed_engine(config: &AnimatorConfig, deadline: Rc<Cell<Option<Instant>>>) -> Engine {
    let mut engine = Engine::new();
    engine
        .set_module_resolver(DummyModuleResolver::new())
        .disable_symbol("eval")
        .set_max_call_levels(MAX_CALL_LEVELS)
        .set_max_expr_depths(MAX_EXPR_DEPTH, MAX_FN_EXPR_DEPTH)
        .set_max_string_size(MAX_STRING_SIZE)
        .set_max_array_size(MAX_ARRAY_SIZE)
        .set_max_map_size(MAX_MAP_SIZE)
        .set_max_operations(config.max_operations);

    engine.on_progress(move |ops: u64| {
        if ops % DEADLINE_CHECK_INTERVAL != 0 {
            return None;
        }
        match deadline.get() {
            Some(at) if Instant::now() >= at => Some("frame budget exceeded".into()),
            _ => None,
        }
    });
    engine.on_print(|text: &str| tracing::info!(target: "routine", "{text}"));
    engine.on_debug(|text: &str, source: Option<&str>, pos: Position| tracing::debug!(target: "routine", ?source, %pos, "{text}"));

    context::register(&mut engine);
    engine
}

fn frame_error(err: &EvalAltResult) -> FrameError {
    match err {
        EvalAltResult::ErrorTerminated(..) | EvalAltResult::ErrorTooManyOperations(..) => {
            FrameError::Budget(err.to_string())
        }
        EvalAltResult::ErrorInFunctionCall(_, _, inner, _) => frame_error(inner),
        _ => FrameError::Script(err.to_string()),
    }
}

impl FrameRenderer for CompiledRoutine {
    fn render_frame(&mut self, canvas: Surface, frame: &FrameInput<'_>) -> Result<Surface, FrameError> {
        let data = frame_data(frame.strokes)?;
        let ctx = DrawContext::new(canvas);
        let args = (ctx.clone(), i64::from(frame.width), i64::from(frame.height), data, frame.progress);
        let options = CallFnOptions::new().eval_ast(false).rewind_scope(true);

        self.deadline.set(Some(Instant::now() + self.budget));
        let result = self.engine.call_fn_with_options::<Dynamic>(options, &mut Scope::new(), &self.ast, ENTRY_POINT, args);
        self.deadline.set(None);

        let surface = ctx.finish();
        match (result, surface) {
            (Ok(_), Some(surface)) => Ok(surface),
            (Ok(_), None) => Err(FrameError::Script("drawing surface was lost".to_owned())),
            (Err(err), _) => Err(frame_error(&err)),
        }
    }
}
