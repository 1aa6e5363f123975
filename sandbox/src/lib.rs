//! Animation sandbox: runs untrusted drawing routines over a canvas snapshot.
//!
//! A routine is Rhai source defining
//! `fn animate(ctx, width, height, frame_data, progress)`. It is extracted
//! from whatever text the generator returned, scanned against a deny-list,
//! compiled into a locked-down script engine, and then called once per
//! frame by the [`player::Animator`] with a drawing context over a copy of
//! the background snapshot.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`player`] | [`player::Animator`] phase machine: load, tick, pause/resume, failure fuse |
//! | [`compile`] | Sandboxed engine, entry-point checks, the [`compile::FrameRenderer`] boundary |
//! | [`context`] | Canvas-2D-like drawing context exposed to routines |
//! | [`frame_data`] | Stroke list as a script value |
//! | [`source`] | Routine extraction from generator output |
//! | [`deny`] | Banned-token scan |
//! | [`generate`] | Async [`generate::RoutineGenerator`] boundary |
//! | [`config`] | [`config::AnimatorConfig`] from the environment |
//! | [`error`] | Error enums and the [`error::ErrorCode`] contract |

pub mod compile;
pub mod config;
pub mod context;
pub mod deny;
pub mod error;
pub mod frame_data;
pub mod generate;
pub mod player;
pub mod source;
