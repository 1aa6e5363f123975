//! The animation player: a phase machine around a [`FrameRenderer`].
//!
//! ```text
//! idle ──generate──▶ loading ──source ok──▶ playing(running ⇄ paused)
//!   ▲                  │                      │
//!   │                  └──fail──▶ error ◀──fuse trips
//!   └──────retry───────────────────┘
//! ```
//!
//! The player owns no clock and no scheduler. The host drives it with
//! [`Animator::tick`] and a monotonic timestamp in milliseconds, passing back
//! the [`FrameToken`] it was handed when playback (re)started. Pausing,
//! resetting, reloading, or crashing invalidates the token, so a tick that
//! was already scheduled cannot fire against stale state.

#[cfg(test)]
#[path = "player_test.rs"]
mod player_test;

use canvas::doc::CompletedStroke;
use canvas::summary::summarize;
use canvas::surface::Surface;

use crate::compile::{FrameInput, FrameRenderer, compile};
use crate::config::AnimatorConfig;
use crate::error::{AnimationError, ErrorCode, GenerateError};
use crate::generate::{GenerationRequest, RoutineGenerator};

/// Current phase of the player.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    /// Waiting on the generator for routine text.
    Loading { prompt: String },
    Playing { paused: bool },
    /// Terminal until [`Animator::retry`] or [`Animator::reset`].
    Error { code: &'static str, message: String },
}

impl Phase {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading { .. } => "loading",
            Self::Playing { paused: false } => "playing",
            Self::Playing { paused: true } => "paused",
            Self::Error { .. } => "error",
        }
    }
}

/// Handle for the host's scheduled tick. Only the latest token is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken(u64);

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// The routine drew this frame.
    Painted { progress: f64 },
    /// The routine failed; the frame shows the background only.
    Skipped { progress: f64, failures: u32 },
    /// The failure fuse tripped; the player is now in [`Phase::Error`].
    Crashed,
    /// The token is outdated or the player is not running. Nothing happened.
    Stale,
}

/// Background snapshot, stroke list and routine for the current playback.
struct Loaded {
    renderer: Box<dyn FrameRenderer>,
    background: Surface,
    strokes: Vec<CompletedStroke>,
}

pub struct Animator {
    config: AnimatorConfig,
    phase: Phase,
    loaded: Option<Loaded>,
    /// Latest painted frame (the animation surface).
    frame: Option<Surface>,
    cycle_start: Option<f64>,
    /// Elapsed time within the cycle, frozen while paused.
    paused_elapsed: f64,
    progress: f64,
    consecutive_errors: u32,
    token: u64,
}

impl Animator {
    #[must_use]
    pub fn new(config: AnimatorConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            loaded: None,
            frame: None,
            cycle_start: None,
            paused_elapsed: 0.0,
            progress: 0.0,
            consecutive_errors: 0,
            token: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// The animation surface as of the last tick.
    #[must_use]
    pub fn frame(&self) -> Option<&Surface> {
        self.frame.as_ref()
    }

    /// Position in the cycle for a progress bar, in `[0, 1)`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn consecutive_errors(&self) -> u32 {
        self.consecutive_errors
    }

    fn invalid(&self, action: &'static str) -> AnimationError {
        AnimationError::InvalidState { action, phase: self.phase.name() }
    }

    fn next_token(&mut self) -> FrameToken {
        self.token += 1;
        FrameToken(self.token)
    }

    fn cancel_tick(&mut self) {
        self.token += 1;
    }

    fn set_phase(&mut self, phase: Phase) {
        tracing::info!(from = self.phase.name(), to = phase.name(), "animation phase");
        self.phase = phase;
    }

    /// Enter [`Phase::Error`], dropping everything playback held.
    fn fail(&mut self, err: AnimationError) -> AnimationError {
        self.cancel_tick();
        self.loaded = None;
        self.set_phase(Phase::Error { code: err.error_code(), message: err.to_string() });
        err
    }

    // --- Loading ---

    /// `idle → loading`: a generation request for `prompt` is in flight.
    ///
    /// # Errors
    ///
    /// [`AnimationError::InvalidState`] unless idle.
    pub fn begin_loading(&mut self, prompt: &str) -> Result<(), AnimationError> {
        if self.phase != Phase::Idle {
            return Err(self.invalid("generate"));
        }
        self.set_phase(Phase::Loading { prompt: prompt.to_owned() });
        Ok(())
    }

    /// `loading → error`: the generator failed. Returns the recorded error,
    /// or [`AnimationError::InvalidState`] (phase unchanged) unless loading.
    pub fn generation_failed(&mut self, err: GenerateError) -> AnimationError {
        if !matches!(self.phase, Phase::Loading { .. }) {
            return self.invalid("fail generation");
        }
        tracing::warn!(error = %err, "routine generation failed");
        self.fail(err.into())
    }

    /// Compile `source` and start playing it over the PNG `snapshot`.
    ///
    /// Valid from idle (a preloaded routine) or loading (the generator's answer).
    ///
    /// # Errors
    ///
    /// - [`AnimationError::InvalidState`] from any other phase (phase unchanged).
    /// - [`AnimationError::Compile`] or [`AnimationError::ImageLoad`], after
    ///   entering [`Phase::Error`].
    pub fn load(&mut self, source: &str, snapshot: &[u8], strokes: &[CompletedStroke]) -> Result<FrameToken, AnimationError> {
        if !matches!(self.phase, Phase::Idle | Phase::Loading { .. }) {
            return Err(self.invalid("load"));
        }
        let routine = match compile(source, &self.config) {
            Ok(routine) => routine,
            Err(e) => return Err(self.fail(e.into())),
        };
        let background = match Surface::decode_png(snapshot) {
            Ok(surface) => surface,
            Err(e) => return Err(self.fail(AnimationError::ImageLoad(e.to_string()))),
        };
        self.play(Box::new(routine), background, strokes)
    }

    /// Start playing an already-built renderer over `background`.
    ///
    /// # Errors
    ///
    /// [`AnimationError::InvalidState`] unless idle or loading.
    pub fn play(
        &mut self,
        renderer: Box<dyn FrameRenderer>,
        background: Surface,
        strokes: &[CompletedStroke],
    ) -> Result<FrameToken, AnimationError> {
        if !matches!(self.phase, Phase::Idle | Phase::Loading { .. }) {
            return Err(self.invalid("play"));
        }
        self.frame = Some(background.clone());
        self.loaded = Some(Loaded { renderer, background, strokes: strokes.to_vec() });
        self.cycle_start = None;
        self.paused_elapsed = 0.0;
        self.progress = 0.0;
        self.consecutive_errors = 0;
        self.set_phase(Phase::Playing { paused: false });
        Ok(self.next_token())
    }

    /// Ask `generator` for a routine and start playing it.
    ///
    /// Drives `idle → loading → playing | error`.
    ///
    /// # Errors
    ///
    /// Any error from [`Animator::begin_loading`], the generator, or
    /// [`Animator::load`].
    pub async fn generate(
        &mut self,
        generator: &dyn RoutineGenerator,
        prompt: &str,
        snapshot: Vec<u8>,
        strokes: &[CompletedStroke],
    ) -> Result<FrameToken, AnimationError> {
        self.begin_loading(prompt)?;
        let request = GenerationRequest { snapshot_png: snapshot, prompt: prompt.to_owned(), stroke_summary: summarize(strokes) };
        let source = match generator.generate(&request).await {
            Ok(source) if source.trim().is_empty() => return Err(self.generation_failed(GenerateError::Empty)),
            Ok(source) => source,
            Err(e) => return Err(self.generation_failed(e)),
        };
        self.load(&source, &request.snapshot_png, strokes)
    }

    // --- Playback ---

    /// Run one frame at monotonic time `now_ms`.
    pub fn tick(&mut self, token: FrameToken, now_ms: f64) -> Tick {
        if token.0 != self.token || self.phase != (Phase::Playing { paused: false }) {
            return Tick::Stale;
        }
        let Some(loaded) = self.loaded.as_mut() else {
            return Tick::Stale;
        };

        let start = *self.cycle_start.get_or_insert(now_ms);
        let elapsed = (now_ms - start).rem_euclid(self.config.cycle_ms);
        let progress = elapsed / self.config.cycle_ms;
        self.progress = progress;

        let input = FrameInput {
            width: loaded.background.width(),
            height: loaded.background.height(),
            strokes: &loaded.strokes,
            progress,
        };
        match loaded.renderer.render_frame(loaded.background.clone(), &input) {
            Ok(frame) => {
                self.frame = Some(frame);
                self.consecutive_errors = 0;
                Tick::Painted { progress }
            }
            Err(e) => {
                self.frame = Some(loaded.background.clone());
                self.consecutive_errors += 1;
                let failures = self.consecutive_errors;
                tracing::warn!(error = %e, failures, progress, "animation frame failed");
                if failures > self.config.max_consecutive_errors {
                    tracing::warn!(failures, "animation fuse tripped");
                    self.fail(AnimationError::Crashed { last: e.to_string() });
                    return Tick::Crashed;
                }
                Tick::Skipped { progress, failures }
            }
        }
    }

    /// Freeze progress at `now_ms` and stop ticking.
    ///
    /// # Errors
    ///
    /// [`AnimationError::InvalidState`] unless playing and running.
    pub fn pause(&mut self, now_ms: f64) -> Result<(), AnimationError> {
        if self.phase != (Phase::Playing { paused: false }) {
            return Err(self.invalid("pause"));
        }
        self.paused_elapsed = match self.cycle_start {
            Some(start) => (now_ms - start).rem_euclid(self.config.cycle_ms),
            None => 0.0,
        };
        self.progress = self.paused_elapsed / self.config.cycle_ms;
        self.cancel_tick();
        self.set_phase(Phase::Playing { paused: true });
        Ok(())
    }

    /// Continue from the frozen position; returns the new tick token.
    ///
    /// # Errors
    ///
    /// [`AnimationError::InvalidState`] unless paused.
    pub fn resume(&mut self, now_ms: f64) -> Result<FrameToken, AnimationError> {
        if self.phase != (Phase::Playing { paused: true }) {
            return Err(self.invalid("resume"));
        }
        self.cycle_start = Some(now_ms - self.paused_elapsed);
        self.set_phase(Phase::Playing { paused: false });
        Ok(self.next_token())
    }

    /// Pause if running, resume if paused. Returns the new token on resume.
    ///
    /// # Errors
    ///
    /// [`AnimationError::InvalidState`] unless playing.
    pub fn toggle_pause(&mut self, now_ms: f64) -> Result<Option<FrameToken>, AnimationError> {
        match self.phase {
            Phase::Playing { paused: false } => self.pause(now_ms).map(|()| None),
            Phase::Playing { paused: true } => self.resume(now_ms).map(Some),
            _ => Err(self.invalid("toggle pause")),
        }
    }

    /// Start the cycle over; the next tick has progress 0. Unpauses.
    ///
    /// # Errors
    ///
    /// [`AnimationError::InvalidState`] unless playing.
    pub fn restart(&mut self) -> Result<FrameToken, AnimationError> {
        if !matches!(self.phase, Phase::Playing { .. }) {
            return Err(self.invalid("restart"));
        }
        self.cycle_start = None;
        self.paused_elapsed = 0.0;
        self.progress = 0.0;
        if self.phase != (Phase::Playing { paused: false }) {
            self.set_phase(Phase::Playing { paused: false });
        }
        Ok(self.next_token())
    }

    /// Back to idle from any phase, discarding routine, background and pending tick.
    pub fn reset(&mut self) {
        self.cancel_tick();
        self.loaded = None;
        self.frame = None;
        self.cycle_start = None;
        self.paused_elapsed = 0.0;
        self.progress = 0.0;
        self.consecutive_errors = 0;
        if self.phase != Phase::Idle {
            self.set_phase(Phase::Idle);
        }
    }

    /// `error → idle`.
    ///
    /// # Errors
    ///
    /// [`AnimationError::InvalidState`] unless in error.
    pub fn retry(&mut self) -> Result<(), AnimationError> {
        if !matches!(self.phase, Phase::Error { .. }) {
            return Err(self.invalid("retry"));
        }
        self.reset();
        Ok(())
    }
}
