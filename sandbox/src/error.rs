//! Error types for the animation sandbox.
//!
//! Every error carries a stable machine-readable code through [`ErrorCode`],
//! so a host can branch on the classification without matching on message
//! text.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Stable classification for an error surfaced to the host.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// COMPILE
// =============================================================================

/// Rejection of routine source before or during compilation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// The raw text contains a banned token. Nothing was compiled.
    #[error("routine rejected: contains banned token `{token}`")]
    Denied { token: &'static str },

    /// No `fn animate` definition was found.
    #[error("routine has no `animate` entry point")]
    MissingEntryPoint,

    /// `animate` exists but takes the wrong number of parameters.
    #[error("`animate` must take 5 parameters, found {found}")]
    EntryPointArity { found: usize },

    /// The script engine could not parse the routine.
    #[error("syntax error: {0}")]
    Syntax(String),
}

impl ErrorCode for CompileError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Denied { .. } | Self::MissingEntryPoint | Self::EntryPointArity { .. } => "E_INVALID_CODE",
            Self::Syntax(_) => "E_SYNTAX",
        }
    }

    fn retryable(&self) -> bool {
        true
    }
}

// =============================================================================
// FRAME
// =============================================================================

/// A single frame invocation failed. Transient: the player skips the frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The routine raised an error (including bad drawing arguments).
    #[error("routine error: {0}")]
    Script(String),

    /// The routine ran past its wall-clock budget or operation cap.
    #[error("frame budget exceeded: {0}")]
    Budget(String),

    /// The stroke list could not be exposed to the routine.
    #[error("frame data unavailable: {0}")]
    FrameData(String),
}

impl ErrorCode for FrameError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Script(_) => "E_FRAME_SCRIPT",
            Self::Budget(_) => "E_FRAME_BUDGET",
            Self::FrameData(_) => "E_FRAME_DATA",
        }
    }

    fn retryable(&self) -> bool {
        true
    }
}

// =============================================================================
// GENERATION
// =============================================================================

/// The external routine generator failed to produce source text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("generation failed: {0}")]
    Failed(String),

    #[error("generator returned no routine")]
    Empty,
}

impl ErrorCode for GenerateError {
    fn error_code(&self) -> &'static str {
        "E_GENERATION"
    }

    fn retryable(&self) -> bool {
        true
    }
}

// =============================================================================
// PLAYER
// =============================================================================

/// Terminal failures of the animation player, plus misuse of its API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnimationError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("failed to load canvas snapshot: {0}")]
    ImageLoad(String),

    #[error("animation crashed: {last}")]
    Crashed { last: String },

    #[error(transparent)]
    Generation(#[from] GenerateError),

    /// The operation is not valid in the current phase. The phase is unchanged.
    #[error("cannot {action} while {phase}")]
    InvalidState { action: &'static str, phase: &'static str },
}

impl ErrorCode for AnimationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Compile(e) => e.error_code(),
            Self::ImageLoad(_) => "E_IMAGE_LOAD",
            Self::Crashed { .. } => "E_ANIMATION_CRASHED",
            Self::Generation(e) => e.error_code(),
            Self::InvalidState { .. } => "E_INVALID_STATE",
        }
    }

    fn retryable(&self) -> bool {
        !matches!(self, Self::Crashed { .. } | Self::InvalidState { .. })
    }
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A duration or limit that must be positive was zero or negative.
    #[error("{var} must be positive, got {value}")]
    NonPositive { var: &'static str, value: i64 },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        "E_CONFIG_PARSE"
    }
}
