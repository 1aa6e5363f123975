//! Boundary to the external service that writes animation routines.
//!
//! The core ships no network client. A host implements [`RoutineGenerator`]
//! over whatever it talks to, and tests use an in-memory mock.

#[cfg(test)]
#[path = "generate_test.rs"]
mod generate_test;

use crate::error::GenerateError;

/// Everything the generator is told about the drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// PNG of the content surface at the moment of the request.
    pub snapshot_png: Vec<u8>,
    pub prompt: String,
    /// Output of [`canvas::summary::summarize`] for the current strokes.
    pub stroke_summary: String,
}

impl GenerationRequest {
    /// Prompt text combining the user's request with the stroke summary.
    #[must_use]
    pub fn user_message(&self) -> String {
        format!("{}\n\n{}", self.prompt.trim(), self.stroke_summary)
    }
}

/// Source of routine text. Enables mocking in tests.
#[async_trait::async_trait]
pub trait RoutineGenerator: Send + Sync {
    /// Produce routine source for `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerateError`] if the service fails or answers with nothing usable.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError>;
}
