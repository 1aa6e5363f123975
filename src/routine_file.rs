//! Routine generator backed by a file on disk.
//!
//! Stands in for the generation service: the "answer" to every request is
//! whatever the file contains, fences and all.

#[cfg(test)]
#[path = "routine_file_test.rs"]
mod routine_file_test;

use std::path::PathBuf;

use sandbox::error::GenerateError;
use sandbox::generate::{GenerationRequest, RoutineGenerator};

pub struct FileGenerator {
    path: PathBuf,
}

impl FileGenerator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl RoutineGenerator for FileGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        tracing::debug!(path = %self.path.display(), message = %request.user_message(), "reading routine");
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| GenerateError::Failed(format!("{}: {e}", self.path.display())))
    }
}
