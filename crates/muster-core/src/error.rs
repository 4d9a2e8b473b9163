//! Error types for `muster-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum Error {
  /// A required field was missing or empty.
  #[error("validation failed: {0}")]
  Validation(String),

  #[error("unknown stage: {0:?}")]
  UnknownStage(String),

  #[error("recruit not found: {0}")]
  RecruitNotFound(Uuid),

  #[error("message template not found: {0:?}")]
  TemplateNotFound(String),
}

impl StoreError for Error {
  fn is_not_found(&self) -> bool {
    matches!(self, Self::RecruitNotFound(_) | Self::TemplateNotFound(_))
  }

  fn is_validation(&self) -> bool {
    matches!(self, Self::Validation(_) | Self::UnknownStage(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
