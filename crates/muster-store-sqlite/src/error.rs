//! Error type for `muster-store-sqlite`.

use muster_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Entity-rule failures (validation) raised by `muster-core`.
  #[error(transparent)]
  Core(#[from] muster_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored column held a value outside its domain.
  #[error("corrupt column {column}: {value:?}")]
  Corrupt { column: &'static str, value: String },

  #[error("recruit not found: {0}")]
  RecruitNotFound(uuid::Uuid),
}

impl StoreError for Error {
  fn is_not_found(&self) -> bool {
    match self {
      Error::RecruitNotFound(_) => true,
      Error::Core(e) => e.is_not_found(),
      _ => false,
    }
  }

  fn is_validation(&self) -> bool {
    match self {
      Error::Core(e) => e.is_validation(),
      _ => false,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
