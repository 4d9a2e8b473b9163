//! Contact events and the per-recruit communication log.
//!
//! Recording a contact refreshes the recruit's `last_contact`, which is what
//! the follow-up check measures staleness from. Non-empty contact content is
//! also appended to the recruit's log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a contact came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
  /// Logged by hand.
  #[default]
  Manual,
  /// Implied by moving the recruit to a different stage.
  StageChange,
  /// A follow-up message, usually rendered from a template.
  QuickMessage,
}

impl ContactKind {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Manual => "manual",
      Self::StageChange => "stage_change",
      Self::QuickMessage => "quick_message",
    }
  }
}

/// Input to [`RecruitStore::record_contact`](crate::store::RecruitStore::record_contact).
#[derive(Debug, Clone, Default)]
pub struct NewContact {
  pub kind:    ContactKind,
  /// Empty content updates `last_contact` without writing a log entry.
  pub content: String,
}

impl NewContact {
  pub fn new(kind: ContactKind, content: impl Into<String>) -> Self {
    Self { kind, content: content.into() }
  }

  /// Whether this contact produces a [`Communication`] entry.
  pub fn is_logged(&self) -> bool { !self.content.is_empty() }

  pub fn into_communication(self, recruit_id: Uuid, now: DateTime<Utc>) -> Communication {
    Communication {
      id: Uuid::new_v4(),
      recruit_id,
      kind: self.kind,
      content: self.content,
      recorded_at: now,
    }
  }
}

/// A logged interaction with a recruit. Append-only; removed together with
/// its recruit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Communication {
  pub id:          Uuid,
  pub recruit_id:  Uuid,
  pub kind:        ContactKind,
  pub content:     String,
  pub recorded_at: DateTime<Utc>,
}
