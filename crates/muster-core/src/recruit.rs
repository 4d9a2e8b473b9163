//! Recruit — the candidate record tracked through the pipeline.
//!
//! The entity rules live here rather than in the backends: a [`NewRecruit`]
//! becomes a [`Recruit`] only through [`NewRecruit::into_recruit`], and a
//! [`RecruitPatch`] is applied only through [`RecruitPatch::apply`]. Both
//! validate before touching anything, so a rejected write leaves the record
//! exactly as it was.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, stage::Stage};

/// Lead source recorded when the caller supplies none.
pub const DEFAULT_SOURCE: &str = "Manual";

/// Priority recorded when the caller supplies none.
pub const DEFAULT_PRIORITY: i32 = 1;

// ─── Entity ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recruit {
  /// Store-assigned; never changes.
  pub id:           Uuid,
  pub name:         String,
  pub email:        Option<String>,
  pub phone:        Option<String>,
  pub notes:        Option<String>,
  /// Where the lead came from (e.g. "Referral", "LinkedIn").
  pub source:       String,
  /// Higher is more urgent. Informational only.
  pub priority:     i32,
  pub stage:        Stage,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
  /// When the recruit was last contacted, if ever.
  pub last_contact: Option<DateTime<Utc>>,
}

impl Recruit {
  /// The moment follow-up staleness is measured from: the later of the last
  /// contact and creation.
  pub fn contact_reference(&self) -> DateTime<Utc> {
    self
      .last_contact
      .map_or(self.created_at, |at| at.max(self.created_at))
  }

  /// Mark a contact event at `now`.
  pub fn touch_contact(&mut self, now: DateTime<Utc>) {
    let at = now.max(self.created_at);
    self.last_contact = Some(at);
    self.updated_at = at;
  }
}

/// Reject names that are empty once surrounding whitespace is removed.
pub fn validate_name(name: &str) -> Result<()> {
  if name.trim().is_empty() {
    return Err(Error::Validation("name is required".to_owned()));
  }
  Ok(())
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// Input to [`RecruitStore::create`](crate::store::RecruitStore::create).
///
/// Only `name` is required; every other field falls back to its default.
/// Callers parse their own input into this; it has no wire format.
#[derive(Debug, Clone, Default)]
pub struct NewRecruit {
  pub name:     String,
  pub email:    Option<String>,
  pub phone:    Option<String>,
  pub notes:    Option<String>,
  pub stage:    Option<Stage>,
  pub source:   Option<String>,
  pub priority: Option<i32>,
}

impl NewRecruit {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), ..Self::default() }
  }

  pub fn with_email(mut self, email: impl Into<String>) -> Self {
    self.email = Some(email.into());
    self
  }

  pub fn with_stage(mut self, stage: Stage) -> Self {
    self.stage = Some(stage);
    self
  }

  /// Validate and build the stored entity. The store supplies `id` and `now`.
  pub fn into_recruit(self, id: Uuid, now: DateTime<Utc>) -> Result<Recruit> {
    validate_name(&self.name)?;

    let source = self
      .source
      .filter(|s| !s.trim().is_empty())
      .unwrap_or_else(|| DEFAULT_SOURCE.to_owned());

    Ok(Recruit {
      id,
      name: self.name,
      email: self.email,
      phone: self.phone,
      notes: self.notes,
      source,
      priority: self.priority.unwrap_or(DEFAULT_PRIORITY),
      stage: self.stage.unwrap_or_default(),
      created_at: now,
      updated_at: now,
      last_contact: None,
    })
  }
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// A partial update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct RecruitPatch {
  pub name:     Option<String>,
  pub email:    Option<String>,
  pub phone:    Option<String>,
  pub notes:    Option<String>,
  pub stage:    Option<Stage>,
  pub source:   Option<String>,
  pub priority: Option<i32>,
}

impl RecruitPatch {
  pub fn stage(stage: Stage) -> Self {
    Self { stage: Some(stage), ..Self::default() }
  }

  /// Check the patch without applying it.
  pub fn validate(&self) -> Result<()> {
    match &self.name {
      Some(name) => validate_name(name),
      None => Ok(()),
    }
  }

  /// Apply the patch to `recruit`, stamping `updated_at` with `now`.
  ///
  /// Any stage may replace any other. On error `recruit` is untouched.
  pub fn apply(self, recruit: &mut Recruit, now: DateTime<Utc>) -> Result<()> {
    self.validate()?;

    if let Some(name) = self.name {
      recruit.name = name;
    }
    if let Some(email) = self.email {
      recruit.email = Some(email);
    }
    if let Some(phone) = self.phone {
      recruit.phone = Some(phone);
    }
    if let Some(notes) = self.notes {
      recruit.notes = Some(notes);
    }
    if let Some(stage) = self.stage {
      recruit.stage = stage;
    }
    if let Some(source) = self.source.filter(|s| !s.trim().is_empty()) {
      recruit.source = source;
    }
    if let Some(priority) = self.priority {
      recruit.priority = priority;
    }
    recruit.updated_at = now.max(recruit.created_at);
    Ok(())
  }
}
