//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with a fixed nanosecond
//! width, so they round-trip losslessly and compare correctly as text. Stages
//! use their canonical token, UUIDs the hyphenated lowercase form.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use muster_core::{
  contact::{Communication, ContactKind},
  recruit::Recruit,
  stage::Stage,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Stage ────────────────────────────────────────────────────────────────────

pub fn encode_stage(stage: Stage) -> &'static str { stage.as_str() }

pub fn decode_stage(s: &str) -> Result<Stage> {
  Stage::from_str(s).map_err(|_| Error::Corrupt { column: "stage", value: s.to_owned() })
}

// ─── ContactKind ──────────────────────────────────────────────────────────────

pub fn encode_contact_kind(kind: ContactKind) -> &'static str { kind.as_str() }

pub fn decode_contact_kind(s: &str) -> Result<ContactKind> {
  match s {
    "manual" => Ok(ContactKind::Manual),
    "stage_change" => Ok(ContactKind::StageChange),
    "quick_message" => Ok(ContactKind::QuickMessage),
    other => Err(Error::Corrupt { column: "kind", value: other.to_owned() }),
  }
}

// ─── Raw row types ────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawRecruit`].
pub const RECRUIT_COLUMNS: &str = "recruit_id, name, email, phone, notes, source, priority, \
                                   stage, created_at, updated_at, last_contact";

/// A `recruits` row in its column encoding.
pub struct RawRecruit {
  pub recruit_id:   String,
  pub name:         String,
  pub email:        Option<String>,
  pub phone:        Option<String>,
  pub notes:        Option<String>,
  pub source:       String,
  pub priority:     i32,
  pub stage:        String,
  pub created_at:   String,
  pub updated_at:   String,
  pub last_contact: Option<String>,
}

impl RawRecruit {
  pub fn from_recruit(recruit: &Recruit) -> Self {
    Self {
      recruit_id:   encode_uuid(recruit.id),
      name:         recruit.name.clone(),
      email:        recruit.email.clone(),
      phone:        recruit.phone.clone(),
      notes:        recruit.notes.clone(),
      source:       recruit.source.clone(),
      priority:     recruit.priority,
      stage:        encode_stage(recruit.stage).to_owned(),
      created_at:   encode_dt(recruit.created_at),
      updated_at:   encode_dt(recruit.updated_at),
      last_contact: recruit.last_contact.map(encode_dt),
    }
  }

  /// Map a row selected with [`RECRUIT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      recruit_id:   row.get(0)?,
      name:         row.get(1)?,
      email:        row.get(2)?,
      phone:        row.get(3)?,
      notes:        row.get(4)?,
      source:       row.get(5)?,
      priority:     row.get(6)?,
      stage:        row.get(7)?,
      created_at:   row.get(8)?,
      updated_at:   row.get(9)?,
      last_contact: row.get(10)?,
    })
  }

  pub fn into_recruit(self) -> Result<Recruit> {
    Ok(Recruit {
      id:           decode_uuid(&self.recruit_id)?,
      name:         self.name,
      email:        self.email,
      phone:        self.phone,
      notes:        self.notes,
      source:       self.source,
      priority:     self.priority,
      stage:        decode_stage(&self.stage)?,
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   decode_dt(&self.updated_at)?,
      last_contact: self.last_contact.as_deref().map(decode_dt).transpose()?,
    })
  }
}

/// A `communications` row in its column encoding.
pub struct RawCommunication {
  pub communication_id: String,
  pub recruit_id:       String,
  pub kind:             String,
  pub content:          String,
  pub recorded_at:      String,
}

impl RawCommunication {
  pub fn from_communication(entry: &Communication) -> Self {
    Self {
      communication_id: encode_uuid(entry.id),
      recruit_id:       encode_uuid(entry.recruit_id),
      kind:             encode_contact_kind(entry.kind).to_owned(),
      content:          entry.content.clone(),
      recorded_at:      encode_dt(entry.recorded_at),
    }
  }

  pub fn into_communication(self) -> Result<Communication> {
    Ok(Communication {
      id:          decode_uuid(&self.communication_id)?,
      recruit_id:  decode_uuid(&self.recruit_id)?,
      kind:        decode_contact_kind(&self.kind)?,
      content:     self.content,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}
