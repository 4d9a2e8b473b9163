//! Pipeline stages.
//!
//! The stage set is fixed and ordered, but the pipeline is a free graph: any
//! stage may follow any other, including backward moves such as
//! `Licensed` → `Contacted`. The store validates membership in the set, never
//! the legality of a transition.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::{Error, Result};

/// One of the five canonical pipeline stages, in dashboard order.
///
/// `Interview` and `Training` are accepted as input synonyms of
/// [`Stage::InTraining`]; only the canonical token `In Training` is ever
/// emitted or persisted.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Default,
  Serialize,
  Deserialize,
  EnumIter,
  strum::Display,
  strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Stage {
  #[default]
  New,
  Contacted,
  #[serde(rename = "In Training", alias = "Interview", alias = "Training")]
  #[strum(to_string = "In Training", serialize = "Interview", serialize = "Training")]
  InTraining,
  Licensed,
  Inactive,
}

impl Stage {
  /// The canonical token for this stage.
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::New => "New",
      Self::Contacted => "Contacted",
      Self::InTraining => "In Training",
      Self::Licensed => "Licensed",
      Self::Inactive => "Inactive",
    }
  }

  /// All stages in pipeline order.
  pub fn all() -> impl Iterator<Item = Stage> { Self::iter() }

  /// Parse a stage token supplied by a caller.
  ///
  /// Surrounding whitespace is ignored and matching is case-insensitive.
  /// Absent or blank input yields `None` so the caller can apply its own
  /// default; any other unrecognised token is a validation failure.
  pub fn parse_input(input: Option<&str>) -> Result<Option<Stage>> {
    match input.map(str::trim) {
      None | Some("") => Ok(None),
      Some(token) => Self::from_str(token)
        .map(Some)
        .map_err(|_| Error::UnknownStage(token.to_owned())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn canonical_tokens_round_trip_through_display() {
    for stage in Stage::all() {
      assert_eq!(stage.to_string(), stage.as_str());
      assert_eq!(Stage::from_str(stage.as_str()).unwrap(), stage);
    }
  }

  #[test]
  fn all_yields_five_stages_in_pipeline_order() {
    let stages: Vec<_> = Stage::all().collect();
    assert_eq!(stages, vec![
      Stage::New,
      Stage::Contacted,
      Stage::InTraining,
      Stage::Licensed,
      Stage::Inactive,
    ]);
  }

  #[test]
  fn synonyms_normalise_to_in_training() {
    assert_eq!(Stage::from_str("Interview").unwrap(), Stage::InTraining);
    assert_eq!(Stage::from_str("Training").unwrap(), Stage::InTraining);
    assert_eq!(Stage::InTraining.to_string(), "In Training");
  }

  #[test]
  fn parse_input_handles_blank_and_case() {
    assert_eq!(Stage::parse_input(None).unwrap(), None);
    assert_eq!(Stage::parse_input(Some("   ")).unwrap(), None);
    assert_eq!(Stage::parse_input(Some(" licensed ")).unwrap(), Some(Stage::Licensed));
    assert_eq!(
      Stage::parse_input(Some("in training")).unwrap(),
      Some(Stage::InTraining)
    );
  }

  #[test]
  fn parse_input_rejects_unknown_token() {
    let err = Stage::parse_input(Some("Hired")).unwrap_err();
    assert!(matches!(err, Error::UnknownStage(ref t) if t == "Hired"));
  }

  #[test]
  fn serde_uses_canonical_token_and_accepts_synonyms() {
    let json = serde_json::to_string(&Stage::InTraining).unwrap();
    assert_eq!(json, "\"In Training\"");

    let parsed: Stage = serde_json::from_str("\"Interview\"").unwrap();
    assert_eq!(parsed, Stage::InTraining);
  }
}
