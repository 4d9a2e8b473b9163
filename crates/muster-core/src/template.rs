//! Built-in follow-up message templates.
//!
//! Bodies use a `{name}` placeholder that is replaced with the recruit's name
//! when rendered.

use serde::Serialize;

use crate::{Error, Result, stage::Stage};

const NAME_PLACEHOLDER: &str = "{name}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessageTemplate {
  pub id:    &'static str,
  pub name:  &'static str,
  /// The stage this message is meant for.
  pub stage: Stage,
  pub body:  &'static str,
}

const BUILTIN: &[MessageTemplate] = &[
  MessageTemplate {
    id:    "initial-follow-up",
    name:  "Initial Follow-up",
    stage: Stage::New,
    body:  "Hi {name}! Checking in to see whether you had a chance to look over \
            the pre-licensing info. Happy to answer any questions.",
  },
  MessageTemplate {
    id:    "training-check",
    name:  "Training Check",
    stage: Stage::Contacted,
    body:  "Hey {name}! How is the pre-licensing course going? Let me know if \
            anything is unclear.",
  },
  MessageTemplate {
    id:    "exam-reminder",
    name:  "Exam Reminder",
    stage: Stage::InTraining,
    body:  "Hi {name}! Ready to book your licensing exam? I can walk you \
            through the next steps.",
  },
  MessageTemplate {
    id:    "welcome-licensed",
    name:  "Welcome Licensed",
    stage: Stage::Licensed,
    body:  "Congratulations {name}, and welcome to the team! Let's set up your \
            onboarding call.",
  },
];

impl MessageTemplate {
  /// Every built-in template, in pipeline order.
  pub fn builtin() -> &'static [MessageTemplate] { BUILTIN }

  pub fn find(id: &str) -> Result<&'static MessageTemplate> {
    BUILTIN
      .iter()
      .find(|t| t.id == id)
      .ok_or_else(|| Error::TemplateNotFound(id.to_owned()))
  }

  pub fn for_stage(stage: Stage) -> impl Iterator<Item = &'static MessageTemplate> {
    BUILTIN.iter().filter(move |t| t.stage == stage)
  }

  pub fn render(&self, recruit_name: &str) -> String {
    self.body.replace(NAME_PLACEHOLDER, recruit_name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn render_substitutes_every_placeholder() {
    let t = MessageTemplate::find("welcome-licensed").unwrap();
    let text = t.render("Jane");
    assert!(text.starts_with("Congratulations Jane,"));
    assert!(!text.contains(NAME_PLACEHOLDER));
  }

  #[test]
  fn find_unknown_template_fails() {
    assert!(matches!(
      MessageTemplate::find("nope"),
      Err(Error::TemplateNotFound(ref id)) if id == "nope"
    ));
  }

  #[test]
  fn templates_are_keyed_by_stage() {
    let ids: Vec<_> = MessageTemplate::for_stage(Stage::InTraining).map(|t| t.id).collect();
    assert_eq!(ids, ["exam-reminder"]);
    assert_eq!(MessageTemplate::for_stage(Stage::Inactive).count(), 0);
  }

  #[test]
  fn ids_are_unique() {
    let all = MessageTemplate::builtin();
    for (i, t) in all.iter().enumerate() {
      assert!(all[i + 1..].iter().all(|o| o.id != t.id));
    }
  }
}
