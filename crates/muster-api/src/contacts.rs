//! Handlers for contact events.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/recruits/:id/contact` | Body: `{"kind":"manual","content":"..."}`; both optional |
//! | `GET`  | `/recruits/:id/communications` | Oldest first |
//! | `POST` | `/recruits/:id/quick-message` | Body: `{"template_id":"..."}` or `{"message":"..."}` |

use axum::{
  Json,
  extract::{Path, State},
};
use muster_core::{
  contact::{Communication, ContactKind, NewContact},
  recruit::Recruit,
  store::RecruitStore,
  template::MessageTemplate,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── Record contact ───────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ContactBody {
  #[serde(default, alias = "type")]
  pub kind:    ContactKind,
  #[serde(default)]
  pub content: String,
}

/// `POST /recruits/:id/contact`
pub async fn record<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ContactBody>,
) -> Result<Json<Recruit>, ApiError>
where
  S: RecruitStore,
{
  let contact = NewContact::new(body.kind, body.content);
  let recruit = state
    .store
    .record_contact(id, contact)
    .await
    .map_err(ApiError::store)?;

  tracing::info!(recruit_id = %id, kind = body.kind.as_str(), "recorded contact");
  Ok(Json(recruit))
}

// ─── Communication log ────────────────────────────────────────────────────────

/// `GET /recruits/:id/communications`
pub async fn communications<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Communication>>, ApiError>
where
  S: RecruitStore,
{
  let log = state.store.communications(id).await.map_err(ApiError::store)?;
  Ok(Json(log))
}

// ─── Quick message ────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct QuickMessageBody {
  /// A built-in template id; takes precedence over `message`.
  pub template_id: Option<String>,
  pub message:     Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuickMessageResponse {
  pub recruit: Recruit,
  /// The text that was logged.
  pub message: String,
}

/// `POST /recruits/:id/quick-message`
pub async fn quick_message<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<QuickMessageBody>,
) -> Result<Json<QuickMessageResponse>, ApiError>
where
  S: RecruitStore,
{
  let message = match (body.template_id, body.message) {
    (Some(template_id), _) => {
      let template = MessageTemplate::find(&template_id)?;
      let recruit = state.store.get(id).await.map_err(ApiError::store)?;
      template.render(&recruit.name)
    }
    (None, Some(message)) if !message.trim().is_empty() => message,
    (None, _) => {
      return Err(ApiError::BadRequest(
        "either template_id or message is required".to_owned(),
      ));
    }
  };

  let contact = NewContact::new(ContactKind::QuickMessage, message.clone());
  let recruit = state
    .store
    .record_contact(id, contact)
    .await
    .map_err(ApiError::store)?;

  tracing::info!(recruit_id = %id, "sent quick message");
  Ok(Json(QuickMessageResponse { recruit, message }))
}
