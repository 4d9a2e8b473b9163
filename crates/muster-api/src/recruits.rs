//! Handlers for `/recruits` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/recruits` | Optional `?order=inserted\|updated` |
//! | `POST`   | `/recruits` | Body: [`RecruitBody`]; `name` required; returns 201 |
//! | `GET`    | `/recruits/:id` | 404 if not found |
//! | `PUT`    | `/recruits/:id` | Body: [`RecruitBody`]; omitted fields unchanged |
//! | `DELETE` | `/recruits/:id` | 204; 404 if not found |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use muster_core::{
  contact::{ContactKind, NewContact},
  recruit::{NewRecruit, Recruit, RecruitPatch},
  stage::Stage,
  store::RecruitStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── Body ─────────────────────────────────────────────────────────────────────

/// Request body shared by create and update.
///
/// `stage` is taken as a raw token so that an unknown value is reported as a
/// validation failure rather than a deserialisation error.
#[derive(Debug, Default, Deserialize)]
pub struct RecruitBody {
  pub name:     Option<String>,
  pub email:    Option<String>,
  pub phone:    Option<String>,
  pub notes:    Option<String>,
  pub stage:    Option<String>,
  pub source:   Option<String>,
  pub priority: Option<i32>,
}

impl RecruitBody {
  fn into_new_recruit(self) -> Result<NewRecruit, ApiError> {
    Ok(NewRecruit {
      name:     self.name.unwrap_or_default(),
      email:    self.email,
      phone:    self.phone,
      notes:    self.notes,
      stage:    Stage::parse_input(self.stage.as_deref())?,
      source:   self.source,
      priority: self.priority,
    })
  }

  fn into_patch(self) -> Result<RecruitPatch, ApiError> {
    Ok(RecruitPatch {
      name:     self.name,
      email:    self.email,
      phone:    self.phone,
      notes:    self.notes,
      stage:    Stage::parse_input(self.stage.as_deref())?,
      source:   self.source,
      priority: self.priority,
    })
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOrder {
  /// Oldest first, as stored.
  #[default]
  Inserted,
  /// Most recently updated first.
  Updated,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(default)]
  pub order: ListOrder,
}

/// `GET /recruits[?order=inserted|updated]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Recruit>>, ApiError>
where
  S: RecruitStore,
{
  let mut recruits = state.store.list().await.map_err(ApiError::store)?;
  if let ListOrder::Updated = params.order {
    recruits.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
  }
  Ok(Json(recruits))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /recruits`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<RecruitBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecruitStore,
{
  let input = body.into_new_recruit()?;
  let recruit = state.store.create(input).await.map_err(ApiError::store)?;

  tracing::info!(recruit_id = %recruit.id, name = %recruit.name, "created recruit");
  Ok((StatusCode::CREATED, Json(recruit)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /recruits/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Recruit>, ApiError>
where
  S: RecruitStore,
{
  let recruit = state.store.get(id).await.map_err(ApiError::store)?;
  Ok(Json(recruit))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /recruits/:id`
///
/// Moving a recruit to a different stage also counts as contact with them and
/// is logged as a `stage_change` communication.
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<RecruitBody>,
) -> Result<Json<Recruit>, ApiError>
where
  S: RecruitStore,
{
  let patch = body.into_patch()?;
  let previous = state.store.get(id).await.map_err(ApiError::store)?;
  let mut recruit = state.store.update(id, patch).await.map_err(ApiError::store)?;

  if recruit.stage != previous.stage {
    let contact = NewContact::new(
      ContactKind::StageChange,
      format!("Stage changed to {}", recruit.stage),
    );
    recruit = state
      .store
      .record_contact(id, contact)
      .await
      .map_err(ApiError::store)?;
    tracing::info!(
      recruit_id = %id,
      from = %previous.stage,
      to = %recruit.stage,
      "stage changed"
    );
  }

  Ok(Json(recruit))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /recruits/:id`
pub async fn delete<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: RecruitStore,
{
  state.store.delete(id).await.map_err(ApiError::store)?;
  tracing::info!(recruit_id = %id, "deleted recruit");
  Ok(StatusCode::NO_CONTENT)
}
