//! Read-only pipeline metrics.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/dashboard` | Optional `?days=<n>` follow-up threshold |
//! | `GET`  | `/overdue` | Optional `?days=<n>`; list order |
//! | `GET`  | `/weekly` | New and licensed recruits over the last seven days |
//! | `GET`  | `/templates` | Built-in follow-up templates; optional `?stage=<token>` |
//!
//! Each request recomputes from the store; nothing is cached.

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::Utc;
use muster_core::{
  aggregate::{Dashboard, PipelineAggregator, WeeklySummary},
  recruit::Recruit,
  stage::Stage,
  store::RecruitStore,
  template::MessageTemplate,
};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct FollowUpParams {
  /// Overrides the configured follow-up threshold, in days.
  pub days: Option<u32>,
}

/// `GET /dashboard[?days=<n>]`
pub async fn dashboard<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<FollowUpParams>,
) -> Result<Json<Dashboard>, ApiError>
where
  S: RecruitStore,
{
  let days = params.days.unwrap_or(state.follow_up_days);
  let dashboard = PipelineAggregator::new(state.store.as_ref())
    .dashboard(Utc::now(), days)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(dashboard))
}

/// `GET /overdue[?days=<n>]`
pub async fn overdue<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<FollowUpParams>,
) -> Result<Json<Vec<Recruit>>, ApiError>
where
  S: RecruitStore,
{
  let days = params.days.unwrap_or(state.follow_up_days);
  let overdue = PipelineAggregator::new(state.store.as_ref())
    .overdue_list(Utc::now(), days)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(overdue))
}

/// `GET /weekly`
pub async fn weekly<S>(State(state): State<ApiState<S>>) -> Result<Json<WeeklySummary>, ApiError>
where
  S: RecruitStore,
{
  let summary = PipelineAggregator::new(state.store.as_ref())
    .weekly_summary(Utc::now())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(summary))
}

#[derive(Debug, Deserialize)]
pub struct TemplateParams {
  /// Same tokens and synonyms as a recruit's stage; blank means all.
  pub stage: Option<String>,
}

/// `GET /templates[?stage=<token>]`
pub async fn templates(
  Query(params): Query<TemplateParams>,
) -> Result<Json<Vec<MessageTemplate>>, ApiError> {
  let templates = match Stage::parse_input(params.stage.as_deref())? {
    Some(stage) => MessageTemplate::for_stage(stage).copied().collect(),
    None => MessageTemplate::builtin().to_vec(),
  };
  Ok(Json(templates))
}
