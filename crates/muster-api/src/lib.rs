//! JSON REST API for Muster.
//!
//! Serves recruits, their contact log, and pipeline metrics from any
//! [`muster_core::store::RecruitStore`]. The router carries no auth; put it
//! behind whatever the deployment trusts.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", muster_api::api_router(store.clone(), follow_up_days))
//! ```

pub mod contacts;
pub mod dashboard;
pub mod error;
pub mod recruits;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use muster_core::store::RecruitStore;

pub use error::ApiError;

/// Shared state threaded through all API handlers.
pub struct ApiState<S> {
  pub store:          Arc<S>,
  /// Default follow-up threshold for `/dashboard` and `/overdue`.
  pub follow_up_days: u32,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), follow_up_days: self.follow_up_days }
  }
}

/// Build the API router for `store`, with state already applied so it nests
/// under any parent.
pub fn api_router<S>(store: Arc<S>, follow_up_days: u32) -> Router<()>
where
  S: RecruitStore + 'static,
{
  Router::new()
    // Recruits
    .route("/recruits", get(recruits::list::<S>).post(recruits::create::<S>))
    .route(
      "/recruits/{id}",
      get(recruits::get_one::<S>)
        .put(recruits::update::<S>)
        .delete(recruits::delete::<S>),
    )
    // Contact events
    .route("/recruits/{id}/contact", post(contacts::record::<S>))
    .route("/recruits/{id}/communications", get(contacts::communications::<S>))
    .route("/recruits/{id}/quick-message", post(contacts::quick_message::<S>))
    // Metrics
    .route("/dashboard", get(dashboard::dashboard::<S>))
    .route("/overdue", get(dashboard::overdue::<S>))
    .route("/weekly", get(dashboard::weekly::<S>))
    .route("/templates", get(dashboard::templates))
    .with_state(ApiState { store, follow_up_days })
}
