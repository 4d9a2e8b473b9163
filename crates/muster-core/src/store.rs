//! The `RecruitStore` trait.
//!
//! The trait is implemented by storage backends (the in-memory
//! [`MemoryStore`](crate::memory::MemoryStore) and `muster-store-sqlite`).
//! Higher layers (`muster-api`, the aggregator) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  contact::{Communication, NewContact},
  recruit::{NewRecruit, Recruit, RecruitPatch},
};

// ─── Error classification ────────────────────────────────────────────────────

/// Lets callers classify a backend error without knowing its concrete type.
///
/// Anything that is neither a not-found nor a validation failure is a storage
/// fault and is propagated as-is.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn is_not_found(&self) -> bool;
  fn is_validation(&self) -> bool;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a recruit store backend.
///
/// Every call either succeeds with its side effects visible to all later
/// calls, or fails leaving the store unchanged. Concurrent writers get
/// last-write-wins semantics.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RecruitStore: Send + Sync {
  type Error: StoreError;

  /// Validate and persist a new recruit. The store assigns `id`,
  /// `created_at` and `updated_at`.
  fn create(
    &self,
    input: NewRecruit,
  ) -> impl Future<Output = Result<Recruit, Self::Error>> + Send + '_;

  /// Retrieve a recruit by id. Fails with a not-found error if absent.
  fn get(&self, id: Uuid) -> impl Future<Output = Result<Recruit, Self::Error>> + Send + '_;

  /// All recruits in insertion order.
  fn list(&self) -> impl Future<Output = Result<Vec<Recruit>, Self::Error>> + Send + '_;

  /// Apply a partial update. Any stage may follow any other.
  fn update(
    &self,
    id: Uuid,
    patch: RecruitPatch,
  ) -> impl Future<Output = Result<Recruit, Self::Error>> + Send + '_;

  /// Permanently remove a recruit and its communication log. Deleting an
  /// already-deleted id fails with a not-found error.
  fn delete(&self, id: Uuid) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Contact events ────────────────────────────────────────────────────

  /// Stamp `last_contact` (and `updated_at`) with the current time, logging
  /// the contact when it carries content. Returns the refreshed recruit.
  fn record_contact(
    &self,
    id: Uuid,
    contact: NewContact,
  ) -> impl Future<Output = Result<Recruit, Self::Error>> + Send + '_;

  /// The communication log for a recruit, oldest first.
  fn communications(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Vec<Communication>, Self::Error>> + Send + '_;
}
