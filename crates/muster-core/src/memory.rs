//! [`MemoryStore`] — an in-process implementation of [`RecruitStore`].
//!
//! Used by tests and by servers configured with `store_path = ":memory:"`.
//! Nothing survives a restart.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use uuid::Uuid;

use crate::{
  Error, Result,
  contact::{Communication, NewContact},
  recruit::{NewRecruit, Recruit, RecruitPatch},
  store::RecruitStore,
};

#[derive(Debug, Default)]
struct Inner {
  /// Insertion order is the list order.
  recruits:       Vec<Recruit>,
  communications: Vec<Communication>,
}

impl Inner {
  fn position(&self, id: Uuid) -> Result<usize> {
    self
      .recruits
      .iter()
      .position(|r| r.id == id)
      .ok_or(Error::RecruitNotFound(id))
  }
}

/// A recruit store held entirely in memory.
///
/// Cloning is cheap — clones share the same underlying records. The lock is
/// held for the duration of a single operation only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Start from an existing record set, kept in the given order.
  ///
  /// Records are taken as-is, timestamps included; ids must be unique.
  pub fn with_recruits(recruits: impl IntoIterator<Item = Recruit>) -> Self {
    let inner = Inner { recruits: recruits.into_iter().collect(), ..Inner::default() };
    Self { inner: Arc::new(RwLock::new(inner)) }
  }

  fn read<T>(&self, f: impl FnOnce(&Inner) -> Result<T>) -> Result<T> {
    let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
    f(&guard)
  }

  fn write<T>(&self, f: impl FnOnce(&mut Inner) -> Result<T>) -> Result<T> {
    let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
  }
}

impl RecruitStore for MemoryStore {
  type Error = Error;

  async fn create(&self, input: NewRecruit) -> Result<Recruit> {
    let recruit = input.into_recruit(Uuid::new_v4(), Utc::now())?;
    self.write(|inner| {
      inner.recruits.push(recruit.clone());
      Ok(recruit)
    })
  }

  async fn get(&self, id: Uuid) -> Result<Recruit> {
    self.read(|inner| Ok(inner.recruits[inner.position(id)?].clone()))
  }

  async fn list(&self) -> Result<Vec<Recruit>> {
    self.read(|inner| Ok(inner.recruits.clone()))
  }

  async fn update(&self, id: Uuid, patch: RecruitPatch) -> Result<Recruit> {
    self.write(|inner| {
      let idx = inner.position(id)?;
      let recruit = &mut inner.recruits[idx];
      patch.apply(recruit, Utc::now())?;
      Ok(recruit.clone())
    })
  }

  async fn delete(&self, id: Uuid) -> Result<()> {
    self.write(|inner| {
      let idx = inner.position(id)?;
      inner.recruits.remove(idx);
      inner.communications.retain(|c| c.recruit_id != id);
      Ok(())
    })
  }

  async fn record_contact(&self, id: Uuid, contact: NewContact) -> Result<Recruit> {
    self.write(|inner| {
      let idx = inner.position(id)?;
      let recruit = &mut inner.recruits[idx];
      recruit.touch_contact(Utc::now());
      let touched = recruit.clone();

      if contact.is_logged() {
        let entry = contact.into_communication(id, touched.updated_at);
        inner.communications.push(entry);
      }
      Ok(touched)
    })
  }

  async fn communications(&self, id: Uuid) -> Result<Vec<Communication>> {
    self.read(|inner| {
      inner.position(id)?;
      Ok(
        inner
          .communications
          .iter()
          .filter(|c| c.recruit_id == id)
          .cloned()
          .collect(),
      )
    })
  }
}
