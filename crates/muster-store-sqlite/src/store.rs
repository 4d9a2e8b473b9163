//! [`SqliteStore`] — the SQLite implementation of [`RecruitStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use muster_core::{
  contact::{Communication, NewContact},
  recruit::{NewRecruit, Recruit, RecruitPatch},
  store::RecruitStore,
};

use crate::{
  encode::{RECRUIT_COLUMNS, RawCommunication, RawRecruit, encode_dt, encode_uuid},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A recruit store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  #[cfg(test)]
  pub(crate) fn conn_for_tests(&self) -> &tokio_rusqlite::Connection { &self.conn }

  /// Overwrite every mutable column of an existing row.
  ///
  /// Returns `false` if the row no longer exists.
  async fn write_recruit(&self, recruit: &Recruit) -> Result<bool> {
    let raw = RawRecruit::from_recruit(recruit);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE recruits
             SET name = ?2, email = ?3, phone = ?4, notes = ?5, source = ?6,
                 priority = ?7, stage = ?8, updated_at = ?9, last_contact = ?10
           WHERE recruit_id = ?1",
          rusqlite::params![
            raw.recruit_id,
            raw.name,
            raw.email,
            raw.phone,
            raw.notes,
            raw.source,
            raw.priority,
            raw.stage,
            raw.updated_at,
            raw.last_contact,
          ],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }
}

// ─── RecruitStore impl ───────────────────────────────────────────────────────

impl RecruitStore for SqliteStore {
  type Error = Error;

  async fn create(&self, input: NewRecruit) -> Result<Recruit> {
    let recruit = input.into_recruit(Uuid::new_v4(), Utc::now())?;
    let raw = RawRecruit::from_recruit(&recruit);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO recruits (
             recruit_id, name, email, phone, notes, source, priority,
             stage, created_at, updated_at, last_contact
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            raw.recruit_id,
            raw.name,
            raw.email,
            raw.phone,
            raw.notes,
            raw.source,
            raw.priority,
            raw.stage,
            raw.created_at,
            raw.updated_at,
            raw.last_contact,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(recruit)
  }

  async fn get(&self, id: Uuid) -> Result<Recruit> {
    let id_str = encode_uuid(id);

    let raw: Option<RawRecruit> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {RECRUIT_COLUMNS} FROM recruits WHERE recruit_id = ?1"),
              rusqlite::params![id_str],
              RawRecruit::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw
      .ok_or(Error::RecruitNotFound(id))
      .and_then(RawRecruit::into_recruit)
  }

  async fn list(&self) -> Result<Vec<Recruit>> {
    let raws: Vec<RawRecruit> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {RECRUIT_COLUMNS} FROM recruits ORDER BY seq"))?;
        let rows = stmt
          .query_map([], RawRecruit::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecruit::into_recruit).collect()
  }

  async fn update(&self, id: Uuid, patch: RecruitPatch) -> Result<Recruit> {
    // Reject a bad patch before reading anything.
    patch.validate()?;

    let mut recruit = self.get(id).await?;
    patch.apply(&mut recruit, Utc::now())?;

    if !self.write_recruit(&recruit).await? {
      return Err(Error::RecruitNotFound(id));
    }
    Ok(recruit)
  }

  async fn delete(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM recruits WHERE recruit_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if removed == 0 {
      return Err(Error::RecruitNotFound(id));
    }
    Ok(())
  }

  // ── Contact events ────────────────────────────────────────────────────────

  async fn record_contact(&self, id: Uuid, contact: NewContact) -> Result<Recruit> {
    let mut recruit = self.get(id).await?;
    recruit.touch_contact(Utc::now());

    let entry = contact.is_logged().then(|| {
      let logged = contact.into_communication(id, recruit.updated_at);
      RawCommunication::from_communication(&logged)
    });

    let id_str       = encode_uuid(id);
    let contacted_at = encode_dt(recruit.updated_at);

    let found = self
      .conn
      .call(move |conn| {
        // Both writes land together or not at all.
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE recruits SET last_contact = ?2, updated_at = ?2 WHERE recruit_id = ?1",
          rusqlite::params![id_str, contacted_at],
        )?;
        if changed == 0 {
          return Ok(false);
        }
        if let Some(c) = entry {
          tx.execute(
            "INSERT INTO communications (
               communication_id, recruit_id, kind, content, recorded_at
             ) VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
              c.communication_id,
              c.recruit_id,
              c.kind,
              c.content,
              c.recorded_at,
            ],
          )?;
        }
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !found {
      return Err(Error::RecruitNotFound(id));
    }
    Ok(recruit)
  }

  async fn communications(&self, id: Uuid) -> Result<Vec<Communication>> {
    let id_str = encode_uuid(id);

    let raws: Option<Vec<RawCommunication>> = self
      .conn
      .call(move |conn| {
        let exists = conn
          .query_row(
            "SELECT 1 FROM recruits WHERE recruit_id = ?1",
            rusqlite::params![id_str],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !exists {
          return Ok(None);
        }

        let mut stmt = conn.prepare(
          "SELECT communication_id, recruit_id, kind, content, recorded_at
           FROM communications
           WHERE recruit_id = ?1
           ORDER BY seq",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| {
            Ok(RawCommunication {
              communication_id: row.get(0)?,
              recruit_id:       row.get(1)?,
              kind:             row.get(2)?,
              content:          row.get(3)?,
              recorded_at:      row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Some(rows))
      })
      .await?;

    raws
      .ok_or(Error::RecruitNotFound(id))?
      .into_iter()
      .map(RawCommunication::into_communication)
      .collect()
  }
}
