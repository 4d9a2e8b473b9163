//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::HashSet;

use chrono::TimeDelta;
use muster_core::{
  aggregate::{DEFAULT_FOLLOW_UP_DAYS, PipelineAggregator},
  contact::{ContactKind, NewContact},
  recruit::{NewRecruit, RecruitPatch},
  stage::Stage,
  store::{RecruitStore, StoreError},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_round_trips_every_field() {
  let s = store().await;

  let input = NewRecruit {
    name:     "Maria Garcia".into(),
    email:    Some("maria@example.com".into()),
    phone:    Some("(555) 201-3344".into()),
    notes:    Some("Bilingual - Spanish/English".into()),
    stage:    Some(Stage::InTraining),
    source:   Some("Referral".into()),
    priority: Some(2),
  };
  let created = s.create(input).await.unwrap();
  let fetched = s.get(created.id).await.unwrap();

  assert_eq!(fetched, created);
  assert_eq!(fetched.stage, Stage::InTraining);
  assert_eq!(fetched.source, "Referral");
}

#[tokio::test]
async fn jane_doe_defaults_to_new() {
  let s = store().await;
  let agg = PipelineAggregator::new(&s);
  let before = agg.stage_counts().await.unwrap();

  let jane = s.create(NewRecruit::new("Jane Doe")).await.unwrap();
  assert_eq!(jane.stage, Stage::New);
  assert_eq!(jane.email, None);
  assert_eq!(jane.created_at, jane.updated_at);

  let after = agg.stage_counts().await.unwrap();
  for stage in Stage::all() {
    let delta = usize::from(stage == Stage::New);
    assert_eq!(after.get(stage), before.get(stage) + delta, "{stage}");
  }
}

#[tokio::test]
async fn ids_are_unique() {
  let s = store().await;
  let mut ids = HashSet::new();
  for i in 0..25 {
    let r = s.create(NewRecruit::new(format!("R{i}"))).await.unwrap();
    assert!(ids.insert(r.id));
  }
}

#[tokio::test]
async fn get_missing_is_not_found() {
  let s = store().await;
  let err = s.get(Uuid::new_v4()).await.unwrap_err();
  assert!(err.is_not_found());
}

#[tokio::test]
async fn blank_name_is_rejected_and_count_unchanged() {
  let s = store().await;
  s.create(NewRecruit::new("Existing")).await.unwrap();

  for name in ["", "   "] {
    let err = s.create(NewRecruit::new(name)).await.unwrap_err();
    assert!(err.is_validation(), "{name:?}");
  }
  assert_eq!(PipelineAggregator::new(&s).total_count().await.unwrap(), 1);
}

#[tokio::test]
async fn long_and_special_names_are_accepted() {
  let s = store().await;
  let long = "x".repeat(5_000);
  let r = s.create(NewRecruit::new(long.clone())).await.unwrap();
  assert_eq!(s.get(r.id).await.unwrap().name, long);

  let odd = "Zoë \"Z\" O'Neil; DROP TABLE recruits; --";
  let r = s.create(NewRecruit::new(odd)).await.unwrap();
  assert_eq!(s.get(r.id).await.unwrap().name, odd);
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_returns_insertion_order() {
  let s = store().await;
  let a = s.create(NewRecruit::new("A")).await.unwrap();
  let b = s.create(NewRecruit::new("B")).await.unwrap();
  let c = s.create(NewRecruit::new("C")).await.unwrap();

  // Updating must not reorder.
  s.update(a.id, RecruitPatch::stage(Stage::Contacted)).await.unwrap();

  let ids: Vec<_> = s.list().await.unwrap().into_iter().map(|r| r.id).collect();
  assert_eq!(ids, vec![a.id, b.id, c.id]);
}

#[tokio::test]
async fn duplicate_emails_are_allowed() {
  let s = store().await;
  s.create(NewRecruit::new("One").with_email("dup@test.com")).await.unwrap();
  s.create(NewRecruit::new("Two").with_email("dup@test.com")).await.unwrap();

  let all = s.list().await.unwrap();
  assert_eq!(all.len(), 2);
  assert!(all.iter().all(|r| r.email.as_deref() == Some("dup@test.com")));
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn licensed_then_contacted_is_preserved() {
  let s = store().await;
  let r = s.create(NewRecruit::new("Mover")).await.unwrap();

  s.update(r.id, RecruitPatch::stage(Stage::Licensed)).await.unwrap();
  let counts = PipelineAggregator::new(&s).stage_counts().await.unwrap();
  assert_eq!(counts.get(Stage::Licensed), 1);

  s.update(r.id, RecruitPatch::stage(Stage::Contacted)).await.unwrap();
  assert_eq!(s.get(r.id).await.unwrap().stage, Stage::Contacted);

  let counts = PipelineAggregator::new(&s).stage_counts().await.unwrap();
  assert_eq!(counts.get(Stage::Licensed), 0);
  assert_eq!(counts.get(Stage::Contacted), 1);
}

#[tokio::test]
async fn partial_update_leaves_other_fields() {
  let s = store().await;
  let r = s
    .create(NewRecruit::new("Keep").with_email("keep@example.com"))
    .await
    .unwrap();

  let updated = s
    .update(r.id, RecruitPatch { notes: Some("Call Friday".into()), ..Default::default() })
    .await
    .unwrap();

  assert_eq!(updated.email.as_deref(), Some("keep@example.com"));
  assert_eq!(updated.notes.as_deref(), Some("Call Friday"));
  assert_eq!(updated.created_at, r.created_at);
  assert!(updated.updated_at >= updated.created_at);
  assert_eq!(s.get(r.id).await.unwrap(), updated);
}

#[tokio::test]
async fn update_with_empty_name_is_rejected_without_partial_write() {
  let s = store().await;
  let r = s.create(NewRecruit::new("Keep")).await.unwrap();

  let patch = RecruitPatch {
    name:  Some(String::new()),
    stage: Some(Stage::Inactive),
    ..Default::default()
  };
  let err = s.update(r.id, patch).await.unwrap_err();
  assert!(err.is_validation());
  assert_eq!(s.get(r.id).await.unwrap(), r);
}

#[tokio::test]
async fn update_missing_is_not_found() {
  let s = store().await;
  let err = s
    .update(Uuid::new_v4(), RecruitPatch::stage(Stage::New))
    .await
    .unwrap_err();
  assert!(err.is_not_found());
}

#[tokio::test]
async fn counts_sum_to_total_after_many_updates() {
  let s = store().await;
  let mut ids = Vec::new();
  for i in 0..10 {
    ids.push(s.create(NewRecruit::new(format!("R{i}"))).await.unwrap().id);
  }
  let stages: Vec<_> = Stage::all().collect();
  for (i, id) in ids.iter().enumerate() {
    for step in 0..3 {
      let stage = stages[(i + step) % stages.len()];
      s.update(*id, RecruitPatch::stage(stage)).await.unwrap();
    }
  }

  let agg = PipelineAggregator::new(&s);
  let counts = agg.stage_counts().await.unwrap();
  assert_eq!(counts.total(), agg.total_count().await.unwrap());
  assert_eq!(counts.total(), 10);
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_then_get_fails_and_total_drops_by_one() {
  let s = store().await;
  let a = s.create(NewRecruit::new("A")).await.unwrap();
  s.create(NewRecruit::new("B")).await.unwrap();

  let agg = PipelineAggregator::new(&s);
  let before = agg.stage_counts().await.unwrap().total();

  s.delete(a.id).await.unwrap();
  assert!(s.get(a.id).await.unwrap_err().is_not_found());
  assert_eq!(agg.stage_counts().await.unwrap().total(), before - 1);
}

#[tokio::test]
async fn second_delete_is_not_found() {
  let s = store().await;
  let r = s.create(NewRecruit::new("Once")).await.unwrap();

  s.delete(r.id).await.unwrap();
  assert!(s.delete(r.id).await.unwrap_err().is_not_found());
}

// ─── Contact events ──────────────────────────────────────────────────────────

#[tokio::test]
async fn record_contact_refreshes_follow_up_reference() {
  let s = store().await;
  let r = s.create(NewRecruit::new("Due")).await.unwrap();
  let agg = PipelineAggregator::new(&s);

  let later = r.created_at + TimeDelta::days(4);
  assert!(agg.is_overdue(&s.get(r.id).await.unwrap(), later, DEFAULT_FOLLOW_UP_DAYS));

  let touched = s.record_contact(r.id, NewContact::default()).await.unwrap();
  assert_eq!(touched.last_contact, Some(touched.updated_at));
  assert_eq!(s.get(r.id).await.unwrap(), touched);

  let reference = touched.contact_reference();
  assert!(!agg.is_overdue(&touched, reference + TimeDelta::days(2), DEFAULT_FOLLOW_UP_DAYS));
  assert!(!agg.is_overdue(&touched, reference + TimeDelta::days(3), DEFAULT_FOLLOW_UP_DAYS));
  let past_due = reference + TimeDelta::days(3) + TimeDelta::nanoseconds(1);
  assert!(agg.is_overdue(&touched, past_due, DEFAULT_FOLLOW_UP_DAYS));
}

#[tokio::test]
async fn communications_are_logged_in_order() {
  let s = store().await;
  let r = s.create(NewRecruit::new("Chatty")).await.unwrap();

  s.record_contact(r.id, NewContact::new(ContactKind::Manual, "first"))
    .await
    .unwrap();
  s.record_contact(r.id, NewContact::default()).await.unwrap();
  s.record_contact(r.id, NewContact::new(ContactKind::QuickMessage, "second"))
    .await
    .unwrap();

  let log = s.communications(r.id).await.unwrap();
  let contents: Vec<_> = log.iter().map(|c| c.content.as_str()).collect();
  assert_eq!(contents, ["first", "second"]);
  assert_eq!(log[1].kind, ContactKind::QuickMessage);
  assert!(log.iter().all(|c| c.recruit_id == r.id));
}

#[tokio::test]
async fn contact_on_missing_recruit_is_not_found() {
  let s = store().await;
  let id = Uuid::new_v4();
  assert!(s.record_contact(id, NewContact::default()).await.unwrap_err().is_not_found());
  assert!(s.communications(id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn delete_cascades_to_communications() {
  let s = store().await;
  let r = s.create(NewRecruit::new("Gone")).await.unwrap();
  s.record_contact(r.id, NewContact::new(ContactKind::Manual, "hello"))
    .await
    .unwrap();

  s.delete(r.id).await.unwrap();

  let orphans: i64 = s
    .conn_for_tests()
    .call(|conn| {
      Ok(conn.query_row("SELECT COUNT(*) FROM communications", [], |row| row.get(0))?)
    })
    .await
    .unwrap();
  assert_eq!(orphans, 0);
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn records_survive_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("muster.sqlite3");

  let id = {
    let s = SqliteStore::open(&path).await.unwrap();
    let r = s.create(NewRecruit::new("Durable")).await.unwrap();
    s.update(r.id, RecruitPatch::stage(Stage::Licensed)).await.unwrap();
    r.id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let r = s.get(id).await.unwrap();
  assert_eq!(r.name, "Durable");
  assert_eq!(r.stage, Stage::Licensed);
}
