//! Dashboard metrics derived from the recruit store.
//!
//! Nothing here is cached or persisted. Every [`PipelineAggregator`] call
//! re-reads [`RecruitStore::list`], so the figures always agree with the last
//! committed write. The pure helpers ([`StageCounts::tally`], [`is_overdue`],
//! [`WeeklySummary::compute`]) are exposed for callers that already hold a
//! record set.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{recruit::Recruit, stage::Stage, store::RecruitStore};

/// Days without contact after which a recruit needs a follow-up.
pub const DEFAULT_FOLLOW_UP_DAYS: u32 = 3;

/// Window used by [`WeeklySummary`], in days.
const WEEK_DAYS: i64 = 7;

// ─── Pure computations ───────────────────────────────────────────────────────

/// Whether `recruit` is due for a follow-up at `now`.
///
/// `Inactive` recruits are never due. Otherwise a recruit is due once more
/// than `threshold_days` days have passed since the later of its last contact
/// and its creation; exactly `threshold_days` is still on time.
pub fn is_overdue(recruit: &Recruit, now: DateTime<Utc>, threshold_days: u32) -> bool {
  if recruit.stage == Stage::Inactive {
    return false;
  }
  now - recruit.contact_reference() > TimeDelta::days(i64::from(threshold_days))
}

/// Per-stage record counts. Every stage is present, zero included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageCounts(BTreeMap<Stage, usize>);

impl StageCounts {
  pub fn tally<'r>(recruits: impl IntoIterator<Item = &'r Recruit>) -> Self {
    let mut counts: BTreeMap<Stage, usize> = Stage::all().map(|s| (s, 0)).collect();
    for recruit in recruits {
      *counts.entry(recruit.stage).or_default() += 1;
    }
    Self(counts)
  }

  pub fn get(&self, stage: Stage) -> usize { self.0.get(&stage).copied().unwrap_or(0) }

  pub fn total(&self) -> usize { self.0.values().sum() }

  /// `(stage, count)` pairs in pipeline order.
  pub fn iter(&self) -> impl Iterator<Item = (Stage, usize)> + '_ {
    self.0.iter().map(|(s, n)| (*s, *n))
  }
}

/// Pipeline activity over the seven days before `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySummary {
  /// Recruits created within the window.
  pub new_recruits: usize,
  /// Recruits currently `Licensed` and last updated within the window.
  pub licensed:     usize,
}

impl WeeklySummary {
  pub fn compute<'r>(
    recruits: impl IntoIterator<Item = &'r Recruit>,
    now: DateTime<Utc>,
  ) -> Self {
    let since = now - TimeDelta::days(WEEK_DAYS);
    let mut summary = Self { new_recruits: 0, licensed: 0 };
    for recruit in recruits {
      if recruit.created_at > since {
        summary.new_recruits += 1;
      }
      if recruit.stage == Stage::Licensed && recruit.updated_at > since {
        summary.licensed += 1;
      }
    }
    summary
  }
}

/// Everything the dashboard shows, computed from one read of the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
  pub as_of:          DateTime<Utc>,
  pub follow_up_days: u32,
  pub total:          usize,
  pub counts:         StageCounts,
  pub overdue_count:  usize,
  /// Overdue recruits in list order.
  pub overdue:        Vec<Recruit>,
  pub weekly:         WeeklySummary,
}

impl Dashboard {
  pub fn compute(recruits: &[Recruit], now: DateTime<Utc>, follow_up_days: u32) -> Self {
    let overdue: Vec<Recruit> = recruits
      .iter()
      .filter(|r| is_overdue(r, now, follow_up_days))
      .cloned()
      .collect();

    Self {
      as_of: now,
      follow_up_days,
      total: recruits.len(),
      counts: StageCounts::tally(recruits),
      overdue_count: overdue.len(),
      overdue,
      weekly: WeeklySummary::compute(recruits, now),
    }
  }
}

// ─── Aggregator ──────────────────────────────────────────────────────────────

/// Read-only view over a [`RecruitStore`].
///
/// Holds no state besides the store reference; it is cheap to construct per
/// request and safe to use from any number of concurrent readers.
#[derive(Debug)]
pub struct PipelineAggregator<'a, S> {
  store: &'a S,
}

impl<'a, S: RecruitStore> PipelineAggregator<'a, S> {
  pub fn new(store: &'a S) -> Self { Self { store } }

  pub async fn stage_counts(&self) -> Result<StageCounts, S::Error> {
    let recruits = self.store.list().await?;
    Ok(StageCounts::tally(&recruits))
  }

  pub async fn total_count(&self) -> Result<usize, S::Error> {
    Ok(self.store.list().await?.len())
  }

  /// See [`is_overdue`].
  pub fn is_overdue(&self, recruit: &Recruit, now: DateTime<Utc>, threshold_days: u32) -> bool {
    is_overdue(recruit, now, threshold_days)
  }

  /// Overdue recruits, in the same relative order as [`RecruitStore::list`].
  pub async fn overdue_list(
    &self,
    now: DateTime<Utc>,
    threshold_days: u32,
  ) -> Result<Vec<Recruit>, S::Error> {
    let mut recruits = self.store.list().await?;
    recruits.retain(|r| is_overdue(r, now, threshold_days));
    Ok(recruits)
  }

  pub async fn weekly_summary(&self, now: DateTime<Utc>) -> Result<WeeklySummary, S::Error> {
    let recruits = self.store.list().await?;
    Ok(WeeklySummary::compute(&recruits, now))
  }

  pub async fn dashboard(
    &self,
    now: DateTime<Utc>,
    threshold_days: u32,
  ) -> Result<Dashboard, S::Error> {
    let recruits = self.store.list().await?;
    Ok(Dashboard::compute(&recruits, now, threshold_days))
  }
}
