//! Batch evaluator — one breakdown per profile, input order preserved.
//!
//! Rows share nothing except the read-only overhead percentage.
//! Aggregates are plain reductions over the finished rows.

use crate::{
    breakdown::CostBreakdown,
    cost_engine::{CostEngine, CostEvaluator},
    profile::{AbsenceProfile, RawProfileFields},
    resolver::ParameterResolver,
    types::{Amount, Pct, ProfileName, ReportId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchRow {
    pub name:      ProfileName,
    pub breakdown: CostBreakdown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BatchSummary {
    pub row_count:              usize,
    /// 0 for an empty batch.
    pub mean_cost_per_incident: Amount,
    pub total_annualized_cost:  Amount,
}

impl BatchSummary {
    pub fn from_rows(rows: &[BatchRow]) -> Self {
        let row_count = rows.len();
        let total_per_incident: Amount = rows.iter().map(|r| r.breakdown.total_per_absence()).sum();
        let total_annualized_cost = rows.iter().map(|r| r.breakdown.annualized_cost()).sum();
        let mean_cost_per_incident = if row_count > 0 {
            total_per_incident / row_count as f64
        } else {
            0.0
        };
        Self {
            row_count,
            mean_cost_per_incident,
            total_annualized_cost,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub report_id:    ReportId,
    pub generated_at: DateTime<Utc>,
    pub overhead_pct: Pct,
    pub rows:         Vec<BatchRow>,
    pub summary:      BatchSummary,
}

#[derive(Debug, Clone, Copy)]
pub struct BatchEvaluator {
    overhead_pct: Pct,
}

impl BatchEvaluator {
    pub fn new(overhead_pct: Pct) -> Self {
        Self { overhead_pct }
    }

    pub fn overhead_pct(&self) -> Pct {
        self.overhead_pct
    }

    pub fn evaluate(&self, profiles: &[AbsenceProfile]) -> BatchReport {
        self.evaluate_with(&mut CostEngine, profiles)
    }

    /// Evaluate through any cost function, e.g. a memoized one.
    pub fn evaluate_with<E: CostEvaluator>(
        &self,
        engine: &mut E,
        profiles: &[AbsenceProfile],
    ) -> BatchReport {
        let rows: Vec<BatchRow> = profiles
            .iter()
            .map(|p| BatchRow {
                name:      p.name.clone(),
                breakdown: engine.evaluate(p, self.overhead_pct),
            })
            .collect();
        let summary = BatchSummary::from_rows(&rows);

        log::debug!(
            "batch: evaluated {} rows at {}% overhead, annualized total {:.2}",
            summary.row_count,
            self.overhead_pct,
            summary.total_annualized_cost
        );

        BatchReport {
            report_id: uuid::Uuid::new_v4(),
            generated_at: Utc::now(),
            overhead_pct: self.overhead_pct,
            rows,
            summary,
        }
    }

    /// Resolve raw rows first. Missing fields default, never abort.
    pub fn evaluate_raw(
        &self,
        resolver: &ParameterResolver,
        raw_rows: &[RawProfileFields],
    ) -> BatchReport {
        let profiles: Vec<AbsenceProfile> = raw_rows.iter().map(|r| resolver.resolve(r)).collect();
        self.evaluate(&profiles)
    }
}
