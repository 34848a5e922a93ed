//! Memoized cost evaluation keyed by the exact numeric input tuple.
//!
//! Purely a performance layer: a hit returns exactly what a fresh
//! evaluation would. The profile name and role criticality never enter
//! the math, so they are not part of the key.
//!
//! The cache is bounded: once it holds `capacity` entries it is emptied
//! before the next insert, so a long-lived session never grows past it.

use crate::{
    breakdown::CostBreakdown,
    cost_engine::{self, CostEvaluator},
    profile::AbsenceProfile,
    types::Pct,
};
use std::collections::HashMap;

/// Bit patterns of every input that reaches the formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CostKey(Vec<u64>);

impl CostKey {
    pub fn new(p: &AbsenceProfile, overhead_pct: Pct) -> Self {
        let mut bits = vec![
            overhead_pct.to_bits(),
            p.hourly_rate.to_bits(),
            p.weekly_hours.to_bits(),
            u64::from(p.absences_per_year),
            p.hours_per_absence.to_bits(),
            u64::from(p.num_managers),
            p.manager_weekly_salary.to_bits(),
            p.manager_time_hours.to_bits(),
            p.overtime_rate.to_bits(),
            p.overtime_hours.to_bits(),
            p.productivity_loss_pct.to_bits(),
            p.idle_equipment_rate.to_bits(),
            p.idle_hours.to_bits(),
        ];
        if let Some(adv) = &p.advanced {
            bits.extend([
                adv.training_hours.to_bits(),
                adv.skill_multiplier.to_bits(),
                adv.delay_penalty.to_bits(),
                adv.rework_pct.to_bits(),
                adv.hr_overhead_hrs.to_bits(),
                adv.seasonal_factor.to_bits(),
                adv.compliance_cost.to_bits(),
                adv.benefits_loading.to_bits(),
            ]);
        }
        Self(bits)
    }
}

pub const DEFAULT_CAPACITY: usize = 4096;

#[derive(Debug)]
pub struct MemoizedEngine {
    cache:    HashMap<CostKey, CostBreakdown>,
    capacity: usize,
    hits:     u64,
    misses:   u64,
}

impl Default for MemoizedEngine {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl MemoizedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of 0 is treated as 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache:    HashMap::new(),
            capacity: capacity.max(1),
            hits:     0,
            misses:   0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl CostEvaluator for MemoizedEngine {
    fn evaluate(&mut self, profile: &AbsenceProfile, overhead_pct: Pct) -> CostBreakdown {
        let key = CostKey::new(profile, overhead_pct);
        if let Some(hit) = self.cache.get(&key) {
            self.hits += 1;
            return hit.clone();
        }
        self.misses += 1;
        let result = cost_engine::evaluate(profile, overhead_pct);
        if self.cache.len() >= self.capacity {
            log::debug!("memo: capacity {} reached, clearing cache", self.capacity);
            self.cache.clear();
        }
        self.cache.insert(key, result.clone());
        log::debug!("memo: cached evaluation for '{}' ({} entries)", profile.name, self.cache.len());
        result
    }
}
