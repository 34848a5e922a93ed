//! Cost engine — the pure absence-cost formula.
//!
//! COMPOSITION ORDER (fixed, never reordered):
//!   1. Base terms: direct, manager, overtime, productivity, equipment.
//!   2. Advanced terms on top of base_total: skill, training, delay,
//!      rework, HR overhead → subtotal.
//!   3. Seasonal scaling of the subtotal, then compliance and benefits
//!      (benefits are loaded on the seasonally scaled subtotal).
//!   4. Global overhead markup.
//!   5. Annualization by absences per year.
//!
//! RULES:
//!   - Every function here is total: no input makes it panic or fail.
//!   - Nothing reads ambient state. overhead_pct is always an argument.
//!   - Amounts are never rounded here.

use crate::{
    breakdown::{self, CostBreakdown},
    profile::{AbsenceProfile, AdvancedAdjustment},
    resolver::per_hour,
    types::{Amount, Pct},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BaseCosts {
    pub direct_cost:         Amount,
    pub manager_hourly_rate: Amount,
    pub manager_cost:        Amount,
    pub overtime_cost:       Amount,
    pub productivity_cost:   Amount,
    pub equipment_cost:      Amount,
    pub base_total:          Amount,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AdvancedCosts {
    pub skill_adjustment:      Amount,
    pub training_cost:         Amount,
    pub delay_cost:            Amount,
    pub rework_cost:           Amount,
    pub hr_overhead_cost:      Amount,
    pub subtotal:              Amount,
    pub subtotal_seasonal:     Amount,
    /// Reconciled display term: subtotal × (seasonal_factor − 1).
    pub seasonal_cost:         Amount,
    pub compliance_cost:       Amount,
    pub benefits_cost:         Amount,
    pub total_before_overhead: Amount,
}

/// Every intermediate figure of one evaluation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CostEvaluation {
    pub base:                  BaseCosts,
    pub advanced:              Option<AdvancedCosts>,
    pub total_before_overhead: Amount,
    pub overhead_cost:         Amount,
    pub total_with_overhead:   Amount,
    pub annualized_cost:       Amount,
}

pub fn base_costs(p: &AbsenceProfile) -> BaseCosts {
    let direct_cost = p.hourly_rate * p.hours_per_absence;
    let manager_hourly_rate = per_hour(p.manager_weekly_salary, p.weekly_hours);
    let manager_cost = manager_hourly_rate * p.manager_time_hours * p.num_managers as f64;
    let overtime_cost = p.overtime_rate * p.overtime_hours;
    let productivity_cost = (p.hourly_rate * p.weekly_hours) * (p.productivity_loss_pct / 100.0);
    let equipment_cost = p.idle_equipment_rate * p.idle_hours;

    let base_total = direct_cost + manager_cost + overtime_cost + productivity_cost + equipment_cost;

    BaseCosts {
        direct_cost,
        manager_hourly_rate,
        manager_cost,
        overtime_cost,
        productivity_cost,
        equipment_cost,
        base_total,
    }
}

pub fn advanced_costs(
    p: &AbsenceProfile,
    base: &BaseCosts,
    adv: &AdvancedAdjustment,
) -> AdvancedCosts {
    let skill_adjustment = base.base_total * (adv.skill_multiplier - 1.0);
    let training_cost = adv.training_hours * p.hourly_rate;
    let delay_cost = adv.delay_penalty * p.hours_per_absence;
    let rework_cost = base.base_total * (adv.rework_pct / 100.0);
    let hr_overhead_cost = adv.hr_overhead_hrs * base.manager_hourly_rate;

    let subtotal = base.base_total
        + skill_adjustment
        + training_cost
        + delay_cost
        + rework_cost
        + hr_overhead_cost;
    let subtotal_seasonal = subtotal * adv.seasonal_factor;
    let benefits_cost = subtotal_seasonal * (adv.benefits_loading / 100.0);
    let total_before_overhead = subtotal_seasonal + adv.compliance_cost + benefits_cost;

    AdvancedCosts {
        skill_adjustment,
        training_cost,
        delay_cost,
        rework_cost,
        hr_overhead_cost,
        subtotal,
        subtotal_seasonal,
        seasonal_cost: subtotal * (adv.seasonal_factor - 1.0),
        compliance_cost: adv.compliance_cost,
        benefits_cost,
        total_before_overhead,
    }
}

pub fn apply_overhead(total_before_overhead: Amount, overhead_pct: Pct) -> Amount {
    total_before_overhead * (1.0 + overhead_pct / 100.0)
}

pub fn annualize(total_with_overhead: Amount, absences_per_year: u32) -> Amount {
    total_with_overhead * absences_per_year as f64
}

/// Evaluate one profile, keeping every intermediate figure.
pub fn evaluate_detailed(p: &AbsenceProfile, overhead_pct: Pct) -> CostEvaluation {
    let base = base_costs(p);
    let advanced = p.advanced.as_ref().map(|adv| advanced_costs(p, &base, adv));

    let total_before_overhead = advanced
        .as_ref()
        .map(|a| a.total_before_overhead)
        .unwrap_or(base.base_total);
    let total_with_overhead = apply_overhead(total_before_overhead, overhead_pct);

    CostEvaluation {
        base,
        advanced,
        total_before_overhead,
        overhead_cost: total_with_overhead - total_before_overhead,
        total_with_overhead,
        annualized_cost: annualize(total_with_overhead, p.absences_per_year),
    }
}

/// Evaluate one profile into its presentation breakdown.
pub fn evaluate(p: &AbsenceProfile, overhead_pct: Pct) -> CostBreakdown {
    evaluate_detailed(p, overhead_pct).into_breakdown()
}

impl CostEvaluation {
    pub fn into_breakdown(self) -> CostBreakdown {
        let b = &self.base;
        let mut terms = vec![
            (breakdown::DIRECT_COST,       b.direct_cost),
            (breakdown::MANAGER_COST,      b.manager_cost),
            (breakdown::OVERTIME_COST,     b.overtime_cost),
            (breakdown::PRODUCTIVITY_COST, b.productivity_cost),
            (breakdown::EQUIPMENT_COST,    b.equipment_cost),
        ];

        if let Some(a) = &self.advanced {
            terms.extend([
                (breakdown::SKILL_ADJUSTMENT, a.skill_adjustment),
                (breakdown::TRAINING_COST,    a.training_cost),
                (breakdown::DELAY_COST,       a.delay_cost),
                (breakdown::REWORK_COST,      a.rework_cost),
                (breakdown::HR_OVERHEAD_COST, a.hr_overhead_cost),
                (breakdown::SEASONAL_COST,    a.seasonal_cost),
                (breakdown::COMPLIANCE_COST,  a.compliance_cost),
                (breakdown::BENEFITS_COST,    a.benefits_cost),
            ]);
        }

        terms.push((breakdown::OVERHEAD_COST, self.overhead_cost));

        CostBreakdown::from_terms(terms, self.total_with_overhead, self.annualized_cost)
    }
}

/// The seam between the batch evaluator and a cost function.
pub trait CostEvaluator {
    fn evaluate(&mut self, profile: &AbsenceProfile, overhead_pct: Pct) -> CostBreakdown;
}

/// Direct, uncached evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostEngine;

impl CostEvaluator for CostEngine {
    fn evaluate(&mut self, profile: &AbsenceProfile, overhead_pct: Pct) -> CostBreakdown {
        evaluate(profile, overhead_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overhead_of_zero_is_identity() {
        assert_eq!(apply_overhead(573.48, 0.0), 573.48);
        assert_eq!(apply_overhead(100.0, 50.0), 150.0);
    }

    #[test]
    fn annualize_with_no_absences_is_zero() {
        assert_eq!(annualize(1234.5, 0), 0.0);
    }
}
