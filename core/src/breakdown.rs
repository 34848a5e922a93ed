//! CostBreakdown — the ordered, immutable output of one evaluation.

use crate::types::Amount;
use serde::{Deserialize, Serialize};

// ── Component names (presentation labels) ──────────────────────────

pub const DIRECT_COST:       &str = "Direct Cost (Wages)";
pub const MANAGER_COST:      &str = "Manager Response Cost";
pub const OVERTIME_COST:     &str = "Overtime/Backfill Cost";
pub const PRODUCTIVITY_COST: &str = "Productivity Loss Cost";
pub const EQUIPMENT_COST:    &str = "Idle Equipment Cost";
pub const SKILL_ADJUSTMENT:  &str = "Skill Adjustment";
pub const TRAINING_COST:     &str = "Training Cost";
pub const DELAY_COST:        &str = "Delay Penalty Cost";
pub const REWORK_COST:       &str = "Rework Cost";
pub const HR_OVERHEAD_COST:  &str = "HR Overhead Cost";
pub const SEASONAL_COST:     &str = "Seasonal Cost";
pub const COMPLIANCE_COST:   &str = "Compliance Cost";
pub const BENEFITS_COST:     &str = "Benefits Cost";
pub const OVERHEAD_COST:     &str = "Overhead Cost";
pub const TOTAL_PER_ABSENCE: &str = "Total per Absence";
pub const ANNUALIZED_COST:   &str = "Annualized Cost";

/// Ordered (component, amount) pairs. Insertion order is presentation order.
///
/// Every component except the two summary rows is a constituent term:
/// the constituents always sum to `Total per Absence`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostBreakdown {
    components: Vec<(String, Amount)>,
}

impl CostBreakdown {
    /// Assemble a breakdown from constituent terms. The two summary rows
    /// are appended last, in that order.
    pub(crate) fn from_terms(
        terms: Vec<(&'static str, Amount)>,
        total_per_absence: Amount,
        annualized_cost: Amount,
    ) -> Self {
        let mut components: Vec<(String, Amount)> = terms
            .into_iter()
            .map(|(name, amount)| (name.to_string(), amount))
            .collect();
        components.push((TOTAL_PER_ABSENCE.to_string(), total_per_absence));
        components.push((ANNUALIZED_COST.to_string(), annualized_cost));
        Self { components }
    }

    pub fn get(&self, component: &str) -> Option<Amount> {
        self.components
            .iter()
            .find(|(name, _)| name == component)
            .map(|(_, amount)| *amount)
    }

    pub fn total_per_absence(&self) -> Amount {
        self.get(TOTAL_PER_ABSENCE).unwrap_or(0.0)
    }

    pub fn annualized_cost(&self) -> Amount {
        self.get(ANNUALIZED_COST).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Amount)> {
        self.components.iter().map(|(name, amount)| (name.as_str(), *amount))
    }

    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|(name, _)| name.as_str())
    }

    /// Constituent terms only, without the summary rows.
    pub fn constituents(&self) -> impl Iterator<Item = (&str, Amount)> {
        self.iter()
            .filter(|(name, _)| *name != TOTAL_PER_ABSENCE && *name != ANNUALIZED_COST)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_rows_are_appended_last() {
        let b = CostBreakdown::from_terms(vec![(DIRECT_COST, 10.0), (MANAGER_COST, 5.0)], 15.0, 90.0);
        let names: Vec<&str> = b.component_names().collect();
        assert_eq!(names, vec![DIRECT_COST, MANAGER_COST, TOTAL_PER_ABSENCE, ANNUALIZED_COST]);
        assert_eq!(b.total_per_absence(), 15.0);
        assert_eq!(b.annualized_cost(), 90.0);
        assert_eq!(b.constituents().count(), 2);
    }
}
