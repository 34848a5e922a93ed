//! Parameter resolver — turns raw fields into a fully resolved profile.
//!
//! This is the only place defaults are applied. The cost engine never
//! sees a missing field.
//!
//! Rules:
//!   - Salaried: hourly_rate = weekly_salary / weekly_hours (0 if hours ≤ 0).
//!   - hours_per_absence defaults to weekly_hours / 5.
//!   - weekly_hours defaults to the configured default weekly hours.
//!   - Every other missing numeric field defaults to 0, except
//!     skill_multiplier and seasonal_factor which default to 1.
//!   - Negative values are clamped to 0. Percentages above 100 pass through.
//!   - NaN and ±inf count as missing and take the default.

use crate::{
    profile::{AbsenceProfile, AdvancedAdjustment, EmploymentType, RawProfileFields},
    types::Amount,
};

pub const DEFAULT_WEEKLY_HOURS: f64 = 40.0;
pub const WORKDAYS_PER_WEEK: f64 = 5.0;

#[derive(Debug, Clone, Copy)]
pub struct ParameterResolver {
    default_weekly_hours: f64,
}

impl Default for ParameterResolver {
    fn default() -> Self {
        Self::new(DEFAULT_WEEKLY_HOURS)
    }
}

impl ParameterResolver {
    pub fn new(default_weekly_hours: f64) -> Self {
        Self {
            default_weekly_hours: non_negative("default_weekly_hours", default_weekly_hours),
        }
    }

    pub fn default_weekly_hours(&self) -> f64 {
        self.default_weekly_hours
    }

    pub fn resolve(&self, raw: &RawProfileFields) -> AbsenceProfile {
        let name = raw.employee_name.clone().unwrap_or_default();
        let field = |label: &str, value: Option<f64>| non_negative_or(&name, label, value, 0.0);

        let employment_type = raw.employment_type.unwrap_or_default();
        let weekly_hours = non_negative_or(
            &name,
            "weekly_hours",
            raw.weekly_hours,
            self.default_weekly_hours,
        );

        let hourly_rate = match (employment_type, raw.weekly_salary) {
            (EmploymentType::Salaried, Some(salary)) => {
                per_hour(field("weekly_salary", Some(salary)), weekly_hours)
            }
            // Salaried rows without a salary column fall back to a given rate.
            _ => field("hourly_rate", raw.hourly_rate),
        };

        let hours_per_absence = match raw.hours_per_absence {
            Some(h) => field("hours_per_absence", Some(h)),
            None => default_hours_per_absence(weekly_hours),
        };

        let advanced = raw.has_advanced_fields().then(|| {
            let neutral = AdvancedAdjustment::default();
            AdvancedAdjustment {
                training_hours:   field("training_hours", raw.training_hours),
                skill_multiplier: non_negative_or(&name, "skill_multiplier", raw.skill_multiplier, neutral.skill_multiplier),
                delay_penalty:    field("delay_penalty", raw.delay_penalty),
                rework_pct:       field("rework_pct", raw.rework_pct),
                hr_overhead_hrs:  field("hr_overhead_hrs", raw.hr_overhead_hrs),
                seasonal_factor:  non_negative_or(&name, "seasonal_factor", raw.seasonal_factor, neutral.seasonal_factor),
                compliance_cost:  field("compliance_cost", raw.compliance_cost),
                benefits_loading: field("benefits_loading", raw.benefits_loading),
            }
        });

        AbsenceProfile {
            employment_type,
            hourly_rate,
            weekly_hours,
            absences_per_year:     whole(field("absences_per_year", raw.absences_per_year)),
            hours_per_absence,
            num_managers:          whole(field("num_managers", raw.num_managers)),
            manager_weekly_salary: field("manager_weekly_salary", raw.manager_weekly_salary),
            manager_time_hours:    field("manager_time_hours", raw.manager_time_hours),
            overtime_rate:         field("overtime_rate", raw.overtime_rate),
            overtime_hours:        field("overtime_hours", raw.overtime_hours),
            productivity_loss_pct: field("productivity_loss_pct", raw.productivity_loss_pct),
            idle_equipment_rate:   field("idle_equipment_rate", raw.idle_equipment_rate),
            idle_hours:            field("idle_hours", raw.idle_hours),
            role_criticality:      raw.role_criticality.unwrap_or_default(),
            advanced,
            name,
        }
    }
}

/// Rate per hour for a weekly amount. Zero or negative hours yield 0.
pub fn per_hour(weekly_amount: Amount, weekly_hours: f64) -> Amount {
    if weekly_hours > 0.0 {
        weekly_amount / weekly_hours
    } else {
        0.0
    }
}

/// One workday's worth of the weekly schedule.
pub fn default_hours_per_absence(weekly_hours: f64) -> f64 {
    if weekly_hours > 0.0 {
        weekly_hours / WORKDAYS_PER_WEEK
    } else {
        0.0
    }
}

fn non_negative_or(profile: &str, field: &str, value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if !v.is_finite() => {
            log::warn!("profile '{profile}': {field} is not a finite number ({v}), using {default}");
            default
        }
        Some(v) if v < 0.0 => {
            log::warn!("profile '{profile}': negative {field} ({v}) clamped to 0");
            0.0
        }
        Some(v) => v,
        None => default,
    }
}

fn non_negative(field: &str, value: f64) -> f64 {
    non_negative_or("", field, Some(value), 0.0)
}

fn whole(value: f64) -> u32 {
    value.round().min(u32::MAX as f64) as u32
}
