//! Employee profile model: the resolved input of the cost engine.
//!
//! RULE: An AbsenceProfile is always fully resolved. Every numeric
//! field is non-negative and every default has been applied.
//! Raw, possibly incomplete input lives in `RawProfileFields` and is
//! turned into a profile only by the resolver.

use crate::types::{Amount, Pct, ProfileName};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Deserializes through `FromStr`, so JSON and CSV accept the same spellings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub enum EmploymentType {
    #[default]
    Hourly,
    Salaried,
}

impl TryFrom<String> for EmploymentType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for EmploymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hourly"   => Ok(Self::Hourly),
            "salaried" => Ok(Self::Salaried),
            other      => Err(format!("unknown employment type: {other}")),
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hourly   => f.write_str("Hourly"),
            Self::Salaried => f.write_str("Salaried"),
        }
    }
}

/// Used for mitigation lookup only. Never enters the cost math.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub enum RoleCriticality {
    #[default]
    Low,
    Medium,
    High,
}

impl TryFrom<String> for RoleCriticality {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for RoleCriticality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low"    => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high"   => Ok(Self::High),
            other    => Err(format!("unknown role criticality: {other}")),
        }
    }
}

impl fmt::Display for RoleCriticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low    => f.write_str("Low"),
            Self::Medium => f.write_str("Medium"),
            Self::High   => f.write_str("High"),
        }
    }
}

/// Secondary layer of cost terms composed on top of the base total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AdvancedAdjustment {
    pub training_hours:   f64,
    /// ≥ 1. A value of 1 adds nothing.
    pub skill_multiplier: f64,
    /// Cost per hour missed.
    pub delay_penalty:    Amount,
    pub rework_pct:       Pct,
    pub hr_overhead_hrs:  f64,
    /// Multiplies the advanced subtotal. 1 means no seasonal effect.
    pub seasonal_factor:  f64,
    pub compliance_cost:  Amount,
    pub benefits_loading: Pct,
}

impl Default for AdvancedAdjustment {
    fn default() -> Self {
        Self {
            training_hours:   0.0,
            skill_multiplier: 1.0,
            delay_penalty:    0.0,
            rework_pct:       0.0,
            hr_overhead_hrs:  0.0,
            seasonal_factor:  1.0,
            compliance_cost:  0.0,
            benefits_loading: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AbsenceProfile {
    pub name:                  ProfileName,
    pub employment_type:       EmploymentType,
    pub hourly_rate:           Amount,
    pub weekly_hours:          f64,
    pub absences_per_year:     u32,
    pub hours_per_absence:     f64,
    pub num_managers:          u32,
    pub manager_weekly_salary: Amount,
    pub manager_time_hours:    f64,
    pub overtime_rate:         Amount,
    pub overtime_hours:        f64,
    pub productivity_loss_pct: Pct,
    pub idle_equipment_rate:   Amount,
    pub idle_hours:            f64,
    pub role_criticality:      RoleCriticality,
    #[serde(default)]
    pub advanced:              Option<AdvancedAdjustment>,
}

impl AbsenceProfile {
    pub fn is_advanced(&self) -> bool {
        self.advanced.is_some()
    }
}

/// Raw, possibly incomplete profile fields as they arrive from a form,
/// a JSON file or one CSV row. Field names match the batch column names.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawProfileFields {
    #[serde(alias = "name")]
    pub employee_name:         Option<String>,
    pub employment_type:       Option<EmploymentType>,
    pub hourly_rate:           Option<f64>,
    pub weekly_salary:         Option<f64>,
    pub weekly_hours:          Option<f64>,
    pub absences_per_year:     Option<f64>,
    pub hours_per_absence:     Option<f64>,
    pub num_managers:          Option<f64>,
    pub manager_weekly_salary: Option<f64>,
    pub manager_time_hours:    Option<f64>,
    pub overtime_rate:         Option<f64>,
    pub overtime_hours:        Option<f64>,
    pub productivity_loss_pct: Option<f64>,
    pub idle_equipment_rate:   Option<f64>,
    pub idle_hours:            Option<f64>,
    pub role_criticality:      Option<RoleCriticality>,

    // ── Advanced adjustment ────────────────────────
    pub training_hours:        Option<f64>,
    pub skill_multiplier:      Option<f64>,
    pub delay_penalty:         Option<f64>,
    pub rework_pct:            Option<f64>,
    pub hr_overhead_hrs:       Option<f64>,
    pub seasonal_factor:       Option<f64>,
    pub compliance_cost:       Option<f64>,
    pub benefits_loading:      Option<f64>,
}

impl RawProfileFields {
    /// True when at least one advanced-adjustment field was supplied.
    pub fn has_advanced_fields(&self) -> bool {
        [
            self.training_hours,
            self.skill_multiplier,
            self.delay_penalty,
            self.rework_pct,
            self.hr_overhead_hrs,
            self.seasonal_factor,
            self.compliance_cost,
            self.benefits_loading,
        ]
        .iter()
        .any(Option::is_some)
    }

    /// Set a numeric field by its batch column name.
    /// Returns false when the column is not a numeric profile field.
    pub fn set_numeric(&mut self, column: &str, value: f64) -> bool {
        let slot = match column {
            "hourly_rate"           => &mut self.hourly_rate,
            "weekly_salary"         => &mut self.weekly_salary,
            "weekly_hours"          => &mut self.weekly_hours,
            "absences_per_year"     => &mut self.absences_per_year,
            "hours_per_absence"     => &mut self.hours_per_absence,
            "num_managers"          => &mut self.num_managers,
            "manager_weekly_salary" => &mut self.manager_weekly_salary,
            "manager_time_hours"    => &mut self.manager_time_hours,
            "overtime_rate"         => &mut self.overtime_rate,
            "overtime_hours"        => &mut self.overtime_hours,
            "productivity_loss_pct" => &mut self.productivity_loss_pct,
            "idle_equipment_rate"   => &mut self.idle_equipment_rate,
            "idle_hours"            => &mut self.idle_hours,
            "training_hours"        => &mut self.training_hours,
            "skill_multiplier"      => &mut self.skill_multiplier,
            "delay_penalty"         => &mut self.delay_penalty,
            "rework_pct"            => &mut self.rework_pct,
            "hr_overhead_hrs"       => &mut self.hr_overhead_hrs,
            "seasonal_factor"       => &mut self.seasonal_factor,
            "compliance_cost"       => &mut self.compliance_cost,
            "benefits_loading"      => &mut self.benefits_loading,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!("SALARIED".parse::<EmploymentType>(), Ok(EmploymentType::Salaried));
        assert_eq!(" hourly ".parse::<EmploymentType>(), Ok(EmploymentType::Hourly));
        assert_eq!("Medium".parse::<RoleCriticality>(), Ok(RoleCriticality::Medium));
        assert!("contractor".parse::<EmploymentType>().is_err());
    }

    #[test]
    fn json_enums_parse_like_csv_cells() {
        let raw: RawProfileFields = serde_json::from_str(
            r#"{"employment_type": "SALARIED", "role_criticality": "hIgH"}"#,
        )
        .unwrap();
        assert_eq!(raw.employment_type, Some(EmploymentType::Salaried));
        assert_eq!(raw.role_criticality, Some(RoleCriticality::High));

        let err = serde_json::from_str::<RawProfileFields>(r#"{"employment_type": "contractor"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown employment type"), "got {err}");
    }

    #[test]
    fn enums_serialize_as_variant_names() {
        assert_eq!(serde_json::to_string(&EmploymentType::Salaried).unwrap(), r#""Salaried""#);
        assert_eq!(serde_json::to_string(&RoleCriticality::Medium).unwrap(), r#""Medium""#);
    }

    #[test]
    fn advanced_defaults_are_neutral() {
        let adv = AdvancedAdjustment::default();
        assert_eq!(adv.skill_multiplier, 1.0);
        assert_eq!(adv.seasonal_factor, 1.0);
        assert_eq!(adv.benefits_loading, 0.0);
    }

    #[test]
    fn set_numeric_rejects_unknown_columns() {
        let mut raw = RawProfileFields::default();
        assert!(raw.set_numeric("rework_pct", 5.0));
        assert!(!raw.set_numeric("favourite_colour", 1.0));
        assert_eq!(raw.rework_pct, Some(5.0));
        assert!(raw.has_advanced_fields());
    }
}
