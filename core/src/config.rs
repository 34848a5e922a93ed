use crate::{
    mitigation::MitigationTable,
    profile::{EmploymentType, RawProfileFields, RoleCriticality},
    resolver::{ParameterResolver, DEFAULT_WEEKLY_HOURS},
    types::Pct,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineDefaults {
    pub default_weekly_hours: f64,
    /// Global overhead markup applied to every profile of a run.
    pub overhead_pct:         Pct,
    /// Profile evaluated when the caller supplies none.
    pub default_profile:      RawProfileFields,
}

#[derive(Debug, Clone, Deserialize)]
struct MitigationFile {
    suggestions: std::collections::HashMap<RoleCriticality, Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub defaults:   EngineDefaults,
    pub mitigation: MitigationTable,
}

impl EngineConfig {
    /// Load from the data/ directory.
    /// In tests, use EngineConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let defaults_path = format!("{data_dir}/engine/defaults.json");
        let defaults_content = std::fs::read_to_string(&defaults_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {defaults_path}: {e}"))?;
        let defaults: EngineDefaults = serde_json::from_str(&defaults_content)?;

        let mitigation_path = format!("{data_dir}/mitigation/suggestions.json");
        let mitigation_content = std::fs::read_to_string(&mitigation_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {mitigation_path}: {e}"))?;
        let mitigation_file: MitigationFile = serde_json::from_str(&mitigation_content)?;

        if defaults.default_weekly_hours < 0.0 || defaults.overhead_pct < 0.0 {
            anyhow::bail!("{defaults_path}: default_weekly_hours and overhead_pct must be non-negative");
        }

        Ok(Self {
            defaults,
            mitigation: MitigationTable::new(mitigation_file.suggestions),
        })
    }

    /// Load from `data_dir`, falling back to built-in defaults when the
    /// directory is missing or unreadable.
    pub fn load_or_default(data_dir: &str) -> Self {
        match Self::load(data_dir) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("config: {e}; using built-in defaults");
                Self::default_test()
            }
        }
    }

    pub fn resolver(&self) -> ParameterResolver {
        ParameterResolver::new(self.defaults.default_weekly_hours)
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        let default_profile = RawProfileFields {
            employee_name:         Some("Adam Waller".into()),
            employment_type:       Some(EmploymentType::Hourly),
            hourly_rate:           Some(35.29),
            weekly_hours:          Some(DEFAULT_WEEKLY_HOURS),
            absences_per_year:     Some(6.0),
            num_managers:          Some(3.0),
            manager_weekly_salary: Some(2000.0),
            manager_time_hours:    Some(1.0),
            overtime_rate:         Some(0.0),
            overtime_hours:        Some(0.0),
            productivity_loss_pct: Some(10.0),
            role_criticality:      Some(RoleCriticality::Low),
            ..Default::default()
        };

        Self {
            defaults: EngineDefaults {
                default_weekly_hours: DEFAULT_WEEKLY_HOURS,
                overhead_pct:         0.0,
                default_profile,
            },
            mitigation: MitigationTable::default(),
        }
    }
}
