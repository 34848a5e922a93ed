//! Mitigation suggestions — static lookup by role criticality.

use crate::profile::RoleCriticality;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MitigationTable {
    suggestions: HashMap<RoleCriticality, Vec<String>>,
}

impl MitigationTable {
    pub fn new(suggestions: HashMap<RoleCriticality, Vec<String>>) -> Self {
        Self { suggestions }
    }

    /// Ordered recommendations. Empty when the table has no entry.
    pub fn suggestions_for(&self, criticality: RoleCriticality) -> &[String] {
        self.suggestions
            .get(&criticality)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Default for MitigationTable {
    fn default() -> Self {
        let entry = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let suggestions = HashMap::from([
            (
                RoleCriticality::High,
                entry(&[
                    "Implement cross-training for backup support",
                    "Maintain on-call backup staff",
                    "Develop a formal absence-coverage protocol",
                ]),
            ),
            (
                RoleCriticality::Medium,
                entry(&[
                    "Encourage periodic knowledge sharing sessions",
                    "Create a flexible shift swap system",
                ]),
            ),
            (
                RoleCriticality::Low,
                entry(&[
                    "Reassign tasks temporarily to peers",
                    "Monitor absence trend for future planning",
                ]),
            ),
        ]);
        Self { suggestions }
    }
}
