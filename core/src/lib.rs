//! Absence cost engine.
//!
//! Flow: raw fields → `resolver` → `AbsenceProfile` → `cost_engine` →
//! `CostBreakdown`. `batch` maps the engine over many profiles; `loader`
//! and `export` are the CSV edges; `session` holds caller-owned profiles.

pub mod batch;
pub mod breakdown;
pub mod config;
pub mod cost_engine;
pub mod error;
pub mod export;
pub mod loader;
pub mod memo;
pub mod mitigation;
pub mod profile;
pub mod resolver;
pub mod session;
pub mod types;
