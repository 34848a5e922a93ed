//! Shared primitive types used across the entire engine.

/// A monetary amount. Plain signed decimal, never rounded internally.
pub type Amount = f64;

/// A percentage expressed on the 0–100 scale (10.0 means 10%).
pub type Pct = f64;

/// Display label of an employee profile.
pub type ProfileName = String;

/// The canonical identifier of one batch evaluation run.
pub type ReportId = uuid::Uuid;
