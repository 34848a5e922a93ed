//! Batch evaluator tests — order, isolation, shared overhead, aggregates.

use absence_core::{
    batch::{BatchEvaluator, BatchSummary},
    cost_engine::evaluate,
    loader,
    memo::MemoizedEngine,
    resolver::ParameterResolver,
};

const SAMPLE_CSV: &str = include_str!("../../data/samples/profiles.csv");

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "{what}: expected {expected}, got {actual}"
    );
}

#[test]
fn sample_batch_preserves_order_and_names() {
    let rows = loader::load_batch_str(SAMPLE_CSV).unwrap();
    let report = BatchEvaluator::new(0.0).evaluate_raw(&ParameterResolver::default(), &rows);

    let names: Vec<&str> = report.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Adam Waller", "Bea Santos", "Chen Li"]);

    assert_close(report.rows[0].breakdown.total_per_absence(), 573.48, "Adam per absence");
    assert_close(report.rows[0].breakdown.annualized_cost(), 3440.88, "Adam annualized");
    assert_close(report.rows[1].breakdown.total_per_absence(), 1235.5, "Bea per absence");
    assert_close(report.rows[1].breakdown.annualized_cost(), 4942.0, "Bea annualized");
    assert_close(report.rows[2].breakdown.total_per_absence(), 256.125, "Chen per absence");
    assert_close(report.rows[2].breakdown.annualized_cost(), 2305.125, "Chen annualized");
}

#[test]
fn summary_reduces_over_rows() {
    let rows = loader::load_batch_str(SAMPLE_CSV).unwrap();
    let report = BatchEvaluator::new(0.0).evaluate_raw(&ParameterResolver::default(), &rows);

    assert_eq!(report.summary.row_count, 3);
    assert_close(
        report.summary.mean_cost_per_incident,
        (573.48 + 1235.5 + 256.125) / 3.0,
        "mean per incident",
    );
    assert_close(
        report.summary.total_annualized_cost,
        3440.88 + 4942.0 + 2305.125,
        "annualized sum",
    );
}

#[test]
fn one_overhead_applies_to_every_row() {
    let resolver = ParameterResolver::default();
    let profiles = loader::load_profiles(&resolver, SAMPLE_CSV.as_bytes()).unwrap();

    let report = BatchEvaluator::new(20.0).evaluate(&profiles);

    assert_eq!(report.overhead_pct, 20.0);
    for (row, profile) in report.rows.iter().zip(&profiles) {
        assert_eq!(row.breakdown, evaluate(profile, 20.0), "row {} differs", row.name);
    }
}

#[test]
fn rows_are_independent_of_their_neighbours() {
    let resolver = ParameterResolver::default();
    let profiles = loader::load_profiles(&resolver, SAMPLE_CSV.as_bytes()).unwrap();
    let evaluator = BatchEvaluator::new(7.5);

    let full = evaluator.evaluate(&profiles);
    let reversed: Vec<_> = profiles.iter().rev().cloned().collect();
    let backwards = evaluator.evaluate(&reversed);

    for (a, b) in full.rows.iter().zip(backwards.rows.iter().rev()) {
        assert_eq!(a, b);
    }
    let alone = evaluator.evaluate(&profiles[1..2]);
    assert_eq!(alone.rows[0], full.rows[1]);
}

#[test]
fn missing_cells_default_instead_of_failing() {
    let csv = "employee_name,hourly_rate,weekly_hours,absences_per_year\n\
               Dana,abc,40,2\n\
               Eli\n";
    let rows = loader::load_batch_str(csv).unwrap();
    let report = BatchEvaluator::new(0.0).evaluate_raw(&ParameterResolver::default(), &rows);

    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].name, "Dana");
    assert_eq!(report.rows[0].breakdown.total_per_absence(), 0.0);
    assert_eq!(report.rows[1].name, "Eli");
    assert_eq!(report.rows[1].breakdown.annualized_cost(), 0.0);
}

#[test]
fn infinite_cells_default_and_totals_stay_finite() {
    let csv = "employee_name,weekly_hours,hourly_rate,absences_per_year\n\
               Inf,inf,20,3\n\
               NegInf,40,-infinity,3\n";
    let rows = loader::load_batch_str(csv).unwrap();
    let report = BatchEvaluator::new(10.0).evaluate_raw(&ParameterResolver::default(), &rows);

    for row in &report.rows {
        for (component, amount) in row.breakdown.iter() {
            assert!(amount.is_finite(), "{}: {component} is {amount}", row.name);
        }
    }
    // Default 40h week gives an 8h absence at $20 with 10% overhead.
    assert_close(report.rows[0].breakdown.total_per_absence(), 20.0 * 8.0 * 1.10, "Inf row");
    assert_eq!(report.rows[1].breakdown.total_per_absence(), 0.0);
    assert!(report.summary.total_annualized_cost.is_finite());
}

#[test]
fn empty_batch_has_zero_summary() {
    let report = BatchEvaluator::new(10.0).evaluate(&[]);
    assert!(report.rows.is_empty());
    assert_eq!(BatchSummary::from_rows(&report.rows), report.summary);
    assert_eq!(report.summary.mean_cost_per_incident, 0.0);
    assert_eq!(report.summary.total_annualized_cost, 0.0);
}

#[test]
fn memoized_batch_matches_direct_batch() {
    let resolver = ParameterResolver::default();
    let mut profiles = loader::load_profiles(&resolver, SAMPLE_CSV.as_bytes()).unwrap();
    profiles.extend(profiles.clone());

    let evaluator = BatchEvaluator::new(12.0);
    let mut memo = MemoizedEngine::new();

    let direct = evaluator.evaluate(&profiles);
    let cached = evaluator.evaluate_with(&mut memo, &profiles);

    assert_eq!(direct.rows, cached.rows);
    assert_eq!(memo.misses(), 3);
    assert_eq!(memo.hits(), 3);
}

#[test]
fn each_report_gets_its_own_v4_id() {
    let evaluator = BatchEvaluator::new(0.0);
    let first = evaluator.evaluate(&[]);
    let second = evaluator.evaluate(&[]);

    assert_ne!(first.report_id, second.report_id);
    assert_eq!(first.report_id.get_version_num(), 4);

    let json = serde_json::to_value(&first).unwrap();
    assert_eq!(json["report_id"], first.report_id.to_string());
}
