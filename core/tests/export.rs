//! CSV loading and export tests.

use absence_core::{
    batch::BatchEvaluator,
    breakdown,
    cost_engine::evaluate,
    error::AbsenceError,
    export,
    loader,
    profile::{AbsenceProfile, EmploymentType, RawProfileFields, RoleCriticality},
    resolver::ParameterResolver,
};

fn profile(name: &str, advanced: bool) -> AbsenceProfile {
    let raw = RawProfileFields {
        employee_name:         Some(name.into()),
        hourly_rate:           Some(35.29),
        weekly_hours:          Some(40.0),
        absences_per_year:     Some(6.0),
        num_managers:          Some(3.0),
        manager_weekly_salary: Some(2000.0),
        manager_time_hours:    Some(1.0),
        productivity_loss_pct: Some(10.0),
        skill_multiplier:      advanced.then_some(1.2),
        ..Default::default()
    };
    ParameterResolver::default().resolve(&raw)
}

#[test]
fn loader_reads_text_columns() {
    let csv = "employee_name,employment_type,role_criticality,weekly_salary,weekly_hours\n\
               Bea Santos,SALARIED,high,2400,40\n";
    let rows = loader::load_batch_str(csv).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].employment_type, Some(EmploymentType::Salaried));
    assert_eq!(rows[0].role_criticality, Some(RoleCriticality::High));
    assert_eq!(rows[0].weekly_salary, Some(2400.0));
}

#[test]
fn loader_tolerates_bad_enum_cells() {
    let csv = "employee_name,employment_type,hourly_rate\nZed,contractor,20\n";
    let rows = loader::load_batch_str(csv).unwrap();

    assert_eq!(rows[0].employment_type, None);
    assert_eq!(rows[0].hourly_rate, Some(20.0));
}

#[test]
fn empty_file_is_malformed() {
    let err = loader::load_batch_str("").unwrap_err();
    assert!(matches!(err, AbsenceError::MalformedBatch { .. }), "got {err:?}");
}

#[test]
fn invalid_utf8_aborts_the_load() {
    let bytes: &[u8] = b"employee_name,hourly_rate\n\xff\xfe,12\n";
    let err = loader::load_batch_reader(bytes).unwrap_err();
    assert!(matches!(err, AbsenceError::Csv(_)), "got {err:?}");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = loader::load_batch_path("/definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, AbsenceError::Io(_)), "got {err:?}");
}

#[test]
fn json_profile_accepts_any_case_and_defaults_missing_fields() {
    let path = std::env::temp_dir().join(format!("absence-profile-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{
            "employee_name": "Bea Santos",
            "employment_type": "SALARIED",
            "role_criticality": "medium",
            "weekly_salary": 2400,
            "absences_per_year": 4
        }"#,
    )
    .unwrap();

    let raw = loader::load_profile_json(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(raw.employment_type, Some(EmploymentType::Salaried));
    assert_eq!(raw.role_criticality, Some(RoleCriticality::Medium));
    assert_eq!(raw.weekly_hours, None);

    let profile = ParameterResolver::default().resolve(&raw);
    assert_eq!(profile.weekly_hours, 40.0);
    assert_eq!(profile.hourly_rate, 60.0);
    assert_eq!(profile.hours_per_absence, 8.0);
    assert_eq!(profile.absences_per_year, 4);
}

#[test]
fn json_profile_with_unknown_enum_is_rejected() {
    let path = std::env::temp_dir().join(format!("absence-bad-profile-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"employment_type": "contractor"}"#).unwrap();

    let err = loader::load_profile_json(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, AbsenceError::Serialization(_)), "got {err:?}");
}

#[test]
fn non_csv_file_is_malformed() {
    let err = loader::load_batch_str("{\"not\": \"csv\"}\n").unwrap_err();
    assert!(matches!(err, AbsenceError::MalformedBatch { .. }), "got {err:?}");
}

#[test]
fn single_breakdown_exports_two_columns() {
    let b = evaluate(&profile("Adam Waller", false), 0.0);
    let csv = export::export_breakdown(&b).unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Component,Amount ($)");
    assert_eq!(lines.len(), b.len() + 1);
    assert!(csv.contains("Direct Cost (Wages),282.32"));
    assert!(csv.contains("Total per Absence,573.48"));
    assert!(csv.contains("Annualized Cost,3440.88"));
}

#[test]
fn batch_export_is_wide_with_union_of_columns() {
    let profiles = vec![profile("Adam Waller", false), profile("Bea Santos", true)];
    let report = BatchEvaluator::new(0.0).evaluate(&profiles);
    let csv = export::export_batch(&report).unwrap();

    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.get(0), Some(export::NAME_HEADER));
    let skill_col = headers
        .iter()
        .position(|h| h == breakdown::SKILL_ADJUSTMENT)
        .expect("advanced column present");
    let total_col = headers
        .iter()
        .position(|h| h == breakdown::TOTAL_PER_ABSENCE)
        .unwrap();

    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][0], "Adam Waller");
    assert_eq!(&records[0][skill_col], "", "base row has no advanced cell");
    assert_eq!(&records[0][total_col], "573.48");
    assert_eq!(&records[1][skill_col], "114.70");
    assert_eq!(&records[1][total_col], "688.18");
}

#[test]
fn export_file_names() {
    assert_eq!(export::breakdown_file_name("Adam Waller"), "absence_cost_Adam_Waller.csv");
    assert_eq!(export::BATCH_FILE_NAME, "absence_cost_batch.csv");
}
