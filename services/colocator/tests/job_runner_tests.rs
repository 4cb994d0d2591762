//! End-to-end tests for loading and running colocation jobs.

use colocation::{ColocationConfig, ConstraintKind, KernelKind, UngriddedData};
use colocator::{layer_config, load_job, run_job, ColocationOverrides};
use std::io::Write;
use tempfile::NamedTempFile;

const FILL: f64 = -999.9;

fn write_job(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(content.as_bytes()).expect("write job");
    file
}

const BOUNDARY_JOB_YAML: &str = r#"
grid:
  axes:
    - name: latitude
      points: [-10, -5, 0, 5, 10]
    - name: longitude
      points: [-5, 0, 5]
data:
  coords:
    - name: latitude
      points: [2.5, 0.5, 0.5]
    - name: longitude
      points: [2.5, 0.5, 0.5]
  values: [1.2, 1.0, 2.0]
colocation:
  fill_value: -999.9
"#;

#[test]
fn test_yaml_job_runs_with_both_constraints() {
    let file = write_job(".yaml", BOUNDARY_JOB_YAML);
    let job = load_job(file.path()).unwrap();

    let mut reports = Vec::new();
    for constraint in [ConstraintKind::Interval, ConstraintKind::Binning] {
        let cli = ColocationOverrides {
            constraint: Some(constraint),
            ..Default::default()
        };
        let config = layer_config(ColocationConfig::default(), &job, &cli);
        assert_eq!(config.fill_value, FILL);
        reports.push(run_job(&job, &config).unwrap());
    }

    let (interval, binning) = (&reports[0], &reports[1]);
    assert_eq!(interval.constraint, "interval");
    assert_eq!(binning.constraint, "binning");
    assert_eq!(interval.rows, binning.rows);
    assert_eq!(interval.mask, binning.mask);

    // Cell [2][1] holds the two interior points and the corner point
    let expected_21 = (1.2 + 1.0 + 2.0) / 3.0;
    assert_eq!(interval.shape, vec![5, 3]);
    assert_eq!(interval.rows[2][1], expected_21);
    assert_eq!(interval.rows[2][2], 1.2);
    assert_eq!(interval.rows[3][1], 1.2);
    assert_eq!(interval.rows[3][2], 1.2);
    assert_eq!(interval.rows[0][0], FILL);
    assert_eq!(interval.populated_cells, 4);
}

#[test]
fn test_cli_overrides_job_file_which_overrides_base() {
    let file = write_job(".yaml", BOUNDARY_JOB_YAML);
    let job = load_job(file.path()).unwrap();
    let base = ColocationConfig {
        constraint: ConstraintKind::Binning,
        fill_value: 0.0,
        kernel: KernelKind::Mean,
        parallel: true,
    };

    let config = layer_config(base.clone(), &job, &ColocationOverrides::default());
    assert_eq!(config.fill_value, FILL);
    assert_eq!(config.constraint, ConstraintKind::Binning);
    assert!(config.parallel);

    let cli = ColocationOverrides {
        constraint: Some(ConstraintKind::Interval),
        fill_value: Some(f64::INFINITY),
        parallel: Some(false),
        ..Default::default()
    };
    let config = layer_config(base, &job, &cli);
    assert_eq!(config.constraint, ConstraintKind::Interval);
    assert_eq!(config.fill_value, f64::INFINITY);
    assert!(!config.parallel);
}

#[test]
fn test_json_job_with_bounds() {
    let file = write_job(
        ".json",
        r#"{
            "grid": {"axes": [
                {"name": "x", "bounds": [[0.0, 1.0], [1.0, 2.0]]}
            ]},
            "data": {
                "coords": [{"name": "x", "points": [0.5, 1.0, 3.0]}],
                "values": [2.0, 4.0, 8.0]
            }
        }"#,
    );
    let job = load_job(file.path()).unwrap();
    let config = layer_config(
        ColocationConfig::default(),
        &job,
        &ColocationOverrides {
            fill_value: Some(0.0),
            ..Default::default()
        },
    );
    let report = run_job(&job, &config).unwrap();

    assert_eq!(report.shape, vec![2]);
    assert_eq!(report.rows, vec![vec![3.0, 4.0]]);
    assert_eq!(report.mask, vec![false, false]);
}

#[test]
fn test_empty_data_fails() {
    let file = write_job(".yaml", BOUNDARY_JOB_YAML);
    let mut job = load_job(file.path()).unwrap();
    job.data = UngriddedData::default();

    let config = layer_config(ColocationConfig::default(), &job, &ColocationOverrides::default());
    let err = run_job(&job, &config).unwrap_err();
    assert!(err.to_string().contains("no points"), "{}", err);
}

#[test]
fn test_nan_fill_value_is_rejected() {
    let file = write_job(".yaml", BOUNDARY_JOB_YAML);
    let job = load_job(file.path()).unwrap();
    let config = layer_config(
        ColocationConfig::default(),
        &job,
        &ColocationOverrides {
            fill_value: Some(f64::NAN),
            ..Default::default()
        },
    );
    assert!(run_job(&job, &config).is_err());
}

#[test]
fn test_malformed_job_file_reports_path() {
    let file = write_job(".yaml", "grid: [not, a, grid");
    let err = load_job(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse YAML job file"));
}

#[test]
fn test_missing_job_file() {
    let err = load_job("/nonexistent/job.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read job file"));
}
