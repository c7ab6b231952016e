//! Integration tests for daubechies-sweep
//!
//! These tests run the experiments end-to-end into temporary directories
//! and check the files they leave behind.

mod common;

use common::assertions::{assert_approx_eq, assert_array_approx_eq, assert_decreasing, assert_in_range};
use common::test_data::{read_convergence_csv, sine_samples};
use pretty_assertions::assert_eq;

use daubechies_sweep::config::{Precision, RefinementConfig, SweepConfig};
use daubechies_sweep::experiment::{choose_refinement, find_best_interpolator, run_sweep};
use daubechies_sweep::interpolation::hermite::CardinalHermite;
use daubechies_sweep::interpolation::{build, GridSamples, Interpolator, Method};
use daubechies_sweep::report::{csv_file_name, SweepSummary, SUMMARY_FILE_NAME};
use daubechies_sweep::DaubechiesScaling;

fn small_sweep(dir: &std::path::Path, write_summary: bool) -> SweepConfig {
    SweepConfig {
        p_min: 2,
        p_max: 4,
        r_max: 8,
        precision: Precision::F64,
        output_dir: dir.to_path_buf(),
        write_summary,
    }
}

#[test]
fn test_sweep_writes_csv_files() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = run_sweep::<f64>(&small_sweep(dir.path(), true)).unwrap();
    assert_eq!(outcome.csv_files.len(), 3);
    assert_eq!(outcome.tables.len(), 3);

    let p2 = read_convergence_csv(&dir.path().join(csv_file_name(2)));
    assert_eq!(
        p2.header,
        "r, matched_holder, linear, quadratic_b_spline, cubic_b_spline, quintic_b_spline, cubic_hermite, pchip, makima, fo_taylor"
    );
    let p3 = read_convergence_csv(&dir.path().join(csv_file_name(3)));
    assert_eq!(
        p3.header,
        "r, matched_holder, linear, quadratic_b_spline, cubic_b_spline, quintic_b_spline, cubic_hermite, pchip, makima, fo_taylor, quintic_hermite, second_order_taylor"
    );
    let p4 = read_convergence_csv(&dir.path().join(csv_file_name(4)));
    assert_eq!(
        p4.header,
        "r, matched_holder, linear, quadratic_b_spline, cubic_b_spline, quintic_b_spline, cubic_hermite, pchip, makima, fo_taylor, quintic_hermite, second_order_taylor, third_order_taylor, septic_hermite"
    );

    for csv in [&p2, &p3, &p4] {
        let levels: Vec<u32> = csv.rows.iter().map(|(r, _)| *r).collect();
        assert_eq!(levels, vec![2, 3, 4, 5, 6]);
        for (_, values) in &csv.rows {
            assert_eq!(values.len(), csv.columns.len());
            assert!(values.iter().all(|v| v.is_finite() && *v >= 0.0));
        }
    }
}

#[test]
fn test_csv_matches_table() {
    let dir = tempfile::tempdir().unwrap();
    let (table, path) = find_best_interpolator::<f64>(3, 8, dir.path()).unwrap();
    let csv = read_convergence_csv(&path);
    let levels: Vec<u32> = csv.rows.iter().map(|(r, _)| *r).collect();
    assert_eq!(levels, table.levels().to_vec());
    for (j, method) in table.methods().iter().enumerate() {
        let from_file = csv.column(method.column()).unwrap();
        // 18 decimals in the file.
        assert_array_approx_eq(&from_file, &table.errors().column(j).to_vec(), Some(1e-17));
    }
    assert!(csv.column("whittaker_shannon").is_none());
}

#[test]
fn test_summary_reports_resolved_winner() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = run_sweep::<f64>(&small_sweep(dir.path(), true)).unwrap();
    let text = std::fs::read_to_string(outcome.summary_file.unwrap()).unwrap();
    let summary: SweepSummary = serde_json::from_str(&text).unwrap();
    for (entry, table) in summary.results.iter().zip(&outcome.tables) {
        assert!(entry.roundoff_floor > 0.0);
        assert_eq!(entry.resolved, table.resolved_best());
        let resolved = entry.resolved.as_ref().unwrap();
        assert!(resolved.error.unwrap() > entry.roundoff_floor);
    }
}

#[test]
fn test_sweep_summary() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = run_sweep::<f32>(&SweepConfig {
        precision: Precision::F32,
        ..small_sweep(dir.path(), true)
    })
    .unwrap();

    let path = outcome.summary_file.unwrap();
    assert_eq!(path, dir.path().join(SUMMARY_FILE_NAME));
    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["run_id"], outcome.run_id.as_str());
    assert_eq!(json["precision"], "f32");
    assert_eq!(json["r_max"], 8);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["p"], 2);
    assert_eq!(results[0]["csv"], "daubechies_2_scaling_convergence.csv");
    assert_eq!(results[2]["best"].as_array().unwrap().len(), 5);
}

#[test]
fn test_sweep_without_summary() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = run_sweep::<f64>(&small_sweep(dir.path(), false)).unwrap();
    assert!(outcome.summary_file.is_none());
    assert!(!dir.path().join(SUMMARY_FILE_NAME).exists());
}

#[test]
fn test_errors_decrease_for_smooth_scaling_function() {
    let dir = tempfile::tempdir().unwrap();
    let (table, _) = find_best_interpolator::<f64>(6, 10, dir.path()).unwrap();
    let col = |m: Method| table.methods().iter().position(|&x| x == m).unwrap();

    let linear: Vec<f64> = table.errors().column(col(Method::Linear)).to_vec();
    let cubic: Vec<f64> = table.errors().column(col(Method::CubicHermite)).to_vec();
    assert_decreasing(&linear, 1.5);
    assert_decreasing(&cubic, 1.5);
    assert!(linear[linear.len() - 1] < linear[0]);

    let last = table.levels().len() - 1;
    assert!(cubic[last] < linear[last]);
    let best = &table.best_per_level()[last];
    assert!(best.method != Method::Linear);
}

#[test]
fn test_refinement_study() {
    let config = RefinementConfig {
        p: 5,
        r_max: 11,
        precision: Precision::F32,
    };
    let levels = choose_refinement::<f32>(&config).unwrap();
    assert_eq!(levels.len(), 8);
    for level in &levels {
        assert_in_range(level.report.worst_abscissa as f64, 0.0, 9.0);
        assert!(level.report.max_distance >= 0.0);
    }
    let sups: Vec<f64> = levels.iter().map(|l| l.report.sup as f64).collect();
    assert!(sups[sups.len() - 1] < sups[0]);
}

#[test]
fn test_interpolators_on_phi_nodes() {
    let scaling = DaubechiesScaling::new(5).unwrap();
    let samples = GridSamples::<f64>::from_scaling(&scaling, 5, 3).unwrap();
    let h = samples.spacing();
    for method in Method::for_p(5) {
        let interp = build(method, &samples).unwrap();
        for i in [1usize, 17, 100, samples.len() - 2] {
            let x = i as f64 * h;
            assert_approx_eq(interp.value(x), samples.values[i], Some(1e-9));
        }
    }
}

#[test]
fn test_hermite_orders_on_sine() {
    // Higher order Hermite interpolation should win on smooth data.
    let h = 0.125;
    let [y, d1, d2, d3] = sine_samples(2.0, 33, 0.0, h);
    let cubic = CardinalHermite::cubic(y.clone(), d1.clone(), 0.0, h).unwrap();
    let quintic = CardinalHermite::quintic(y.clone(), d1.clone(), d2.clone(), 0.0, h).unwrap();
    let septic = CardinalHermite::septic(y, d1, d2, d3, 0.0, h).unwrap();

    let sup = |interp: &dyn Interpolator<f64>| {
        (0..=4000)
            .map(|i| {
                let x = i as f64 * 0.001;
                (interp.value(x) - (2.0 * x).sin()).abs()
            })
            .fold(0.0, f64::max)
    };
    let errors = [sup(&cubic), sup(&quintic), sup(&septic)];
    assert!(errors[0] < 1e-4);
    assert_decreasing(&errors, 0.1);
}
