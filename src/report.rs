//! Output of the sweep: convergence tables, CSV files and the run summary.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::config::Precision;
use crate::error::{Result, SweepError};
use crate::experiment::metrics;
use crate::interpolation::Method;
use crate::real::Real;

/// File name of the convergence CSV for `p`.
pub fn csv_file_name(p: usize) -> String {
    format!("daubechies_{}_scaling_convergence.csv", p)
}

pub const SUMMARY_FILE_NAME: &str = "daubechies_sweep_summary.json";

/// Header line (without newline) listing `methods` after the `r` column.
pub fn csv_header(methods: &[Method]) -> String {
    let mut header = String::from("r");
    for m in methods {
        header.push_str(", ");
        header.push_str(m.column());
    }
    header
}

/// One data line (without newline): `r` then each error in fixed notation
/// with `T::DIGITS10 + 3` decimals.
pub fn csv_row<T: Real>(r: u32, errors: &[T]) -> String {
    let digits = T::DIGITS10 + 3;
    let mut row = r.to_string();
    for e in errors {
        row.push_str(", ");
        row.push_str(&format!("{:.*}", digits, e));
    }
    row
}

/// Streams one p's convergence results to disk.
pub struct ConvergenceCsv {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl ConvergenceCsv {
    /// Create the CSV for `p` in `dir` and write its header.
    pub fn create(dir: &Path, p: usize, methods: &[Method]) -> Result<Self> {
        let path = dir.join(csv_file_name(p));
        let mut writer = BufWriter::new(File::create(&path)?);
        writeln!(writer, "{}", csv_header(methods))?;
        Ok(Self { path, writer })
    }

    pub fn write_row<T: Real>(&mut self, r: u32, errors: &[T]) -> Result<()> {
        writeln!(self.writer, "{}", csv_row(r, errors))?;
        Ok(())
    }

    /// Flush and close, returning the file path.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        Ok(self.path)
    }
}

/// Sup-norm errors for one p: rows are sampling levels, columns methods.
#[derive(Debug, Clone)]
pub struct ConvergenceTable {
    p: usize,
    methods: Vec<Method>,
    levels: Vec<u32>,
    errors: Array2<f64>,
    roundoff_floor: f64,
}

impl ConvergenceTable {
    pub fn new(p: usize, methods: Vec<Method>, levels: Vec<u32>) -> Self {
        let errors = Array2::from_elem((levels.len(), methods.len()), f64::NAN);
        Self {
            p,
            methods,
            levels,
            errors,
            roundoff_floor: 0.0,
        }
    }

    /// Errors at or below `floor` are treated as rounding noise.
    pub fn with_roundoff_floor(mut self, floor: f64) -> Self {
        self.roundoff_floor = floor;
        self
    }

    pub fn roundoff_floor(&self) -> f64 {
        self.roundoff_floor
    }

    pub fn p(&self) -> usize {
        self.p
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn levels(&self) -> &[u32] {
        &self.levels
    }

    pub fn errors(&self) -> &Array2<f64> {
        &self.errors
    }

    /// Store the errors measured at level `r`, in method order.
    pub fn record<T: Real>(&mut self, r: u32, errors: &[T]) -> Result<()> {
        let row = self.row_index(r)?;
        if errors.len() != self.methods.len() {
            return Err(SweepError::invalid(
                "errors",
                format!("expected {} errors, got {}", self.methods.len(), errors.len()),
            ));
        }
        for (dst, &e) in self.errors.row_mut(row).iter_mut().zip(errors) {
            *dst = e.to_f64_lossy();
        }
        Ok(())
    }

    pub fn row(&self, r: u32) -> Result<ArrayView1<'_, f64>> {
        Ok(self.errors.row(self.row_index(r)?))
    }

    /// Methods at level `r` by ascending error.
    pub fn ranking(&self, r: u32) -> Result<Vec<(Method, f64)>> {
        let row = self.row(r)?;
        let pairs: Vec<(Method, f64)> = self.methods.iter().copied().zip(row.iter().copied()).collect();
        Ok(metrics::rank(&pairs))
    }

    /// Lowest-error method at every level.
    pub fn best_per_level(&self) -> Vec<LevelBest> {
        self.levels
            .iter()
            .filter_map(|&r| {
                let ranked = self.ranking(r).ok()?;
                let &(method, error) = ranked.first()?;
                Some(LevelBest {
                    r,
                    method,
                    error: error.is_finite().then_some(error),
                })
            })
            .collect()
    }

    /// Winner at the finest level whose best error is still above the
    /// roundoff floor. Finer levels only rank rounding noise.
    pub fn resolved_best(&self) -> Option<LevelBest> {
        self.best_per_level()
            .into_iter()
            .rev()
            .find(|b| b.error.map_or(false, |e| e > self.roundoff_floor))
    }

    fn row_index(&self, r: u32) -> Result<usize> {
        self.levels
            .iter()
            .position(|&l| l == r)
            .ok_or_else(|| SweepError::invalid("r", format!("level {} is not part of the table for p = {}", r, self.p)))
    }
}

/// Winner at one sampling level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelBest {
    pub r: u32,
    pub method: Method,
    /// `None` when every method failed at this level.
    pub error: Option<f64>,
}

/// Per-p entry of the summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingSummary {
    pub p: usize,
    pub csv: String,
    pub roundoff_floor: f64,
    pub best: Vec<LevelBest>,
    pub resolved: Option<LevelBest>,
}

/// Machine-readable record of one sweep run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSummary {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub precision: Precision,
    pub p_min: usize,
    pub p_max: usize,
    pub r_max: u32,
    pub results: Vec<ScalingSummary>,
}

impl SweepSummary {
    pub fn new(run_id: String, precision: Precision, p_min: usize, p_max: usize, r_max: u32) -> Self {
        Self {
            run_id,
            generated_at: Utc::now(),
            precision,
            p_min,
            p_max,
            r_max,
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, table: &ConvergenceTable) {
        self.results.push(ScalingSummary {
            p: table.p(),
            csv: csv_file_name(table.p()),
            roundoff_floor: table.roundoff_floor(),
            best: table.best_per_level(),
            resolved: table.resolved_best(),
        });
    }

    /// Write as pretty JSON into `dir`.
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(SUMMARY_FILE_NAME);
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_csv_header_by_p() {
        assert_eq!(
            csv_header(&Method::for_p(2)),
            "r, matched_holder, linear, quadratic_b_spline, cubic_b_spline, quintic_b_spline, \
             cubic_hermite, pchip, makima, fo_taylor"
        );
        assert!(csv_header(&Method::for_p(3)).ends_with("fo_taylor, quintic_hermite, second_order_taylor"));
        assert!(csv_header(&Method::for_p(4))
            .ends_with("second_order_taylor, third_order_taylor, septic_hermite"));
    }

    #[test]
    fn test_csv_row_precision() {
        assert_eq!(csv_row(3, &[0.5f64, 0.25]), "3, 0.500000000000000000, 0.250000000000000000");
        assert_eq!(csv_row(7, &[0.5f32]), "7, 0.500000000");
    }

    #[test]
    fn test_convergence_table_ranking() {
        let methods = vec![Method::Linear, Method::Pchip, Method::Makima];
        let mut table = ConvergenceTable::new(3, methods, vec![2, 3]);
        table.record(2, &[1e-2, 1e-3, 1e-3]).unwrap();
        table.record(3, &[1e-4, 1e-3, 1e-2]).unwrap();

        let ranked = table.ranking(2).unwrap();
        assert_eq!(ranked[0].0, Method::Pchip);
        assert_eq!(ranked[1].0, Method::Makima);

        let best = table.best_per_level();
        assert_eq!(best.len(), 2);
        assert_eq!(best[1].method, Method::Linear);
        assert_eq!(table.errors().dim(), (2, 3));

        assert!(table.record(9, &[0.0, 0.0, 0.0]).is_err());
        assert!(table.record(2, &[0.0]).is_err());
    }

    #[test]
    fn test_summary_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = ConvergenceTable::new(2, vec![Method::Linear, Method::Pchip], vec![2]);
        table.record(2, &[0.1f64, 0.2]).unwrap();

        let mut summary = SweepSummary::new("run".to_string(), Precision::F64, 2, 2, 5);
        summary.push(&table);
        let path = summary.write(dir.path()).unwrap();

        let text = std::fs::read_to_string(path).unwrap();
        let parsed: SweepSummary = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.results[0].csv, "daubechies_2_scaling_convergence.csv");
        assert_eq!(parsed.results[0].best[0].method, Method::Linear);
        assert!(text.contains("\"precision\": \"f64\""));
    }

    #[test]
    fn test_csv_create_failure_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not_there");
        let err = ConvergenceCsv::create(&missing, 3, &Method::for_p(3)).err().unwrap();
        assert!(matches!(err, SweepError::Io(_)));
    }

    #[test]
    fn test_resolved_best_skips_levels_below_floor() {
        let methods = vec![Method::CubicHermite, Method::SepticHermite];
        let mut table = ConvergenceTable::new(10, methods, vec![11, 12, 13]).with_roundoff_floor(1e-13);
        table.record(11, &[4e-12f64, 5.1e-13]).unwrap();
        table.record(12, &[2e-13f64, 3.7e-14]).unwrap();
        table.record(13, &[3.0e-14f64, 3.4e-14]).unwrap();

        assert_eq!(table.best_per_level()[2].method, Method::CubicHermite);
        let resolved = table.resolved_best().unwrap();
        assert_eq!(resolved.r, 11);
        assert_eq!(resolved.method, Method::SepticHermite);

        let unfloored = ConvergenceTable::new(10, vec![Method::Linear], vec![2]);
        assert_eq!(unfloored.resolved_best(), None);
    }

    #[test]
    fn test_failed_level_survives_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = ConvergenceTable::new(3, vec![Method::Linear, Method::Pchip], vec![2, 3]);
        table.record(2, &[f64::INFINITY, f64::INFINITY]).unwrap();
        table.record(3, &[0.25f64, f64::INFINITY]).unwrap();

        let mut summary = SweepSummary::new("run".to_string(), Precision::F64, 3, 3, 5);
        summary.push(&table);
        let text = std::fs::read_to_string(summary.write(dir.path()).unwrap()).unwrap();
        let parsed: SweepSummary = serde_json::from_str(&text).unwrap();

        let best = &parsed.results[0].best;
        assert_eq!(best[0].error, None);
        assert_eq!(best[1].error, Some(0.25));
        assert_eq!(parsed.results[0].resolved.as_ref().map(|b| b.r), Some(3));
    }
}
