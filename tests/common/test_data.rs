//! Test data generation utilities.
//!
//! Sample generators with known derivatives, and a reader for the
//! convergence CSVs the sweep writes.

#![allow(dead_code)]

use std::path::Path;

/// Samples of `sin(ωx)` and its first three derivatives at `x0 + i h`.
pub fn sine_samples(omega: f64, n: usize, x0: f64, h: f64) -> [Vec<f64>; 4] {
    let xs: Vec<f64> = (0..n).map(|i| x0 + h * i as f64).collect();
    [
        xs.iter().map(|&x| (omega * x).sin()).collect(),
        xs.iter().map(|&x| omega * (omega * x).cos()).collect(),
        xs.iter().map(|&x| -omega * omega * (omega * x).sin()).collect(),
        xs.iter()
            .map(|&x| -omega * omega * omega * (omega * x).cos())
            .collect(),
    ]
}

/// A parsed convergence CSV.
#[derive(Debug, Clone)]
pub struct ConvergenceCsv {
    pub columns: Vec<String>,
    pub header: String,
    pub rows: Vec<(u32, Vec<f64>)>,
}

impl ConvergenceCsv {
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|(_, values)| values[idx]).collect())
    }
}

/// Parse a file written by the sweep. Panics on malformed content.
pub fn read_convergence_csv(path: &Path) -> ConvergenceCsv {
    let text = std::fs::read_to_string(path).unwrap();
    let mut lines = text.lines();
    let header = lines.next().unwrap().to_string();
    let columns = header.split(", ").skip(1).map(str::to_string).collect();
    let rows = lines
        .map(|line| {
            let mut fields = line.split(", ");
            let r = fields.next().unwrap().parse().unwrap();
            let values = fields.map(|f| f.parse().unwrap()).collect();
            (r, values)
        })
        .collect();
    ConvergenceCsv {
        columns,
        header,
        rows,
    }
}
