//! Configuration management for daubechies-sweep.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Result, SweepError};
use crate::wavelet::MAX_VANISHING_MOMENTS;

/// Command-line arguments for daubechies-sweep
#[derive(Parser, Debug)]
#[command(name = "daubechies-sweep")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to JSON configuration file
    #[arg(short, long, env = "DAUB_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "DAUB_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Which experiment to run
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Rank every interpolator for each p and write convergence CSVs
    Sweep(SweepArgs),
    /// Measure how finely phi must be sampled for a Hermite interpolant
    Refinement(RefinementArgs),
}

#[derive(ClapArgs, Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepArgs {
    /// Smallest number of vanishing moments
    #[arg(long, env = "DAUB_P_MIN")]
    pub p_min: Option<usize>,

    /// Largest number of vanishing moments
    #[arg(long, env = "DAUB_P_MAX")]
    pub p_max: Option<usize>,

    /// Refinement level of the dense reference grid
    #[arg(long, env = "DAUB_R_MAX")]
    pub r_max: Option<u32>,

    /// Floating-point type the interpolators run in
    #[arg(long, value_enum)]
    pub precision: Option<Precision>,

    /// Directory for the CSV and summary files
    #[arg(short, long, env = "DAUB_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Do not write the JSON run summary
    #[arg(long)]
    pub no_summary: bool,
}

#[derive(ClapArgs, Debug, Clone, Default, PartialEq, Eq)]
pub struct RefinementArgs {
    /// Number of vanishing moments
    #[arg(short, long)]
    pub p: Option<usize>,

    /// Refinement level of the dense reference grid
    #[arg(long)]
    pub r_max: Option<u32>,

    /// Floating-point type the interpolant runs in
    #[arg(long, value_enum)]
    pub precision: Option<Precision>,
}

/// Floating-point precision of an experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    F32,
    F64,
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::F32 => f.write_str("f32"),
            Precision::F64 => f.write_str("f64"),
        }
    }
}

/// Interpolator sweep configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    #[serde(default = "default_p_min")]
    pub p_min: usize,

    #[serde(default = "default_p_max")]
    pub p_max: usize,

    #[serde(default = "default_sweep_r_max")]
    pub r_max: u32,

    #[serde(default = "default_sweep_precision")]
    pub precision: Precision,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Write `daubechies_sweep_summary.json` after the sweep
    #[serde(default = "default_true")]
    pub write_summary: bool,
}

/// Refinement study configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinementConfig {
    #[serde(default = "default_refinement_p")]
    pub p: usize,

    #[serde(default = "default_refinement_r_max")]
    pub r_max: u32,

    #[serde(default = "default_refinement_precision")]
    pub precision: Precision,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sweep: SweepConfig,

    #[serde(default)]
    pub refinement: RefinementConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, Command)> {
        Self::from_args(Args::parse())
    }

    /// Layer the defaults, the optional config file and `args`.
    pub fn from_args(args: Args) -> Result<(Self, Command)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if let Some(level) = args.log_level {
            config.log_level = level;
        }
        config.apply_command(&args.command);

        Ok((config, args.command))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SweepError::Config {
            message: format!("Cannot read config file {}: {}", path.display(), e),
        })?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.sweep = other.sweep;
        self.refinement = other.refinement;
        self.log_level = other.log_level;
    }

    fn apply_command(&mut self, command: &Command) {
        match command {
            Command::Sweep(args) => {
                let sweep = &mut self.sweep;
                if let Some(p_min) = args.p_min {
                    sweep.p_min = p_min;
                }
                if let Some(p_max) = args.p_max {
                    sweep.p_max = p_max;
                }
                if let Some(r_max) = args.r_max {
                    sweep.r_max = r_max;
                }
                if let Some(precision) = args.precision {
                    sweep.precision = precision;
                }
                if let Some(dir) = &args.output_dir {
                    sweep.output_dir = dir.clone();
                }
                if args.no_summary {
                    sweep.write_summary = false;
                }
            }
            Command::Refinement(args) => {
                let refinement = &mut self.refinement;
                if let Some(p) = args.p {
                    refinement.p = p;
                }
                if let Some(r_max) = args.r_max {
                    refinement.r_max = r_max;
                }
                if let Some(precision) = args.precision {
                    refinement.precision = precision;
                }
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let sweep = &self.sweep;
        if sweep.p_min < 2 || sweep.p_min > sweep.p_max || sweep.p_max > MAX_VANISHING_MOMENTS {
            return Err(SweepError::Config {
                message: format!(
                    "Invalid p range {}..={}. Must satisfy 2 <= p_min <= p_max <= {}",
                    sweep.p_min, sweep.p_max, MAX_VANISHING_MOMENTS
                ),
            });
        }

        if !(4..=20).contains(&sweep.r_max) {
            return Err(SweepError::Config {
                message: format!("Invalid sweep r_max: {}. Must be between 4 and 20", sweep.r_max),
            });
        }

        let refinement = &self.refinement;
        if !(3..=MAX_VANISHING_MOMENTS).contains(&refinement.p) {
            return Err(SweepError::Config {
                message: format!(
                    "Invalid refinement p: {}. Must be between 3 and {}",
                    refinement.p, MAX_VANISHING_MOMENTS
                ),
            });
        }

        if !(4..=24).contains(&refinement.r_max) {
            return Err(SweepError::Config {
                message: format!(
                    "Invalid refinement r_max: {}. Must be between 4 and 24",
                    refinement.r_max
                ),
            });
        }

        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(SweepError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sweep: SweepConfig::default(),
            refinement: RefinementConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            p_min: default_p_min(),
            p_max: default_p_max(),
            r_max: default_sweep_r_max(),
            precision: default_sweep_precision(),
            output_dir: default_output_dir(),
            write_summary: true,
        }
    }
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self {
            p: default_refinement_p(),
            r_max: default_refinement_r_max(),
            precision: default_refinement_precision(),
        }
    }
}

// Default value functions for serde
fn default_p_min() -> usize {
    2
}

fn default_p_max() -> usize {
    MAX_VANISHING_MOMENTS
}

fn default_sweep_r_max() -> u32 {
    17
}

fn default_sweep_precision() -> Precision {
    Precision::F64
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

fn default_refinement_p() -> usize {
    5
}

fn default_refinement_r_max() -> u32 {
    21
}

fn default_refinement_precision() -> Precision {
    Precision::F32
}

fn default_log_level() -> String {
    "info".to_string()
}
