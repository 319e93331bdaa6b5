//! tasignal runner: analysis orchestration on top of `tasignal-core`.
//!
//! This crate provides:
//! - TOML configuration with per-section defaults
//! - Provider selection and bar loading (Yahoo, CSV, synthetic)
//! - Single-symbol analysis: fetch → ingest → indicators → engine
//! - Bounded parallel batch analysis with per-symbol failure collection
//! - JSON report export

pub mod batch;
pub mod config;
pub mod data_loader;
pub mod export;
pub mod runner;

pub use batch::{analyze_batch, BatchResult};
pub use config::{AnalysisConfig, BatchConfig, ConfigError, DataConfig, SourceKind};
pub use data_loader::{build_provider, load_bars, LoadError, LoadedBars};
pub use export::{export_json, import_json, report_file_name, save_report};
pub use runner::{analyze_symbol, RunError};
