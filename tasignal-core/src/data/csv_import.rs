//! CSV file provider.
//!
//! Reads `{dir}/{SYMBOL}.csv` with a header row naming at least
//! date, open, high, low, close and volume (any case, any order).
//! Extra columns such as `adj_close` are ignored.

use super::provider::{DataError, DataProvider, DataSource, FetchResult};
use crate::domain::Bar;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

const REQUIRED_COLUMNS: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }
}

/// Parse an OHLCV CSV file into bars (unsorted, unvalidated).
pub fn read_bars_csv(path: &Path) -> Result<Vec<Bar>, DataError> {
    let file = std::fs::File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(std::io::BufReader::new(file));

    let csv_err = |detail: String| DataError::Csv {
        path: path.to_path_buf(),
        detail,
    };

    let headers = reader.headers().map_err(|e| csv_err(e.to_string()))?.clone();
    let mut idx = [0usize; 6];
    for (slot, column) in idx.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(column))
            .ok_or_else(|| DataError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            })?;
    }
    let [date_i, open_i, high_i, low_i, close_i, volume_i] = idx;

    let mut bars = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| csv_err(e.to_string()))?;
        let line = row + 2;
        let field = |i: usize| record.get(i).unwrap_or("");
        let price = |i: usize| -> Result<f64, DataError> {
            field(i).parse::<f64>().map_err(|_| {
                csv_err(format!(
                    "line {line}: invalid {} value '{}'",
                    headers.get(i).unwrap_or("?"),
                    field(i)
                ))
            })
        };

        let date = parse_date(field(date_i))
            .ok_or_else(|| csv_err(format!("line {line}: invalid date '{}'", field(date_i))))?;
        let volume = parse_volume(field(volume_i)).ok_or_else(|| {
            csv_err(format!("line {line}: invalid volume '{}'", field(volume_i)))
        })?;

        bars.push(Bar {
            date,
            open: price(open_i)?,
            high: price(high_i)?,
            low: price(low_i)?,
            close: price(close_i)?,
            volume,
        });
    }

    Ok(bars)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    // Accept a trailing time component ("2024-01-02 00:00:00")
    let day = raw.split(|c: char| c == 'T' || c == ' ').next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn parse_volume(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.round() as u64)
    })
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        let mut bars = read_bars_csv(&path)?;
        bars.retain(|b| b.date >= start && b.date <= end);
        tracing::debug!(symbol, path = %path.display(), bars = bars.len(), "loaded CSV bars");

        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::CsvImport,
        })
    }

    fn is_available(&self) -> bool {
        self.dir.is_dir()
    }
}
