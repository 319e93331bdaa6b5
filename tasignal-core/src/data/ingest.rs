//! Ingest pipeline: provider bars in, canonical bar sequence out.
//!
//! Sorts ascending by date, keeps the first bar for a duplicated date and
//! drops bars that are void or fail the OHLC sanity check. The output is
//! the immutable sequence the indicator library and engine see.

use super::provider::DataError;
use crate::domain::Bar;

/// Canonical bars plus what the pipeline discarded.
#[derive(Debug, Clone)]
pub struct IngestResult {
    pub bars: Vec<Bar>,
    pub duplicates_dropped: usize,
    pub invalid_dropped: usize,
}

pub fn ingest(symbol: &str, mut bars: Vec<Bar>) -> Result<IngestResult, DataError> {
    // Stable sort keeps provider order among equal dates, so "first wins" holds.
    bars.sort_by_key(|b| b.date);

    let before = bars.len();
    bars.dedup_by_key(|b| b.date);
    let duplicates_dropped = before - bars.len();

    let before = bars.len();
    bars.retain(|b| {
        let keep = b.is_sane();
        if !keep {
            tracing::warn!(symbol, date = %b.date, "dropping invalid bar");
        }
        keep
    });
    let invalid_dropped = before - bars.len();

    if bars.is_empty() {
        return Err(DataError::NoUsableBars {
            symbol: symbol.to_string(),
        });
    }

    if duplicates_dropped > 0 {
        tracing::debug!(symbol, duplicates_dropped, "dropped duplicate dates");
    }

    Ok(IngestResult {
        bars,
        duplicates_dropped,
        invalid_dropped,
    })
}
