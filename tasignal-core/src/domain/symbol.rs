//! Ticker symbol normalization.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("symbol is empty")]
    Empty,

    #[error("symbol '{symbol}' contains invalid character '{ch}'")]
    InvalidCharacter { symbol: String, ch: char },
}

/// Trim and uppercase a ticker, rejecting anything outside `[A-Z0-9.^=-]`.
///
/// Index tickers (`^GSPC`), share classes (`BRK-B`, `BF.B`) and futures
/// (`ES=F`) pass through unchanged apart from case.
pub fn normalize_symbol(raw: &str) -> Result<String, SymbolError> {
    let symbol = raw.trim().to_ascii_uppercase();
    if symbol.is_empty() {
        return Err(SymbolError::Empty);
    }
    if let Some(ch) = symbol
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '^' | '=' | '-')))
    {
        return Err(SymbolError::InvalidCharacter { symbol, ch });
    }
    Ok(symbol)
}
