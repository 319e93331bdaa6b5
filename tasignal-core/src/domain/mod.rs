//! Domain types shared by the data layer, the indicator library and the engine.

pub mod bar;
pub mod symbol;

pub use bar::Bar;
pub use symbol::{normalize_symbol, SymbolError};
