pub mod chart;
pub mod config;
pub mod export;
pub mod load;
pub mod selector;
pub mod slice;
pub mod source;
pub mod table;

pub use chart::{build_charts, ChartPayload, DashboardView};
pub use config::DashboardConfig;
pub use load::{load, load_sheet, LoadError};
pub use selector::YearSelector;
pub use slice::{compute_slice, SelectionError, YearSlice};
pub use source::{Palette, Source};
pub use table::{SourceTable, YearRow};
