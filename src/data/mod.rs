//! Data module - year ranges, indicators and series sources

pub mod directory;
pub mod indicator_file;
mod indicator;
mod series;
mod source;
mod static_table;
mod year_range;

pub use directory::{CountryDirectory, DirectoryError, WorldBankDirectory};
pub use indicator::{Indicator, Location};
pub use indicator_file::IndicatorFileSource;
pub use series::{Series, SeriesPoint};
pub use source::{DataSource, SeriesResolver, SourceError};
pub use static_table::StaticTable;
pub use year_range::{EndYearOption, YearRange, YearRangeController};
