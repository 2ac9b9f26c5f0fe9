//! Data Source Module
//! Resolves (indicator, country, year range) to a series.

use crate::data::indicator_file::{IndicatorError, IndicatorFileSource};
use crate::data::static_table::{builtin_tables, StaticTable};
use crate::data::{Indicator, Location, Series, YearRange};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Indicator(#[from] IndicatorError),
    #[error("No data source configured for indicator {0}")]
    Unavailable(Indicator),
}

/// Anything that can turn a selection into a series.
pub trait SeriesResolver: Send + Sync {
    fn resolve(
        &self,
        indicator: Indicator,
        country: &str,
        range: YearRange,
    ) -> Result<Series, SourceError>;
}

/// Routes each indicator to its static table or data file.
pub struct DataSource {
    tables: HashMap<Indicator, StaticTable>,
    files: Option<IndicatorFileSource>,
}

impl DataSource {
    pub fn new(files: Option<IndicatorFileSource>) -> Self {
        Self {
            tables: builtin_tables(),
            files,
        }
    }

    pub fn with_tables(
        tables: HashMap<Indicator, StaticTable>,
        files: Option<IndicatorFileSource>,
    ) -> Self {
        Self { tables, files }
    }
}

impl SeriesResolver for DataSource {
    fn resolve(
        &self,
        indicator: Indicator,
        country: &str,
        range: YearRange,
    ) -> Result<Series, SourceError> {
        debug!(%indicator, country, start = range.start, end = range.end, "resolving series");
        match indicator.location() {
            Location::Table => self
                .tables
                .get(&indicator)
                .map(|table| table.lookup(country, range))
                .ok_or(SourceError::Unavailable(indicator)),
            Location::File(file) => {
                let files = self
                    .files
                    .as_ref()
                    .ok_or(SourceError::Unavailable(indicator))?;
                Ok(files.resolve(file, country, range)?)
            }
        }
    }
}
