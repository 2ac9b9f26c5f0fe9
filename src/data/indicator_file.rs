//! Indicator File Module
//! Loads per-indicator JSON exports and sums year columns per country using Polars.

use crate::data::{Series, YearRange};
use polars::prelude::*;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Marker used by the data exports for "value not available".
pub const NOT_AVAILABLE: &str = "..";

const COUNTRY_FIELD: &str = "Country Name";

#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Failed to read indicator file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Indicator request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Indicator request to {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("Indicator file is not a JSON array of rows: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Fetches the raw text of an indicator document by file name.
pub trait DocumentFetcher: Send + Sync {
    fn fetch(&self, file: &str) -> Result<String, IndicatorError>;
}

/// Reads indicator documents from a local directory.
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DocumentFetcher for DirectoryFetcher {
    fn fetch(&self, file: &str) -> Result<String, IndicatorError> {
        let path = self.root.join(file);
        std::fs::read_to_string(&path).map_err(|source| IndicatorError::Io { path, source })
    }
}

/// Downloads indicator documents relative to a base URL.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, IndicatorError> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl DocumentFetcher for HttpFetcher {
    fn fetch(&self, file: &str) -> Result<String, IndicatorError> {
        let url = format!("{}/{}", self.base_url, file);
        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(IndicatorError::Status { url, status });
        }
        Ok(response.text()?)
    }
}

/// Pick the fetcher for a configured data location (directory or http(s) URL).
pub fn fetcher_for(
    location: &str,
    timeout: Option<Duration>,
) -> Result<Box<dyn DocumentFetcher>, IndicatorError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpFetcher::new(location, timeout)?))
    } else {
        Ok(Box::new(DirectoryFetcher::new(location)))
    }
}

/// Parse a `"<year> [YR<year>]"` column name.
pub fn parse_year_key(key: &str) -> Option<i32> {
    let (year, rest) = key.split_once(" [YR")?;
    let tagged = rest.strip_suffix(']')?;
    if year != tagged {
        return None;
    }
    year.parse().ok()
}

/// Numeric value of a cell, or `None` for the sentinel, nulls and text.
fn cell_value(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) if s.trim() == NOT_AVAILABLE => None,
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Stack an indicator document into long format.
///
/// Output columns: ["country", "year", "value"]. Unavailable cells are kept
/// with a null value so that every listed country stays present in the frame;
/// a row without any year column contributes one row with a null year.
pub fn stack_rows(body: &str) -> Result<DataFrame, IndicatorError> {
    let rows: Vec<Map<String, Value>> = serde_json::from_str(body)?;

    let mut countries: Vec<String> = Vec::new();
    let mut years: Vec<Option<i32>> = Vec::new();
    let mut values: Vec<Option<f64>> = Vec::new();

    for row in &rows {
        let Some(country) = row.get(COUNTRY_FIELD).and_then(Value::as_str) else {
            continue;
        };
        let before = countries.len();
        for (key, cell) in row {
            if let Some(year) = parse_year_key(key) {
                countries.push(country.to_string());
                years.push(Some(year));
                values.push(cell_value(cell));
            }
        }
        if countries.len() == before {
            countries.push(country.to_string());
            years.push(None);
            values.push(None);
        }
    }

    let df = DataFrame::new(vec![
        Column::new("country".into(), countries),
        Column::new("year".into(), years),
        Column::new("value".into(), values),
    ])?;

    Ok(df)
}

/// Sum every value of `country` per year of `range`.
///
/// A year with no numeric value left is a gap, so a listed country whose
/// cells are all unavailable yields a full range of gaps. A country absent
/// from the frame yields an empty series.
pub fn aggregate_country(
    df: &DataFrame,
    country: &str,
    range: YearRange,
) -> Result<Series, IndicatorError> {
    let totals = df
        .clone()
        .lazy()
        .filter(
            col("country")
                .eq(lit(country))
                .and(col("year").gt_eq(lit(range.start)))
                .and(col("year").lt_eq(lit(range.end)))
                .and(col("value").is_not_null()),
        )
        .group_by([col("year")])
        .agg([col("value").sum().alias("total")])
        .collect()?;

    let has_country = df
        .clone()
        .lazy()
        .filter(col("country").eq(lit(country)))
        .limit(1)
        .collect()?
        .height()
        > 0;
    if !has_country {
        debug!(country, "country not present in indicator data");
        return Ok(Series::empty());
    }

    let year_ca = totals.column("year")?.i32()?;
    let total_ca = totals.column("total")?.f64()?;
    let by_year: HashMap<i32, f64> = year_ca
        .into_iter()
        .zip(total_ca.into_iter())
        .filter_map(|(year, total)| Some((year?, total?)))
        .collect();

    Ok(Series::from_range(range, |year| by_year.get(&year).copied()))
}

/// Per-indicator file source: one document fetch per resolve.
pub struct IndicatorFileSource {
    fetcher: Box<dyn DocumentFetcher>,
}

impl IndicatorFileSource {
    pub fn new(fetcher: Box<dyn DocumentFetcher>) -> Self {
        Self { fetcher }
    }

    pub fn resolve(
        &self,
        file: &str,
        country: &str,
        range: YearRange,
    ) -> Result<Series, IndicatorError> {
        let body = self.fetcher.fetch(file)?;
        let df = stack_rows(&body)?;
        let series = aggregate_country(&df, country, range)?;
        if !series.is_empty() && series.present_values().is_empty() {
            warn!(file, country, "no values available in the selected years");
        }
        Ok(series)
    }
}
