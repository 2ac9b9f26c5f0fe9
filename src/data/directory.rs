//! Country Directory Module
//! Fetches the selectable country list from the World Bank API.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Region id the World Bank uses for aggregates ("World", "Euro area", ...).
const AGGREGATE_REGION: &str = "NA";

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Country directory request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Country directory returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("Country directory is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct Region {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CountryEntry {
    name: String,
    region: Option<Region>,
}

impl CountryEntry {
    fn is_country(&self) -> bool {
        self.region
            .as_ref()
            .and_then(|r| r.id.as_deref())
            .map(|id| !id.trim().is_empty() && id != AGGREGATE_REGION)
            .unwrap_or(false)
    }
}

/// Extract selectable country names from a directory response.
///
/// The body is `[paging, [entries...]]`. Aggregates, entries without a
/// region and malformed entries are dropped one by one; duplicate names keep
/// their first occurrence.
pub fn parse_country_directory(body: &str) -> Result<Vec<String>, DirectoryError> {
    let (_paging, entries): (Value, Vec<Value>) = serde_json::from_str(body)?;

    let mut seen = HashSet::new();
    let countries: Vec<String> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<CountryEntry>(entry) {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("skipping malformed directory entry: {err}");
                None
            }
        })
        .filter(CountryEntry::is_country)
        .map(|entry| entry.name)
        .filter(|name| seen.insert(name.clone()))
        .collect();

    Ok(countries)
}

/// Anything able to list selectable countries.
pub trait CountryDirectory: Send {
    fn fetch_countries(&self) -> Result<Vec<String>, DirectoryError>;
}

/// Country directory served by the World Bank v2 API.
pub struct WorldBankDirectory {
    client: reqwest::blocking::Client,
    url: String,
}

impl WorldBankDirectory {
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, DirectoryError> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

impl CountryDirectory for WorldBankDirectory {
    fn fetch_countries(&self) -> Result<Vec<String>, DirectoryError> {
        debug!(url = %self.url, "fetching country directory");
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status));
        }
        let body = response.text()?;
        let countries = parse_country_directory(&body)?;
        info!(count = countries.len(), "country directory loaded");
        Ok(countries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_are_excluded() {
        let body = r#"[{"page":1}, [
            {"name":"India","region":{"id":"SAS"}},
            {"name":"World","region":{"id":"NA"}}
        ]]"#;
        assert_eq!(parse_country_directory(body).unwrap(), vec!["India"]);
    }

    #[test]
    fn entries_without_region_are_excluded() {
        let body = r#"[{}, [
            {"name":"Brazil","region":{"id":"LCN","value":"Latin America & Caribbean"}},
            {"name":"Nowhere"},
            {"name":"Blank","region":{"id":""}},
            {"name":"Nullish","region":null}
        ]]"#;
        assert_eq!(parse_country_directory(body).unwrap(), vec!["Brazil"]);
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let body = r#"[{"page":1}, [
            {"name":"India","region":{"id":"SAS"}},
            {"name":null,"region":{"id":"NA"}},
            {"region":{"id":"EAS"}},
            {"name":"Oddland","region":{"id":7}},
            "not an object",
            {"name":"Kenya","region":{"id":"SSF"}}
        ]]"#;
        assert_eq!(
            parse_country_directory(body).unwrap(),
            vec!["India", "Kenya"]
        );
    }

    #[test]
    fn duplicate_names_keep_first() {
        let body = r#"[{}, [
            {"name":"Chile","region":{"id":"LCN"}},
            {"name":"Albania","region":{"id":"ECS"}},
            {"name":"Chile","region":{"id":"LCN"}}
        ]]"#;
        assert_eq!(
            parse_country_directory(body).unwrap(),
            vec!["Chile", "Albania"]
        );
    }

    #[test]
    fn error_payload_is_a_parse_error() {
        let body = r#"[{"message":[{"id":"120","value":"Invalid value"}]}]"#;
        assert!(matches!(
            parse_country_directory(body),
            Err(DirectoryError::Parse(_))
        ));
    }
}
