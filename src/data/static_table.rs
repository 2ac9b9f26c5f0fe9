//! Static Table Module
//! Fixed per-country value arrays compiled into the application.

use crate::data::{Indicator, Series, YearRange};
use std::collections::{BTreeMap, HashMap};

/// Values per country, aligned so that index 0 is `first_year`.
#[derive(Debug, Clone, Default)]
pub struct StaticTable {
    first_year: i32,
    rows: BTreeMap<String, Vec<f64>>,
}

impl StaticTable {
    pub fn new(first_year: i32) -> Self {
        Self {
            first_year,
            rows: BTreeMap::new(),
        }
    }

    pub fn with_row(mut self, country: &str, values: &[f64]) -> Self {
        self.rows.insert(country.to_string(), values.to_vec());
        self
    }

    /// Series for `country` over `range`.
    ///
    /// An unknown country gives an empty series; years the table does not
    /// cover are gaps.
    pub fn lookup(&self, country: &str, range: YearRange) -> Series {
        let Some(values) = self.rows.get(country) else {
            return Series::empty();
        };

        Series::from_range(range, |year| {
            let offset = year - self.first_year;
            if offset < 0 {
                return None;
            }
            values.get(offset as usize).copied()
        })
    }
}

/// Built-in tables: the happiness index of the Countries view and the
/// India view's happiness score and indicator values.
pub fn builtin_tables() -> HashMap<Indicator, StaticTable> {
    let mut tables = HashMap::new();

    tables.insert(
        Indicator::HappinessIndex,
        StaticTable::new(2018)
            .with_row("India", &[4.0, 4.2, 4.3, 4.1, 4.0])
            .with_row("United States", &[6.9, 7.0, 6.8, 6.7, 6.9])
            .with_row("Brazil", &[6.3, 6.2, 6.1, 6.0, 6.1]),
    );

    let india = |values: &[f64]| StaticTable::new(2022).with_row("India", values);
    tables.insert(Indicator::HappinessScore, india(&[4.036, 4.054, 4.389]));
    tables.insert(Indicator::Freedom, india(&[0.685, 0.767, 0.914]));
    tables.insert(Indicator::GdpPerCapita, india(&[1.159, 1.166, 1.149]));
    tables.insert(Indicator::SocialSupport, india(&[0.674, 0.653, 0.860]));
    tables.insert(Indicator::Generosity, india(&[0.175, 0.174, 0.141]));
    tables.insert(Indicator::Health, india(&[0.252, 0.417, 0.316]));
    tables.insert(Indicator::GdpGrowth, india(&[7.61, 9.19, 6.48]));

    tables
}

#[cfg(test)]
mod tests {
    use super::*;

    fn happiness() -> StaticTable {
        StaticTable::new(2018).with_row("India", &[4.0, 4.2, 4.3, 4.1, 4.0])
    }

    #[test]
    fn absent_country_yields_empty_series() {
        let series = happiness().lookup("Brazil", YearRange::new(2018, 2022));
        assert!(series.is_empty());
    }

    #[test]
    fn lookup_aligns_values_to_years() {
        let series = happiness().lookup("India", YearRange::new(2019, 2021));
        assert_eq!(series.years(), vec![2019, 2020, 2021]);
        assert_eq!(series.values(), vec![Some(4.2), Some(4.3), Some(4.1)]);
    }

    #[test]
    fn years_outside_table_are_gaps() {
        let series = happiness().lookup("India", YearRange::new(2016, 2024));
        assert_eq!(series.len(), 9);
        assert_eq!(series.value_at(2016), None);
        assert_eq!(series.value_at(2018), Some(4.0));
        assert_eq!(series.value_at(2023), None);
    }

    #[test]
    fn builtin_tables_cover_every_india_indicator() {
        let tables = builtin_tables();
        for indicator in Indicator::INDIA_VIEW {
            let series = tables[&indicator].lookup("India", YearRange::new(2022, 2024));
            assert_eq!(series.present_values().len(), 3, "{indicator}");
        }
    }
}
