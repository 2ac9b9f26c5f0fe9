//! Series Module
//! Per-year values with explicit gaps for missing data.

use crate::data::YearRange;

/// One year of a series. `None` is a gap, never zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: Option<f64>,
}

/// Ordered per-year values for one indicator/country/range combination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    points: Vec<SeriesPoint>,
}

impl Series {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a series covering every year of `range`, asking `value_for` for each.
    pub fn from_range<F>(range: YearRange, mut value_for: F) -> Self
    where
        F: FnMut(i32) -> Option<f64>,
    {
        Self {
            points: range
                .years()
                .map(|year| SeriesPoint {
                    year,
                    value: value_for(year),
                })
                .collect(),
        }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|p| p.year).collect()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Values that are present, in year order.
    pub fn present_values(&self) -> Vec<f64> {
        self.points.iter().filter_map(|p| p.value).collect()
    }

    pub fn value_at(&self, year: i32) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.year == year)
            .and_then(|p| p.value)
    }
}
