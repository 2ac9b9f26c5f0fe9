//! Chart State Module
//! Labels, datasets and axes of one chart, independent of any drawing backend.

use crate::data::Series;
use egui::Color32;

/// Vertical scale a dataset is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisId {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub title: String,
    pub color: Option<Color32>,
}

impl AxisSpec {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            color: None,
        }
    }

    pub fn colored(title: &str, color: Color32) -> Self {
        Self {
            title: title.to_string(),
            color: Some(color),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetStyle {
    pub color: Color32,
    pub fill: bool,
    pub dashed: bool,
    pub line_width: f32,
    pub point_radius: f32,
    /// Draw the line across gaps. Missing points are never drawn either way.
    pub span_gaps: bool,
}

impl DatasetStyle {
    pub fn solid(color: Color32) -> Self {
        Self {
            color,
            fill: true,
            dashed: false,
            line_width: 3.0,
            point_radius: 6.0,
            span_gaps: false,
        }
    }
}

/// One named line of a chart; `values[i]` belongs to `labels[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<Option<f64>>,
    pub style: DatasetStyle,
    pub axis: AxisId,
}

impl Dataset {
    pub fn from_series(label: &str, series: &Series, style: DatasetStyle, axis: AxisId) -> Self {
        Self {
            label: label.to_string(),
            values: series.values(),
            style,
            axis,
        }
    }

    /// Present points as `[year, value]`.
    pub fn points(&self, labels: &[i32]) -> Vec<[f64; 2]> {
        labels
            .iter()
            .zip(&self.values)
            .filter_map(|(&year, value)| value.map(|v| [year as f64, v]))
            .collect()
    }

    /// Line segments to draw. Gaps split the line unless `span_gaps` is set.
    pub fn segments(&self, labels: &[i32]) -> Vec<Vec<[f64; 2]>> {
        if self.style.span_gaps {
            let points = self.points(labels);
            return if points.is_empty() { Vec::new() } else { vec![points] };
        }

        let mut segments = Vec::new();
        let mut current = Vec::new();
        for (&year, value) in labels.iter().zip(&self.values) {
            match value {
                Some(v) => current.push([year as f64, *v]),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

/// Everything a chart presenter submits in one render.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartUpdate {
    pub labels: Vec<i32>,
    pub datasets: Vec<Dataset>,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartState {
    pub title: String,
    pub labels: Vec<i32>,
    pub datasets: Vec<Dataset>,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub y1_axis: Option<AxisSpec>,
}

impl ChartState {
    pub fn new(title: &str, y_axis: AxisSpec) -> Self {
        Self {
            title: title.to_string(),
            labels: Vec::new(),
            datasets: Vec::new(),
            x_axis: AxisSpec::new("Year"),
            y_axis,
            y1_axis: None,
        }
    }

    pub fn has_points(&self) -> bool {
        self.datasets
            .iter()
            .any(|d| !d.points(&self.labels).is_empty())
    }

    /// Value span of the datasets bound to `axis`.
    pub fn value_range(&self, axis: AxisId) -> Option<ValueRange> {
        ValueRange::of(
            self.datasets
                .iter()
                .filter(|d| d.axis == axis)
                .flat_map(|d| d.values.iter().flatten().copied()),
        )
    }
}

/// Min/max of a set of values, widened when degenerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        if min == max {
            let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
            return Some(Self {
                min: min - pad,
                max: max + pad,
            });
        }
        Some(Self { min, max })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Linear map of `v` from this range onto `target`.
    pub fn map_onto(&self, target: &ValueRange, v: f64) -> f64 {
        target.min + (v - self.min) / self.span() * target.span()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(values: Vec<Option<f64>>, span_gaps: bool) -> Dataset {
        let mut style = DatasetStyle::solid(Color32::RED);
        style.span_gaps = span_gaps;
        Dataset {
            label: "test".to_string(),
            values,
            style,
            axis: AxisId::Primary,
        }
    }

    #[test]
    fn gaps_split_segments() {
        let labels = [2018, 2019, 2020, 2021, 2022];
        let d = dataset(vec![Some(1.0), Some(2.0), None, Some(4.0), None], false);
        assert_eq!(
            d.segments(&labels),
            vec![vec![[2018.0, 1.0], [2019.0, 2.0]], vec![[2021.0, 4.0]]]
        );
    }

    #[test]
    fn spanned_gaps_join_present_points() {
        let labels = [2018, 2019, 2020];
        let d = dataset(vec![Some(1.0), None, Some(3.0)], true);
        assert_eq!(d.segments(&labels), vec![vec![[2018.0, 1.0], [2020.0, 3.0]]]);
        assert_eq!(d.points(&labels).len(), 2);
    }

    #[test]
    fn empty_dataset_has_nothing_to_draw() {
        let d = dataset(Vec::new(), true);
        assert!(d.segments(&[2018, 2019]).is_empty());
        assert!(d.points(&[2018, 2019]).is_empty());
    }

    #[test]
    fn secondary_values_map_onto_primary_range() {
        let primary = ValueRange { min: 4.0, max: 5.0 };
        let secondary = ValueRange { min: 0.0, max: 10.0 };
        assert_eq!(secondary.map_onto(&primary, 5.0), 4.5);
        assert_eq!(primary.map_onto(&secondary, 4.5), 5.0);
    }

    #[test]
    fn degenerate_range_is_widened() {
        let r = ValueRange::of([2.0, 2.0].into_iter()).unwrap();
        assert!(r.min < 2.0 && r.max > 2.0);
        assert!(ValueRange::of(std::iter::empty()).is_none());
    }
}
