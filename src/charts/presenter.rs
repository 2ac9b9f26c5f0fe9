//! Chart Presenter Module
//! Owns the chart state of each view and replaces it wholesale on every render.

use crate::charts::state::{AxisId, AxisSpec, ChartState, ChartUpdate, Dataset, DatasetStyle};
use crate::data::{Indicator, Series, YearRange};
use crate::stats::{Correlation, SeriesSummary};
use egui::Color32;

pub const COUNTRY_COLOR: Color32 = Color32::from_rgb(76, 175, 80); // Green
pub const HAPPINESS_COLOR: Color32 = Color32::from_rgb(255, 152, 0); // Orange

pub const COUNTRY_DEFAULT_TITLE: &str = "Country Happiness Indicators";
pub const HAPPINESS_LABEL: &str = "😊 Happiness Score";

/// Closing notes shown under every India explanation.
pub const INDIA_NOTES: [&str; 3] = [
    "We found these connections by looking at numbers from 2019 to 2024 and using math to see which things move together with happiness. This is called \"correlation\".",
    "What we learned: the three things that make India happiest are 🗽 Freedom to make choices, 💵 Money per person and 👪 Support from family & friends.",
    "This shows that policies that give people more freedom, improve the economy, and strengthen family bonds could make India happier! 🇮🇳",
];

/// Display colour of an indicator in the India view.
pub fn indicator_color(indicator: Indicator) -> Color32 {
    match indicator {
        Indicator::Freedom => Color32::from_rgb(76, 175, 80),       // Green
        Indicator::GdpPerCapita => Color32::from_rgb(33, 150, 243), // Blue
        Indicator::SocialSupport => Color32::from_rgb(156, 39, 176), // Purple
        Indicator::Generosity => Color32::from_rgb(244, 67, 54),    // Red
        Indicator::Health => Color32::from_rgb(255, 152, 0),        // Orange
        Indicator::GdpGrowth => Color32::from_rgb(121, 85, 72),     // Brown
        _ => COUNTRY_COLOR,
    }
}

/// Fixed explanation text for an India indicator.
pub fn explanation_for(indicator: Indicator) -> &'static str {
    match indicator {
        Indicator::Freedom => "When people in India feel free to make their own choices, they feel much happier! This is the strongest connection we found.",
        Indicator::GdpPerCapita => "When people in India have more money to spend, they tend to be happier. This is the second strongest connection.",
        Indicator::SocialSupport => "Having family and friends to count on makes Indians happier. This is the third strongest connection.",
        Indicator::Generosity => "Surprisingly, when generosity goes up, happiness doesn't always follow. Scientists are still trying to understand why!",
        Indicator::Health => "Even though health is important, the numbers show it doesn't always match with happiness levels in India.",
        Indicator::GdpGrowth => "When India's economy grows quickly, it doesn't always mean people feel happier right away.",
        _ => "",
    }
}

/// Chart update of the Countries view.
pub fn country_update(
    indicator: Indicator,
    country: &str,
    range: YearRange,
    series: &Series,
) -> ChartUpdate {
    let mut style = DatasetStyle::solid(COUNTRY_COLOR);
    style.span_gaps = true;

    ChartUpdate {
        labels: range.years().collect(),
        datasets: vec![Dataset::from_series(
            indicator.key(),
            series,
            style,
            AxisId::Primary,
        )],
        title: format!(
            "{} in {} ({}-{})",
            indicator.key(),
            country,
            range.start,
            range.end
        ),
    }
}

/// Chart update of the India view: fixed happiness score plus one indicator.
pub fn india_update(
    indicator: Indicator,
    range: YearRange,
    happiness: &Series,
    values: &Series,
) -> ChartUpdate {
    let mut happiness_style = DatasetStyle::solid(HAPPINESS_COLOR);
    happiness_style.line_width = 4.0;
    happiness_style.point_radius = 8.0;

    let mut indicator_style = DatasetStyle::solid(indicator_color(indicator));
    indicator_style.line_width = 4.0;
    indicator_style.point_radius = 8.0;
    indicator_style.dashed = true;

    ChartUpdate {
        labels: range.years().collect(),
        datasets: vec![
            Dataset::from_series(HAPPINESS_LABEL, happiness, happiness_style, AxisId::Primary),
            Dataset::from_series(
                &indicator.label(),
                values,
                indicator_style,
                AxisId::Secondary,
            ),
        ],
        title: format!(
            "{} How {} Affects India's Happiness",
            indicator.emoji(),
            indicator.friendly_name()
        ),
    }
}

/// Presentation sink for one chart.
pub struct ChartPresenter {
    state: ChartState,
    summary: Option<SeriesSummary>,
    notice: Option<String>,
}

impl ChartPresenter {
    pub fn new(state: ChartState) -> Self {
        Self {
            state,
            summary: None,
            notice: None,
        }
    }

    pub fn country_view() -> Self {
        Self::new(ChartState::new(COUNTRY_DEFAULT_TITLE, AxisSpec::new("Value")))
    }

    /// Replace labels, datasets and title. Nothing of the previous render survives.
    pub fn render(&mut self, update: ChartUpdate) {
        self.state.labels = update.labels;
        self.state.datasets = update.datasets;
        self.state.title = update.title;
        self.summary = None;
        self.notice = None;
    }

    pub fn set_summary(&mut self, summary: Option<SeriesSummary>) {
        self.summary = summary;
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn summary(&self) -> Option<&SeriesSummary> {
        self.summary.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

/// India view: two scales and an explanation keyed by the indicator.
pub struct IndiaPresenter {
    chart: ChartPresenter,
    indicator: Indicator,
    correlation: Option<Correlation>,
}

impl Default for IndiaPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl IndiaPresenter {
    pub fn new() -> Self {
        let mut state = ChartState::new(
            "",
            AxisSpec::colored("Happiness Score", HAPPINESS_COLOR),
        );
        state.y1_axis = Some(AxisSpec::new(""));
        Self {
            chart: ChartPresenter::new(state),
            indicator: Indicator::INDIA_VIEW[0],
            correlation: None,
        }
    }

    pub fn render(
        &mut self,
        indicator: Indicator,
        update: ChartUpdate,
        correlation: Option<Correlation>,
    ) {
        self.chart.render(update);
        self.chart.state.y1_axis = Some(AxisSpec::colored(
            indicator.friendly_name(),
            indicator_color(indicator),
        ));
        self.indicator = indicator;
        self.correlation = correlation;
    }

    pub fn state(&self) -> &ChartState {
        self.chart.state()
    }

    /// Problem shown with this view until the next render.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.chart.set_notice(notice);
    }

    pub fn notice(&self) -> Option<&str> {
        self.chart.notice()
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    /// Heading of the explanation panel.
    pub fn heading(&self) -> String {
        format!(
            "{} {} and Happiness",
            self.indicator.emoji(),
            self.indicator.friendly_name()
        )
    }

    pub fn explanation(&self) -> &'static str {
        explanation_for(self.indicator)
    }

    pub fn correlation(&self) -> Option<&Correlation> {
        self.correlation.as_ref()
    }
}
