//! UI Orchestrator
//! Turns control changes into resolves on background threads and renders the results.

use crate::charts::{country_update, india_update, ChartPresenter, ChartUpdate, IndiaPresenter};
use crate::config::BoardConfig;
use crate::data::{
    CountryDirectory, Indicator, Series, SeriesResolver, YearRange, YearRangeController,
};
use crate::stats::{Correlation, SeriesSummary, StatsCalculator};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info, warn};

/// A change reported by one of the selection controls.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Country(String),
    Indicator(Indicator),
    StartYear(i32),
    EndYear(i32),
}

/// Selection snapshot of the Countries view.
#[derive(Debug, Clone, PartialEq)]
pub struct CountrySelection {
    pub indicator: Indicator,
    pub country: String,
    pub range: YearRange,
}

/// Selection snapshot of the India view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndiaSelection {
    pub indicator: Indicator,
    pub range: YearRange,
}

#[derive(Debug, Clone)]
pub struct CountryOutcome {
    pub selection: CountrySelection,
    pub update: ChartUpdate,
    pub summary: Option<SeriesSummary>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IndiaOutcome {
    pub selection: IndiaSelection,
    pub update: ChartUpdate,
    pub correlation: Option<Correlation>,
    pub error: Option<String>,
}

/// Resolve and build the Countries chart for one selection.
///
/// A failed resolve renders an empty series and reports the message.
pub fn recompute_country(
    source: &dyn SeriesResolver,
    selection: &CountrySelection,
) -> CountryOutcome {
    let resolved = source.resolve(selection.indicator, &selection.country, selection.range);
    let (series, error) = match resolved {
        Ok(series) => (series, None),
        Err(err) => {
            error!(
                indicator = %selection.indicator,
                country = %selection.country,
                "failed to resolve series: {err}"
            );
            (Series::empty(), Some(err.to_string()))
        }
    };

    CountryOutcome {
        selection: selection.clone(),
        update: country_update(
            selection.indicator,
            &selection.country,
            selection.range,
            &series,
        ),
        summary: StatsCalculator::summarize(&series),
        error,
    }
}

/// Resolve and build the India chart for one selection.
pub fn recompute_india(source: &dyn SeriesResolver, selection: &IndiaSelection) -> IndiaOutcome {
    let mut errors = Vec::new();
    let mut resolve = |indicator: Indicator| {
        match source.resolve(indicator, "India", selection.range) {
            Ok(series) => series,
            Err(err) => {
                error!(%indicator, "failed to resolve India series: {err}");
                errors.push(err.to_string());
                Series::empty()
            }
        }
    };
    let happiness = resolve(Indicator::HappinessScore);
    let values = resolve(selection.indicator);

    IndiaOutcome {
        selection: *selection,
        update: india_update(selection.indicator, selection.range, &happiness, &values),
        correlation: StatsCalculator::correlate(&happiness, &values),
        error: (!errors.is_empty()).then(|| errors.join("; ")),
    }
}

/// Progress of the country directory fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryState {
    NotStarted,
    Loading,
    Ready,
    Failed(String),
}

enum WorkerMessage {
    Countries(Result<Vec<String>, String>),
    CountryChart(CountryOutcome),
    IndiaChart(IndiaOutcome),
}

/// Binds the selection controls of both views to their data source and presenters.
pub struct UiOrchestrator {
    source: Arc<dyn SeriesResolver>,
    default_country: String,

    countries: Vec<String>,
    country: Option<String>,
    country_indicator: Indicator,
    country_years: YearRangeController,
    country_chart: ChartPresenter,

    india_indicator: Indicator,
    india_years: YearRangeController,
    india_chart: IndiaPresenter,

    directory_state: DirectoryState,
    status: String,

    tx: Sender<WorkerMessage>,
    rx: Receiver<WorkerMessage>,
    pending: usize,
}

impl UiOrchestrator {
    pub fn new(config: &BoardConfig, source: Arc<dyn SeriesResolver>) -> Self {
        let (tx, rx) = channel();
        Self {
            source,
            default_country: config.default_country.clone(),
            countries: Vec::new(),
            country: None,
            country_indicator: Indicator::COUNTRY_VIEW[0],
            country_years: YearRangeController::new(
                config.country_view.bounds(),
                config.country_view.default_range(),
            ),
            country_chart: ChartPresenter::country_view(),
            india_indicator: Indicator::INDIA_VIEW[0],
            india_years: YearRangeController::new(
                config.india_view.bounds(),
                config.india_view.default_range(),
            ),
            india_chart: IndiaPresenter::new(),
            directory_state: DirectoryState::NotStarted,
            status: "Ready".to_string(),
            tx,
            rx,
            pending: 0,
        }
    }

    /// Fetch the country directory and draw the India view for the first time.
    ///
    /// The Countries view is drawn once the directory arrives.
    pub fn start(&mut self, directory: Box<dyn CountryDirectory>) {
        self.directory_state = DirectoryState::Loading;
        self.status = "Loading countries...".to_string();

        let tx = self.tx.clone();
        self.pending += 1;
        thread::spawn(move || {
            let result = directory.fetch_countries().map_err(|e| e.to_string());
            let _ = tx.send(WorkerMessage::Countries(result));
        });

        self.refresh_india();
    }

    /// Apply a Countries view control change, then recompute and render.
    pub fn on_country_control(&mut self, control: Control) {
        match control {
            Control::Country(name) => self.country = Some(name),
            Control::Indicator(indicator) => self.country_indicator = indicator,
            Control::StartYear(year) => {
                self.country_years.set_start(year);
            }
            Control::EndYear(year) => {
                self.country_years.set_end(year);
            }
        }
        self.refresh_country();
    }

    /// Apply an India view control change, then recompute and render.
    pub fn on_india_control(&mut self, control: Control) {
        match control {
            Control::Indicator(indicator) => self.india_indicator = indicator,
            Control::StartYear(year) => {
                self.india_years.set_start(year);
            }
            Control::EndYear(year) => {
                self.india_years.set_end(year);
            }
            Control::Country(name) => {
                warn!(country = %name, "India view has no country selection");
                return;
            }
        }
        self.refresh_india();
    }

    pub fn country_selection(&self) -> Option<CountrySelection> {
        Some(CountrySelection {
            indicator: self.country_indicator,
            country: self.country.clone()?,
            range: self.country_years.range(),
        })
    }

    pub fn india_selection(&self) -> IndiaSelection {
        IndiaSelection {
            indicator: self.india_indicator,
            range: self.india_years.range(),
        }
    }

    fn refresh_country(&mut self) {
        let Some(selection) = self.country_selection() else {
            debug!("no country selected, nothing to draw");
            return;
        };

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        self.pending += 1;
        thread::spawn(move || {
            let outcome = recompute_country(source.as_ref(), &selection);
            let _ = tx.send(WorkerMessage::CountryChart(outcome));
        });
    }

    fn refresh_india(&mut self) {
        let selection = self.india_selection();
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        self.pending += 1;
        thread::spawn(move || {
            let outcome = recompute_india(source.as_ref(), &selection);
            let _ = tx.send(WorkerMessage::IndiaChart(outcome));
        });
    }

    /// Drain finished work and render it. Returns `true` if anything arrived.
    pub fn poll(&mut self) -> bool {
        let mut received = false;
        while let Ok(message) = self.rx.try_recv() {
            self.handle(message);
            received = true;
        }
        received
    }

    fn handle(&mut self, message: WorkerMessage) {
        self.pending = self.pending.saturating_sub(1);
        match message {
            WorkerMessage::Countries(Ok(countries)) => self.apply_countries(countries),
            WorkerMessage::Countries(Err(err)) => {
                error!("error fetching countries: {err}");
                self.directory_state = DirectoryState::Failed(err.clone());
                self.status = format!("Error: {}", err);
            }
            WorkerMessage::CountryChart(outcome) => {
                // Last completed resolve wins, even if a newer one is still in flight.
                self.country_chart.render(outcome.update);
                self.country_chart.set_summary(outcome.summary);
                if let Some(err) = outcome.error {
                    self.country_chart.set_notice(format!("Error: {}", err));
                }
            }
            WorkerMessage::IndiaChart(outcome) => {
                self.india_chart
                    .render(outcome.selection.indicator, outcome.update, outcome.correlation);
                if let Some(err) = outcome.error {
                    self.india_chart.set_notice(format!("Error: {}", err));
                }
            }
        }
    }

    fn apply_countries(&mut self, countries: Vec<String>) {
        info!(count = countries.len(), "countries available");
        self.status = format!("Loaded {} countries", countries.len());
        self.directory_state = DirectoryState::Ready;

        self.country = if countries.contains(&self.default_country) {
            Some(self.default_country.clone())
        } else {
            countries.first().cloned()
        };
        self.countries = countries;
        self.refresh_country();
    }

    pub fn is_busy(&self) -> bool {
        self.pending > 0
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn directory_state(&self) -> &DirectoryState {
        &self.directory_state
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn country_indicator(&self) -> Indicator {
        self.country_indicator
    }

    pub fn country_years(&self) -> &YearRangeController {
        &self.country_years
    }

    pub fn country_chart(&self) -> &ChartPresenter {
        &self.country_chart
    }

    pub fn india_indicator(&self) -> Indicator {
        self.india_indicator
    }

    pub fn india_years(&self) -> &YearRangeController {
        &self.india_years
    }

    pub fn india_chart(&self) -> &IndiaPresenter {
        &self.india_chart
    }

    /// Block until every outstanding worker has reported back.
    #[cfg(test)]
    fn settle(&mut self) {
        use std::time::Duration;
        while self.pending > 0 {
            let message = self
                .rx
                .recv_timeout(Duration::from_secs(5))
                .expect("worker did not report back");
            self.handle(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataSource, DirectoryError, SourceError, StaticTable};
    use std::collections::HashMap;

    struct FixedDirectory(Vec<&'static str>);

    impl CountryDirectory for FixedDirectory {
        fn fetch_countries(&self) -> Result<Vec<String>, DirectoryError> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    struct BrokenDirectory;

    impl CountryDirectory for BrokenDirectory {
        fn fetch_countries(&self) -> Result<Vec<String>, DirectoryError> {
            let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
            Err(DirectoryError::Parse(err))
        }
    }

    struct FailingSource;

    impl SeriesResolver for FailingSource {
        fn resolve(
            &self,
            indicator: Indicator,
            _country: &str,
            _range: YearRange,
        ) -> Result<Series, SourceError> {
            Err(SourceError::Unavailable(indicator))
        }
    }

    /// Table data, except for one indicator that always fails.
    struct PartlyFailingSource {
        inner: Arc<dyn SeriesResolver>,
        failing: Indicator,
    }

    impl SeriesResolver for PartlyFailingSource {
        fn resolve(
            &self,
            indicator: Indicator,
            country: &str,
            range: YearRange,
        ) -> Result<Series, SourceError> {
            if indicator == self.failing {
                return Err(SourceError::Unavailable(indicator));
            }
            self.inner.resolve(indicator, country, range)
        }
    }

    fn table_source() -> Arc<dyn SeriesResolver> {
        let mut tables = HashMap::new();
        tables.insert(
            Indicator::HappinessIndex,
            StaticTable::new(2018).with_row("India", &[4.0, 4.2, 4.3, 4.1, 4.0]),
        );
        for indicator in Indicator::INDIA_VIEW
            .into_iter()
            .chain([Indicator::HappinessScore])
        {
            tables.insert(
                indicator,
                StaticTable::new(2022).with_row("India", &[1.0, 2.0, 4.0]),
            );
        }
        Arc::new(DataSource::with_tables(tables, None))
    }

    fn orchestrator() -> UiOrchestrator {
        UiOrchestrator::new(&BoardConfig::default(), table_source())
    }

    #[test]
    fn start_picks_default_country_and_renders_both_views() {
        let mut o = orchestrator();
        o.start(Box::new(FixedDirectory(vec!["Brazil", "India"])));
        o.settle();

        assert_eq!(o.directory_state(), &DirectoryState::Ready);
        assert_eq!(o.country(), Some("India"));
        assert_eq!(
            o.country_chart().state().title,
            "Education in India (2018-2022)"
        );
        assert_eq!(o.india_chart().indicator(), Indicator::Freedom);
        assert_eq!(o.india_chart().state().labels, vec![2022, 2023, 2024]);
        assert!(!o.is_busy());
    }

    #[test]
    fn missing_default_country_falls_back_to_first() {
        let mut o = orchestrator();
        o.start(Box::new(FixedDirectory(vec!["Chile", "Brazil"])));
        o.settle();
        assert_eq!(o.country(), Some("Chile"));
    }

    #[test]
    fn directory_failure_leaves_countries_empty() {
        let mut o = orchestrator();
        o.start(Box::new(BrokenDirectory));
        o.settle();

        assert!(matches!(o.directory_state(), DirectoryState::Failed(_)));
        assert!(o.countries().is_empty());
        assert!(o.country_selection().is_none());
        assert_eq!(o.country_chart().state().title, "Country Happiness Indicators");

        o.on_country_control(Control::StartYear(2020));
        o.settle();
        assert!(o.country_chart().state().labels.is_empty());
    }

    #[test]
    fn every_control_change_rerenders() {
        let mut o = orchestrator();
        o.start(Box::new(FixedDirectory(vec!["India", "Brazil"])));
        o.settle();

        o.on_country_control(Control::Indicator(Indicator::HappinessIndex));
        o.settle();
        let state = o.country_chart().state();
        assert_eq!(state.title, "Happiness in India (2018-2022)");
        assert_eq!(state.datasets[0].values.len(), 5);

        o.on_country_control(Control::Country("Brazil".to_string()));
        o.settle();
        let state = o.country_chart().state();
        assert_eq!(state.title, "Happiness in Brazil (2018-2022)");
        assert!(state.datasets[0].values.is_empty());

        o.on_country_control(Control::StartYear(2024));
        o.settle();
        assert_eq!(o.country_years().range(), YearRange::new(2024, 2024));
        assert_eq!(o.country_chart().state().labels, vec![2024]);

        o.on_country_control(Control::EndYear(2000));
        o.settle();
        assert_eq!(o.country_years().range(), YearRange::new(2024, 2024));
    }

    #[test]
    fn india_indicator_change_updates_axis_and_correlation() {
        let mut o = orchestrator();
        o.start(Box::new(FixedDirectory(vec!["India"])));
        o.settle();

        o.on_india_control(Control::Indicator(Indicator::Health));
        o.settle();
        let chart = o.india_chart();
        assert_eq!(chart.indicator(), Indicator::Health);
        assert_eq!(chart.state().y1_axis.as_ref().unwrap().title, "Health");
        let correlation = chart.correlation().unwrap();
        assert!((correlation.r - 1.0).abs() < 1e-9);

        o.on_india_control(Control::StartYear(2024));
        o.settle();
        assert_eq!(o.india_chart().state().labels, vec![2024]);
        assert!(o.india_chart().correlation().is_none());
    }

    #[test]
    fn resolve_failure_renders_empty_chart_with_notice() {
        let source: Arc<dyn SeriesResolver> = Arc::new(FailingSource);
        let selection = CountrySelection {
            indicator: Indicator::Gdp,
            country: "India".to_string(),
            range: YearRange::new(2018, 2019),
        };
        let outcome = recompute_country(source.as_ref(), &selection);
        assert!(outcome.error.is_some());
        assert!(outcome.update.datasets[0].values.is_empty());
        assert!(outcome.summary.is_none());

        let mut o = UiOrchestrator::new(&BoardConfig::default(), source);
        o.start(Box::new(FixedDirectory(vec!["India"])));
        o.settle();
        assert!(o.country_chart().notice().unwrap().starts_with("Error"));
        assert!(o.country_chart().state().datasets[0].values.is_empty());
    }

    #[test]
    fn india_error_is_cleared_by_next_render() {
        let source: Arc<dyn SeriesResolver> = Arc::new(PartlyFailingSource {
            inner: table_source(),
            failing: Indicator::Health,
        });
        let mut o = UiOrchestrator::new(&BoardConfig::default(), source);
        o.start(Box::new(FixedDirectory(vec!["India"])));
        o.settle();
        assert!(o.india_chart().notice().is_none());

        o.on_india_control(Control::Indicator(Indicator::Health));
        o.settle();
        assert!(o.india_chart().notice().unwrap().starts_with("Error"));
        assert!(!o.status().starts_with("Error"));

        o.on_india_control(Control::Indicator(Indicator::Freedom));
        o.settle();
        assert!(o.india_chart().notice().is_none());
        assert!(o.india_chart().state().has_points());
    }

    #[test]
    fn recompute_is_a_pure_function_of_selection() {
        let source = table_source();
        let selection = IndiaSelection {
            indicator: Indicator::Generosity,
            range: YearRange::new(2022, 2023),
        };
        let a = recompute_india(source.as_ref(), &selection);
        let b = recompute_india(source.as_ref(), &selection);
        assert_eq!(a.update, b.update);
        assert_eq!(a.update.labels, vec![2022, 2023]);
        assert!(a.error.is_none());
    }
}
