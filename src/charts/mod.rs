//! Charts module - Chart state, presenters and rendering

mod export;
mod plotter;
mod presenter;
mod state;

pub use export::ChartExporter;
pub use plotter::ChartPlotter;
pub use presenter::{country_update, india_update, ChartPresenter, IndiaPresenter, INDIA_NOTES};
pub use state::{ChartState, ChartUpdate};
