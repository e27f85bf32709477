//! Download aggregation core
//!
//! Pure, synchronous transforms from raw download-event rows to the
//! aggregate report served to the dashboard. Nothing in here does I/O or
//! holds state across calls; every function is a pure function of its
//! inputs plus an explicitly supplied "now".

pub mod grouping;
pub mod models;
pub mod report;
pub mod timeseries;
pub mod window;

pub use grouping::{episode_stats, top_categories, unique_audience};
pub use models::{AggregateReport, CategoryStat, DownloadEvent, EpisodeStats, TimeSeriesPoint};
pub use report::{build_report, TOP_CATEGORY_CAP};
pub use timeseries::cumulative_series;
pub use window::{filter_window, TimeWindow};
