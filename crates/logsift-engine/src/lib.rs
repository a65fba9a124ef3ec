// Engine layer - turns a log file into classification verdicts.
// Scanning and block accumulation feed the classifier, which dispatches
// first-match-wins verdicts to a sink (filter or summary).

pub mod classify;
pub mod error;
pub mod filter;
pub mod scan;
pub mod summary;

pub use classify::{Classifier, EntrySink};
pub use error::{Error, Result};
pub use filter::FilterSink;
pub use scan::{Dialect, LineCursor};
pub use summary::{SummaryFormat, SummarySink};
