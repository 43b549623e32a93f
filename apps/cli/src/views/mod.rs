//! View models.
//!
//! Views hold transient UI state only: the fetched lists, the current
//! selection, in-progress edit buffers, and one explicit state machine
//! per view instead of a pile of independent boolean flags.

mod dashboard;
mod forms;
mod state;

pub use dashboard::DashboardView;
pub use forms::TradeForm;
pub use state::ViewState;
