pub mod report;
pub mod state;

pub use state::AppState;
