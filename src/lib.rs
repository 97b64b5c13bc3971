pub mod actions;
pub mod app;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod stats;
pub mod storage;
pub mod tracker;
pub mod ui;
pub mod state;

pub use actions::{apply, Action, ActionError};
pub use app::router;
pub use models::TrackerData;
pub use state::AppState;
pub use storage::{load_data_at, persist_data, resolve_data_path};
