pub mod app;
pub mod chart;
pub mod config;
pub mod coordinator;
pub mod errors;
pub mod handlers;
pub mod key;
pub mod models;
pub mod session;
pub mod state;
pub mod store;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use coordinator::{Coordinator, SaveOutcome, Saved};
pub use state::AppState;
pub use store::{JsonFileStore, MemoryStore, RecordStore, RemoteStore};
