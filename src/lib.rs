pub mod app;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod notify;
pub mod state;
pub mod status;
pub mod storage;
pub mod ui;
pub mod upstream;

pub use app::router;
pub use state::AppState;
pub use storage::{load_summary, resolve_summary_path};
pub use upstream::UpstreamClient;
