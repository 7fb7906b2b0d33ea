pub mod api;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod entities;
pub mod metrics;
pub mod migrator;
pub mod model;
pub mod state;
pub mod store;
pub mod telemetry;

pub use app::build_router;
pub use state::Collections;
