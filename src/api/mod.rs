pub mod dashboard;
pub mod engagements;
pub mod error;
pub mod extract;
pub mod meet_and_greets;
pub mod middleware;
pub mod observations;
pub mod reference;
pub mod session;
pub mod shift_reports;

pub use error::{ApiError, ApiResponse};
pub use session::Session;
