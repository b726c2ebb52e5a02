//! ModelHub client: builder, per-capability methods, execution and error classification.

mod builder;
mod core;
pub mod error_classification;
mod execution;

pub use builder::{ModelHubClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use self::core::ModelHubClient;
pub use execution::video_status_unavailable;
