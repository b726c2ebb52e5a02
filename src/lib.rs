//! # modelhub-rust
//!
//! Typed client for the ModelHub multi-model AI platform: chat (completion,
//! combination, comparison, search), image, audio and video generation.
//!
//! ## Overview
//!
//! The library is a validation and transport layer:
//!
//! - **Validation**: every request is checked synchronously before anything
//!   touches the network; the first violation is reported as
//!   [`Error::Validation`].
//! - **Transport**: exactly one exchange per call through a [`transport::Transport`]
//!   (JSON or multipart). No retries, no streaming, no caching.
//! - **Classification**: non-success statuses, broken exchanges and undecodable
//!   bodies map to one variant of the closed [`Error`] taxonomy.
//!
//! Successful responses are returned as the decoded JSON body, unmodified.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use modelhub_rust::types::{ChatRequest, MessageEntry};
//! use modelhub_rust::ModelHubClient;
//!
//! #[tokio::main]
//! async fn main() -> modelhub_rust::Result<()> {
//!     let client = ModelHubClient::builder().api_key("your-api-key").build()?;
//!
//!     let request = ChatRequest::new(
//!         vec!["gpt-4o".into(), "claude-3-5-sonnet".into()],
//!         vec![MessageEntry::user_text("Hello, how are you?")],
//!     );
//!     let response = client.chat_completions(&request).await?;
//!     println!("{}", response);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder, execution and error classification |
//! | [`validation`] | Client-side request validation |
//! | [`types`] | Typed request models and request kinds |
//! | [`transport`] | Transport trait, HTTP transport, multipart bodies |
//! | [`files`] | Local/remote file references for multipart uploads |
//! | [`error`] / [`error_code`] | Error taxonomy and machine-readable codes |

pub mod client;
pub mod error;
pub mod error_code;
pub mod files;
pub mod transport;
pub mod types;
pub mod validation;

pub use client::{ModelHubClient, ModelHubClientBuilder};
pub use error::{Error, ErrorKind, ErrorPayload};
pub use error_code::ErrorCode;
pub use types::RequestKind;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
