//! Integration tests with mock HTTP server

pub mod mock_server;
pub mod chat;
pub mod error_handling;
pub mod multimodal;
