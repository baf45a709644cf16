//! # Clinio SDK
//!
//! Tenant-aware HTTP client for the Clinio platform API. The client attaches
//! the bearer token and the `X-Tenant-Subdomain` header to every request and
//! centralizes the handling of 404/401/403/500 responses into classified
//! events, navigation, and credential cleanup, while still returning every
//! error to the caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clinio_sdk::ClinioClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ClinioClient::builder().build()?;
//!
//!     let status = client.check_connection().await;
//!     println!("connected: {}", status.connected);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;
mod policy;

pub use client::{ClinioClient, ClinioClientBuilder};
pub use error::{handle_api_error, ClinioError, ErrorEnvelope, Result, DEFAULT_ERROR_MESSAGE};
pub use models::{ApiErrorBody, ConnectionStatus, LoginResponse, RootInfo};

/// SDK version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
