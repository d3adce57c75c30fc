//! LearnHub - E-learning commerce platform API
//!
//! Course catalog, per-user shopping cart, Stripe-hosted checkout,
//! purchase records, and a feedback subsystem behind a REST API.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, payment provider, cache)
//! - **api**: HTTP handlers, middleware, and routes
//! - **jobs**: Background jobs (purchase expiry)
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Start the background worker (purchase expiry sweeps)
//! cargo run -- jobs work
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Course, CourseStatus, Password, PurchaseStatus, User, UserRole};
pub use errors::{AppError, AppResult};
