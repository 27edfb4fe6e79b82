//! Tavola API Server - food-delivery marketplace backend
//!
//! # Module structure
//!
//! ```text
//! api-server/src/
//! ├── core/          # Configuration, state, HTTP server
//! ├── auth/          # JWT authentication, Argon2 password hashing
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # Embedded SurrealDB and repositories
//! ├── orders/        # Order pricing, delivery estimate, orchestrator
//! ├── vouchers/      # Voucher validation and discount engine
//! └── utils/         # Validation, time and logging helpers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;
pub mod vouchers;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::OrderService;

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load environment and initialize logging
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), None);
}

pub fn print_banner() {
    println!(
        r#"
 _____                _
|_   _|_ ___   _____ | | __ _
  | |/ _` \ \ / / _ \| |/ _` |
  | | (_| |\ V / (_) | | (_| |
  |_|\__,_| \_/ \___/|_|\__,_|
    "#
    );
}
