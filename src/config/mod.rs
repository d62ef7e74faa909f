//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! site.toml (optional)
//!     → loader.rs (parse & deserialize)
//!     → BASE_URL environment override
//!     → validation.rs (semantic checks)
//!     → SiteConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{LogFormat, ObservabilityConfig, ServerConfig, SiteConfig, SiteSection};
