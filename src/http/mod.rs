//! Site shell HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → routing::Resolver (match path against the route table)
//!     → pages::ComponentRegistry (matched view or Not-Found view)
//!     → response.rs (HTML document)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, RouteEntry, SiteServer};
