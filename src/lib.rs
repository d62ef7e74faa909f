//! Route table and site shell for a personal website.
//!
//! The route table maps URL paths to page components (home, resume and a
//! handful of browser tools). [`routing::Router`] resolves URLs against it
//! and keeps navigation history; [`http::SiteServer`] serves the pages.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pages;
pub mod routing;

pub use config::SiteConfig;
pub use http::SiteServer;
pub use lifecycle::Shutdown;
pub use pages::{Component, ComponentRegistry};
pub use routing::{BasePath, ResolvedRoute, RouteError, Router};
