//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming URL (path, query, hash)
//!     → location.rs (parse, normalise)
//!     → history.rs (strip base prefix)
//!     → router.rs (exact lookup in RouteTable)
//!     → Return: ResolvedRoute or NotFound
//!
//! Route Compilation (at startup):
//!     site.rs (declared routes)
//!     → route.rs (validate, index by path and name)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Exact-string path matching, no wildcards or parameters
//! - Deterministic: same input always matches same route
//! - Unmatched URLs are an explicit error, never a redirect

pub mod history;
pub mod location;
pub mod route;
pub mod router;
pub mod site;

pub use history::{BasePath, WebHistory};
pub use location::Location;
pub use route::{Route, RouteTable, RouteTableBuilder, RouteTableError, TableErrors};
pub use router::{NavigateOptions, Params, ResolvedRoute, Resolver, RouteError, Router, RouterError};
pub use site::{site_router, site_table, SITE_ROUTES};
