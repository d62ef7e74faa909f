//! Route definitions and the validated route table.
//!
//! # Responsibilities
//! - Describe a single route (path, name, component)
//! - Collect routes through a builder and check table invariants
//! - Provide exact lookups by path and by name
//!
//! # Design Decisions
//! - Built once, immutable afterwards
//! - Validation reports every violation, not just the first
//! - Declaration order is kept for listing only

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::pages::Component;

/// Association between a URL path, a symbolic name and a page component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: String,
    pub name: String,
    pub component: Component,
}

impl Route {
    pub fn new(path: impl Into<String>, name: impl Into<String>, component: Component) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            component,
        }
    }
}

/// A single table invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("route '{name}': path '{path}' must begin with '/'")]
    PathMissingLeadingSlash { name: String, path: String },

    #[error("route with path '{path}' has an empty name")]
    EmptyName { path: String },

    #[error("route name '{name}' is declared more than once")]
    DuplicateName { name: String },

    #[error("route path '{path}' is declared more than once")]
    DuplicatePath { path: String },
}

/// All violations found while building a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableErrors(pub Vec<RouteTableError>);

impl fmt::Display for TableErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid route table: ")?;
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for TableErrors {}

/// Ordered, validated set of routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    by_path: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Exact-string lookup on the route path.
    pub fn by_path(&self, path: &str) -> Option<&Route> {
        self.by_path.get(path).map(|&i| &self.routes[i])
    }

    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&i| &self.routes[i])
    }

    /// Routes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Collects routes and freezes them into a [`RouteTable`].
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
}

impl RouteTableBuilder {
    pub fn route(mut self, path: impl Into<String>, name: impl Into<String>, component: Component) -> Self {
        self.routes.push(Route::new(path, name, component));
        self
    }

    pub fn push(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn build(self) -> Result<RouteTable, TableErrors> {
        let mut errors = Vec::new();
        let mut by_path = HashMap::with_capacity(self.routes.len());
        let mut by_name = HashMap::with_capacity(self.routes.len());

        for (index, route) in self.routes.iter().enumerate() {
            if !route.path.starts_with('/') {
                errors.push(RouteTableError::PathMissingLeadingSlash {
                    name: route.name.clone(),
                    path: route.path.clone(),
                });
            }

            if route.name.is_empty() {
                errors.push(RouteTableError::EmptyName {
                    path: route.path.clone(),
                });
            } else if by_name.insert(route.name.clone(), index).is_some() {
                errors.push(RouteTableError::DuplicateName {
                    name: route.name.clone(),
                });
            }

            if by_path.insert(route.path.clone(), index).is_some() {
                errors.push(RouteTableError::DuplicatePath {
                    path: route.path.clone(),
                });
            }
        }

        if !errors.is_empty() {
            return Err(TableErrors(errors));
        }

        Ok(RouteTable {
            routes: self.routes,
            by_path,
            by_name,
        })
    }
}
