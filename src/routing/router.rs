//! Route lookup and navigation.
//!
//! # Responsibilities
//! - Resolve URLs to routes (pure, synchronous)
//! - Navigate by name or by path, recording history
//! - Publish the current route to observers
//!
//! # Design Decisions
//! - Table is immutable after construction; only the current route changes
//! - Exact-path lookup via HashMap, no wildcards
//! - Explicit NotFound rather than a silent redirect to home
//! - A failed navigation leaves history and current route untouched

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;

use crate::observability::metrics;
use crate::pages::{Component, ComponentRegistry};
use crate::routing::history::{BasePath, WebHistory};
use crate::routing::location::Location;
use crate::routing::route::{Route, RouteTable, TableErrors};

/// Errors raised while resolving or navigating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No route is declared for the path.
    #[error("no route matches '{path}'")]
    NotFound { path: String },

    /// Navigation by a name the table does not declare.
    #[error("no route is named '{name}'")]
    UnknownName { name: String },

    #[error("cannot route '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Errors raised while constructing a router.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error(transparent)]
    Table(#[from] TableErrors),

    #[error("route '{route}' refers to component {component}, which is not registered")]
    UnregisteredComponent { route: String, component: Component },
}

/// Route params passed along with a navigation.
pub type Params = BTreeMap<String, String>;

/// Result of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    pub route: Route,
    /// Location relative to the base.
    pub location: Location,
    /// URL as displayed in the address bar.
    pub href: String,
}

impl ResolvedRoute {
    pub fn component(&self) -> Component {
        self.route.component
    }

    pub fn name(&self) -> &str {
        &self.route.name
    }
}

/// Stateless matcher over a frozen table.
///
/// Shared between request tasks by the site shell.
#[derive(Debug, Clone)]
pub struct Resolver {
    table: Arc<RouteTable>,
    base: BasePath,
}

impl Resolver {
    pub fn new(table: impl Into<Arc<RouteTable>>, base: BasePath) -> Self {
        Self {
            table: table.into(),
            base,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn base(&self) -> &BasePath {
        &self.base
    }

    /// Resolve a displayed URL (path or absolute URL) to its route.
    ///
    /// The path is normalised before the base check, so dot segments cannot
    /// step outside the base. Paths outside the base never match.
    pub fn resolve(&self, url: &str) -> Result<ResolvedRoute, RouteError> {
        let mut location = Location::parse(url)?;
        if !self.base.contains(&location.path) {
            metrics::record_resolution("none", "outside_base");
            tracing::debug!(path = %location.path, base = %self.base.prefix(), "Path outside base");
            return Err(RouteError::NotFound {
                path: location.path,
            });
        }
        location.path = self.base.strip(&location.path).to_string();
        self.resolve_location(location)
    }

    /// Resolve a location whose path is already relative to the base.
    pub fn resolve_location(&self, location: Location) -> Result<ResolvedRoute, RouteError> {
        match self.table.by_path(&location.path) {
            Some(route) => {
                metrics::record_resolution(&route.name, "matched");
                tracing::debug!(path = %location.path, route = %route.name, "Route matched");
                Ok(ResolvedRoute {
                    route: route.clone(),
                    href: self.base.join(&location.full_path()),
                    location,
                })
            }
            None => {
                metrics::record_resolution("none", "not_found");
                tracing::debug!(path = %location.path, "No route matched");
                Err(RouteError::NotFound {
                    path: location.path,
                })
            }
        }
    }

    /// Displayed URL of a named route.
    pub fn href(&self, name: &str) -> Result<String, RouteError> {
        self.table
            .by_name(name)
            .map(|route| self.base.join(&route.path))
            .ok_or_else(|| RouteError::UnknownName {
                name: name.to_string(),
            })
    }

    /// Every route must point at a component the registry can load.
    pub fn check_components(&self, registry: &ComponentRegistry) -> Result<(), RouterError> {
        match self.table.iter().find(|r| !registry.contains(r.component)) {
            Some(route) => Err(RouterError::UnregisteredComponent {
                route: route.name.clone(),
                component: route.component,
            }),
            None => Ok(()),
        }
    }
}

/// Options for [`Router::navigate_with`].
#[derive(Debug, Clone, Default)]
pub struct NavigateOptions {
    pub params: Params,
    pub query: Vec<(String, String)>,
    pub hash: Option<String>,
    /// Replace the current history entry instead of pushing.
    pub replace: bool,
}

/// Router owning the history and the current-route state.
#[derive(Debug)]
pub struct Router {
    resolver: Resolver,
    history: WebHistory,
    current: Option<ResolvedRoute>,
    notify: watch::Sender<Option<ResolvedRoute>>,
}

impl Router {
    pub fn new(resolver: Resolver, registry: &ComponentRegistry) -> Result<Self, RouterError> {
        resolver.check_components(registry)?;

        let history = WebHistory::new();
        let (notify, _) = watch::channel(None);

        tracing::debug!(
            routes = resolver.table().len(),
            base = %resolver.base().prefix(),
            "Router constructed"
        );

        Ok(Self {
            resolver,
            history,
            current: None,
            notify,
        })
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn history(&self) -> &WebHistory {
        &self.history
    }

    pub fn resolve(&self, url: &str) -> Result<ResolvedRoute, RouteError> {
        self.resolver.resolve(url)
    }

    pub fn href(&self, name: &str) -> Result<String, RouteError> {
        self.resolver.href(name)
    }

    /// Active route, `None` before the first navigation.
    pub fn current_route(&self) -> Option<&ResolvedRoute> {
        self.current.as_ref()
    }

    /// Observe current-route changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<ResolvedRoute>> {
        self.notify.subscribe()
    }

    /// Navigate to a named route.
    pub fn navigate(&mut self, name: &str) -> Result<ResolvedRoute, RouteError> {
        self.navigate_with(name, NavigateOptions::default())
    }

    pub fn navigate_with(
        &mut self,
        name: &str,
        options: NavigateOptions,
    ) -> Result<ResolvedRoute, RouteError> {
        let route = self
            .resolver
            .table()
            .by_name(name)
            .ok_or_else(|| RouteError::UnknownName {
                name: name.to_string(),
            })?;

        if !options.params.is_empty() {
            let discarded: Vec<&str> = options.params.keys().map(String::as_str).collect();
            tracing::warn!(route = %name, params = ?discarded, "Discarded params not declared by route");
        }

        let mut location = Location::new(route.path.clone());
        location.set_query_pairs(options.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        location.hash = options.hash.filter(|h| !h.is_empty());

        let resolved = self.resolver.resolve_location(location)?;
        Ok(self.commit(resolved, options.replace))
    }

    /// Navigate to a displayed URL, pushing a history entry.
    ///
    /// URLs outside the base are NotFound.
    pub fn push(&mut self, url: &str) -> Result<ResolvedRoute, RouteError> {
        let resolved = self.resolver.resolve(url)?;
        Ok(self.commit(resolved, false))
    }

    /// Navigate to a displayed URL, replacing the current history entry.
    pub fn replace(&mut self, url: &str) -> Result<ResolvedRoute, RouteError> {
        let resolved = self.resolver.resolve(url)?;
        Ok(self.commit(resolved, true))
    }

    /// Go one entry back. `None` at the start of history.
    pub fn back(&mut self) -> Option<ResolvedRoute> {
        let location = self.history.back()?.clone();
        self.restore(location)
    }

    /// Go one entry forward. `None` at the end of history.
    pub fn forward(&mut self) -> Option<ResolvedRoute> {
        let location = self.history.forward()?.clone();
        self.restore(location)
    }

    fn restore(&mut self, location: Location) -> Option<ResolvedRoute> {
        let resolved = self.resolver.resolve_location(location).ok()?;
        self.set_current(resolved.clone());
        Some(resolved)
    }

    fn commit(&mut self, resolved: ResolvedRoute, replace: bool) -> ResolvedRoute {
        if replace {
            self.history.replace(resolved.location.clone());
        } else {
            self.history.push(resolved.location.clone());
        }
        metrics::record_navigation(&resolved.route.name);
        tracing::info!(
            route = %resolved.route.name,
            component = %resolved.route.component,
            href = %resolved.href,
            replace,
            "Navigated"
        );
        self.set_current(resolved.clone());
        resolved
    }

    fn set_current(&mut self, resolved: ResolvedRoute) {
        self.current = Some(resolved.clone());
        self.notify.send_replace(Some(resolved));
    }
}
