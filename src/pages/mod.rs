//! Page components the router can mount.
//!
//! # Responsibilities
//! - Name every page-level unit the site exposes (`Component`)
//! - Define the registration interface for page implementations (`View`)
//! - Hold the loaded views the site shell mounts (`ComponentRegistry`)
//!
//! # Design Decisions
//! - Page internals (encoders, editors, QR rendering) live outside this crate;
//!   the router only needs something it can mount
//! - Placeholder views render a mount point the client bundle hydrates

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Identifier of a page-level UI unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Component {
    Home,
    Resume,
    Tools,
    Base64Tool,
    TextEditor,
    MarkdownEditor,
    #[serde(rename = "QRCodeTool")]
    QrCodeTool,
}

impl Component {
    pub const ALL: [Component; 7] = [
        Component::Home,
        Component::Resume,
        Component::Tools,
        Component::Base64Tool,
        Component::TextEditor,
        Component::MarkdownEditor,
        Component::QrCodeTool,
    ];

    /// Name the component is registered under.
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Home => "Home",
            Component::Resume => "Resume",
            Component::Tools => "Tools",
            Component::Base64Tool => "Base64Tool",
            Component::TextEditor => "TextEditor",
            Component::MarkdownEditor => "MarkdownEditor",
            Component::QrCodeTool => "QRCodeTool",
        }
    }

    fn default_title(&self) -> &'static str {
        match self {
            Component::Home => "Home",
            Component::Resume => "Resume",
            Component::Tools => "Tools",
            Component::Base64Tool => "Base64 Encoder",
            Component::TextEditor => "Text Editor",
            Component::MarkdownEditor => "Markdown Editor",
            Component::QrCodeTool => "QR Code Generator",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown component name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown component: {0}")]
pub struct UnknownComponent(pub String);

impl FromStr for Component {
    type Err = UnknownComponent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Component::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownComponent(s.to_string()))
    }
}

/// A loadable, displayable page.
pub trait View: Send + Sync + fmt::Debug {
    /// Document title shown while the view is mounted.
    fn title(&self) -> &str;

    /// Markup mounted into the page body.
    fn render(&self) -> String;
}

/// Mount point for a component whose implementation ships in the client bundle.
#[derive(Debug, Clone)]
pub struct PlaceholderView {
    component: Component,
    title: String,
}

impl PlaceholderView {
    pub fn new(component: Component) -> Self {
        Self {
            component,
            title: component.default_title().to_string(),
        }
    }
}

impl View for PlaceholderView {
    fn title(&self) -> &str {
        &self.title
    }

    fn render(&self) -> String {
        format!(
            r#"<main id="app" data-component="{}"></main>"#,
            self.component
        )
    }
}

/// Shown by the site shell when no route matches.
#[derive(Debug, Clone, Default)]
pub struct NotFoundView;

impl View for NotFoundView {
    fn title(&self) -> &str {
        "Not Found"
    }

    fn render(&self) -> String {
        r#"<main id="app" data-component="NotFound"><h1>404</h1><p>This page does not exist.</p></main>"#
            .to_string()
    }
}

/// Registered views, keyed by component.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    views: HashMap<Component, Arc<dyn View>>,
    not_found: Arc<dyn View>,
}

impl ComponentRegistry {
    /// An empty registry. Only the Not-Found view is available.
    pub fn new() -> Self {
        Self {
            views: HashMap::new(),
            not_found: Arc::new(NotFoundView),
        }
    }

    /// A registry with a placeholder mount point for every component.
    pub fn with_placeholders() -> Self {
        let mut registry = Self::new();
        for component in Component::ALL {
            registry.register(component, PlaceholderView::new(component));
        }
        registry
    }

    /// Register (or replace) the view for a component.
    pub fn register(&mut self, component: Component, view: impl View + 'static) {
        self.views.insert(component, Arc::new(view));
    }

    /// Replace the view used for unmatched URLs.
    pub fn set_not_found(&mut self, view: impl View + 'static) {
        self.not_found = Arc::new(view);
    }

    pub fn get(&self, component: Component) -> Option<Arc<dyn View>> {
        self.views.get(&component).cloned()
    }

    pub fn contains(&self, component: Component) -> bool {
        self.views.contains_key(&component)
    }

    pub fn not_found(&self) -> Arc<dyn View> {
        self.not_found.clone()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::with_placeholders()
    }
}
