//! Route table of the personal site.

use crate::pages::{Component, ComponentRegistry};
use crate::routing::history::BasePath;
use crate::routing::route::{RouteTable, TableErrors};
use crate::routing::router::{Resolver, Router, RouterError};

/// Declared routes: (path, name, component).
pub const SITE_ROUTES: [(&str, &str, Component); 7] = [
    ("/", "home", Component::Home),
    ("/resume", "resume", Component::Resume),
    ("/tools", "tools", Component::Tools),
    ("/tools/base64", "base64-tool", Component::Base64Tool),
    ("/tools/text-editor", "text-editor", Component::TextEditor),
    ("/tools/markdown-editor", "markdown-editor", Component::MarkdownEditor),
    ("/tools/qrcode", "qrcode-tool", Component::QrCodeTool),
];

pub fn site_table() -> Result<RouteTable, TableErrors> {
    SITE_ROUTES
        .iter()
        .fold(RouteTable::builder(), |builder, &(path, name, component)| {
            builder.route(path, name, component)
        })
        .build()
}

/// Router over the site table, served under `base`.
pub fn site_router(base: BasePath, registry: &ComponentRegistry) -> Result<Router, RouterError> {
    let resolver = Resolver::new(site_table()?, base);
    Router::new(resolver, registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::router::RouteError;

    fn router() -> Router {
        site_router(BasePath::default(), &ComponentRegistry::with_placeholders()).unwrap()
    }

    #[test]
    fn test_every_path_resolves_to_its_component() {
        let router = router();
        for (path, name, component) in SITE_ROUTES {
            let resolved = router.resolve(path).unwrap();
            assert_eq!(resolved.component(), component, "path {}", path);
            assert_eq!(resolved.name(), name);
            assert_eq!(resolved.href, path);
        }
    }

    #[test]
    fn test_names_and_paths_are_distinct() {
        let table = site_table().unwrap();
        assert_eq!(table.len(), SITE_ROUTES.len());
        for (i, a) in table.iter().enumerate() {
            for b in table.iter().skip(i + 1) {
                assert_ne!(a.name, b.name);
                assert_ne!(a.path, b.path);
            }
        }
    }

    #[test]
    fn test_name_and_path_navigation_agree() {
        let mut router = router();
        for (path, name, _) in SITE_ROUTES {
            let by_name = router.navigate(name).unwrap();
            let by_path = router.resolve(path).unwrap();
            assert_eq!(by_name.component(), by_path.component());
            assert_eq!(by_name.href, router.href(name).unwrap());
        }
    }

    #[test]
    fn test_base64_scenario() {
        let resolved = router().resolve("/tools/base64").unwrap();
        assert_eq!(resolved.component(), Component::Base64Tool);
        assert_eq!(resolved.href, "/tools/base64");
    }

    #[test]
    fn test_qrcode_scenario() {
        let mut router = router();
        router.navigate("qrcode-tool").unwrap();
        let current = router.current_route().unwrap();
        assert_eq!(current.component(), Component::QrCodeTool);
        assert_eq!(current.href, "/tools/qrcode");
    }

    #[test]
    fn test_home_and_not_found_scenario() {
        let router = router();
        assert_eq!(router.resolve("/").unwrap().component(), Component::Home);
        assert_eq!(
            router.resolve("/does-not-exist"),
            Err(RouteError::NotFound {
                path: "/does-not-exist".into()
            })
        );
        assert!(matches!(
            router.resolve("/tools/unknown"),
            Err(RouteError::NotFound { .. })
        ));
    }
}
