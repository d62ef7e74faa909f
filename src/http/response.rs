//! HTML documents served by the site shell.
//!
//! # Design Decisions
//! - One document per response: head, then the mounted view
//! - `<base>` carries the router base so relative assets resolve under it

use crate::pages::View;
use crate::routing::{BasePath, ResolvedRoute};

/// Wrap a view into a full HTML document.
pub fn render_document(view: &dyn View, base: &BasePath, route: Option<&ResolvedRoute>) -> String {
    let route_attr = match route {
        Some(resolved) => format!(
            r#" data-route="{}""#,
            html_escape::encode_double_quoted_attribute(resolved.name())
        ),
        None => String::new(),
    };

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<base href=\"{base}/\">\n",
            "<title>{title}</title>\n",
            "</head>\n",
            "<body{route}>\n",
            "{body}\n",
            "</body>\n",
            "</html>\n"
        ),
        base = html_escape::encode_double_quoted_attribute(base.prefix()),
        title = html_escape::encode_text(view.title()),
        route = route_attr,
        body = view.render(),
    )
}
