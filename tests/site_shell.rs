//! Site shell tests: pages served through the route table.

use reqwest::StatusCode;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use site_router::routing::SITE_ROUTES;

mod common;

#[tokio::test]
async fn test_every_route_mounts_its_component() {
    let shell = common::start_shell("/").await;
    let client = reqwest::Client::new();

    for (path, name, component) in SITE_ROUTES {
        let res = client.get(shell.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "path {}", path);
        assert!(res
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/html"));

        let body = res.text().await.unwrap();
        assert!(body.contains(&format!(r#"data-component="{}""#, component)));
        assert!(body.contains(&format!(r#"data-route="{}""#, name)));
    }

    shell.stop().await;
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let shell = common::start_shell("/").await;
    let client = reqwest::Client::new();

    for path in ["/does-not-exist", "/tools/unknown", "/resume/"] {
        let res = client.get(shell.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "path {}", path);
        let body = res.text().await.unwrap();
        assert!(body.contains(r#"data-component="NotFound""#));
    }

    shell.stop().await;
}

#[tokio::test]
async fn test_query_string_does_not_affect_matching() {
    let shell = common::start_shell("/").await;

    let res = reqwest::get(shell.url("/tools/qrcode?text=hello")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains(r#"data-component="QRCodeTool""#));

    shell.stop().await;
}

#[tokio::test]
async fn test_base_path_prefix() {
    let shell = common::start_shell("/site/").await;
    let client = reqwest::Client::new();

    let res = client.get(shell.url("/site/tools/base64")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    assert!(body.contains(r#"<base href="/site/">"#));
    assert!(body.contains(r#"data-component="Base64Tool""#));

    let res = client.get(shell.url("/site")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains(r#"data-component="Home""#));

    // declared path, but outside the base
    let res = client.get(shell.url("/resume")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    shell.stop().await;
}

async fn raw_get(shell: &common::TestShell, target: &str) -> String {
    let mut stream = TcpStream::connect(shell.addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        target
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_dot_segments_stay_inside_base() {
    // reqwest normalises dot segments, so the request line is written by hand
    let shell = common::start_shell("/site").await;

    let response = raw_get(&shell, "/site/../resume").await;
    assert!(response.starts_with("HTTP/1.1 404"), "{}", response);
    assert!(response.contains(r#"data-component="NotFound""#));

    let response = raw_get(&shell, "/site/tools/../resume").await;
    assert!(response.starts_with("HTTP/1.1 200"), "{}", response);
    assert!(response.contains(r#"data-component="Resume""#));

    shell.stop().await;
}

#[tokio::test]
async fn test_request_id_header() {
    let shell = common::start_shell("/").await;
    let client = reqwest::Client::new();

    let res = client.get(shell.url("/")).send().await.unwrap();
    let id = res.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());

    let res = client
        .get(shell.url("/resume"))
        .header("x-request-id", "client-chosen")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers().get("x-request-id").unwrap(), "client-chosen");

    shell.stop().await;
}

#[tokio::test]
async fn test_non_get_rejected() {
    let shell = common::start_shell("/").await;

    let res = reqwest::Client::new()
        .post(shell.url("/tools/base64"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers().get("allow").unwrap(), "GET, HEAD");

    shell.stop().await;
}

#[tokio::test]
async fn test_service_endpoints() {
    let shell = common::start_shell("/site").await;

    let res = reqwest::get(shell.url("/healthz")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "ok");

    let routes: Value = reqwest::get(shell.url("/routes.json"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let routes = routes.as_array().unwrap();
    assert_eq!(routes.len(), SITE_ROUTES.len());
    assert_eq!(routes[6]["name"], "qrcode-tool");
    assert_eq!(routes[6]["component"], "QRCodeTool");
    assert_eq!(routes[6]["href"], "/site/tools/qrcode");

    shell.stop().await;
}
