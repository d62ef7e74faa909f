//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use site_router::config::SiteConfig;
use site_router::pages::ComponentRegistry;
use site_router::routing::{site_table, BasePath, Resolver};
use site_router::{Shutdown, SiteServer};

/// A running site shell bound on an ephemeral port.
pub struct TestShell {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestShell {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stop(self) {
        self.shutdown.trigger();
        self.handle.await.unwrap().unwrap();
    }
}

/// Start the site shell with the site table under `base`.
pub async fn start_shell(base: &str) -> TestShell {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let resolver = Resolver::new(site_table().unwrap(), BasePath::new(base));
    let server = SiteServer::new(
        SiteConfig::default(),
        resolver,
        ComponentRegistry::with_placeholders(),
    )
    .unwrap();

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, shutdown.clone()));

    TestShell {
        addr,
        shutdown,
        handle,
    }
}
