#![allow(dead_code)]

use axum::Router;
use kisan_cli::{ApiClient, ClientConfig};
use std::sync::mpsc;
use std::time::Duration;

/// Nothing listens here, so connections are refused.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

/// Serve `app` on an ephemeral port from a background thread and return its
/// base URL. The blocking client can't run inside a tokio runtime, so the
/// mock backend gets a runtime of its own.
pub fn spawn_backend(app: Router) -> String {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    let addr = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    format!("http://{}", addr)
}

pub fn client_for(base_url: &str) -> ApiClient {
    let config = ClientConfig::new(base_url).with_timeout(Some(Duration::from_secs(5)));
    ApiClient::new(&config).unwrap()
}
