//! Local stand-in for the prediction service, used by tests.

use std::net::SocketAddr;

use axum::Router;

/// Serve `app` on an ephemeral localhost port from a dedicated thread,
/// so the blocking client under test never runs inside that runtime.
pub(crate) fn spawn_stub(app: Router) -> SocketAddr {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    rx.recv().unwrap()
}
