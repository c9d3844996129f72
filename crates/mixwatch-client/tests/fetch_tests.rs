use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use mixwatch_client::StatusClient;

/// Spin up a local status server and return its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    format!("http://{addr}")
}

fn status_app() -> Router {
    Router::new()
        .route(
            "/data",
            get(|| async {
                Json(serde_json::json!({
                    "Nodes": {
                        "10.0.0.1": {
                            "Node": {"ID": 1, "Address": "http://10.0.0.1:8080", "IsMixer": true}
                        }
                    },
                    "Clients": {
                        "10.0.0.9": {
                            "Client": {"ID": 5, "Address": "http://10.0.0.9:8081"}
                        }
                    }
                }))
            }),
        )
        .route("/not-json", get(|| async { "this is not a snapshot" }))
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/header.html", get(|| async { "<h1>Mix Network</h1>" }))
}

#[tokio::test]
async fn test_fetch_snapshot_parses_document() {
    let base = serve(status_app()).await;
    let client = StatusClient::new(&base);

    let snap = client.fetch_snapshot("/data").await.expect("snapshot");
    assert_eq!(snap.nodes.len(), 1);
    assert_eq!(snap.clients.len(), 1);
    assert_eq!(snap.nodes["10.0.0.1"].node.id, 1);
    assert!(snap.nodes["10.0.0.1"].node.is_mixer);
}

#[tokio::test]
async fn test_non_success_status_is_transport_error() {
    let base = serve(status_app()).await;
    let client = StatusClient::new(&base);

    let err = client.fetch_snapshot("/broken").await.expect_err("500 must fail");
    assert!(err.is_transport(), "got {err}");
    assert!(err.url().ends_with("/broken"));
}

#[tokio::test]
async fn test_missing_route_is_transport_error() {
    let base = serve(status_app()).await;
    let client = StatusClient::new(&base);

    let err = client.fetch_snapshot("/nowhere").await.expect_err("404 must fail");
    assert!(err.is_transport(), "got {err}");
}

#[tokio::test]
async fn test_invalid_body_is_parse_error() {
    let base = serve(status_app()).await;
    let client = StatusClient::new(&base);

    let err = client
        .fetch_snapshot("/not-json")
        .await
        .expect_err("non-JSON body must fail");
    assert!(err.is_parse(), "got {err}");
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Bind to grab a free port, then drop the listener before connecting.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = StatusClient::new(&format!("http://{addr}"));
    let err = client.fetch_snapshot("/data").await.expect_err("refused");
    assert!(err.is_transport(), "got {err}");
}

#[tokio::test]
async fn test_header_text_round_trips_verbatim() {
    let base = serve(status_app()).await;
    let client = StatusClient::new(&base);

    let header = client.fetch_header("/header.html").await.expect("header");
    assert_eq!(header, "<h1>Mix Network</h1>");
}
