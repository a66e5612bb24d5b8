//! HTTP transport and keyed store against an in-process fake REST store

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use firebase_store::prelude::*;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    body: Option<Value>,
}

#[derive(Clone, Default)]
struct FakeStore {
    documents: MemoryTransport,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeStore {
    async fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().await.clone()
    }

    async fn document(&self, path: &str) -> Option<Value> {
        self.documents.stored(path).await
    }
}

// Paths under /forbidden, /missing and /broken answer 403, 404 and 500.
// Everything else is served from one JSON tree, like the real store.
async fn handle(State(store): State<FakeStore>, method: Method, uri: Uri, body: Bytes) -> Response {
    let path = uri.path().to_string();
    let parsed: Option<Value> = if body.is_empty() {
        None
    } else {
        match serde_json::from_slice(&body) {
            Ok(value) => Some(value),
            Err(_) => return (StatusCode::BAD_REQUEST, "invalid json").into_response(),
        }
    };
    store.requests.lock().await.push(Recorded {
        method: method.clone(),
        path: path.clone(),
        body: parsed.clone(),
    });

    if path.starts_with("/forbidden") {
        return (StatusCode::FORBIDDEN, "Permission denied").into_response();
    }
    if path.starts_with("/missing") {
        return (StatusCode::NOT_FOUND, "not here").into_response();
    }
    if path.starts_with("/broken") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    if !path.ends_with(".json") {
        return (StatusCode::BAD_REQUEST, "missing .json suffix").into_response();
    }

    let result = match method {
        Method::GET => Ok(store.documents.stored(&path).await.unwrap_or(Value::Null)),
        Method::DELETE => store.documents.write(&path, &Value::Null).await,
        Method::PATCH => match parsed {
            Some(patch) => store.documents.write(&path, &patch).await,
            None => return (StatusCode::BAD_REQUEST, "empty patch").into_response(),
        },
        _ => return StatusCode::METHOD_NOT_ALLOWED.into_response(),
    };
    match result {
        Ok(value) => Json(value).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

async fn start_store() -> (FakeStore, String) {
    let store = FakeStore::default();
    let app = Router::new().fallback(handle).with_state(store.clone());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind fake store");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("fake store error: {}", e);
        }
    });
    (store, format!("http://{}:{}", addr.ip(), addr.port()))
}

fn transport() -> HttpTransport {
    HttpTransport::new(StorageConfig::default()).expect("http transport")
}

fn manager(client_id: &str) -> ManagerOptions {
    ManagerOptions {
        client_id: Some(client_id.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn write_uses_patch_and_delete() {
    let (store, base) = start_store().await;
    let transport = transport();

    transport
        .write(&format!("{base}/ns/doc"), &json!({"a": 1}))
        .await
        .unwrap();
    transport
        .write(&format!("{base}/ns/doc.json"), &Value::Null)
        .await
        .unwrap();

    let requests = store.requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, Method::PATCH);
    assert_eq!(requests[0].path, "/ns/doc.json");
    assert_eq!(requests[0].body, Some(json!({"a": 1})));
    assert_eq!(requests[1].method, Method::DELETE);
    assert_eq!(requests[1].path, "/ns/doc.json");
    assert_eq!(requests[1].body, None);
}

#[tokio::test]
async fn strings_are_wrapped_on_the_wire() {
    let (store, base) = start_store().await;
    let transport = transport();
    let url = format!("{base}/ns/text");

    transport.write(&url, &json!("null")).await.unwrap();
    assert_eq!(store.document("/ns/text").await, Some(json!({"default": "null"})));
    assert_eq!(transport.read(&url).await.unwrap(), json!("null"));
}

#[tokio::test]
async fn status_codes_map_to_errors() {
    let (_store, base) = start_store().await;
    let transport = transport();

    let forbidden = transport.read(&format!("{base}/forbidden/x")).await.unwrap_err();
    assert!(matches!(forbidden, StorageError::PermissionDenied { .. }));
    let message = forbidden.to_string();
    assert!(message.contains(".read"));
    assert!(message.contains(".write"));
    assert!(message.contains("environment variable"));

    assert!(matches!(
        transport.write(&format!("{base}/missing/x"), &json!(1)).await,
        Err(StorageError::NotFound { .. })
    ));

    match transport.read(&format!("{base}/broken/x")).await {
        Err(StorageError::StoreError { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn keyed_store_scenario() {
    let (store, base) = start_store().await;
    let keyed = KeyedStore::new(transport(), base, &manager("user.1#a"));

    keyed.set("settings.volume", &42).await.unwrap();
    assert_eq!(store.document("/user_1_a/settings/volume").await, Some(json!(42)));
    assert_eq!(keyed.get("settings.volume").await.unwrap(), Some(json!(42)));
}

#[tokio::test]
async fn keyed_store_push_and_delete() {
    let (store, base) = start_store().await;
    let keyed = KeyedStore::new(transport(), base, &manager("guild 42"));

    keyed.push("queue", "a").await.unwrap();
    keyed.push("queue", "b").await.unwrap();
    keyed.push("queue", "c").await.unwrap();
    assert_eq!(keyed.get("queue").await.unwrap(), Some(json!(["a", "b", "c"])));
    assert_eq!(store.document("/guild_42/queue").await, Some(json!(["a", "b", "c"])));

    assert!(keyed.delete("queue").await.unwrap());
    assert_eq!(keyed.get("queue").await.unwrap(), None);
}

#[tokio::test]
async fn keyed_store_swallows_read_failures() {
    let (_store, base) = start_store().await;
    let keyed = KeyedStore::new(transport(), base, &manager("forbidden"));

    assert_eq!(keyed.get("a").await.unwrap(), None);
    assert!(!keyed.delete("a").await.unwrap());
    assert!(matches!(
        keyed.fetch("a").await,
        Err(StorageError::PermissionDenied { .. })
    ));
    assert!(matches!(
        keyed.set("a", &1).await,
        Err(StorageError::PermissionDenied { .. })
    ));
}

#[tokio::test]
async fn disabled_store_sends_nothing() {
    let (store, base) = start_store().await;
    let options = ManagerOptions {
        client_id: Some("bot".to_string()),
        disable_database: true,
        resume: false,
    };
    let keyed = KeyedStore::new(transport(), base, &options);

    keyed.set("a", &1).await.unwrap();
    keyed.push("b", &2).await.unwrap();
    assert_eq!(keyed.get("a").await.unwrap(), None);
    assert!(!keyed.delete("a").await.unwrap());
    assert!(store.requests().await.is_empty());
}

#[tokio::test]
async fn plugin_registers_http_database() {
    let (store, base) = start_store().await;
    let mut host = PluginHost::new();
    host.load(Box::new(FirebasePlugin::new(PluginOptions::with_url(base))))
        .unwrap();

    let database = host.structures().create_database(&manager("node-1"));
    database.set("players.7", json!({"volume": 60})).await.unwrap();
    assert_eq!(
        store.document("/node-1/players/7").await,
        Some(json!({"volume": 60}))
    );
    assert_eq!(
        database.get("players.7").await.unwrap(),
        Some(json!({"volume": 60}))
    );

    host.unload(FirebasePlugin::NAME).unwrap();
    let fallback = host.structures().create_database(&manager("node-1"));
    assert_eq!(fallback.backend_type(), StorageBackend::Memory);
    assert_eq!(fallback.get("players.7").await.unwrap(), None);
}

#[tokio::test]
async fn parent_and_child_keys_share_one_tree() {
    let (store, base) = start_store().await;
    let keyed = KeyedStore::new(transport(), base, &manager("node-2"));

    keyed.set("player.guild", &json!({"id": 7})).await.unwrap();
    keyed.set("player.volume", &80).await.unwrap();
    assert_eq!(
        keyed.get("player").await.unwrap(),
        Some(json!({"guild": {"id": 7}, "volume": 80}))
    );

    assert!(keyed.delete("player").await.unwrap());
    assert_eq!(keyed.get("player.guild").await.unwrap(), None);
    assert_eq!(store.document("/node-2").await, None);
}
