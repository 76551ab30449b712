#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::{Duration, Instant};
use tokio::{sync::Notify, task::JoinHandle, time::sleep};

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    pub fn json(value: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: value.to_string(),
        }
    }

    pub fn stats(boy: u64, girl: u64, total: u64) -> Self {
        Self::json(json!({
            "stats": { "boy_votes": boy, "girl_votes": girl, "total_votes": total }
        }))
    }

    pub fn receipt(success: bool, boy: u64, girl: u64, total: u64) -> Self {
        Self::json(json!({
            "success": success,
            "stats": { "boy_votes": boy, "girl_votes": girl, "total_votes": total }
        }))
    }

    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// Scripted stand-in for the external vote service.
pub struct Script {
    read: Mutex<Reply>,
    write: Mutex<Reply>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    hold_writes: AtomicBool,
    release: Notify,
    received: Mutex<Vec<(Option<String>, Value)>>,
}

impl Script {
    fn new() -> Self {
        Self {
            read: Mutex::new(Reply::stats(0, 0, 0)),
            write: Mutex::new(Reply::receipt(true, 0, 0, 0)),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            hold_writes: AtomicBool::new(false),
            release: Notify::new(),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn set_read(&self, reply: Reply) {
        *self.read.lock().unwrap() = reply;
    }

    pub fn set_write(&self, reply: Reply) {
        *self.write.lock().unwrap() = reply;
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Parks every write request until [`Script::release_one`] is called.
    pub fn hold_writes(&self) {
        self.hold_writes.store(true, Ordering::SeqCst);
    }

    pub fn release_one(&self) {
        self.release.notify_one();
    }

    /// Content type and JSON body of every write received so far.
    pub fn received(&self) -> Vec<(Option<String>, Value)> {
        self.received.lock().unwrap().clone()
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub script: Arc<Script>,
    handle: JoinHandle<()>,
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl MockBackend {
    pub async fn start() -> Self {
        let script = Arc::new(Script::new());
        let app = Router::new()
            .route("/", get(read_stats).post(write_vote))
            .with_state(Arc::clone(&script));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/"),
            script,
            handle,
        }
    }
}

async fn read_stats(State(script): State<Arc<Script>>) -> impl IntoResponse {
    script.reads.fetch_add(1, Ordering::SeqCst);
    let reply = script.read.lock().unwrap().clone();
    respond(reply)
}

async fn write_vote(
    State(script): State<Arc<Script>>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let parsed = serde_json::from_str(&body).unwrap_or(Value::Null);
    script.received.lock().unwrap().push((content_type, parsed));
    script.writes.fetch_add(1, Ordering::SeqCst);

    if script.hold_writes.load(Ordering::SeqCst) {
        script.release.notified().await;
    }

    let reply = script.write.lock().unwrap().clone();
    respond(reply)
}

fn respond(reply: Reply) -> impl IntoResponse {
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
}

pub async fn wait_until(what: &str, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(3);
    while !condition() {
        if Instant::now() > deadline {
            panic!("timed out waiting for {what}");
        }
        sleep(Duration::from_millis(10)).await;
    }
}
