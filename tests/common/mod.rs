//! Shared helpers for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use compiler_bot::registry::CompilerEntry;
use compiler_bot::{CompilationBackend, CompileRequest, TransportError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub fn sample_catalog() -> Vec<CompilerEntry> {
    vec![
        CompilerEntry::new("Python", "cpython-3.8.2"),
        CompilerEntry::new("Python", "cpython-2.7.18"),
        CompilerEntry::new("Haskell", "ghc-head"),
        CompilerEntry::new("Haskell", "ghc-9.0.1"),
        CompilerEntry::new("C++", "gcc-head"),
        CompilerEntry::new("C++", "clang-head"),
    ]
}

/// In-memory backend with a swappable catalog and a canned compile response.
pub struct StubBackend {
    catalog: Mutex<Result<Vec<CompilerEntry>, String>>,
    response: Mutex<Result<serde_json::Value, String>>,
    pub catalog_fetches: AtomicUsize,
    pub requests: Mutex<Vec<CompileRequest>>,
}

impl StubBackend {
    pub fn new(catalog: Vec<CompilerEntry>) -> Self {
        Self {
            catalog: Mutex::new(Ok(catalog)),
            response: Mutex::new(Ok(serde_json::json!({ "status": "0" }))),
            catalog_fetches: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_catalog(&self, catalog: Vec<CompilerEntry>) {
        *self.catalog.lock().unwrap() = Ok(catalog);
    }

    pub fn fail_catalog(&self, reason: &str) {
        *self.catalog.lock().unwrap() = Err(reason.to_string());
    }

    pub fn respond_with(&self, response: serde_json::Value) {
        *self.response.lock().unwrap() = Ok(response);
    }

    pub fn fail_compile(&self, reason: &str) {
        *self.response.lock().unwrap() = Err(reason.to_string());
    }

    pub fn last_request(&self) -> Option<CompileRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

/// A transport error with a real cause, produced without touching the network.
fn stub_error(reason: &str) -> TransportError {
    let source = serde_json::from_str::<serde_json::Value>(&format!("stub: {reason}")).unwrap_err();
    TransportError::Decode(source)
}

#[async_trait]
impl CompilationBackend for StubBackend {
    async fn fetch_catalog(&self) -> Result<Vec<CompilerEntry>, TransportError> {
        self.catalog_fetches.fetch_add(1, Ordering::SeqCst);
        let catalog = self.catalog.lock().unwrap().clone();
        catalog.map_err(|reason| stub_error(&reason))
    }

    async fn compile(&self, request: &CompileRequest) -> Result<serde_json::Value, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        let response = self.response.lock().unwrap().clone();
        response.map_err(|reason| stub_error(&reason))
    }

    fn backend_name(&self) -> &'static str {
        "stub"
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Minimal HTTP/1.1 server answering each connection with the next canned
/// response (the last one repeats).
pub struct StubServer {
    pub url: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubServer {
    pub async fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/api/", listener.local_addr().unwrap());
        let captured = Arc::new(Mutex::new(Vec::new()));

        let log = captured.clone();
        tokio::spawn(async move {
            let mut served = 0usize;
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let (status, body) = responses[served.min(responses.len() - 1)].clone();
                served += 1;
                let log = log.clone();
                tokio::spawn(async move {
                    handle(stream, status, &body, &log).await;
                });
            }
        });

        Self { url, captured }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }
}

/// Records the request before answering, so a client that has seen the
/// response can rely on the capture being there.
async fn handle(
    mut stream: TcpStream,
    status: u16,
    body: &str,
    log: &Mutex<Vec<CapturedRequest>>,
) -> Option<()> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buffer.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buffer, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    while buffer.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
    }
    let request_body = String::from_utf8_lossy(&buffer[header_end..]).to_string();
    log.lock().unwrap().push(CapturedRequest {
        request_line,
        headers,
        body: request_body,
    });

    let reason = if status < 400 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await.ok()?;
    stream.shutdown().await.ok();
    Some(())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Accepts connections and never answers.
pub async fn start_silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/", listener.local_addr().unwrap());
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
    url
}

/// A local address with nothing listening on it.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/")
}

/// HTTP client that never routes through an environment proxy.
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
