use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::api::ChatRequest;
use crate::core::app::{App, SessionSettings};
use crate::core::builtin_models::ModelRegistry;
use crate::core::completion::{normalize_reply, CompletionBackend, CompletionError};

pub fn create_test_app() -> App {
    create_test_app_with(SessionSettings::default())
}

pub fn create_test_app_with(settings: SessionSettings) -> App {
    App::new(ModelRegistry::builtin(), settings)
}

/// HTTP client that ignores proxy settings from the environment.
pub fn test_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("test client builds")
}

pub struct CapturedRequest {
    /// Request line and headers
    pub head: String,
    pub body: String,
}

/// Serve exactly one HTTP response on a local port. Resolves to the request
/// that was received.
pub async fn spawn_fake_endpoint(
    status_line: &'static str,
    body: &'static str,
) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept");
        let captured = read_request(&mut stream).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        let _ = stream.shutdown().await;
        captured
    });

    (format!("http://{addr}/v1/chat/completions"), handle)
}

async fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let read = stream.read(&mut chunk).await.expect("read request");
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);

        if let Some(header_end) = find_header_end(&buffer) {
            let head = String::from_utf8_lossy(&buffer[..header_end]);
            let content_length = head
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buffer.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    let header_end = find_header_end(&buffer).unwrap_or(buffer.len());
    let body_start = (header_end + 4).min(buffer.len());
    CapturedRequest {
        head: String::from_utf8_lossy(&buffer[..header_end]).into_owned(),
        body: String::from_utf8_lossy(&buffer[body_start..]).into_owned(),
    }
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|window| window == b"\r\n\r\n")
}

pub enum ScriptedReply {
    /// Raw model output, normalized the way the HTTP client does it
    Raw(String),
    Failure,
}

/// Completion backend that answers from a queue and records every request.
#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<ChatRequest>>,
    delay: Duration,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn reply(self, raw: &str) -> Self {
        self.push(ScriptedReply::Raw(raw.to_string()))
    }

    pub fn failure(self) -> Self {
        self.push(ScriptedReply::Failure)
    }

    fn push(self, reply: ScriptedReply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(ScriptedReply::Raw(raw)) => Ok(normalize_reply(&raw)),
            Some(ScriptedReply::Failure) => Err(unavailable()),
            None => Ok(String::new()),
        }
    }
}

pub fn unavailable() -> CompletionError {
    CompletionError::Status {
        status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        body: "upstream unavailable".to_string(),
    }
}

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Route events on the current thread into a [`LogCapture`] until the guard
/// is dropped.
pub fn capture_logs() -> (LogCapture, tracing::subscriber::DefaultGuard) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}
