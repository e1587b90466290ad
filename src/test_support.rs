use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// What a one-shot server received.
#[derive(Debug)]
pub(crate) struct CapturedRequest {
    pub head: String,
    pub body: String,
}

impl CapturedRequest {
    pub fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    /// Looks a header up by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let mut kv = line.splitn(2, ':');
            let key = kv.next()?;
            let value = kv.next()?;
            if key.trim().eq_ignore_ascii_case(name) {
                Some(value.trim())
            } else {
                None
            }
        })
    }
}

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Accepts a single connection on a local port, answers it with `status`
/// and `body`, and hands back what was received.
pub(crate) async fn serve_once(
    status: &'static str,
    body: &'static str,
) -> (String, JoinHandle<CapturedRequest>) {
    serve_raw(format!(
        "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    ))
    .await
}

/// Like [`serve_once`], but writes `response` to the socket exactly as given.
pub(crate) async fn serve_raw(response: String) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        let mut chunk = [0u8; 1024];

        let head_end = loop {
            if let Some(pos) = find_head_end(&received) {
                break pos;
            }
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break received.len();
            }
            received.extend_from_slice(&chunk[..n]);
        };
        let head = String::from_utf8_lossy(&received[..head_end]).into_owned();
        let captured = CapturedRequest {
            head,
            body: String::new(),
        };
        let content_length = captured
            .header("content-length")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0);

        let body_start = (head_end + 4).min(received.len());
        while received.len() < body_start + content_length {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&chunk[..n]);
        }
        let request_body = String::from_utf8_lossy(&received[body_start..]).into_owned();

        stream.write_all(response.as_bytes()).await.unwrap();
        let _ = stream.shutdown().await;

        CapturedRequest {
            body: request_body,
            ..captured
        }
    });

    (base_url, handle)
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// A widget client pointed at a host that is never contacted.
pub(crate) fn offline_client() -> crate::Client {
    crate::Client::new(
        crate::Secrets::new("app_token", "app_secret"),
        crate::Endpoint::Custom("http://localhost/ws/v2.0/output.json".to_string()),
    )
}

pub(crate) fn body_of(request: &reqwest::Request) -> &str {
    request
        .body()
        .and_then(|body| body.as_bytes())
        .map(|bytes| std::str::from_utf8(bytes).unwrap())
        .unwrap_or_default()
}

/// The path and query of a built request, relative to [`offline_client`]'s endpoint.
pub(crate) fn target_of(request: &reqwest::Request) -> String {
    let url = request.url();
    let path = url
        .path()
        .trim_start_matches("/ws/v2.0/output.json")
        .to_string();
    match url.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path,
    }
}

pub(crate) fn xml_document(inner: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?><request>{}</request>",
        inner
    )
}
