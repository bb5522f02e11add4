//! Minimal HTTP/1.1 front for the generation endpoint.
//!
//! One TCP listener, one spawned task per connection, one request per
//! connection. The server exposes a single JSON route and closes the
//! connection after answering.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use crate::GenerationError;
use crate::generation::{GenerationService, UpstreamConfig};
use crate::protocol::ErrorResponse;

use super::handler;

/// Largest request body the server reads.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Header lines read before a request is considered malformed.
const MAX_HEADERS: usize = 64;

/// A parsed inbound request, reduced to what routing needs.
#[derive(Debug)]
pub(super) struct Request {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

/// An outbound response about to be written.
#[derive(Debug)]
pub(super) struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        let body = serde_json::to_string(&ErrorResponse {
            error: message.to_string(),
        })
        .unwrap_or_else(|_| String::from(r#"{"error":"erro interno"}"#));
        Self { status, body }
    }

    fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            _ => "Internal Server Error",
        }
    }
}

/// Run the generation server until the process is stopped.
pub async fn run(port: u16) -> Result<(), GenerationError> {
    let config = UpstreamConfig::from_env()?;
    let service = Arc::new(GenerationService::new(config)?);

    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).await?;
    log::info!("listening on {addr}");

    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                log::debug!("connection from {peer}");
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, service).await {
                        log::warn!("connection from {peer} failed: {e}");
                    }
                });
            }
            Err(e) => {
                log::warn!("failed to accept connection: {e}");
            }
        }
    }
}

/// Serve one request on a fresh connection.
async fn handle_connection(
    stream: TcpStream,
    service: Arc<GenerationService>,
) -> std::io::Result<()> {
    let mut stream = BufReader::new(stream);

    let response = match read_request(&mut stream).await? {
        Some(request) => route(&request, &service).await,
        None => Response::error(400, "Requisição HTTP malformada"),
    };

    write_response(stream.get_mut(), &response).await
}

async fn route(request: &Request, service: &GenerationService) -> Response {
    match (request.method.as_str(), request.path.as_str()) {
        ("POST", "/api/quiz/generate") => handler::handle_generate(service, &request.body).await,
        (_, "/api/quiz/generate") => Response::error(405, "Use POST"),
        _ => Response::error(404, "Rota não encontrada"),
    }
}

/// Read one HTTP/1.1 request.
///
/// Returns `None` when the peer sent something that is not parseable HTTP
/// or a body larger than the server accepts.
pub(super) async fn read_request<R>(reader: &mut R) -> std::io::Result<Option<Request>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    if reader.read_line(&mut line).await? == 0 {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let (Some(method), Some(path)) = (parts.next(), parts.next()) else {
        return Ok(None);
    };
    let method = method.to_string();
    // Routing is by path only; any query string is ignored.
    let path = path.split('?').next().unwrap_or(path).to_string();

    let mut content_length = 0usize;
    let mut saw_blank_line = false;
    for _ in 0..MAX_HEADERS {
        let mut header = String::new();
        if reader.read_line(&mut header).await? == 0 {
            return Ok(None);
        }
        let header = header.trim_end();
        if header.is_empty() {
            saw_blank_line = true;
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = match value.trim().parse() {
                    Ok(n) => n,
                    Err(_) => return Ok(None),
                };
            }
        }
    }

    if !saw_blank_line || content_length > MAX_BODY_BYTES {
        return Ok(None);
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await?;

    Ok(Some(Request { method, path, body }))
}

async fn write_response<W>(writer: &mut W, response: &Response) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let payload = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        response.reason(),
        response.body.len(),
        response.body
    );
    writer.write_all(payload.as_bytes()).await?;
    writer.shutdown().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_request_with_body() {
        let raw = b"POST /api/quiz/generate HTTP/1.1\r\nHost: localhost\r\nContent-Length: 13\r\n\r\n{\"count\": 3}\n";
        let mut reader = BufReader::new(&raw[..]);

        let request = read_request(&mut reader).await.unwrap().unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/api/quiz/generate");
        assert_eq!(request.body, b"{\"count\": 3}\n");
    }

    #[tokio::test]
    async fn test_read_request_without_body() {
        let raw = b"GET /api/quiz/generate HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let mut reader = BufReader::new(&raw[..]);

        let request = read_request(&mut reader).await.unwrap().unwrap();
        assert_eq!(request.method, "GET");
        assert!(request.body.is_empty());
    }

    #[tokio::test]
    async fn test_query_string_is_stripped() {
        let raw = b"POST /api/quiz/generate?debug=1 HTTP/1.1\r\n\r\n";
        let mut reader = BufReader::new(&raw[..]);

        let request = read_request(&mut reader).await.unwrap().unwrap();
        assert_eq!(request.path, "/api/quiz/generate");
    }

    #[tokio::test]
    async fn test_garbage_is_rejected() {
        let raw = b"\r\n";
        let mut reader = BufReader::new(&raw[..]);
        assert!(read_request(&mut reader).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let raw = b"POST /api/quiz/generate HTTP/1.1\r\nContent-Length: 9999999\r\n\r\n";
        let mut reader = BufReader::new(&raw[..]);
        assert!(read_request(&mut reader).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_response_is_wire_complete() {
        let response = Response::error(404, "Rota não encontrada");
        let mut out: Vec<u8> = Vec::new();
        write_response(&mut out, &response).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.contains("Content-Type: application/json"));
        assert!(text.ends_with("{\"error\":\"Rota não encontrada\"}"));
    }
}
