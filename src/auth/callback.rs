//! Loopback HTTP listener for capturing the OAuth verifier.
//!
//! When the user approves access in their browser, Trade Me redirects to
//! `http://127.0.0.1:{port}/callback?oauth_verifier=...`. This listener
//! accepts that single redirect, hands the verifier back to the login flow,
//! and shuts down. No origin validation is performed beyond parsing the
//! expected query parameter; a loopback socket on a single-user machine is
//! the trust boundary here.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::Result;

/// Default port the redirect URI is registered against.
pub const DEFAULT_CALLBACK_PORT: u16 = 8765;

/// Default time to wait for the redirect before giving up.
pub const DEFAULT_CALLBACK_TIMEOUT: Duration = Duration::from_secs(180);

/// A single-use loopback listener that captures one `oauth_verifier`.
///
/// The socket is bound at construction so that a port conflict (for
/// example, a second concurrent login) surfaces before the browser opens.
/// Dropping the listener releases the port on every exit path.
#[derive(Debug)]
pub struct CallbackListener {
    listener: TcpListener,
    port: u16,
}

impl CallbackListener {
    /// Bind the listener on `127.0.0.1:{port}`. Port 0 picks a free port.
    pub async fn bind(port: u16) -> Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", port)).await?;
        let port = listener.local_addr()?.port();
        tracing::debug!(port, "callback listener bound");
        Ok(Self { listener, port })
    }

    /// The redirect URI to register with the request-token step.
    pub fn redirect_uri(port: u16) -> String {
        format!("http://127.0.0.1:{port}/callback")
    }

    /// The port this listener is bound to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Wait up to `timeout` for a redirect carrying `oauth_verifier`.
    ///
    /// Returns `Ok(Some(verifier))` for the first qualifying GET request,
    /// after answering it with a short confirmation page. Requests without
    /// the parameter (a favicon probe, say) get a 404 and the wait
    /// continues. Returns `Ok(None)` when the timeout elapses first.
    ///
    /// Consumes the listener; the socket is freed when this returns.
    pub async fn capture(self, timeout: Duration) -> Result<Option<String>> {
        match tokio::time::timeout(timeout, self.accept_verifier()).await {
            Ok(result) => result.map(Some),
            Err(_elapsed) => {
                tracing::debug!(port = self.port, "callback wait timed out");
                Ok(None)
            }
        }
    }

    async fn accept_verifier(&self) -> Result<String> {
        loop {
            let (mut stream, peer) = self.listener.accept().await?;
            tracing::debug!(%peer, "callback connection accepted");

            match read_verifier(&mut stream).await {
                Ok(Some(verifier)) => {
                    respond(
                        &mut stream,
                        "200 OK",
                        "Authorization received. You may close this tab and return to the terminal.",
                    )
                    .await;
                    return Ok(verifier);
                }
                Ok(None) => {
                    respond(&mut stream, "404 Not Found", "Not found.").await;
                }
                Err(err) => {
                    tracing::debug!(%err, "ignoring unreadable callback connection");
                }
            }
        }
    }
}

/// Read one HTTP request head and extract `oauth_verifier` from the
/// request-target's query string. `Ok(None)` for well-formed requests that
/// don't carry the parameter.
async fn read_verifier(stream: &mut TcpStream) -> std::io::Result<Option<String>> {
    let mut buffer = vec![0u8; 8 * 1024];
    let bytes_read = stream.read(&mut buffer).await?;
    let request = String::from_utf8_lossy(&buffer[..bytes_read]);

    let first_line = match request.lines().next() {
        Some(line) => line,
        None => return Ok(None),
    };
    let mut parts = first_line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("");
    if method != "GET" {
        return Ok(None);
    }

    let query = match target.split_once('?') {
        Some((_, query)) => query,
        None => return Ok(None),
    };

    Ok(url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "oauth_verifier")
        .map(|(_, value)| value.into_owned()))
}

/// Best-effort plain-text response; the flow does not care if the browser
/// already went away.
async fn respond(stream: &mut TcpStream, status: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len(),
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn send_get(port: u16, target: &str) -> String {
        let mut stream = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
        let request = format!("GET {target} HTTP/1.1\r\nHost: 127.0.0.1\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_captures_verifier_from_redirect() {
        let listener = CallbackListener::bind(0).await.unwrap();
        let port = listener.port();

        let capture = tokio::spawn(listener.capture(Duration::from_secs(5)));
        let response = send_get(port, "/callback?oauth_verifier=ABC123").await;

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("return to the terminal"));
        let verifier = capture.await.unwrap().unwrap();
        assert_eq!(verifier.as_deref(), Some("ABC123"));
    }

    #[tokio::test]
    async fn test_ignores_requests_without_verifier() {
        let listener = CallbackListener::bind(0).await.unwrap();
        let port = listener.port();

        let capture = tokio::spawn(listener.capture(Duration::from_secs(5)));

        let probe = send_get(port, "/favicon.ico").await;
        assert!(probe.starts_with("HTTP/1.1 404"));

        let response = send_get(port, "/callback?oauth_verifier=XYZ").await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert_eq!(capture.await.unwrap().unwrap().as_deref(), Some("XYZ"));
    }

    #[tokio::test]
    async fn test_timeout_returns_none_and_frees_port() {
        let listener = CallbackListener::bind(0).await.unwrap();
        let port = listener.port();

        let started = std::time::Instant::now();
        let captured = listener.capture(Duration::from_secs(1)).await.unwrap();
        assert!(captured.is_none());
        assert!(started.elapsed() < Duration::from_secs(3));

        // Port is free again immediately after the timeout path.
        CallbackListener::bind(port).await.unwrap();
    }

    #[tokio::test]
    async fn test_verifier_is_url_decoded() {
        let listener = CallbackListener::bind(0).await.unwrap();
        let port = listener.port();

        let capture = tokio::spawn(listener.capture(Duration::from_secs(5)));
        send_get(port, "/callback?oauth_token=rt1&oauth_verifier=a%2Bb").await;

        assert_eq!(capture.await.unwrap().unwrap().as_deref(), Some("a+b"));
    }

    #[test]
    fn test_redirect_uri_format() {
        assert_eq!(
            CallbackListener::redirect_uri(DEFAULT_CALLBACK_PORT),
            "http://127.0.0.1:8765/callback"
        );
    }
}
