//! Loopback HTTP stub for exercising the client against canned responses.

use std::{io, net::SocketAddr, time::Duration};

use testresult::TestResult;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

/// A request as seen by the stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedRequest {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) body: String,
}

/// A canned response, served once.
#[derive(Debug, Clone)]
pub(crate) struct StubResponse {
    status: u16,
    body: String,
    delay: Duration,
    body_delay: Duration,
    truncated: bool,
}

impl StubResponse {
    pub(crate) fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
            body_delay: Duration::ZERO,
            truncated: false,
        }
    }

    pub(crate) fn empty(status: u16) -> Self {
        Self::json(status, "")
    }

    /// Holds the response back for `delay` after reading the request.
    pub(crate) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sends the headers straight away but holds the body back for `delay`.
    pub(crate) fn stall_body(mut self, delay: Duration) -> Self {
        self.body_delay = delay;
        self
    }

    /// Advertises the full body length but closes the connection before
    /// sending any of it.
    pub(crate) fn truncate_body(mut self) -> Self {
        self.truncated = true;
        self
    }
}

#[derive(Debug)]
pub(crate) struct StubServer {
    addr: SocketAddr,
    handle: JoinHandle<io::Result<Vec<RecordedRequest>>>,
}

impl StubServer {
    /// Serves each response in turn to one connection, then stops.
    pub(crate) async fn start(responses: Vec<StubResponse>) -> TestResult<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            let mut recorded = Vec::with_capacity(responses.len());

            for response in responses {
                let (mut stream, _) = listener.accept().await?;

                recorded.push(read_request(&mut stream).await?);

                if !response.delay.is_zero() {
                    tokio::time::sleep(response.delay).await;
                }

                write_response(&mut stream, &response).await?;
            }

            Ok(recorded)
        });

        Ok(Self { addr, handle })
    }

    pub(crate) fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Waits for every canned response to be served and returns the requests.
    pub(crate) async fn finish(self) -> TestResult<Vec<RecordedRequest>> {
        Ok(self.handle.await??)
    }
}

async fn read_request(stream: &mut TcpStream) -> io::Result<RecordedRequest> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];

    let header_end = loop {
        let read = stream.read(&mut chunk).await?;

        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed before headers",
            ));
        }

        buffer.extend_from_slice(chunk.get(..read).unwrap_or_default());

        if let Some(position) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
            break position + 4;
        }
    };

    let head = String::from_utf8_lossy(buffer.get(..header_end).unwrap_or_default()).into_owned();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();

    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buffer.len() < header_end + content_length {
        let read = stream.read(&mut chunk).await?;

        if read == 0 {
            break;
        }

        buffer.extend_from_slice(chunk.get(..read).unwrap_or_default());
    }

    let body = String::from_utf8_lossy(buffer.get(header_end..).unwrap_or_default()).into_owned();

    Ok(RecordedRequest { method, path, body })
}

async fn write_response(stream: &mut TcpStream, response: &StubResponse) -> io::Result<()> {
    let reason = match response.status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    };

    let mut raw = format!("HTTP/1.1 {} {reason}\r\nconnection: close\r\n", response.status);

    if response.status != 204 {
        raw.push_str("content-type: application/json\r\n");
        raw.push_str(&format!("content-length: {}\r\n", response.body.len()));
    }

    raw.push_str("\r\n");

    stream.write_all(raw.as_bytes()).await?;
    stream.flush().await?;

    if !response.body_delay.is_zero() {
        tokio::time::sleep(response.body_delay).await;
    }

    if response.status != 204 && !response.truncated {
        stream.write_all(response.body.as_bytes()).await?;
    }

    stream.shutdown().await
}
