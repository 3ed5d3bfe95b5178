// Single-connection HTTP cycle and the sequential accept loop
//
// Only the request line and the header-block terminator are parsed; request
// bodies are never read. Every response carries Connection: close and the
// stream is dropped after each request, so one stalled or broken client can
// never wedge the server.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufStream};
use tokio::net::{TcpListener, TcpSocket};
use tokio::time::timeout;
use tracing::{debug, warn};

use super::router::route;
use crate::config::{CLIENT_TIMEOUT, LISTEN_BACKLOG};
use crate::drive::{Drivetrain, gpio::OutputPin};

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("client sent nothing for {0:?}")]
    Stalled(Duration),

    #[error("response serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// How a single connection ended
#[derive(Debug)]
pub enum ConnectionOutcome {
    /// A response was written for `path`
    Served { path: String },
    /// No usable request line; dropped without writing a byte
    ClosedEarly,
}

/// Bind the listening socket with a small fixed backlog
pub fn bind(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4()?,
        SocketAddr::V6(_) => TcpSocket::new_v6()?,
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    socket.listen(LISTEN_BACKLOG)
}

/// Accept and fully service one connection at a time, forever.
///
/// A fault on one connection is logged and the loop moves on; the robot
/// must stay remotely controllable for the next client.
pub async fn serve<P: OutputPin>(listener: TcpListener, mut drivetrain: Drivetrain<P>) {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Accept failed: {}", e);
                continue;
            }
        };

        match handle_connection(stream, &mut drivetrain).await {
            Ok(ConnectionOutcome::Served { path }) => debug!("Served {} for {}", path, peer),
            Ok(ConnectionOutcome::ClosedEarly) => debug!("Dropped {}: no request", peer),
            Err(e) => warn!("Connection from {} failed: {}", peer, e),
        }
        // The stream was consumed above, so the connection is closed by now
        // regardless of how the handler ended.
    }
}

/// Run one request/response cycle.
///
/// The stream is consumed and dropped on every exit path, closing the
/// connection unconditionally.
pub async fn handle_connection<S, P>(
    stream: S,
    drivetrain: &mut Drivetrain<P>,
) -> Result<ConnectionOutcome, ConnectionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
    P: OutputPin,
{
    let mut stream = BufStream::new(stream);

    // Request line and header drain run under the inactivity timeout
    let path = match timeout(CLIENT_TIMEOUT, read_request(&mut stream)).await {
        Ok(Ok(Some(path))) => path,
        Ok(Ok(None)) => return Ok(ConnectionOutcome::ClosedEarly),
        Ok(Err(e)) => return Err(e.into()),
        Err(_) => return Err(ConnectionError::Stalled(CLIENT_TIMEOUT)),
    };

    let response = route(&path, drivetrain)?;
    stream.write_all(&response.to_bytes()).await?;
    stream.flush().await?;

    Ok(ConnectionOutcome::Served { path })
}

/// Read the request line and drain the header block. Returns the request
/// path, or None when no parseable request line arrived.
async fn read_request<S>(stream: &mut BufStream<S>) -> std::io::Result<Option<String>>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut line = String::new();
    if stream.read_line(&mut line).await? == 0 {
        return Ok(None);
    }

    // METHOD SP PATH SP VERSION, exactly three tokens
    let mut tokens = line.trim_end_matches(['\r', '\n']).split(' ');
    let path = match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
        (Some(_method), Some(path), Some(_version), None) => path.to_string(),
        _ => {
            debug!("Malformed request line: {:?}", line);
            return Ok(None);
        }
    };

    // Drain headers until a blank line or end of stream
    loop {
        let mut header = String::new();
        if stream.read_line(&mut header).await? == 0 {
            break;
        }
        if header == "\r\n" || header == "\n" {
            break;
        }
    }

    Ok(Some(path))
}
