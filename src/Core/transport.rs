// Message transport between the sender and the benchmark receiver.
// ZeroMQ PUSH/PULL sockets deliver whole messages in order.

use std::io;
use tracing::info;

/// Receiving half of a transport: delivers whole messages in order.
pub trait MessageSource {
    /// Receives the next message, blocking until one is available.
    fn receive(&mut self) -> io::Result<Vec<u8>>;

    /// Releases the endpoint. Further receives fail.
    fn close(&mut self) -> io::Result<()>;
}

/// Sending half of a transport.
pub trait MessageSink {
    /// Sends one message, blocking while no receiver is connected.
    fn send(&mut self, payload: &[u8]) -> io::Result<()>;

    /// Releases the endpoint. Queued messages are still delivered.
    fn close(&mut self) -> io::Result<()>;
}

/// Maps a ZeroMQ error onto an `io::Error` naming the failed operation.
pub fn zmq_error(operation: &str, e: zmq::Error) -> io::Error {
    let kind = match e {
        zmq::Error::EADDRINUSE => io::ErrorKind::AddrInUse,
        zmq::Error::EADDRNOTAVAIL => io::ErrorKind::AddrNotAvailable,
        zmq::Error::EINVAL | zmq::Error::EPROTONOSUPPORT => io::ErrorKind::InvalidInput,
        zmq::Error::ETERM | zmq::Error::ENOTSOCK => io::ErrorKind::NotConnected,
        zmq::Error::EAGAIN => io::ErrorKind::WouldBlock,
        zmq::Error::EINTR => io::ErrorKind::Interrupted,
        _ => io::ErrorKind::Other,
    };
    io::Error::new(kind, format!("error in {}: {}", operation, e))
}

/// Bound PULL socket, e.g. `tcp://*:5555`. Any number of PUSH senders may connect.
pub struct TcpPullEndpoint {
    socket: Option<zmq::Socket>,
    _context: zmq::Context,
}

impl TcpPullEndpoint {
    /// Binds to `address` (`tcp://*:5555`, `tcp://127.0.0.1:*` for an ephemeral port).
    pub fn bind(address: &str) -> io::Result<Self> {
        let context = zmq::Context::new();
        let socket = context
            .socket(zmq::PULL)
            .map_err(|e| zmq_error("zmq_socket", e))?;
        socket
            .bind(address)
            .map_err(|e| zmq_error(&format!("zmq_bind({})", address), e))?;

        let endpoint = Self {
            socket: Some(socket),
            _context: context,
        };
        info!("bound to {}", endpoint.last_endpoint()?);
        Ok(endpoint)
    }

    /// The endpoint actually bound, with any `*` port resolved.
    pub fn last_endpoint(&self) -> io::Result<String> {
        let socket = self.socket.as_ref().ok_or_else(closed_error)?;
        match socket.get_last_endpoint() {
            Ok(Ok(endpoint)) => Ok(endpoint),
            Ok(Err(raw)) => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Non UTF-8 endpoint {:?}", raw),
            )),
            Err(e) => Err(zmq_error("zmq_getsockopt", e)),
        }
    }
}

impl MessageSource for TcpPullEndpoint {
    fn receive(&mut self) -> io::Result<Vec<u8>> {
        let socket = self.socket.as_ref().ok_or_else(closed_error)?;
        socket.recv_bytes(0).map_err(|e| zmq_error("zmq_recvmsg", e))
    }

    fn close(&mut self) -> io::Result<()> {
        self.socket = None;
        Ok(())
    }
}

/// Connected PUSH socket. Connecting succeeds before the receiver is up;
/// sends block until it is.
pub struct TcpPushEndpoint {
    socket: Option<zmq::Socket>,
    _context: zmq::Context,
}

impl TcpPushEndpoint {
    pub fn connect(address: &str) -> io::Result<Self> {
        let context = zmq::Context::new();
        let socket = context
            .socket(zmq::PUSH)
            .map_err(|e| zmq_error("zmq_socket", e))?;
        socket
            .connect(address)
            .map_err(|e| zmq_error(&format!("zmq_connect({})", address), e))?;

        Ok(Self {
            socket: Some(socket),
            _context: context,
        })
    }
}

impl MessageSink for TcpPushEndpoint {
    fn send(&mut self, payload: &[u8]) -> io::Result<()> {
        let socket = self.socket.as_ref().ok_or_else(closed_error)?;
        socket.send(payload, 0).map_err(|e| zmq_error("zmq_sendmsg", e))
    }

    fn close(&mut self) -> io::Result<()> {
        // linger keeps queued messages; the context drop waits for them
        self.socket = None;
        Ok(())
    }
}

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "Endpoint has been closed")
}
