pub mod host;
pub mod memory;
pub mod stopwatch;
pub mod transport;

pub use memory::{MemorySink, MemorySource, MemoryTransport};
pub use stopwatch::Stopwatch;
pub use transport::{MessageSink, MessageSource, TcpPullEndpoint, TcpPushEndpoint};
