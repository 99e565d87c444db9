// In-process loopback transport.
// Lets a benchmark run entirely inside one process (tests, embedding).

use super::transport::{MessageSink, MessageSource};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;

struct Queue {
    frames: VecDeque<Vec<u8>>,
    sink_closed: bool,
    source_closed: bool,
}

struct Shared {
    queue: Mutex<Queue>,
    ready: Condvar,
}

/// Factory for connected in-memory sink/source pairs.
pub struct MemoryTransport;

impl MemoryTransport {
    /// Creates a connected pair. Messages sent on the sink arrive on the source in order.
    pub fn pair() -> (MemorySink, MemorySource) {
        let shared = Arc::new(Shared {
            queue: Mutex::new(Queue {
                frames: VecDeque::new(),
                sink_closed: false,
                source_closed: false,
            }),
            ready: Condvar::new(),
        });

        (
            MemorySink {
                shared: Arc::clone(&shared),
            },
            MemorySource { shared },
        )
    }
}

pub struct MemorySink {
    shared: Arc<Shared>,
}

pub struct MemorySource {
    shared: Arc<Shared>,
}

impl MessageSink for MemorySink {
    fn send(&mut self, payload: &[u8]) -> io::Result<()> {
        let mut queue = self.shared.queue.lock();
        if queue.source_closed || queue.sink_closed {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "Receiver has been closed",
            ));
        }
        queue.frames.push_back(payload.to_vec());
        drop(queue);
        self.shared.ready.notify_one();
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.shared.queue.lock().sink_closed = true;
        self.shared.ready.notify_all();
        Ok(())
    }
}

impl Drop for MemorySink {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

impl MessageSource for MemorySource {
    fn receive(&mut self) -> io::Result<Vec<u8>> {
        let mut queue = self.shared.queue.lock();
        loop {
            if queue.source_closed {
                return Err(io::Error::new(
                    io::ErrorKind::NotConnected,
                    "Endpoint has been closed",
                ));
            }
            if let Some(frame) = queue.frames.pop_front() {
                return Ok(frame);
            }
            if queue.sink_closed {
                return Err(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "Sender has terminated",
                ));
            }
            self.shared.ready.wait(&mut queue);
        }
    }

    fn close(&mut self) -> io::Result<()> {
        let mut queue = self.shared.queue.lock();
        queue.source_closed = true;
        queue.frames.clear();
        Ok(())
    }
}
