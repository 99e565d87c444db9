// Run configuration for the receiver and the sender.

use clap::Parser;
use std::io;
use tracing::warn;

/// Upper bound on concurrent disk writer threads.
pub const MAX_WORKERS: usize = 10;

/// Disk name meaning "measure the network only, write nothing".
pub const NETWORK_SENTINEL: &str = "/network";

/// Number of messages per interval report.
pub const INTERVAL: u64 = 1000;

/// Positional arguments of `local_thr`.
#[derive(Debug, Parser)]
#[command(name = "local_thr", about = "Measure receive throughput, optionally writing every message to disk")]
pub struct LocalArgs {
    /// Address to bind, e.g. tcp://*:5555
    pub bind_to: String,
    /// Expected size of every message in bytes
    pub message_size: usize,
    /// Number of messages to receive
    pub message_count: u64,
    /// Disk mount point, or /network to skip disk writes
    pub disk: String,
    /// Number of disk writer threads (1-10)
    #[arg(allow_negative_numbers = true)]
    pub workers: Option<i64>,
    /// Anything after the worker count is ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub ignored: Vec<String>,
}

/// Positional arguments of `remote_thr`.
#[derive(Debug, Parser)]
#[command(name = "remote_thr", about = "Send numbered messages to a local_thr receiver")]
pub struct RemoteArgs {
    /// Address to connect to, e.g. tcp://127.0.0.1:5555
    pub connect_to: String,
    /// Size of every message in bytes
    pub message_size: usize,
    /// Number of messages to send
    pub message_count: u64,
    /// Anything after the message count is ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub ignored: Vec<String>,
}

/// Validated, immutable configuration of one benchmark run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub bind_to: String,
    pub message_size: usize,
    pub message_count: u64,
    pub disk_name: String,
    pub workers: usize,
}

impl BenchConfig {
    /// Validates the raw values. Worker counts above `MAX_WORKERS` are clamped,
    /// worker counts below 1 and a zero message count are rejected.
    pub fn new(
        bind_to: impl Into<String>,
        message_size: usize,
        message_count: u64,
        disk_name: impl Into<String>,
        workers: i64,
    ) -> io::Result<Self> {
        if workers < 1 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid writer thread count {} (expected 1-{})", workers, MAX_WORKERS),
            ));
        }
        let workers = if workers as u64 > MAX_WORKERS as u64 {
            warn!("writer thread count {} clamped to {}", workers, MAX_WORKERS);
            MAX_WORKERS
        } else {
            workers as usize
        };

        if message_count == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Message count must be at least 1",
            ));
        }

        let disk_name = disk_name.into();
        if disk_name.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Empty disk mount point (use {} for network only)", NETWORK_SENTINEL),
            ));
        }

        Ok(Self {
            bind_to: bind_to.into(),
            message_size,
            message_count,
            disk_name,
            workers,
        })
    }

    pub fn from_args(args: LocalArgs) -> io::Result<Self> {
        Self::new(
            args.bind_to,
            args.message_size,
            args.message_count,
            args.disk,
            args.workers.unwrap_or(1),
        )
    }

    /// True when no disk I/O is performed.
    pub fn is_network_only(&self) -> bool {
        self.disk_name == NETWORK_SENTINEL
    }
}
