mod builder;
pub mod cli;
pub mod config;
pub mod disk_writer;
pub mod integrity;
pub mod message;
mod orchestrator;
pub mod pool;
pub mod report;
pub mod sampler;

pub use builder::BenchBuilder;
pub use config::{BenchConfig, LocalArgs, RemoteArgs, INTERVAL, MAX_WORKERS, NETWORK_SENTINEL};
pub use disk_writer::{DiskMode, DiskWriter, WriteOutcome, WriteStats};
pub use integrity::IntegrityChecker;
pub use message::Message;
pub use orchestrator::{Orchestrator, RunState, RunSummary};
pub use pool::WorkerPool;
pub use sampler::{Rate, ThroughputSampler};
