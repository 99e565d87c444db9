use super::config::{BenchConfig, NETWORK_SENTINEL};
use super::orchestrator::Orchestrator;
use crate::Core::{MessageSource, TcpPullEndpoint};
use std::io;

pub struct BenchBuilder {
    bind_to: String,
    message_size: usize,
    message_count: u64,
    disk_name: String,
    workers: i64,
}

impl Default for BenchBuilder {
    fn default() -> Self {
        Self {
            bind_to: "tcp://*:5555".to_string(),
            message_size: 1024,
            message_count: 100_000,
            disk_name: NETWORK_SENTINEL.to_string(), // no disk I/O by default
            workers: 1,
        }
    }
}

impl BenchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: BenchConfig) -> Self {
        Self {
            bind_to: config.bind_to,
            message_size: config.message_size,
            message_count: config.message_count,
            disk_name: config.disk_name,
            workers: config.workers as i64,
        }
    }

    pub fn with_bind_to(mut self, address: impl Into<String>) -> Self {
        self.bind_to = address.into();
        self
    }

    pub fn with_message_size(mut self, size: usize) -> Self {
        self.message_size = size;
        self
    }

    pub fn with_message_count(mut self, count: u64) -> Self {
        self.message_count = count;
        self
    }

    pub fn with_disk(mut self, disk_name: impl Into<String>) -> Self {
        self.disk_name = disk_name.into();
        self
    }

    pub fn with_workers(mut self, workers: i64) -> Self {
        self.workers = workers;
        self
    }

    pub fn config(&self) -> io::Result<BenchConfig> {
        BenchConfig::new(
            self.bind_to.clone(),
            self.message_size,
            self.message_count,
            self.disk_name.clone(),
            self.workers,
        )
    }

    /// Validates the configuration and binds a TCP pull endpoint.
    pub fn build_tcp(self) -> io::Result<Orchestrator<TcpPullEndpoint>> {
        let config = self.config()?;
        let endpoint = TcpPullEndpoint::bind(&config.bind_to)?;
        let mut orchestrator = Orchestrator::new(config)?;
        orchestrator.bind(endpoint);
        Ok(orchestrator)
    }

    /// Validates the configuration and attaches an already bound source.
    pub fn build_with<S: MessageSource>(self, source: S) -> io::Result<Orchestrator<S>> {
        let mut orchestrator = Orchestrator::new(self.config()?)?;
        orchestrator.bind(source);
        Ok(orchestrator)
    }
}
