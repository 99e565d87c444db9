// Human-readable, plottable report lines.

use super::config::BenchConfig;
use super::sampler::Rate;
use std::io::{self, Write};

pub const LOCAL_USAGE: &str =
    "usage: local_thr <bind-to> <message-size> <message-count> <disk-mountpoint> [no_threads]";

pub const REMOTE_USAGE: &str = "usage: remote_thr <connect-to> <message-size> <message-count>";

pub fn header<W: Write>(out: &mut W, hostname: &str, config: &BenchConfig) -> io::Result<()> {
    writeln!(
        out,
        "#local_thr local host {} disk {} bind to {} message size {} message count {} writer threads {}",
        hostname,
        config.disk_name,
        config.bind_to,
        config.message_size,
        config.message_count,
        config.workers
    )
}

pub fn interval_banner<W: Write>(out: &mut W, interval: u64) -> io::Result<()> {
    writeln!(out, "#mean throughput for {} msg: ", interval)
}

/// `<rate> [msg/s]  <MB/s> [MB/s] <Mb/s> [Mb/s]`
pub fn interval_line<W: Write>(out: &mut W, rate: &Rate) -> io::Result<()> {
    writeln!(
        out,
        "{} [msg/s]  {:.3} [MB/s] {:.3} [Mb/s]",
        rate.messages_per_sec, rate.megabytes_per_sec, rate.megabits_per_sec
    )?;
    out.flush()
}

pub fn final_block<W: Write>(
    out: &mut W,
    message_size: usize,
    message_count: u64,
    rate: &Rate,
) -> io::Result<()> {
    writeln!(out, "message size: {} [B]", message_size)?;
    writeln!(out, "message count: {}", message_count)?;
    writeln!(out, "mean throughput: {} [msg/s]", rate.messages_per_sec)?;
    writeln!(
        out,
        "mean throughput for 1000 msg: {:.3} [MB/s] {:.3} [Mb/s]",
        rate.megabytes_per_sec, rate.megabits_per_sec
    )?;
    out.flush()
}
