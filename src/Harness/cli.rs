// Bodies of the `local_thr` and `remote_thr` binaries, returning process exit codes.

use super::builder::BenchBuilder;
use super::config::{BenchConfig, LocalArgs, RemoteArgs};
use super::message::Message;
use super::report::{self, LOCAL_USAGE, REMOTE_USAGE};
use super::sampler::Rate;
use crate::Core::{host, MessageSink, Stopwatch, TcpPushEndpoint};
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

pub const EXIT_OK: i32 = 0;
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_SETUP: i32 = -1;

/// Positional arguments `local_thr` needs at minimum.
const LOCAL_MIN_ARGS: usize = 4;
const REMOTE_MIN_ARGS: usize = 3;

/// Parses `args` (program name first) and runs the receiver.
/// Fewer than four positional arguments print the usage and return 1 before
/// anything is bound or written.
pub fn run_local<I, T, W>(args: I, out: &mut W) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() < LOCAL_MIN_ARGS + 1 {
        let _ = writeln!(out, "{}", LOCAL_USAGE);
        return EXIT_USAGE;
    }

    let config = match LocalArgs::try_parse_from(&args) {
        Ok(parsed) => BenchConfig::from_args(parsed),
        Err(e) => return parse_failure(out, e, LOCAL_USAGE),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            let _ = writeln!(out, "{}\n{}", e, LOCAL_USAGE);
            return EXIT_USAGE;
        }
    };

    match receive(config, out) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            let _ = writeln!(out, "error in local_thr: {}", e);
            EXIT_SETUP
        }
    }
}

fn receive<W: Write>(config: BenchConfig, out: &mut W) -> io::Result<()> {
    report::header(out, &host::hostname(), &config)?;
    let mut orchestrator = BenchBuilder::from_config(config).build_tcp()?;
    orchestrator.run(out)?;
    Ok(())
}

/// Parses `args` (program name first) and runs the sender until
/// `message_count` messages are sent or `keep_sending` is cleared.
pub fn run_remote<I, T, W>(args: I, out: &mut W, keep_sending: &AtomicBool) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() < REMOTE_MIN_ARGS + 1 {
        let _ = writeln!(out, "{}", REMOTE_USAGE);
        return EXIT_USAGE;
    }

    let parsed = match RemoteArgs::try_parse_from(&args) {
        Ok(parsed) => parsed,
        Err(e) => return parse_failure(out, e, REMOTE_USAGE),
    };

    match send(&parsed, out, keep_sending) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            let _ = writeln!(out, "error in remote_thr: {}", e);
            EXIT_SETUP
        }
    }
}

fn send<W: Write>(args: &RemoteArgs, out: &mut W, keep_sending: &AtomicBool) -> io::Result<()> {
    let mut sink = TcpPushEndpoint::connect(&args.connect_to)?;
    let (sent, elapsed) =
        send_sequence(&mut sink, args.message_size, args.message_count, keep_sending)?;
    sink.close()?;

    let rate = Rate::compute(sent, elapsed, args.message_size);
    writeln!(out, "message size: {} [B]", args.message_size)?;
    writeln!(out, "message count: {}", sent)?;
    writeln!(out, "elapsed: {} [us]", elapsed)?;
    writeln!(
        out,
        "mean throughput: {} [msg/s]  {:.3} [MB/s] {:.3} [Mb/s]",
        rate.messages_per_sec, rate.megabytes_per_sec, rate.megabits_per_sec
    )?;
    out.flush()
}

/// Sends up to `count` numbered messages of `size` bytes, counters starting at 0.
/// Returns the number sent and the elapsed microseconds.
pub fn send_sequence<K: MessageSink>(
    sink: &mut K,
    size: usize,
    count: u64,
    keep_sending: &AtomicBool,
) -> io::Result<(u64, u64)> {
    let watch = Stopwatch::start();
    let mut sent = 0u64;
    while sent < count && keep_sending.load(Ordering::Acquire) {
        let message = Message::with_sequence(sent as i32, size);
        sink.send(message.payload())?;
        sent += 1;
    }
    Ok((sent, watch.stop()))
}

fn parse_failure<W: Write>(out: &mut W, e: clap::Error, usage: &str) -> i32 {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = write!(out, "{}", e.render());
            EXIT_OK
        }
        _ => {
            let _ = writeln!(out, "{}\n{}", e.render(), usage);
            EXIT_USAGE
        }
    }
}
