// ZeroMQ PUSH/PULL endpoints, run over loopback TCP.
// Run with: cargo test --test tcp_transport -- --nocapture

use dmxp_diskthr::Core::{MessageSink, MessageSource, TcpPullEndpoint, TcpPushEndpoint};
use dmxp_diskthr::Harness::cli::send_sequence;
use dmxp_diskthr::Harness::{BenchBuilder, Message};
use serial_test::serial;
use std::io;
use std::sync::atomic::AtomicBool;
use std::thread;

fn ephemeral_pull() -> (TcpPullEndpoint, String) {
    let pull = TcpPullEndpoint::bind("tcp://127.0.0.1:*").unwrap();
    let endpoint = pull.last_endpoint().unwrap();
    println!("pull bound at {}", endpoint);
    (pull, endpoint)
}

#[test]
fn test_bind_rejects_malformed_address() {
    for bad in ["tcp://127.0.0.1:port", "nonsense", "tcp://"] {
        assert!(TcpPullEndpoint::bind(bad).is_err(), "{}", bad);
    }
}

#[test]
#[serial]
fn test_bind_conflict_reported() {
    let (_pull, endpoint) = ephemeral_pull();
    let err = TcpPullEndpoint::bind(&endpoint).err().unwrap();
    assert_eq!(err.kind(), io::ErrorKind::AddrInUse);
}

#[test]
#[serial]
fn test_push_pull_in_order() {
    let (mut pull, endpoint) = ephemeral_pull();

    let sender = thread::spawn(move || {
        let mut push = TcpPushEndpoint::connect(&endpoint).unwrap();
        for i in 0..200 {
            push.send(Message::with_sequence(i, 32).payload()).unwrap();
        }
        push.close().unwrap();
    });

    for i in 0..200 {
        let message = Message::new(pull.receive().unwrap());
        assert_eq!(message.len(), 32);
        assert_eq!(message.sequence(), Some(i));
    }
    sender.join().unwrap();

    pull.close().unwrap();
    assert_eq!(pull.receive().unwrap_err().kind(), io::ErrorKind::NotConnected);
}

#[test]
#[serial]
fn test_sender_may_connect_before_bind_completes() {
    // PUSH connects lazily, so the sender can start first
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let endpoint = format!("tcp://127.0.0.1:{}", port);

    let mut push = TcpPushEndpoint::connect(&endpoint).unwrap();
    let mut pull = TcpPullEndpoint::bind(&endpoint).unwrap();

    push.send(b"early").unwrap();
    assert_eq!(pull.receive().unwrap(), b"early".to_vec());
    push.close().unwrap();
}

#[test]
#[serial]
fn test_benchmark_over_zmq() {
    let (pull, endpoint) = ephemeral_pull();

    let sender = thread::spawn(move || {
        let keep_sending = AtomicBool::new(true);
        let mut push = TcpPushEndpoint::connect(&endpoint).unwrap();
        let (sent, _) = send_sequence(&mut push, 128, 3000, &keep_sending).unwrap();
        push.close().unwrap();
        sent
    });

    let mut orchestrator = BenchBuilder::new()
        .with_message_size(128)
        .with_message_count(3000)
        .with_workers(2)
        .build_with(pull)
        .unwrap();
    let summary = orchestrator.run(&mut io::sink()).unwrap();

    assert_eq!(sender.join().unwrap(), 3000);
    assert_eq!(summary.received, 3000);
    assert_eq!(summary.dispatched, 2999);
    assert_eq!(summary.gaps, 0);
    assert_eq!(summary.intervals.len(), 2);
}
