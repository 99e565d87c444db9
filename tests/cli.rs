use dmxp_diskthr::Core::{MessageSink, TcpPushEndpoint};
use dmxp_diskthr::Harness::cli::{run_local, run_remote, send_sequence, EXIT_OK, EXIT_SETUP, EXIT_USAGE};
use dmxp_diskthr::Harness::{BenchConfig, LocalArgs, RemoteArgs};
use clap::Parser;
use serial_test::serial;
use std::net::TcpListener;
use std::sync::atomic::AtomicBool;
use std::thread;

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port()
}

#[test]
fn test_local_usage_with_too_few_arguments() {
    for args in [
        vec!["local_thr"],
        vec!["local_thr", "tcp://*:5555", "100", "1000"],
    ] {
        let mut out = Vec::new();
        assert_eq!(run_local(args, &mut out), EXIT_USAGE);
        assert!(output(out).starts_with("usage: local_thr <bind-to>"));
    }
}

#[test]
fn test_local_rejects_bad_numbers() {
    let mut out = Vec::new();
    let code = run_local(["local_thr", "tcp://*:5555", "big", "1000", "/network"], &mut out);
    assert_eq!(code, EXIT_USAGE);
    assert!(output(out).contains("usage: local_thr"));

    let mut out = Vec::new();
    let code = run_local(["local_thr", "tcp://*:5555", "100", "1000", "/network", "0"], &mut out);
    assert_eq!(code, EXIT_USAGE);
    assert!(output(out).contains("writer thread count"));
}

#[test]
fn test_extra_arguments_ignored() {
    let parsed = LocalArgs::try_parse_from([
        "local_thr", "tcp://*:5555", "100", "1000", "/network", "4", "extra", "-x",
    ])
    .unwrap();
    assert_eq!(parsed.ignored, vec!["extra".to_string(), "-x".to_string()]);

    let config = BenchConfig::from_args(parsed).unwrap();
    assert_eq!(config.workers, 4);
    assert_eq!(config.message_count, 1000);

    let remote = RemoteArgs::try_parse_from(["remote_thr", "tcp://127.0.0.1:5555", "100", "10", "more"])
        .unwrap();
    assert_eq!(remote.message_count, 10);
}

#[test]
fn test_local_bind_failure_is_fatal() {
    let mut out = Vec::new();
    let code = run_local(["local_thr", "tcp://127.0.0.1:port", "100", "10", "/network"], &mut out);
    assert_eq!(code, EXIT_SETUP);

    let text = output(out);
    assert!(text.starts_with("#local_thr local host "));
    assert!(text.contains("error in local_thr"));
}

#[test]
fn test_remote_usage_with_too_few_arguments() {
    let keep_sending = AtomicBool::new(true);
    let mut out = Vec::new();
    assert_eq!(run_remote(["remote_thr", "tcp://127.0.0.1:5555", "100"], &mut out, &keep_sending), EXIT_USAGE);
    assert!(output(out).starts_with("usage: remote_thr"));
}

#[test]
fn test_remote_stops_when_flag_cleared() {
    // nothing listens there; with the flag cleared no send is attempted
    let mut push = TcpPushEndpoint::connect(&format!("tcp://127.0.0.1:{}", free_port())).unwrap();

    let keep_sending = AtomicBool::new(false);
    let (sent, _) = send_sequence(&mut push, 16, 1000, &keep_sending).unwrap();
    assert_eq!(sent, 0);
    push.close().unwrap();
}

#[test]
#[serial]
fn test_local_and_remote_end_to_end() {
    let endpoint = format!("tcp://127.0.0.1:{}", free_port());
    let bind_to = endpoint.clone();

    let receiver = thread::spawn(move || {
        let mut out = Vec::new();
        let code = run_local(["local_thr", bind_to.as_str(), "256", "1500", "/network", "3"], &mut out);
        (code, output(out))
    });

    // PUSH reconnects on its own until local_thr has bound
    let keep_sending = AtomicBool::new(true);
    let mut out = Vec::new();
    let code = run_remote(["remote_thr", endpoint.as_str(), "256", "1500"], &mut out, &keep_sending);
    println!("{}", output(out));
    assert_eq!(code, EXIT_OK);

    let (local_code, text) = receiver.join().unwrap();
    println!("{}", text);
    assert_eq!(local_code, EXIT_OK);
    assert!(text.contains("writer threads 3"));
    assert!(text.contains("message count: 1500"));
    assert_eq!(text.matches("[msg/s]  ").count(), 1);
}
