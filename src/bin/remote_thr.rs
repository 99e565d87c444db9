use dmxp_diskthr::Harness::cli;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn main() {
    dmxp_diskthr::logging::init_logging();

    let keep_sending = Arc::new(AtomicBool::new(true));
    let keep_sending_for_handler = Arc::clone(&keep_sending);

    // Ctrl+C stops sending; the summary is still printed
    if let Err(e) = ctrlc::set_handler(move || {
        keep_sending_for_handler.store(false, Ordering::SeqCst);
    }) {
        tracing::warn!("Error setting Ctrl+C handler: {}", e);
    }

    let code = cli::run_remote(std::env::args_os(), &mut std::io::stdout(), &keep_sending);
    std::process::exit(code);
}
