use dmxp_diskthr::Harness::cli;

fn main() {
    dmxp_diskthr::logging::init_logging();
    let code = cli::run_local(std::env::args_os(), &mut std::io::stdout());
    std::process::exit(code);
}
