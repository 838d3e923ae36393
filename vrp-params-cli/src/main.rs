//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::init();
    if let Err(err) = vrp_params_cli::run() {
        eprintln!("vrp-params: {err}");
        std::process::exit(1);
    }
}
