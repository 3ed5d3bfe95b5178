use clap::Parser;
use tracing_subscriber::EnvFilter;

use fourwd_web_runtime::config::DEFAULT_PORT;
use fourwd_web_runtime::runtime::{self, Options};

/// HTTP drive control for a four-wheel differential robot
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Port for the HTTP interface
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Address to bind the listener to
    #[arg(long, default_value = "0.0.0.0")]
    bind: std::net::IpAddr,

    /// Use loopback pins instead of the GPIO controller
    #[arg(long)]
    no_hardware: bool,
}

#[tokio::main]
async fn main() {
    // Setup logging (set RUST_LOG=info or debug)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init(); // installs the subscriber globally

    let cli = Cli::parse();
    let opts = Options {
        bind: cli.bind,
        port: cli.port,
        hardware: !cli.no_hardware,
    };

    if let Err(e) = runtime::run(opts).await {
        eprintln!("Runtime error: {}", e);
        std::process::exit(1);
    }
}
