//! urlstat - fetch a list of URLs concurrently and report response times

use std::io;
use std::process;
use urlstat::{cli::Cli, config::load_config, error::Result, App};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(99);
    }));

    let cli = Cli::parse_args();

    if let Err(e) = run_application(cli).await {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    let config = load_config(cli)?;
    let app = App::new(config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    app.run(&mut out).await?;

    Ok(())
}
