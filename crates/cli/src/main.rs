//! depot — interactive shell for the Depot datastore client.
//!
//! Runs any `--run` startup commands in order, then reads command lines
//! from stdin (with a prompt on a terminal, silently in pipe mode):
//!
//! ```text
//! depot --run "/createDataStore myTestDS" --run "/storeKey myIntKey int 31337"
//! echo "restoreKey myIntKey int" | depot --store myTestDS
//! ```

use std::io::IsTerminal;
use std::process;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use depot_cli::shell::{self, Session};
use depot_cli::Command;
use depot_client::ClientConfig;

#[derive(Parser)]
#[command(name = "depot", version, about = "Versioned datastore client shell")]
struct Cli {
    /// Open this store (name or GUID) before reading commands.
    #[arg(long)]
    store: Option<String>,

    /// Per-operation deadline in milliseconds.
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Command line to run at startup; repeatable, runs in order.
    #[arg(long = "run", value_name = "LINE")]
    run: Vec<String>,

    /// Exit after the startup commands instead of reading stdin.
    #[arg(long)]
    no_input: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::new().timeout(Duration::from_millis(cli.timeout_ms));
    let mut session = Session::new(config);

    if let Some(store) = cli.store {
        match session
            .execute(Command::CreateDataStore { name_or_id: store })
            .await
        {
            Ok(report) => println!("{}", report),
            Err(e) => {
                eprintln!("(error) {}", e);
                process::exit(1);
            }
        }
    }

    if cli.no_input {
        for line in &cli.run {
            if session.run_line(line).await == depot_cli::LineOutcome::Quit {
                break;
            }
        }
        return;
    }

    let interactive = std::io::stdin().is_terminal();
    let exit_code = shell::run(&mut session, &cli.run, interactive).await;
    process::exit(exit_code);
}
