use quickdl_core::logging;

mod cli;
mod shutdown;

use crate::cli::CliCommand;
use crate::shutdown::ExitSignals;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    let run = CliCommand::run_from_args();
    tokio::pin!(run);

    let result = match ExitSignals::install() {
        Ok(mut signals) => {
            tokio::select! {
                res = &mut run => res,
                sig = signals.recv() => {
                    tracing::info!("Received exit signal {}...", sig.name());
                    tracing::info!("Cancelling outstanding download work");
                    // A progress frame may be mid-line.
                    eprintln!();
                    eprintln!("quickdl: interrupted by {}", sig.name());
                    std::process::exit(sig.exit_code());
                }
            }
        }
        Err(e) => {
            tracing::warn!("could not install exit signal handlers: {}", e);
            run.await
        }
    };

    if let Err(err) = result {
        eprintln!("quickdl error: {:#}", err);
        std::process::exit(1);
    }
}
