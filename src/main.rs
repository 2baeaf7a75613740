use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mailgun_step::step::{self, RawSettings};

#[derive(Parser, Debug)]
#[command(name = "mailgun-step")]
#[command(version, about = "Send a build notification email through Mailgun", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: RawSettings,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match step::run(cli.settings).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "step failed");
            ExitCode::FAILURE
        }
    }
}
