//! Storefront CLI

use std::{io, process::ExitCode, sync::Arc};

use storefront_app::{
    context::AppContext,
    notices::{AssumeYes, ChannelNotifier, Confirm, StdinConfirm},
    observability,
};
use tracing::error;

use crate::cli::Cli;

mod cli;

#[tokio::main]
pub async fn main() -> ExitCode {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(error) => error.exit(),
    };

    if let Err(init_error) = observability::init(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, stderr is all that is left"
        )]
        {
            eprintln!("{init_error}");
        }

        return ExitCode::FAILURE;
    }

    let (notifier, mut notices) = ChannelNotifier::new();
    let confirm: Arc<dyn Confirm> = if cli.command.assume_yes() {
        Arc::new(AssumeYes)
    } else {
        Arc::new(StdinConfirm)
    };

    let ctx = match AppContext::from_config(&cli.client, Arc::new(notifier), confirm) {
        Ok(ctx) => ctx,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            return ExitCode::FAILURE;
        }
    };

    let result = cli.command.run(&ctx, &mut io::stdout()).await;

    while let Ok(notice) = notices.try_recv() {
        #[expect(clippy::print_stderr, reason = "notices are shown on stderr")]
        {
            eprintln!("{notice}");
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(command_error) => {
            error!("{command_error}");

            ExitCode::FAILURE
        }
    }
}
