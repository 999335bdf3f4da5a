//! Notice delivery and confirmation prompts.

use async_trait::async_trait;
use mockall::automock;
use storefront::notices::Notice;
use tokio::{
    io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader},
    sync::mpsc,
};
use tracing::debug;

/// Sink for transient user-facing notices.
#[automock]
pub trait Notifier: Send + Sync {
    /// Deliver a notice.
    fn notify(&self, notice: Notice);
}

/// Notifier backed by an unbounded channel; the UI drains the receiver.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    /// Notifier plus the receiving end of its channel.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        if self.tx.send(notice).is_err() {
            debug!("notice receiver dropped");
        }
    }
}

/// Asks the user to confirm a destructive action.
#[automock]
#[async_trait]
pub trait Confirm: Send + Sync {
    /// Whether the user accepted `prompt`.
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Accepts every prompt, for `--yes`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

#[async_trait]
impl Confirm for AssumeYes {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Prompts on stderr and reads a `y`/`yes` answer from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        match ask(prompt).await {
            Ok(answer) => is_yes(&answer),
            Err(error) => {
                debug!(%error, "confirmation prompt failed");

                false
            }
        }
    }
}

async fn ask(prompt: &str) -> io::Result<String> {
    let mut stderr = io::stderr();

    stderr.write_all(format!("{prompt} [y/N] ").as_bytes()).await?;
    stderr.flush().await?;

    let mut answer = String::new();
    BufReader::new(io::stdin()).read_line(&mut answer).await?;

    Ok(answer)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
