//! Assistant X - Main entry point
//!
//! Reads commands from stdin, one per line, until `close`/`exit`, end of
//! input or Ctrl-C.

use anyhow::Result;
use assistant_x::{BookStore, Config, FileStore, Session};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "Enter a command: ";

/// Write out changes left in memory by a failed save.
async fn flush_before_exit(session: &mut Session, stdout: &mut Stdout) -> Result<()> {
    if let Err(e) = session.flush().await {
        error!(error = %e, "Failed to save address book before exit");
        let message = format!("\nFailed to save the address book: {}", e);
        stdout.write_all(message.as_bytes()).await?;
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration first: LOG_LEVEL feeds the log filter
    let config = Config::from_env();
    let level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());

    // Initialize logging (stderr only to keep stdout for the conversation)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(path = %config.book_path.display(), "Using address book file");
    let store = Arc::new(FileStore::new(config.book_path.clone())) as Arc<dyn BookStore>;
    let mut session = Session::open(store, &config).await;

    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Welcome to the assistant bot!\n").await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut ctrl_c => {
                info!("Interrupted");
                flush_before_exit(&mut session, &mut stdout).await?;
                stdout.write_all(b"\nGoodbye!\n").await?;
                break;
            }
        };
        let Some(line) = line else {
            info!("End of input");
            flush_before_exit(&mut session, &mut stdout).await?;
            stdout.write_all(b"\nGoodbye!\n").await?;
            break;
        };

        let reply = session.execute(&line).await;
        if !reply.text.is_empty() {
            stdout.write_all(reply.text.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
        if reply.exit {
            break;
        }
    }

    stdout.flush().await?;
    info!("Assistant X shutdown complete");
    Ok(())
}
