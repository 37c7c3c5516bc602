mod cli;
mod config;

use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use fileshell_shell::{Dispatcher, Outcome, Session};

use cli::Cli;
use config::ShellConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => ShellConfig::load_from(path)?,
        None => ShellConfig::load().unwrap_or_default(),
    };
    cfg.apply_cli(&cli);

    let start_dir = cfg.resolve_start_dir();
    tracing::info!(dir = %start_dir.display(), user = %cfg.username, "starting session");

    let session = Session::new(start_dir, cfg.username.clone());
    let mut dispatcher =
        Dispatcher::new(session, tokio::io::stdout()).with_chunk_size(cfg.chunk_size);

    let mut interrupt = interrupt_listener()?;
    dispatcher.greet().await?;
    run(
        &mut dispatcher,
        BufReader::new(tokio::io::stdin()),
        &mut tokio::io::stdout(),
        &cfg.prompt,
        &mut interrupt,
    )
    .await
}

/// Installs the Ctrl+C handler and returns a receiver that resolves once
/// an interrupt arrives.
///
/// The handler is installed before this returns, so an interrupt received
/// at any later point is kept until the loop looks at it.
fn interrupt_listener() -> std::io::Result<mpsc::Receiver<()>> {
    let (tx, rx) = mpsc::channel(1);

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            if sigint.recv().await.is_some() {
                let _ = tx.send(()).await;
            }
        });
    }

    #[cfg(not(unix))]
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = tx.send(()).await;
            }
            Err(e) => tracing::warn!(error = %e, "ctrl-c handler unavailable"),
        }
    });

    Ok(rx)
}

/// Reads lines until `.exit`, end-of-input or an interrupt. One line is
/// fully handled before the next is read; an interrupt that arrives while a
/// command runs ends the session once that command returns.
async fn run<R, P, W>(
    dispatcher: &mut Dispatcher<W>,
    input: R,
    prompt_out: &mut P,
    prompt: &str,
    interrupt: &mut mpsc::Receiver<()>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    P: AsyncWrite + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        let line = if interrupt.try_recv().is_ok() {
            None
        } else {
            prompt_out.write_all(prompt.as_bytes()).await?;
            prompt_out.flush().await?;

            tokio::select! {
                line = lines.next_line() => line?,
                Some(()) = interrupt.recv() => None,
            }
        };

        let Some(line) = line else {
            prompt_out.write_all(b"\n").await?;
            prompt_out.flush().await?;
            dispatcher.farewell().await?;
            break;
        };

        if dispatcher.handle_line(&line).await? == Outcome::Exit {
            break;
        }
    }

    tracing::info!("session ended");
    Ok(())
}
