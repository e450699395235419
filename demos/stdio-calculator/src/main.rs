//! # Stdio Calculator
//!
//! Reads one JSON-RPC 2.0 document per line from stdin and writes one response
//! line per document to stdout. Notifications and notification-only batches
//! produce no output line. Logs go to stderr.
//!
//! ## Usage
//! ```bash
//! echo '{"jsonrpc": "2.0", "method": "subtract", "params": [42, 23], "id": 1}' \
//!   | cargo run --package stdio-calculator
//!
//! cargo run --package stdio-calculator -- --config demos/stdio-calculator/calculator.toml
//! ```
//!
//! ## Methods
//! - `subtract(subtrahend, minuend)`
//! - `sum(...)` variadic
//! - `get_data()` returns `["hello", 5]`
//! - `update(...)`, `notify_hello(...)` notification sinks

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use plexrpc_protocol::JsonRpcError;
use plexrpc_server::{
    AsyncMethodRegistry, AsyncRequestDispatcher, CallArgs, DispatcherConfig, HandlerError, HandlerResult,
};
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with dispatcher settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Reject batches longer than this
    #[arg(long)]
    max_batch_len: Option<usize>,

    /// Run batch elements one after another
    #[arg(long, default_value = "false")]
    sequential: bool,
}

fn load_config(path: Option<&Path>) -> Result<DispatcherConfig> {
    let Some(path) = path else {
        return Ok(DispatcherConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
}

/// Integer arithmetic when every operand is an integer, floating point otherwise
fn subtract(args: &CallArgs) -> HandlerResult {
    match (args.require(0)?.as_i64(), args.require(1)?.as_i64()) {
        (Some(subtrahend), Some(minuend)) => subtrahend
            .checked_sub(minuend)
            .map(|difference| json!(difference))
            .ok_or_else(|| HandlerError::invalid_params("integer overflow")),
        _ => Ok(json!(args.f64_at(0)? - args.f64_at(1)?)),
    }
}

fn sum(args: &CallArgs) -> HandlerResult {
    if args.iter().all(|value| value.as_i64().is_some()) {
        let mut total: i64 = 0;
        for index in 0..args.len() {
            total = total
                .checked_add(args.i64_at(index)?)
                .ok_or_else(|| HandlerError::invalid_params("integer overflow"))?;
        }
        return Ok(json!(total));
    }

    let mut total = 0.0;
    for index in 0..args.len() {
        total += args.f64_at(index)?;
    }
    Ok(json!(total))
}

fn calculator() -> AsyncMethodRegistry {
    let mut registry = AsyncMethodRegistry::new();

    registry.register_async("subtract", &["subtrahend", "minuend"], |args: CallArgs| async move {
        subtract(&args)
    });

    registry.register_variadic_async("sum", |args: CallArgs| async move { sum(&args) });

    registry.register_async("get_data", &[], |_args: CallArgs| async move { Ok(json!(["hello", 5])) });

    registry.register_variadic_async("update", |args: CallArgs| async move {
        info!(values = ?args.as_slice(), "update received");
        Ok(Value::Null)
    });

    registry.register_variadic_async("notify_hello", |args: CallArgs| async move {
        info!(values = ?args.as_slice(), "hello received");
        Ok(Value::Null)
    });

    registry
}

/// Answer every input line until EOF. Only I/O failures end the loop.
async fn serve<R, W>(dispatcher: &AsyncRequestDispatcher, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await.context("reading input")? == 0 {
            return Ok(());
        }

        let reply = match std::str::from_utf8(&line) {
            Ok(text) if text.trim().is_empty() => continue,
            Ok(text) => dispatcher.respond(text.trim()).await?,
            Err(err) => {
                warn!(error = %err, "Input line is not valid UTF-8");
                Some(serde_json::to_string(&JsonRpcError::parse_error())?)
            }
        };

        match reply {
            Some(reply) => {
                writer.write_all(reply.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
            None => debug!("no response owed"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(max) = args.max_batch_len {
        config.max_batch_len = Some(max);
    }
    if args.sequential {
        config.concurrent_batches = false;
    }

    let dispatcher = AsyncRequestDispatcher::new(calculator()).with_config(config);
    info!(methods = ?dispatcher.registry().methods(), "stdio calculator ready");

    serve(&dispatcher, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;

    info!("stdin closed, shutting down");
    Ok(())
}
