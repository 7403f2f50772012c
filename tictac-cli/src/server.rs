//! Serve command - host the browser game and its JSON API
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: check_page_dir(), check_reply_delay()
//! - Level 4: (router and handlers live in tictac-server)

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use tictac_server::{run_server, ServerConfig};

/// Page the browser loads from the static directory
const PAGE_FILE: &str = "index.html";

/// Longest pause the computer may take before replying
const MAX_REPLY_DELAY_MS: u64 = 10_000;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "8003")]
    pub port: u16,

    /// Directory holding the board page (index.html)
    #[arg(long, default_value = "web")]
    pub static_dir: PathBuf,

    /// Pause before the computer replies, in milliseconds
    #[arg(long, default_value = "500")]
    pub delay_ms: u64,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run serve command
pub fn run(args: ServerArgs) -> Result<()> {
    let config = configure_server(&args)?;

    tracing::info!(
        "Serving tictac on port {} (computer replies after {} ms)",
        config.port,
        config.ai_delay_ms
    );

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn configure_server(args: &ServerArgs) -> Result<ServerConfig> {
    check_page_dir(&args.static_dir)?;
    check_reply_delay(args.delay_ms)?;

    Ok(ServerConfig {
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().to_string(),
        ai_delay_ms: args.delay_ms,
    })
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_server(config))
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// A missing page only disables the board; a file in its place is a mistake
fn check_page_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        tracing::warn!(
            "Page directory {} not found: the game API is up but there is no board to click",
            dir.display()
        );
    } else if !dir.is_dir() {
        anyhow::bail!("Page directory {} is a file, not a directory", dir.display());
    } else if !dir.join(PAGE_FILE).is_file() {
        tracing::warn!("No {} in {}: browsers will get 404", PAGE_FILE, dir.display());
    }

    Ok(())
}

fn check_reply_delay(delay_ms: u64) -> Result<()> {
    if delay_ms > MAX_REPLY_DELAY_MS {
        anyhow::bail!(
            "Computer reply delay {} ms exceeds the {} ms limit",
            delay_ms,
            MAX_REPLY_DELAY_MS
        );
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
