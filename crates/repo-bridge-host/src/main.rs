//! repo-bridge host: entry point.
//!
//! Runs the host side of the bridge as a headless process.  The embedded
//! module's invocations arrive as JSON lines on stdin and their completion
//! signals leave as JSON lines on stdout.  Logs go to stderr so they never
//! interleave with responses.
//!
//! # Usage
//!
//! ```text
//! repo-bridge-host [OPTIONS]
//!
//! Options:
//!   --config <PATH>       TOML config file [default: repo-bridge.toml]
//!   --channel <NAME>      Channel label shown in logs (overrides the config file)
//!   --launch-on-start     Ask the surface manager to show the module at startup
//! ```
//!
//! | Variable             | Description                                   |
//! |----------------------|-----------------------------------------------|
//! | `REPO_BRIDGE_CONFIG` | Config file path (same as `--config`)         |
//! | `RUST_LOG`           | Log filter; wins over `[logging] level`       |
//!
//! # Wiring
//!
//! ```text
//! main()
//!  ├─ load_config()                 HostConfig (file + CLI overrides)
//!  ├─ SelectionStore::channel()     one writer, many readers
//!  ├─ BridgeDispatcher              owns the writer
//!  ├─ RepoViewModel                 mirrors the store for rendering
//!  │    └─ render task              logs a RepoDetailDto on every change
//!  └─ run_channel_lines(stdin, stdout)  until EOF or Ctrl+C
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use repo_bridge_host::application::{BridgeDispatcher, SelectionStore};
use repo_bridge_host::infrastructure::channel::{run_channel_lines, spawn_stdin_reader};
use repo_bridge_host::infrastructure::storage::config::{load_config, HostConfig};
use repo_bridge_host::infrastructure::surface::{LoggingSurfaceManager, SurfaceManager};
use repo_bridge_host::infrastructure::ui_bridge::{RepoDetailDto, RepoViewModel};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Host side of the repo-bridge.
#[derive(Debug, Parser)]
#[command(
    name = "repo-bridge-host",
    about = "Serves repository selections from an embedded module over stdin/stdout",
    version
)]
struct Cli {
    /// Path of the TOML config file.  A missing file means defaults.
    #[arg(long, default_value = "repo-bridge.toml", env = "REPO_BRIDGE_CONFIG")]
    config: PathBuf,

    /// Channel label used in logs; overrides `[bridge] channel`.
    #[arg(long)]
    channel: Option<String>,

    /// Request the module surface as soon as the host is ready.
    #[arg(long)]
    launch_on_start: bool,
}

impl Cli {
    /// Applies CLI overrides on top of the file configuration.
    fn merge_into(self, mut config: HostConfig) -> HostConfig {
        if let Some(channel) = self.channel {
            config.bridge.channel = channel;
        }
        config
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let launch_on_start = cli.launch_on_start;
    let file_config = load_config(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    let config = cli.merge_into(file_config);

    // `RUST_LOG` wins; otherwise the configured level.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.logging.level))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("repo-bridge host starting on channel `{}`", config.bridge.channel);

    let routes = config
        .bridge
        .routes()
        .context("invalid [bridge] section in config")?;

    // ── Core wiring ───────────────────────────────────────────────────────────
    let (writer, store) = SelectionStore::channel();
    let surfaces: Arc<dyn SurfaceManager> = Arc::new(LoggingSurfaceManager::new());
    let dispatcher = BridgeDispatcher::with_routes(writer, Arc::clone(&surfaces), routes);
    let mut view_model = RepoViewModel::new(&store, Arc::clone(&surfaces));

    if launch_on_start {
        view_model.request_launch();
    }

    // ── Render task ───────────────────────────────────────────────────────────
    let mut selected = view_model.selected();
    let render = tokio::spawn(async move {
        while selected.changed().await.is_ok() {
            let detail = selected
                .borrow_and_update()
                .as_deref()
                .map(RepoDetailDto::from);
            match detail {
                Some(detail) => match serde_json::to_string(&detail) {
                    Ok(json) => info!("render {json}"),
                    Err(e) => warn!("failed to serialise detail view: {e}"),
                },
                None => info!("render: no repository selected"),
            }
        }
    });

    // ── Channel loop ──────────────────────────────────────────────────────────
    // stdin is read on its own thread so Ctrl+C never waits for a pending read.
    let stdin = spawn_stdin_reader().context("failed to start stdin reader")?;
    let stdout = tokio::io::stdout();

    tokio::select! {
        result = run_channel_lines(stdin, stdout, &dispatcher) => {
            let stats = result.context("channel I/O failed")?;
            info!(
                "input closed after {} responses ({} malformed)",
                stats.responses, stats.malformed
            );
        }
        signal = tokio::signal::ctrl_c() => match signal {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => error!("failed to listen for Ctrl+C signal: {e}"),
        },
    }

    // Stopping the mirror closes the watch channel, which ends the render task.
    view_model.shutdown().await;
    let _ = render.await;

    info!("repo-bridge host stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
