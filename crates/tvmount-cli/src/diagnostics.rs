use std::backtrace::Backtrace;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Mutex, Once, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

const CONSOLE_FILTER: &str = "warn";
const DIAGNOSTICS_FILTER: &str = "debug";

static HOOK_ONCE: Once = Once::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Logging for one process run.
///
/// Without `--diagnostics`, tracing events at `warn` and above (or whatever
/// `RUST_LOG` selects) go to stderr. With it, every event down to `debug` is
/// written to `<epoch_ms>.log` under the config directory, panics included.
pub struct DiagnosticsSession {
    path: Option<PathBuf>,
}

impl DiagnosticsSession {
    pub fn initialize(enabled: bool) -> Result<Self> {
        if !enabled {
            install_subscriber(CONSOLE_FILTER, None);
            install_panic_hook();
            return Ok(Self { path: None });
        }

        let path = create_diagnostics_log_path()?;
        let file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&path)
            .with_context(|| format!("failed to create diagnostics log at {}", path.display()))?;

        install_subscriber(DIAGNOSTICS_FILTER, Some(file));
        let _ = LOG_PATH.set(path.clone());
        install_panic_hook();

        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            pid = std::process::id(),
            argv = ?std::env::args().collect::<Vec<String>>(),
            "tvmount diagnostics start"
        );

        Ok(Self { path: Some(path) })
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}

fn install_subscriber(default_filter: &str, file: Option<std::fs::File>) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // try_init fails only when a subscriber is already installed in this process.
    let _ = match file {
        Some(file) => builder
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init(),
        None => builder
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init(),
    };
}

fn install_panic_hook() {
    HOOK_ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|panic_info| {
            let location = panic_info
                .location()
                .map(|value| format!("{}:{}:{}", value.file(), value.line(), value.column()))
                .unwrap_or_else(|| "unknown".to_string());

            tracing::error!(
                payload = %panic_payload(panic_info),
                %location,
                backtrace = ?Backtrace::force_capture(),
                "panic captured"
            );

            eprintln!("Fatal internal error in tvmount.");
            match LOG_PATH.get() {
                Some(path) => eprintln!("Diagnostics written to {}", path.display()),
                None => eprintln!("Run `tvmount --diagnostics` to capture a diagnostics log."),
            }
        }));
    });
}

fn panic_payload(panic_info: &std::panic::PanicHookInfo<'_>) -> String {
    if let Some(payload) = panic_info.payload().downcast_ref::<&str>() {
        return (*payload).to_string();
    }
    if let Some(payload) = panic_info.payload().downcast_ref::<String>() {
        return payload.clone();
    }
    "unknown panic payload".to_string()
}

fn create_diagnostics_log_path() -> Result<PathBuf> {
    let config_path = tvmount_core::config::resolve_config_path()
        .context("failed to resolve tvmount config path for diagnostics")?;
    let config_dir = config_path.parent().ok_or_else(|| {
        anyhow!(
            "failed to resolve diagnostics directory from config path {}",
            config_path.display()
        )
    })?;

    let diagnostics_dir = config_dir.join("diagnostics");
    fs::create_dir_all(&diagnostics_dir).with_context(|| {
        format!(
            "failed to create diagnostics directory {}",
            diagnostics_dir.display()
        )
    })?;

    let started = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    Ok(diagnostics_dir.join(format!("{started}.log")))
}
