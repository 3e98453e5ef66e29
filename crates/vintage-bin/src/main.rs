//! Vintage entrypoint: replays a vi command script against a text file and
//! prints the resulting text, selection and mode label.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{EngineSettings, ModalEngine, vi_view};
use core_model::{Host, MemoryView};
use core_state::KillRing;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

mod script;

const LOG_FILE: &str = "vintage.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "vintage", version, about = "Replay vi command scripts against a text file")]
struct Args {
    /// Text file the script runs against. It is never written back.
    pub path: PathBuf,
    /// Replay script (TOML `[[step]]` list).
    #[arg(long = "script")]
    pub script: PathBuf,
    /// Optional configuration file path (overrides discovery of `vintage.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// Final state of the view in a stable, line-oriented form.
fn render_summary(view: &MemoryView, status_key: &str) -> String {
    let mut out = String::new();
    out.push_str(&view.text());
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("--\nselection:");
    for r in view.selection().iter() {
        let _ = write!(out, " ({}, {})", r.a, r.b);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "status: {}", view.status(status_key).unwrap_or(""));
    let _ = writeln!(out, "undo depth: {}", view.undo_engine().undo_depth());
    out
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let config = core_config::load_from(args.config.clone())?;
    let text = std::fs::read_to_string(&args.path)
        .with_context(|| format!("read {}", args.path.display()))?;
    let source = std::fs::read_to_string(&args.script)
        .with_context(|| format!("read {}", args.script.display()))?;
    let script = script::parse(&source)?;

    let name = args
        .path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("file");
    let mut view = vi_view(name, &text)
        .with_kill_ring(KillRing::with_capacity(config.kill_ring().capacity));
    let mut engine = ModalEngine::with_settings(EngineSettings::from(config.engine()));
    engine.attach(&mut view);
    engine.on_load(&mut view)?;

    let report = script::replay(&mut engine, &mut view, &script.steps);
    info!(
        target: "runtime",
        steps = script.steps.len(),
        applied = report.applied,
        failed = report.failed,
        "replay_complete"
    );

    print!("{}", render_summary(&view, &engine.settings().status_key));
    engine.unload([&mut view as &mut dyn Host]);
    if report.failed > 0 {
        eprintln!("{} of {} steps failed", report.failed, script.steps.len());
    }
    Ok(())
}
