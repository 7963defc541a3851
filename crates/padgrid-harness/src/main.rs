#![forbid(unsafe_code)]

//! Trace replay command.
//!
//! ```sh
//! padgrid-harness <layout.xml> <trace.jsonl>
//! ```
//!
//! Prints one JSON object per replayed frame to stdout, or writes them to
//! the file named by `PADGRID_HARNESS_JSONL`. Log verbosity follows
//! `PADGRID_LOG` (an `EnvFilter` directive, default `warn`). Session
//! settings come from the `PADGRID_*` variables read by
//! [`SessionConfig::from_env`].

use std::io::{self, Write};
use std::path::PathBuf;

use padgrid_harness::trace_replay;
use padgrid_runtime::SessionConfig;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PADGRID_LOG";
const LAYOUT_ENV: &str = "PADGRID_HARNESS_LAYOUT";
const TRACE_ENV: &str = "PADGRID_HARNESS_TRACE";
const OUTPUT_ENV: &str = "PADGRID_HARNESS_JSONL";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Positional argument `index`, falling back to `env`.
fn input_path(args: &[String], index: usize, env: &str) -> Option<PathBuf> {
    args.get(index)
        .cloned()
        .or_else(|| std::env::var(env).ok())
        .map(PathBuf::from)
}

fn main() -> io::Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (Some(layout), Some(trace)) = (
        input_path(&args, 0, LAYOUT_ENV),
        input_path(&args, 1, TRACE_ENV),
    ) else {
        eprintln!("usage: padgrid-harness <layout.xml> <trace.jsonl>");
        std::process::exit(2);
    };

    let config = SessionConfig::from_env();
    let summary = match trace_replay::replay_files(&layout, &trace, config) {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("trace replay failed: {err}");
            std::process::exit(2);
        }
    };

    let mut jsonl = String::new();
    for frame in &summary.frames {
        let line = serde_json::to_string(frame).map_err(io::Error::other)?;
        jsonl.push_str(&line);
        jsonl.push('\n');
    }

    if let Ok(output_path) = std::env::var(OUTPUT_ENV) {
        std::fs::write(&output_path, jsonl.as_bytes())?;
    } else {
        io::stdout().lock().write_all(jsonl.as_bytes())?;
    }

    eprintln!(
        "trace replay OK: layout={:?} mode={} frames={}",
        summary.title,
        summary.mode,
        summary.frames.len()
    );
    Ok(())
}
