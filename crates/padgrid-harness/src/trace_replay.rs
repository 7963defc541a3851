#![forbid(unsafe_code)]

//! Deterministic replay of recorded touch traces.
//!
//! A trace is JSON Lines. Each record carries a `kind` tag:
//!
//! ```text
//! {"kind":"viewport","width_px":1080,"height_px":1920,"density":2.0}
//! {"kind":"touch","phase":"down","action":{"id":0,"x":10,"y":20},"pointers":[{"id":0,"x":10,"y":20}]}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Replaying a trace
//! yields one [`ReplayFrame`] per touch record, holding the items exactly
//! as they were published for that event.

use std::cell::Cell;
use std::fmt;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use padgrid_core::event::TouchEvent;
use padgrid_core::geometry::Viewport;
use padgrid_format::DecodeError;
use padgrid_layout::{Encoded, ModeSpec};
use padgrid_runtime::{ControlSession, FrameReport, RecordingPublisher, SessionConfig};
use serde::{Deserialize, Serialize};

/// Viewport in effect before the first `viewport` record.
pub const DEFAULT_VIEWPORT: Viewport = Viewport::new(1080.0, 1920.0, 1.0);

/// One line of a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceRecord {
    Viewport(Viewport),
    Touch(TouchEvent),
}

/// A trace line that is not a valid record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceParseError {
    /// 1-based line number.
    pub line: usize,
    pub message: String,
}

impl fmt::Display for TraceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trace line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for TraceParseError {}

/// Anything that stops a replay.
#[derive(Debug)]
pub enum ReplayError {
    Io(io::Error),
    Parse(TraceParseError),
    Decode(DecodeError),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Parse(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "layout: {err}"),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Decode(err) => Some(err),
        }
    }
}

impl From<io::Error> for ReplayError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<TraceParseError> for ReplayError {
    fn from(err: TraceParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<DecodeError> for ReplayError {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

/// Read every record from `reader`.
pub fn parse_trace<R: BufRead>(reader: R) -> Result<Vec<TraceRecord>, ReplayError> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let record = serde_json::from_str(trimmed).map_err(|err| TraceParseError {
            line: index + 1,
            message: err.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Published state after one touch record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayFrame {
    #[serde(flatten)]
    pub report: FrameReport,
    pub items: Vec<Encoded>,
}

/// Outcome of a full replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub title: String,
    pub mode: &'static str,
    pub frames: Vec<ReplayFrame>,
    pub viewport_changes: usize,
}

/// Drive `spec` with every record in order.
pub fn replay(spec: ModeSpec, records: &[TraceRecord], config: SessionConfig) -> ReplaySummary {
    let viewport = Cell::new(DEFAULT_VIEWPORT);
    let mut session = ControlSession::new(spec, config, &viewport, RecordingPublisher::new());
    let mut frames = Vec::new();
    let mut viewport_changes = 0;

    for record in records {
        match record {
            TraceRecord::Viewport(next) => {
                tracing::debug!(
                    width = next.width_px,
                    height = next.height_px,
                    density = next.density,
                    "viewport changed"
                );
                viewport.set(*next);
                viewport_changes += 1;
            }
            TraceRecord::Touch(event) => {
                let report = session.handle(event);
                let items = session
                    .publisher()
                    .last()
                    .map(<[Encoded]>::to_vec)
                    .unwrap_or_default();
                frames.push(ReplayFrame { report, items });
            }
        }
    }

    tracing::info!(
        frames = frames.len(),
        viewport_changes,
        "trace replay finished"
    );

    ReplaySummary {
        title: session.layout().title().to_owned(),
        mode: session.mode().label(),
        frames,
        viewport_changes,
    }
}

/// Decode `layout_path`, then replay the trace at `trace_path`.
pub fn replay_files(
    layout_path: &Path,
    trace_path: &Path,
    config: SessionConfig,
) -> Result<ReplaySummary, ReplayError> {
    let spec = padgrid_format::decode_file(layout_path)?;
    let file = std::fs::File::open(trace_path)?;
    let records = parse_trace(BufReader::new(file))?;
    Ok(replay(spec, &records, config))
}
