#![forbid(unsafe_code)]

//! Replay harness for padgrid.
//!
//! Feeds recorded touch traces through a [`ControlSession`] so interaction
//! behaviour can be checked without a device.
//!
//! ```sh
//! cargo run -p padgrid-harness -- layout.xml trace.jsonl
//! ```
//!
//! [`ControlSession`]: padgrid_runtime::ControlSession

pub mod trace_replay;

pub use trace_replay::{
    DEFAULT_VIEWPORT, ReplayError, ReplayFrame, ReplaySummary, TraceParseError, TraceRecord,
    parse_trace, replay, replay_files,
};
