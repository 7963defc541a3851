//! File-level replay tests.

use std::io::Write;

use padgrid_harness::{ReplayError, replay_files};
use padgrid_runtime::SessionConfig;

fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create");
    file.write_all(contents.as_bytes()).expect("write");
    path
}

const LAYOUT: &str = r#"<layout title="Stick" width="1" height="1" mode="js">
    <slider type="x"/>
</layout>"#;

const TRACE: &str = r#"{"kind":"viewport","width_px":100,"height_px":100,"density":1.0}
{"kind":"touch","phase":"down","action":{"id":0,"x":99,"y":50},"pointers":[{"id":0,"x":99,"y":50}]}
{"kind":"touch","phase":"up","action":{"id":0,"x":99,"y":50},"pointers":[{"id":0,"x":99,"y":50}]}
"#;

#[test]
fn replays_layout_and_trace_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let layout = write(&dir, "stick.xml", LAYOUT);
    let trace = write(&dir, "stick.jsonl", TRACE);

    let summary = replay_files(&layout, &trace, SessionConfig::default()).expect("replay");
    assert_eq!(summary.title, "Stick");
    assert_eq!(summary.mode, "joystick");
    assert_eq!(summary.frames.len(), 2);
    assert!(summary.frames[0].items[0].data1 > 0);
    assert_eq!(summary.frames[0].items[0].data2, 0);
    assert_eq!(summary.frames[1].items[0].data1, 0);
}

#[test]
fn fixed_axes_hold_position_after_release() {
    let dir = tempfile::tempdir().expect("tempdir");
    let layout = write(&dir, "stick.xml", LAYOUT);
    let trace = write(&dir, "stick.jsonl", TRACE);

    let config = SessionConfig::default().with_floating_axes(false);
    let summary = replay_files(&layout, &trace, config).expect("replay");
    assert_eq!(
        summary.frames[1].items[0].data1,
        summary.frames[0].items[0].data1
    );
}

#[test]
fn missing_trace_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let layout = write(&dir, "stick.xml", LAYOUT);
    let err = replay_files(&layout, &dir.path().join("absent.jsonl"), SessionConfig::default())
        .expect_err("missing file");
    assert!(matches!(err, ReplayError::Io(_)));
}

#[test]
fn malformed_layout_is_a_decode_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let layout = write(&dir, "broken.xml", "<layout><button></layout>");
    let trace = write(&dir, "t.jsonl", TRACE);
    let err = replay_files(&layout, &trace, SessionConfig::default()).expect_err("broken");
    assert!(matches!(err, ReplayError::Decode(_)));
    assert!(err.to_string().starts_with("layout: "));
}
