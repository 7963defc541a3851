//! Facade smoke tests: the prelude is enough to load and drive a layout.

#![cfg(all(feature = "format", feature = "runtime"))]

use padgrid::prelude::*;
use padgrid::runtime::RecordingPublisher;

fn load(xml: &str) -> padgrid::Result<ModeSpec> {
    Ok(padgrid::decode(xml)?)
}

#[test]
fn decode_round_trip_through_facade() {
    let spec = load(
        r#"<layout title="T" width="5" height="4" mode="mouse"><button x="0" y="0" width="1" height="1">A</button></layout>"#,
    )
    .expect("decode");
    assert_eq!(spec.mode(), Mode::Mouse);
    assert_eq!(spec.layout().title(), "T");
    assert_eq!(
        (spec.layout().grid().width(), spec.layout().grid().height()),
        (5, 4)
    );
    assert_eq!(spec.layout().len(), 1);
    let item = spec.layout().get(0).expect("one item");
    assert_eq!(item.placement(), &Placement::grid(0, 0, 1, 1));
    match item.kind() {
        padgrid::ItemKind::Button(button) => assert_eq!(button.text(), "A"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn decode_errors_convert_into_facade_error() {
    let err = load("<layout>").expect_err("unclosed root");
    assert!(matches!(err, Error::Decode(_)));
    assert!(!err.to_string().is_empty());
}

#[test]
fn layout_errors_convert_into_facade_error() {
    let err: Error = Placement::free(0.0, 0.0, -1.0, 1.0)
        .expect_err("negative span")
        .into();
    assert!(matches!(err, Error::Layout(_)));
}

#[test]
fn prelude_drives_a_session() {
    let spec = load(r#"<layout width="1" height="1"><button>Go</button></layout>"#).expect("decode");
    let mut session = ControlSession::new(
        spec,
        SessionConfig::default(),
        Viewport::new(100.0, 100.0, 1.0),
        RecordingPublisher::new(),
    );
    let mut tracker = PointerTracker::new();
    session.handle(&tracker.press(0, 50.0, 50.0));
    assert_eq!(session.publisher().data1_history(0), vec![0, 1]);
}
