#![forbid(unsafe_code)]

//! Declarative layout decoder.
//!
//! Builds exactly one [`Layout`] and one [`Mode`] from a document such as:
//!
//! ```xml
//! <layout title="Pad" width="4" height="3" mode="js">
//!   <button x="0" y="0" reset="true">Fire</button>
//!   <toggle x="1" y="0">Lights</toggle>
//!   <slider x="2" y="0" width="2" height="3" type="xy"/>
//!   <panel x="0" y="1" width="2" height="2"/>
//! </layout>
//! ```
//!
//! # Defaulting
//!
//! Missing, unparseable or out-of-range attributes fall back to their
//! defaults and the absolute value of numbers is used. Numbers are grid
//! cells and text sizes, so anything whose magnitude exceeds 65535 is out of
//! range. A grid dimension of zero becomes the 4x3 fallback. Unknown elements are skipped. These
//! corrections are logged at debug level and never fail the decode.
//!
//! # Failure
//!
//! Markup errors, a missing or foreign root element, and I/O failures abort
//! the whole decode with a [`DecodeError`]; no partial layout is returned.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use padgrid_core::geometry::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, GridSize};
use padgrid_layout::layout::{DEFAULT_DESCRIPTION, DEFAULT_TITLE};
use padgrid_layout::{
    Button, ExtraDetail, Item, Layout, Mode, ModeSpec, Orientation, Placement, Slider,
    ToggleButton, TouchPanel,
};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

const ROOT: &str = "layout";
const DEFAULT_BUTTON_TEXT: &str = "Button";
const DEFAULT_TOGGLE_TEXT: &str = "Toggle";

/// Why a layout could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Malformed markup or attributes.
    Xml { position: usize, message: String },
    /// The source could not be read.
    Io { message: String },
    /// The document has no root element.
    MissingRoot,
    /// The root element is not `layout`.
    UnexpectedRoot { name: String },
    /// The document ended inside an element.
    Unclosed { element: String },
    /// A background decode stopped without delivering a result.
    WorkerLost,
}

impl DecodeError {
    fn from_xml(err: quick_xml::Error, position: usize) -> Self {
        match err {
            quick_xml::Error::Io(io) => Self::Io {
                message: io.to_string(),
            },
            other => Self::Xml {
                position,
                message: other.to_string(),
            },
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml { position, message } => {
                write!(f, "malformed layout at byte {position}: {message}")
            }
            Self::Io { message } => write!(f, "failed to read layout: {message}"),
            Self::MissingRoot => write!(f, "layout document has no root element"),
            Self::UnexpectedRoot { name } => {
                write!(f, "expected <{ROOT}> root element, found <{name}>")
            }
            Self::Unclosed { element } => write!(f, "layout ended inside <{element}>"),
            Self::WorkerLost => write!(f, "background layout decode stopped unexpectedly"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decode a layout from a string.
///
/// # Errors
///
/// See the module documentation.
pub fn decode(text: &str) -> Result<ModeSpec, DecodeError> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);
    run(reader)
}

/// Decode a layout from any byte source.
///
/// # Errors
///
/// See the module documentation.
pub fn decode_reader<R: Read>(source: R) -> Result<ModeSpec, DecodeError> {
    let mut reader = Reader::from_reader(BufReader::new(source));
    reader.trim_text(true);
    run(reader)
}

/// Decode a layout file.
///
/// # Errors
///
/// Returns [`DecodeError::Io`] if the file cannot be opened, otherwise as
/// [`decode_reader`].
pub fn decode_file(path: impl AsRef<Path>) -> Result<ModeSpec, DecodeError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| DecodeError::Io {
        message: format!("{}: {err}", path.display()),
    })?;
    decode_reader(file)
}

/// Decode a layout, falling back to [`ModeSpec::default`] on failure.
pub fn decode_or_default(text: &str) -> ModeSpec {
    decode(text).unwrap_or_else(|_err| {
        padgrid_core::warn!(error = %_err, "layout decode failed; using default layout");
        ModeSpec::default()
    })
}

/// A decode running on a worker thread.
///
/// The worker publishes its result exactly once through a channel.
#[derive(Debug)]
pub struct PendingDecode {
    receiver: mpsc::Receiver<Result<ModeSpec, DecodeError>>,
    handle: Option<JoinHandle<()>>,
}

impl PendingDecode {
    /// Take the result if the worker has finished.
    ///
    /// Returns `None` while the decode is still running. After the result
    /// has been taken once, further calls report [`DecodeError::WorkerLost`].
    pub fn try_take(&mut self) -> Option<Result<ModeSpec, DecodeError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(DecodeError::WorkerLost)),
        }
    }

    /// Block until the worker delivers its result.
    ///
    /// # Errors
    ///
    /// The decode error, or [`DecodeError::WorkerLost`] if the worker died.
    pub fn wait(mut self) -> Result<ModeSpec, DecodeError> {
        let result = self.receiver.recv().unwrap_or(Err(DecodeError::WorkerLost));
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        result
    }
}

/// Decode `text` on a worker thread.
pub fn decode_in_background(text: String) -> PendingDecode {
    let (sender, receiver) = mpsc::channel();
    let worker_sender = sender.clone();
    let handle = thread::Builder::new()
        .name("padgrid-decode".into())
        .spawn(move || {
            let _ = worker_sender.send(decode(&text));
        });
    let handle = match handle {
        Ok(handle) => Some(handle),
        Err(err) => {
            let _ = sender.send(Err(DecodeError::Io {
                message: format!("failed to spawn decoder thread: {err}"),
            }));
            None
        }
    };
    PendingDecode { receiver, handle }
}

/// Map the root `mode` attribute to a mode and extra detail.
///
/// Matching is case-sensitive; anything unrecognised is a joystick layout.
pub fn resolve_mode(value: Option<&str>) -> (Mode, ExtraDetail) {
    match value {
        Some("js" | "joystick") => (Mode::Joystick, ExtraDetail::None),
        Some("mouse") => (Mode::Mouse, ExtraDetail::None),
        Some("absmouse" | "point" | "pointer") => (Mode::MouseAbsolute, ExtraDetail::MouseAbsolute),
        Some("trackpad" | "laptop") => (Mode::Mouse, ExtraDetail::MouseTrackpad),
        Some("slide" | "slideshow") => (Mode::Slideshow, ExtraDetail::None),
        Some(_other) => {
            padgrid_core::debug!(mode = _other, "unknown layout mode; using joystick");
            (Mode::Joystick, ExtraDetail::None)
        }
        None => (Mode::Joystick, ExtraDetail::None),
    }
}

/// Map a slider or panel `type` attribute to an orientation.
///
/// Matching ignores ASCII case; anything unrecognised reports both axes.
pub fn resolve_orientation(value: Option<&str>) -> Orientation {
    let Some(value) = value else {
        return Orientation::Both;
    };
    match value.to_ascii_lowercase().as_str() {
        "x" | "horizontal" => Orientation::X,
        "y" | "vertical" => Orientation::Y,
        "xy" | "both" | "dual" => Orientation::Both,
        _ => {
            padgrid_core::debug!(axis_type = value, "unknown axis type; using both");
            Orientation::Both
        }
    }
}

fn run<R: BufRead>(mut reader: Reader<R>) -> Result<ModeSpec, DecodeError> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("layout_decode");
    #[cfg(feature = "tracing")]
    let _guard = _span.enter();

    let mut state = DecodeState::default();
    let mut buf = Vec::new();
    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|err| DecodeError::from_xml(err, reader.buffer_position()))?;
        let position = reader.buffer_position();
        match event {
            Event::Start(start) => state.open(&start, position)?,
            Event::Empty(start) => {
                state.open(&start, position)?;
                state.close();
            }
            Event::End(_) => state.close(),
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|err| DecodeError::from_xml(err, position))?;
                state.text(&text, position)?;
            }
            Event::CData(data) => state.text(&String::from_utf8_lossy(&data), position)?,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    let spec = state.finish()?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        title = spec.layout().title(),
        mode = spec.mode().label(),
        items = spec.layout().len(),
        "layout decoded"
    );
    Ok(spec)
}

/// Attributes of one element, in document order.
struct Attrs(Vec<(String, String)>);

impl Attrs {
    fn read(start: &BytesStart<'_>, position: usize) -> Result<Self, DecodeError> {
        let mut pairs = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|err| DecodeError::Xml {
                position,
                message: err.to_string(),
            })?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|err| DecodeError::from_xml(err, position))?
                .into_owned();
            pairs.push((key, value));
        }
        Ok(Self(pairs))
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn text(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or(default).to_owned()
    }

    /// Non-negative integer attribute; the sign of the source is dropped.
    fn number(&self, name: &str, default: u16) -> u16 {
        let Some(raw) = self.get(name) else {
            return default;
        };
        let parsed = raw
            .parse::<i32>()
            .ok()
            .map(i32::unsigned_abs)
            .and_then(|v| u16::try_from(v).ok());
        match parsed {
            Some(value) => value,
            None => {
                padgrid_core::debug!(
                    attribute = name,
                    value = raw,
                    default,
                    "invalid number replaced by default"
                );
                default
            }
        }
    }

    fn flag(&self, name: &str) -> bool {
        self.get(name)
            .is_some_and(|raw| raw.eq_ignore_ascii_case("true") || raw == "1")
    }

    fn placement(&self) -> Placement {
        Placement::grid(
            self.number("x", 0),
            self.number("y", 0),
            self.number("width", 1),
            self.number("height", 1),
        )
    }
}

enum LabelKind {
    Button,
    Toggle,
}

/// A labelled item whose body text is still being read.
struct LabelDraft {
    kind: LabelKind,
    attrs: Attrs,
    text: String,
}

impl LabelDraft {
    fn build(self) -> Item {
        let placement = self.attrs.placement();
        let text_size = self.attrs.number("textSize", 0);
        let body = self.text.trim();
        match self.kind {
            LabelKind::Button => {
                let label = if body.is_empty() { DEFAULT_BUTTON_TEXT } else { body };
                Item::new(
                    placement,
                    Button::new(label)
                        .with_text_size(text_size)
                        .with_reset(self.attrs.flag("reset")),
                )
            }
            LabelKind::Toggle => {
                let label = if body.is_empty() { DEFAULT_TOGGLE_TEXT } else { body };
                Item::new(placement, ToggleButton::new(label).with_text_size(text_size))
            }
        }
    }
}

#[derive(Default)]
struct DecodeState {
    /// Names of currently open elements, outermost first.
    open: Vec<String>,
    root_seen: bool,
    spec: Option<ModeSpec>,
    draft: Option<LabelDraft>,
}

impl DecodeState {
    fn open(&mut self, start: &BytesStart<'_>, position: usize) -> Result<(), DecodeError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        match self.open.len() {
            0 => {
                if self.root_seen {
                    return Err(DecodeError::Xml {
                        position,
                        message: format!("unexpected element <{name}> after root element"),
                    });
                }
                self.root_seen = true;
                if name != ROOT {
                    return Err(DecodeError::UnexpectedRoot { name });
                }
                let attrs = Attrs::read(start, position)?;
                self.spec = Some(root_spec(&attrs));
            }
            1 => self.open_child(&name, start, position)?,
            _ => {}
        }
        self.open.push(name);
        Ok(())
    }

    fn open_child(
        &mut self,
        name: &str,
        start: &BytesStart<'_>,
        position: usize,
    ) -> Result<(), DecodeError> {
        let kind = match name {
            "button" => Some(LabelKind::Button),
            "toggle" => Some(LabelKind::Toggle),
            "slider" | "panel" => None,
            _ => {
                padgrid_core::debug!(element = name, "unknown layout element ignored");
                return Ok(());
            }
        };
        let attrs = Attrs::read(start, position)?;
        match kind {
            Some(kind) => {
                self.draft = Some(LabelDraft {
                    kind,
                    attrs,
                    text: String::new(),
                });
            }
            None => {
                let orientation = resolve_orientation(attrs.get("type"));
                let item = if name == "slider" {
                    Item::new(attrs.placement(), Slider::new(orientation))
                } else {
                    Item::new(attrs.placement(), TouchPanel::new(orientation))
                };
                self.push_item(item);
            }
        }
        Ok(())
    }

    fn close(&mut self) {
        self.open.pop();
        if self.open.len() == 1
            && let Some(draft) = self.draft.take()
        {
            let item = draft.build();
            self.push_item(item);
        }
    }

    fn text(&mut self, text: &str, position: usize) -> Result<(), DecodeError> {
        if self.open.is_empty() && !text.trim().is_empty() {
            return Err(DecodeError::Xml {
                position,
                message: "text outside the root element".to_owned(),
            });
        }
        if self.open.len() == 2
            && let Some(draft) = self.draft.as_mut()
        {
            draft.text.push_str(text);
        }
        Ok(())
    }

    fn push_item(&mut self, item: Item) {
        if let Some(spec) = self.spec.as_mut() {
            spec.layout_mut().push(item);
        }
    }

    fn finish(self) -> Result<ModeSpec, DecodeError> {
        if let Some(element) = self.open.last() {
            return Err(DecodeError::Unclosed {
                element: element.clone(),
            });
        }
        self.spec.ok_or(DecodeError::MissingRoot)
    }
}

fn root_spec(attrs: &Attrs) -> ModeSpec {
    let grid = GridSize::new(
        attrs.number("width", DEFAULT_GRID_WIDTH),
        attrs.number("height", DEFAULT_GRID_HEIGHT),
    );
    let (mode, extra_detail) = resolve_mode(attrs.get("mode"));
    let layout = Layout::new(grid)
        .with_title(attrs.text("title", DEFAULT_TITLE))
        .with_description(attrs.text("description", DEFAULT_DESCRIPTION))
        .with_landscape(attrs.flag("landscape"))
        .with_extra_detail(extra_detail);
    ModeSpec::new(mode, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use padgrid_layout::ItemKind;

    fn kinds(spec: &ModeSpec) -> Vec<&'static str> {
        spec.layout().iter().map(|i| i.kind().name()).collect()
    }

    #[test]
    fn decodes_basic_mouse_layout() {
        let spec = decode(
            r#"<layout title="T" width="5" height="4" mode="mouse"><button x="0" y="0" width="1" height="1">A</button></layout>"#,
        )
        .expect("decode");
        assert_eq!(spec.mode(), Mode::Mouse);
        let layout = spec.layout();
        assert_eq!(layout.title(), "T");
        assert_eq!(layout.grid(), GridSize::new(5, 4));
        assert_eq!(layout.len(), 1);
        match layout.get(0).map(Item::kind) {
            Some(ItemKind::Button(b)) => {
                assert_eq!(b.text(), "A");
                assert!(!b.is_reset());
            }
            other => panic!("unexpected item {other:?}"),
        }
        assert_eq!(
            *layout.get(0).expect("item").placement(),
            Placement::grid(0, 0, 1, 1)
        );
    }

    #[test]
    fn root_defaults() {
        let spec = decode("<layout/>").expect("decode");
        assert_eq!(spec.mode(), Mode::Joystick);
        assert_eq!(spec.layout().title(), "Custom");
        assert_eq!(spec.layout().description(), "Custom layout");
        assert_eq!(spec.layout().grid(), GridSize::new(4, 3));
        assert!(!spec.layout().is_landscape());
        assert!(spec.layout().is_empty());
    }

    #[test]
    fn bad_numbers_fall_back() {
        let spec = decode(r#"<layout width="abc" height="-6"/>"#).expect("decode");
        assert_eq!(spec.layout().grid(), GridSize::new(4, 6));
        let spec = decode(r#"<layout width="0" height="99999999999"/>"#).expect("decode");
        assert_eq!(spec.layout().grid(), GridSize::new(4, 3));
    }

    #[test]
    fn mode_aliases() {
        assert_eq!(resolve_mode(Some("js")), (Mode::Joystick, ExtraDetail::None));
        assert_eq!(resolve_mode(Some("joystick")).0, Mode::Joystick);
        assert_eq!(resolve_mode(Some("mouse")), (Mode::Mouse, ExtraDetail::None));
        for alias in ["absmouse", "point", "pointer"] {
            assert_eq!(
                resolve_mode(Some(alias)),
                (Mode::MouseAbsolute, ExtraDetail::MouseAbsolute)
            );
        }
        for alias in ["trackpad", "laptop"] {
            assert_eq!(
                resolve_mode(Some(alias)),
                (Mode::Mouse, ExtraDetail::MouseTrackpad)
            );
        }
        assert_eq!(resolve_mode(Some("slide")).0, Mode::Slideshow);
        assert_eq!(resolve_mode(Some("slideshow")).0, Mode::Slideshow);
        assert_eq!(resolve_mode(Some("Mouse")).0, Mode::Joystick);
        assert_eq!(resolve_mode(Some("racing")).0, Mode::Joystick);
        assert_eq!(resolve_mode(None).0, Mode::Joystick);
    }

    #[test]
    fn orientation_aliases_ignore_case() {
        assert_eq!(resolve_orientation(Some("X")), Orientation::X);
        assert_eq!(resolve_orientation(Some("Horizontal")), Orientation::X);
        assert_eq!(resolve_orientation(Some("vertical")), Orientation::Y);
        assert_eq!(resolve_orientation(Some("DUAL")), Orientation::Both);
        assert_eq!(resolve_orientation(Some("diagonal")), Orientation::Both);
        assert_eq!(resolve_orientation(None), Orientation::Both);
    }

    #[test]
    fn item_defaults_and_body_text() {
        let spec = decode(
            r#"<layout>
                <button/>
                <button reset="TRUE" textSize="-20">  Go  </button>
                <toggle reset="1"></toggle>
                <slider type="y"/>
                <panel x="1" y="2" width="0"/>
                <gauge x="1"/>
            </layout>"#,
        )
        .expect("decode");
        assert_eq!(kinds(&spec), vec!["button", "button", "toggle", "slider", "panel"]);
        let items: Vec<_> = spec.layout().iter().collect();
        match items[0].kind() {
            ItemKind::Button(b) => {
                assert_eq!(b.text(), "Button");
                assert_eq!(b.text_size(), 0);
            }
            other => panic!("unexpected {other:?}"),
        }
        match items[1].kind() {
            ItemKind::Button(b) => {
                assert_eq!(b.text(), "Go");
                assert!(b.is_reset());
                assert_eq!(b.text_size(), 20);
            }
            other => panic!("unexpected {other:?}"),
        }
        match items[2].kind() {
            ItemKind::Toggle(t) => assert_eq!(t.text(), "Toggle"),
            other => panic!("unexpected {other:?}"),
        }
        match items[3].kind() {
            ItemKind::Slider(s) => assert_eq!(s.orientation(), Orientation::Y),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(*items[4].placement(), Placement::grid(1, 2, 1, 1));
    }

    #[test]
    fn reset_flag_literals() {
        let spec = decode(
            r#"<layout><button reset="yes"/><button reset="1"/><button reset="True"/></layout>"#,
        )
        .expect("decode");
        let resets: Vec<bool> = spec
            .layout()
            .iter()
            .map(|i| match i.kind() {
                ItemKind::Button(b) => b.is_reset(),
                _ => false,
            })
            .collect();
        assert_eq!(resets, vec![false, true, true]);
    }

    #[test]
    fn numbers_past_cell_range_fall_back() {
        let spec = decode(
            r#"<layout><button x="70000" y="-3" width="65535" height="-65536"/></layout>"#,
        )
        .expect("decode");
        let items: Vec<&Item> = spec.layout().iter().collect();
        assert_eq!(*items[0].placement(), Placement::grid(0, 3, 65535, 1));
    }

    #[test]
    fn entities_and_cdata_in_body() {
        let spec = decode(
            "<layout><button>A &amp; B</button><toggle><![CDATA[<on>]]></toggle></layout>",
        )
        .expect("decode");
        let labels: Vec<String> = spec
            .layout()
            .iter()
            .map(|i| match i.kind() {
                ItemKind::Button(b) => b.text().to_owned(),
                ItemKind::Toggle(t) => t.text().to_owned(),
                _ => String::new(),
            })
            .collect();
        assert_eq!(labels, vec!["A & B", "<on>"]);
    }

    #[test]
    fn malformed_documents_fail() {
        assert_eq!(decode(""), Err(DecodeError::MissingRoot));
        assert_eq!(
            decode("<pad/>"),
            Err(DecodeError::UnexpectedRoot {
                name: "pad".into()
            })
        );
        assert_eq!(
            decode("<layout><button>"),
            Err(DecodeError::Unclosed {
                element: "button".into()
            })
        );
        assert!(matches!(
            decode("<layout></button>"),
            Err(DecodeError::Xml { .. })
        ));
        assert!(matches!(
            decode(r#"<layout title="x></layout>"#),
            Err(DecodeError::Xml { .. }) | Err(DecodeError::Unclosed { .. })
        ));
        assert!(matches!(
            decode("<layout/><layout/>"),
            Err(DecodeError::Xml { .. })
        ));
        assert!(matches!(
            decode("<layout/>garbage"),
            Err(DecodeError::Xml { .. })
        ));
        assert!(matches!(
            decode("garbage<layout/>"),
            Err(DecodeError::Xml { .. })
        ));
        assert!(decode("\n  <layout/>\n").is_ok());
    }

    #[test]
    fn decode_or_default_falls_back() {
        let spec = decode_or_default("<nope>");
        assert_eq!(spec, ModeSpec::default());
    }

    #[test]
    fn decode_reader_matches_decode() {
        let text = r#"<layout mode="slide"><toggle>A</toggle></layout>"#;
        let from_reader = decode_reader(text.as_bytes()).expect("decode");
        assert_eq!(from_reader, decode(text).expect("decode"));
    }

    #[test]
    fn decode_file_reports_missing_file() {
        let err = decode_file("/definitely/not/here.xml").unwrap_err();
        assert!(matches!(err, DecodeError::Io { .. }));
        assert!(err.to_string().contains("here.xml"));
    }

    #[test]
    fn background_decode_publishes_once() {
        let pending = decode_in_background(r#"<layout mode="pointer"/>"#.to_owned());
        let spec = pending.wait().expect("decode");
        assert_eq!(spec.mode(), Mode::MouseAbsolute);
        assert_eq!(spec.layout().extra_detail(), ExtraDetail::MouseAbsolute);
    }

    #[test]
    fn background_decode_try_take_eventually_yields() {
        let mut pending = decode_in_background("<bad".to_owned());
        let result = loop {
            if let Some(result) = pending.try_take() {
                break result;
            }
            std::thread::yield_now();
        };
        assert!(result.is_err());
    }
}
