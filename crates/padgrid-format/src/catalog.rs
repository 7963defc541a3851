#![forbid(unsafe_code)]

//! A library of layouts loaded from a directory, grouped the way the host
//! presents them: joystick, mouse and slideshow layouts.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use padgrid_layout::{ExtraDetail, Mode, ModeSpec};

use crate::decoder::{DecodeError, decode_file};

/// Host grouping of layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Joystick,
    /// Relative and absolute mouse layouts.
    Mouse,
    Slideshow,
}

impl Category {
    pub const ALL: [Category; 3] = [Self::Joystick, Self::Mouse, Self::Slideshow];

    /// Category a decoded mode is listed under.
    pub const fn of(mode: Mode) -> Self {
        match mode {
            Mode::Joystick => Self::Joystick,
            Mode::Mouse | Mode::MouseAbsolute => Self::Mouse,
            Mode::Slideshow => Self::Slideshow,
        }
    }

    /// Mode a layout runs in when picked from this category.
    pub const fn mode(self) -> Mode {
        match self {
            Self::Joystick => Mode::Joystick,
            Self::Mouse => Mode::Mouse,
            Self::Slideshow => Mode::Slideshow,
        }
    }
}

/// A decoded layout file.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    name: String,
    path: Option<PathBuf>,
    spec: ModeSpec,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, spec: ModeSpec) -> Self {
        Self {
            name: name.into(),
            path: None,
            spec,
        }
    }

    /// File stem, or the name given to [`CatalogEntry::new`].
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn title(&self) -> &str {
        self.spec.layout().title()
    }

    pub fn description(&self) -> &str {
        self.spec.layout().description()
    }

    pub fn category(&self) -> Category {
        Category::of(self.spec.mode())
    }

    pub fn spec(&self) -> &ModeSpec {
        &self.spec
    }

    /// A fresh spec for running this layout from `category`.
    ///
    /// The mode is the category's mode, except that absolute-pointer
    /// layouts always run as [`Mode::MouseAbsolute`].
    pub fn select(&self, category: Category) -> ModeSpec {
        let mode = if self.spec.layout().extra_detail() == ExtraDetail::MouseAbsolute {
            Mode::MouseAbsolute
        } else {
            category.mode()
        };
        self.spec.clone().with_mode(mode)
    }
}

/// A layout file that could not be decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogIssue {
    pub path: PathBuf,
    pub error: DecodeError,
}

/// The layout directory could not be listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogError {
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot read layout directory {}: {}",
            self.path.display(),
            self.message
        )
    }
}

impl std::error::Error for CatalogError {}

/// Decoded layouts plus the files that failed.
#[derive(Debug, Clone, Default)]
pub struct LayoutCatalog {
    entries: Vec<CatalogEntry>,
    issues: Vec<CatalogIssue>,
}

impl LayoutCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode every `*.xml` file in `dir`, in file name order.
    ///
    /// Files that fail to decode are skipped and reported through
    /// [`issues`](Self::issues).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the directory itself cannot be read.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let to_error = |err: std::io::Error| CatalogError {
            path: dir.to_path_buf(),
            message: err.to_string(),
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(to_error)? {
            let path = entry.map_err(to_error)?.path();
            let is_xml = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
            if is_xml && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut catalog = Self::new();
        for path in paths {
            match decode_file(&path) {
                Ok(spec) => {
                    let name = path
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    catalog.entries.push(CatalogEntry {
                        name,
                        path: Some(path),
                        spec,
                    });
                }
                Err(error) => {
                    padgrid_core::warn!(
                        path = %path.display(),
                        error = %error,
                        "skipping undecodable layout"
                    );
                    catalog.issues.push(CatalogIssue { path, error });
                }
            }
        }
        padgrid_core::debug!(
            dir = %dir.display(),
            layouts = catalog.entries.len(),
            skipped = catalog.issues.len(),
            "layout catalog loaded"
        );
        Ok(catalog)
    }

    /// Add an entry that did not come from a file, such as a built-in layout.
    pub fn push(&mut self, entry: CatalogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn issues(&self) -> &[CatalogIssue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries listed under `category`, in catalog order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.category() == category)
    }

    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Spec for the `index`th entry of `category`.
    pub fn select(&self, category: Category, index: usize) -> Option<ModeSpec> {
        self.in_category(category)
            .nth(index)
            .map(|entry| entry.select(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;

    fn entry(name: &str, xml: &str) -> CatalogEntry {
        CatalogEntry::new(name, decode(xml).expect("decode"))
    }

    #[test]
    fn category_of_mode() {
        assert_eq!(Category::of(Mode::Joystick), Category::Joystick);
        assert_eq!(Category::of(Mode::Mouse), Category::Mouse);
        assert_eq!(Category::of(Mode::MouseAbsolute), Category::Mouse);
        assert_eq!(Category::of(Mode::Slideshow), Category::Slideshow);
    }

    #[test]
    fn absolute_layouts_always_select_absolute_mode() {
        let e = entry("abs", r#"<layout mode="absmouse"/>"#);
        assert_eq!(e.category(), Category::Mouse);
        assert_eq!(e.select(Category::Mouse).mode(), Mode::MouseAbsolute);
        assert_eq!(e.select(Category::Joystick).mode(), Mode::MouseAbsolute);
    }

    #[test]
    fn other_layouts_take_category_mode() {
        let e = entry("pad", r#"<layout mode="trackpad"/>"#);
        assert_eq!(e.select(Category::Mouse).mode(), Mode::Mouse);
        assert_eq!(e.select(Category::Slideshow).mode(), Mode::Slideshow);
    }

    #[test]
    fn in_category_filters_and_keeps_order() {
        let mut catalog = LayoutCatalog::new();
        catalog.push(entry("a", r#"<layout mode="js" title="A"/>"#));
        catalog.push(entry("b", r#"<layout mode="mouse" title="B"/>"#));
        catalog.push(entry("c", r#"<layout title="C"/>"#));
        let titles: Vec<_> = catalog
            .in_category(Category::Joystick)
            .map(CatalogEntry::title)
            .collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert_eq!(
            catalog.select(Category::Mouse, 0).map(|s| s.mode()),
            Some(Mode::Mouse)
        );
        assert!(catalog.select(Category::Slideshow, 0).is_none());
        assert_eq!(catalog.find("c").map(CatalogEntry::title), Some("C"));
    }
}
