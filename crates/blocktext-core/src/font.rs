//! Font faces and glyph tables
//!
//! Every face except `console` is a JSON document mapping characters to
//! rows of text. Rows may carry color region markers (`<c1>██</c1>`);
//! these are parsed once when the document is loaded into
//! [`Segment`] runs so rendering never touches the markers again.
//!
//! ```text
//!  ██████  ██       ██████   ██████ ██   ██
//!  ██   ██ ██      ██    ██ ██      ██  ██
//!  ██████  ██      ██    ██ ██      █████
//!  ██   ██ ██      ██    ██ ██      ██  ██
//!  ██████  ███████  ██████   ██████ ██   ██
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::{RenderError, Result};

static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(/?)c(\d+)>").expect("valid regex"));

/// The closed set of font faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFace {
    Console,
    #[default]
    Block,
    SimpleBlock,
    Simple,
    ThreeD,
    Simple3d,
    Chrome,
    Huge,
    Shade,
    Slick,
    Grid,
    Pallet,
    Tiny,
}

impl FontFace {
    /// Get all font faces
    pub fn all() -> &'static [FontFace] {
        &[
            FontFace::Console,
            FontFace::Block,
            FontFace::SimpleBlock,
            FontFace::Simple,
            FontFace::ThreeD,
            FontFace::Simple3d,
            FontFace::Chrome,
            FontFace::Huge,
            FontFace::Shade,
            FontFace::Slick,
            FontFace::Grid,
            FontFace::Pallet,
            FontFace::Tiny,
        ]
    }

    /// Name used in options and font documents
    pub fn name(&self) -> &'static str {
        match self {
            FontFace::Console => "console",
            FontFace::Block => "block",
            FontFace::SimpleBlock => "simpleBlock",
            FontFace::Simple => "simple",
            FontFace::ThreeD => "3d",
            FontFace::Simple3d => "simple3d",
            FontFace::Chrome => "chrome",
            FontFace::Huge => "huge",
            FontFace::Shade => "shade",
            FontFace::Slick => "slick",
            FontFace::Grid => "grid",
            FontFace::Pallet => "pallet",
            FontFace::Tiny => "tiny",
        }
    }

    /// Case-insensitive lookup by name
    pub fn parse(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|face| face.name().eq_ignore_ascii_case(name.trim()))
    }

    fn document(&self) -> Option<&'static str> {
        let source = match self {
            FontFace::Console => return None,
            FontFace::Block => include_str!("../fonts/block.json"),
            FontFace::SimpleBlock => include_str!("../fonts/simpleBlock.json"),
            FontFace::Simple => include_str!("../fonts/simple.json"),
            FontFace::ThreeD => include_str!("../fonts/3d.json"),
            FontFace::Simple3d => include_str!("../fonts/simple3d.json"),
            FontFace::Chrome => include_str!("../fonts/chrome.json"),
            FontFace::Huge => include_str!("../fonts/huge.json"),
            FontFace::Shade => include_str!("../fonts/shade.json"),
            FontFace::Slick => include_str!("../fonts/slick.json"),
            FontFace::Grid => include_str!("../fonts/grid.json"),
            FontFace::Pallet => include_str!("../fonts/pallet.json"),
            FontFace::Tiny => include_str!("../fonts/tiny.json"),
        };
        Some(source)
    }
}

impl fmt::Display for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A run of glyph text, optionally tagged with a color region (0-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub region: Option<usize>,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            region: None,
        }
    }

    pub fn colored(text: impl Into<String>, region: usize) -> Self {
        Self {
            text: text.into(),
            region: Some(region),
        }
    }

    pub fn width(&self) -> usize {
        self.text.width()
    }
}

/// One row of a glyph or a composed line
pub type Row = Vec<Segment>;

/// Width of a row in terminal columns
pub fn row_width(row: &[Segment]) -> usize {
    row.iter().map(Segment::width).sum()
}

/// Append a segment, merging with the previous one when regions match
pub fn push_segment(row: &mut Row, segment: Segment) {
    if segment.text.is_empty() {
        return;
    }
    match row.last_mut() {
        Some(last) if last.region == segment.region => last.text.push_str(&segment.text),
        _ => row.push(segment),
    }
}

/// Parse a marked-up row into segments
fn parse_row(raw: &str) -> std::result::Result<Row, String> {
    let mut row = Row::new();
    let mut region: Option<usize> = None;
    let mut cursor = 0;

    for caps in MARKER.captures_iter(raw) {
        let Some(whole) = caps.get(0) else { continue };
        let text = &raw[cursor..whole.start()];
        push_segment(&mut row, Segment { text: text.to_string(), region });
        cursor = whole.end();

        let index: usize = caps[2].parse().map_err(|_| format!("bad marker {}", whole.as_str()))?;
        if index == 0 {
            return Err("color markers start at c1".to_string());
        }
        region = if caps[1].is_empty() { Some(index - 1) } else { None };
    }
    push_segment(&mut row, Segment { text: raw[cursor..].to_string(), region });
    Ok(row)
}

/// The rows of a single character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    rows: Vec<Row>,
    width: usize,
}

impl Glyph {
    pub fn new(rows: Vec<Row>) -> Self {
        let width = rows.first().map(|row| row_width(row)).unwrap_or(0);
        Self { rows, width }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

#[derive(Debug, Deserialize)]
struct FontDocument {
    name: String,
    #[serde(default)]
    version: Option<String>,
    colors: usize,
    lines: usize,
    #[serde(default)]
    buffer: Vec<String>,
    letterspace: Vec<String>,
    chars: HashMap<String, Vec<String>>,
}

/// A parsed font document
#[derive(Debug, Clone)]
pub struct Font {
    name: String,
    version: Option<String>,
    colors: usize,
    lines: usize,
    buffer: Vec<Row>,
    letterspace: Vec<Row>,
    letterspace_width: usize,
    chars: HashMap<char, Glyph>,
}

impl Font {
    /// Parse and validate a font document.
    ///
    /// Every glyph must have exactly `lines` rows of equal width, and color
    /// markers must stay within the declared `colors`.
    pub fn from_json(source: &str) -> Result<Self> {
        let doc: FontDocument = serde_json::from_str(source).map_err(|e| RenderError::FontData {
            font: "<unknown>".to_string(),
            reason: e.to_string(),
        })?;
        let name = doc.name.clone();
        let fail = |reason: String| RenderError::FontData {
            font: name.clone(),
            reason,
        };

        if doc.lines == 0 {
            return Err(fail("font must have at least one line".to_string()));
        }
        if doc.colors == 0 {
            return Err(fail("font must declare at least one color".to_string()));
        }

        let parse_rows = |what: &str, raw: &[String]| -> Result<Vec<Row>> {
            if raw.len() != doc.lines {
                return Err(fail(format!(
                    "{} has {} rows, expected {}",
                    what,
                    raw.len(),
                    doc.lines
                )));
            }
            let rows = raw
                .iter()
                .map(|r| parse_row(r).map_err(|e| fail(format!("{}: {}", what, e))))
                .collect::<Result<Vec<Row>>>()?;
            for row in &rows {
                if let Some(region) = row.iter().filter_map(|s| s.region).max() {
                    if region >= doc.colors {
                        return Err(fail(format!(
                            "{} uses color c{} but the font has {} colors",
                            what,
                            region + 1,
                            doc.colors
                        )));
                    }
                }
            }
            Ok(rows)
        };

        let buffer = if doc.buffer.is_empty() {
            vec![Row::new(); doc.lines]
        } else {
            parse_rows("buffer", doc.buffer.as_slice())?
        };

        let letterspace = parse_rows("letterspace", doc.letterspace.as_slice())?;
        let letterspace_width = row_width(&letterspace[0]);
        if letterspace.iter().any(|row| row_width(row) != letterspace_width) {
            return Err(fail("letterspace rows differ in width".to_string()));
        }

        let mut chars = HashMap::with_capacity(doc.chars.len());
        for (key, raw) in &doc.chars {
            let mut key_chars = key.chars();
            let (Some(ch), None) = (key_chars.next(), key_chars.next()) else {
                return Err(fail(format!("glyph key \"{}\" is not a single character", key)));
            };
            let rows = parse_rows(format!("glyph '{}'", ch).as_str(), raw.as_slice())?;
            let width = row_width(&rows[0]);
            if rows.iter().any(|row| row_width(row) != width) {
                return Err(fail(format!("glyph '{}' has rows of different widths", ch)));
            }
            chars.insert(ch, Glyph::new(rows));
        }

        Ok(Self {
            name: doc.name,
            version: doc.version,
            colors: doc.colors,
            lines: doc.lines,
            buffer,
            letterspace,
            letterspace_width,
            chars,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Number of color regions glyphs may use
    pub fn colors(&self) -> usize {
        self.colors
    }

    /// Rows per glyph
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Initial content of every composed row
    pub fn buffer(&self) -> &[Row] {
        &self.buffer
    }

    /// One unit of letter spacing, per row
    pub fn letterspace(&self) -> &[Row] {
        &self.letterspace
    }

    pub fn letterspace_width(&self) -> usize {
        self.letterspace_width
    }

    /// Glyph lookup. Faces only carry upper-case letters.
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.chars
            .get(&ch)
            .or_else(|| ch.to_uppercase().next().and_then(|upper| self.chars.get(&upper)))
    }

    /// Characters this font can draw
    pub fn supported_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.keys().copied()
    }
}

/// Read-only collection of parsed fonts keyed by face
#[derive(Debug, Clone, Default)]
pub struct FontLibrary {
    fonts: HashMap<FontFace, Font>,
}

static BUILTIN: Lazy<Result<FontLibrary>> = Lazy::new(FontLibrary::load_builtin);

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled fonts, parsed once per process
    pub fn builtin() -> Result<&'static FontLibrary> {
        match &*BUILTIN {
            Ok(library) => Ok(library),
            Err(RenderError::FontData { font, reason }) => Err(RenderError::FontData {
                font: font.clone(),
                reason: reason.clone(),
            }),
            Err(other) => Err(RenderError::FontData {
                font: "<builtin>".to_string(),
                reason: other.to_string(),
            }),
        }
    }

    fn load_builtin() -> Result<Self> {
        let mut library = Self::new();
        for face in FontFace::all() {
            if let Some(source) = face.document() {
                library.insert(*face, Font::from_json(source)?);
            }
        }
        tracing::debug!("Loaded {} built-in fonts", library.fonts.len());
        Ok(library)
    }

    /// Add or replace the font for a face
    pub fn insert(&mut self, face: FontFace, font: Font) {
        self.fonts.insert(face, font);
    }

    pub fn get(&self, face: FontFace) -> Option<&Font> {
        self.fonts.get(&face)
    }

    /// Resolve a face to something glyphs can be drawn from
    pub fn typeface(&self, face: FontFace) -> Option<Typeface<'_>> {
        match face {
            FontFace::Console => Some(Typeface::Console),
            other => self.get(other).map(Typeface::Table),
        }
    }
}

/// A face ready for composition: the built-in console face or a table
#[derive(Debug, Clone, Copy)]
pub enum Typeface<'a> {
    /// One row per line, each character draws itself
    Console,
    Table(&'a Font),
}

impl<'a> Typeface<'a> {
    pub fn lines(&self) -> usize {
        match self {
            Typeface::Console => 1,
            Typeface::Table(font) => font.lines(),
        }
    }

    pub fn colors(&self) -> usize {
        match self {
            Typeface::Console => 1,
            Typeface::Table(font) => font.colors(),
        }
    }

    pub fn is_console(&self) -> bool {
        matches!(self, Typeface::Console)
    }

    /// Glyph for `ch`, or `None` when the face cannot draw it
    pub fn glyph(&self, ch: char) -> Option<Cow<'a, Glyph>> {
        match self {
            Typeface::Console => match ch.width() {
                _ if ch.is_control() => None,
                Some(w) if w > 0 => Some(Cow::Owned(Glyph::new(vec![vec![Segment::colored(
                    ch.to_string(),
                    0,
                )]]))),
                _ => None,
            },
            Typeface::Table(font) => font.glyph(ch).map(Cow::Borrowed),
        }
    }

    pub fn buffer(&self) -> Cow<'a, [Row]> {
        match self {
            Typeface::Console => Cow::Owned(vec![Row::new()]),
            Typeface::Table(font) => Cow::Borrowed(font.buffer()),
        }
    }

    pub fn letterspace(&self) -> Cow<'a, [Row]> {
        match self {
            Typeface::Console => Cow::Owned(vec![vec![Segment::plain(" ")]]),
            Typeface::Table(font) => Cow::Borrowed(font.letterspace()),
        }
    }

    pub fn letterspace_width(&self) -> usize {
        match self {
            Typeface::Console => 1,
            Typeface::Table(font) => font.letterspace_width(),
        }
    }
}
