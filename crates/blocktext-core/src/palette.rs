//! Color tokens and their escape sequences
//!
//! A color token is a palette name (`red`, `cyanBright`, `orange`...),
//! a `#hex` literal, or one of the special words `system` (terminal
//! default) and `candy` (a deterministic pick from a bright palette).
//! Tokens are parsed once during option validation; rendering only ever
//! sees [`ColorToken`] values.

use std::fmt;

use crate::color_space::{hex_to_rgb, normalize_hex, Rgb};

/// Where the rendered output is going
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Env {
    /// ANSI escape sequences for a terminal
    #[default]
    Node,
    /// HTML spans for a web page
    Browser,
}

impl Env {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "node" => Some(Env::Node),
            "browser" => Some(Env::Browser),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Env::Node => "node",
            Env::Browser => "browser",
        }
    }
}

/// Named colors: `(name, hex)`. Names are matched case-insensitively.
const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("red", "#ff0000"),
    ("green", "#00ff00"),
    ("yellow", "#ffff00"),
    ("blue", "#0000ff"),
    ("magenta", "#ff00ff"),
    ("cyan", "#00ffff"),
    ("white", "#ffffff"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("redBright", "#ff5555"),
    ("greenBright", "#55ff55"),
    ("yellowBright", "#ffff55"),
    ("blueBright", "#5555ff"),
    ("magentaBright", "#ff55ff"),
    ("cyanBright", "#55ffff"),
    ("whiteBright", "#ffffff"),
    // CSS extensions
    ("orange", "#ffa500"),
    ("pink", "#ffc0cb"),
    ("purple", "#800080"),
    ("brown", "#a52a2a"),
    ("lime", "#00ff00"),
    ("teal", "#008080"),
    ("navy", "#000080"),
    ("olive", "#808000"),
    ("maroon", "#800000"),
    ("silver", "#c0c0c0"),
    ("gold", "#ffd700"),
];

/// Colors `candy` picks from
const CANDY_COLORS: &[&str] = &[
    "red",
    "green",
    "yellow",
    "magenta",
    "cyan",
    "redBright",
    "greenBright",
    "yellowBright",
    "magentaBright",
    "cyanBright",
];

/// All palette names, in display order
pub fn color_names() -> impl Iterator<Item = &'static str> {
    ["system"]
        .into_iter()
        .chain(NAMED_COLORS.iter().map(|(name, _)| *name))
        .chain(["candy"])
}

fn named_hex(name: &str) -> Option<&'static str> {
    NAMED_COLORS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, hex)| *hex)
}

fn is_hex_literal(token: &str) -> bool {
    let Some(digits) = token.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 4 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// A validated color token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorToken {
    /// Terminal default, emits nothing
    System,
    /// Deterministic pick from [`CANDY_COLORS`] per colored run
    Candy,
    /// A palette entry, keeps the caller's spelling for display
    Named { name: String, hex: &'static str },
    /// Normalized `#rrggbb`
    Hex(String),
}

impl ColorToken {
    /// Parse a foreground token
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("system") {
            return Some(ColorToken::System);
        }
        if token.eq_ignore_ascii_case("candy") {
            return Some(ColorToken::Candy);
        }
        if is_hex_literal(token) {
            return Some(ColorToken::Hex(normalize_hex(token)));
        }
        named_hex(token).map(|hex| ColorToken::Named {
            name: token.to_string(),
            hex,
        })
    }

    /// Hex value for concrete colors; `None` for `system` and `candy`
    pub fn hex(&self) -> Option<&str> {
        match self {
            ColorToken::Named { hex, .. } => Some(hex),
            ColorToken::Hex(hex) => Some(hex),
            ColorToken::System | ColorToken::Candy => None,
        }
    }

    /// Resolve to a concrete color. `seed` selects the candy color.
    pub fn resolve(&self, seed: usize) -> Option<Rgb> {
        match self {
            ColorToken::Candy => Some(hex_to_rgb(candy_hex(seed))),
            other => other.hex().map(hex_to_rgb),
        }
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorToken::System => write!(f, "system"),
            ColorToken::Candy => write!(f, "candy"),
            ColorToken::Named { name, .. } => write!(f, "{}", name),
            ColorToken::Hex(hex) => write!(f, "{}", hex),
        }
    }
}

/// Background fill
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Transparent,
    Color(ColorToken),
}

impl Background {
    /// Parse a background token. `candy` is foreground-only.
    pub fn parse(token: &str) -> Option<Self> {
        if token.trim().eq_ignore_ascii_case("transparent") {
            return Some(Background::Transparent);
        }
        match ColorToken::parse(token)? {
            ColorToken::Candy => None,
            ColorToken::System => Some(Background::Transparent),
            color => Some(Background::Color(color)),
        }
    }

    pub fn rgb(&self) -> Option<Rgb> {
        match self {
            Background::Transparent => None,
            Background::Color(color) => color.resolve(0),
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::Transparent => write!(f, "transparent"),
            Background::Color(color) => color.fmt(f),
        }
    }
}

/// Pick a candy color. Uses a multiplicative hash so neighbouring runs differ.
pub fn candy_hex(seed: usize) -> &'static str {
    let mixed = seed.wrapping_mul(2_654_435_761).wrapping_add(seed >> 3);
    let name = CANDY_COLORS[mixed % CANDY_COLORS.len()];
    named_hex(name).unwrap_or("#ffffff")
}

/// Opening and closing sequences around a colored run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escape {
    pub open: String,
    pub close: String,
}

/// Foreground escape for `env`
pub fn foreground(rgb: Rgb, env: Env) -> Escape {
    let (r, g, b) = rgb.to_bytes();
    match env {
        Env::Node => Escape {
            open: format!("\u{1b}[38;2;{};{};{}m", r, g, b),
            close: "\u{1b}[39m".to_string(),
        },
        Env::Browser => Escape {
            open: format!("<span style=\"color:#{:02x}{:02x}{:02x}\">", r, g, b),
            close: "</span>".to_string(),
        },
    }
}

/// Background escape for terminals
pub fn background(rgb: Rgb) -> Escape {
    let (r, g, b) = rgb.to_bytes();
    Escape {
        open: format!("\u{1b}[48;2;{};{};{}m", r, g, b),
        close: "\u{1b}[49m".to_string(),
    }
}

/// CSS value for a background in the browser
pub fn css_background(background: &Background) -> String {
    match background.rgb() {
        Some(rgb) => {
            let (r, g, b) = rgb.to_bytes();
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        }
        None => "transparent".to_string(),
    }
}
