//! Render options
//!
//! Callers hand in a [`PartialOptions`] (every field optional, the shape
//! config files and CLI flags produce). One pass fills in defaults, a
//! second validates into the canonical [`Options`] the pipeline works on.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{RenderError, Result};
use crate::font::FontFace;
use crate::palette::{Background, ColorToken, Env};

/// Horizontal alignment against the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Align::Left),
            "center" => Some(Align::Center),
            "right" => Some(Align::Right),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Caller-supplied options; anything left `None` gets a default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialOptions {
    pub font: Option<String>,
    pub align: Option<String>,
    /// A list, or one comma separated string
    #[serde(deserialize_with = "list_or_csv")]
    pub colors: Option<Vec<String>>,
    pub background: Option<String>,
    /// Older spelling of `background`, used only when `background` is unset
    pub background_color: Option<String>,
    pub letter_spacing: Option<usize>,
    pub line_height: Option<usize>,
    pub space: Option<bool>,
    pub max_length: Option<usize>,
    /// Exactly two colors, or empty/unset for no gradient
    #[serde(deserialize_with = "list_or_csv")]
    pub gradient: Option<Vec<String>>,
    pub independent_gradient: Option<bool>,
    pub transition_gradient: Option<bool>,
    pub env: Option<String>,
}

/// Accept `["red", "blue"]` as well as `"red,blue"`, the form used on the
/// command line and in environment variables
fn list_or_csv<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrCsv {
        List(Vec<String>),
        Csv(String),
    }

    Ok(Option::<ListOrCsv>::deserialize(deserializer)?.map(|value| match value {
        ListOrCsv::List(list) => list,
        ListOrCsv::Csv(text) => text
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
    }))
}

impl PartialOptions {
    /// Overlay `other` on top of `self`; fields set in `other` win
    pub fn merge(self, other: PartialOptions) -> PartialOptions {
        PartialOptions {
            font: other.font.or(self.font),
            align: other.align.or(self.align),
            colors: other.colors.or(self.colors),
            background: other.background.or(self.background),
            background_color: other.background_color.or(self.background_color),
            letter_spacing: other.letter_spacing.or(self.letter_spacing),
            line_height: other.line_height.or(self.line_height),
            space: other.space.or(self.space),
            max_length: other.max_length.or(self.max_length),
            gradient: other.gradient.or(self.gradient),
            independent_gradient: other.independent_gradient.or(self.independent_gradient),
            transition_gradient: other.transition_gradient.or(self.transition_gradient),
            env: other.env.or(self.env),
        }
    }

    /// Fill every unset field with its default.
    ///
    /// The `backgroundColor` alias is folded into `background` here, so
    /// later stages only ever look at one field.
    pub fn with_defaults(self) -> PartialOptions {
        let background = self
            .background
            .or(self.background_color)
            .unwrap_or_else(|| "transparent".to_string());

        PartialOptions {
            font: Some(self.font.unwrap_or_else(|| FontFace::default().name().to_string())),
            align: Some(self.align.unwrap_or_else(|| Align::default().name().to_string())),
            colors: Some(self.colors.unwrap_or_default()),
            background: Some(background),
            background_color: None,
            letter_spacing: Some(self.letter_spacing.unwrap_or(1)),
            line_height: Some(self.line_height.unwrap_or(1)),
            space: Some(self.space.unwrap_or(true)),
            max_length: Some(self.max_length.unwrap_or(0)),
            gradient: Some(self.gradient.unwrap_or_default()),
            independent_gradient: Some(self.independent_gradient.unwrap_or(false)),
            transition_gradient: Some(self.transition_gradient.unwrap_or(false)),
            env: Some(self.env.unwrap_or_else(|| Env::default().name().to_string())),
        }
    }

    /// Default and validate into [`Options`]
    pub fn resolve(self) -> Result<Options> {
        Options::validate(self.with_defaults())
    }
}

/// Two gradient endpoints as `#rrggbb`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientStops {
    pub from: String,
    pub to: String,
}

/// Fully specified, validated options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub font: FontFace,
    pub align: Align,
    pub colors: Vec<ColorToken>,
    pub background: Background,
    pub letter_spacing: usize,
    pub line_height: usize,
    pub space: bool,
    pub max_length: usize,
    pub gradient: Option<GradientStops>,
    pub independent_gradient: bool,
    pub transition_gradient: bool,
    pub env: Env,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            font: FontFace::default(),
            align: Align::default(),
            colors: Vec::new(),
            background: Background::Transparent,
            letter_spacing: 1,
            line_height: 1,
            space: true,
            max_length: 0,
            gradient: None,
            independent_gradient: false,
            transition_gradient: false,
            env: Env::default(),
        }
    }
}

fn gradient_stop(token: &str) -> Result<String> {
    let color = ColorToken::parse(token).ok_or_else(|| RenderError::UnknownColor(token.to_string()))?;
    color.hex().map(str::to_string).ok_or_else(|| {
        RenderError::InvalidGradient(format!("\"{}\" has no fixed color to blend", token))
    })
}

impl Options {
    /// Validate an already-defaulted partial. Unset fields fall back to
    /// [`Options::default`] values.
    pub fn validate(partial: PartialOptions) -> Result<Options> {
        let defaults = Options::default();

        let font = match partial.font {
            Some(name) => FontFace::parse(&name).ok_or(RenderError::UnknownFont(name))?,
            None => defaults.font,
        };

        let align = match partial.align {
            Some(value) => Align::parse(&value).ok_or(RenderError::UnknownAlign(value))?,
            None => defaults.align,
        };

        let colors = partial
            .colors
            .unwrap_or_default()
            .iter()
            .map(|token| ColorToken::parse(token).ok_or_else(|| RenderError::UnknownColor(token.clone())))
            .collect::<Result<Vec<_>>>()?;

        let background = match partial.background.or(partial.background_color) {
            Some(token) => Background::parse(&token).ok_or(RenderError::UnknownBackground(token))?,
            None => defaults.background,
        };

        let gradient = match partial.gradient.as_deref() {
            None | Some([]) => None,
            Some([from, to]) => Some(GradientStops {
                from: gradient_stop(from)?,
                to: gradient_stop(to)?,
            }),
            Some(other) => {
                return Err(RenderError::InvalidGradient(format!(
                    "expected two colors, got {}",
                    other.len()
                )))
            }
        };

        let env = match partial.env {
            Some(value) => Env::parse(&value).ok_or(RenderError::UnknownEnv(value))?,
            None => defaults.env,
        };

        Ok(Options {
            font,
            align,
            colors,
            background,
            letter_spacing: partial.letter_spacing.unwrap_or(defaults.letter_spacing),
            line_height: partial.line_height.unwrap_or(defaults.line_height),
            space: partial.space.unwrap_or(defaults.space),
            max_length: partial.max_length.unwrap_or(defaults.max_length),
            gradient,
            independent_gradient: partial.independent_gradient.unwrap_or(defaults.independent_gradient),
            transition_gradient: partial.transition_gradient.unwrap_or(defaults.transition_gradient),
            env,
        })
    }
}

/// Terminal dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    /// Informational only, output is never truncated to it
    pub height: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
        }
    }
}

/// Viewport with optional fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialViewport {
    pub width: Option<usize>,
    pub height: Option<usize>,
}

impl PartialViewport {
    pub fn width(width: usize) -> Self {
        Self {
            width: Some(width),
            height: None,
        }
    }

    pub fn resolve(self) -> Viewport {
        let defaults = Viewport::default();
        Viewport {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
        }
    }
}
