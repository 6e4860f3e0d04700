//! # blocktext core
//!
//! Renders short strings as large multi-row block letters for terminals
//! and HTML.
//!
//! This crate provides:
//! - Bundled font faces and a loader for custom font documents
//! - Letter spacing, line height and viewport-aware wrapping
//! - Left, center and right alignment
//! - Solid colors, per-region font colors and HSV gradients
//! - ANSI truecolor and HTML span output
//!
//! ```text
//!  ██████╗ ██╗      ██████╗  ██████╗██╗  ██╗
//!  ██╔══██╗██║     ██╔═══██╗██╔════╝██║ ██╔╝
//!  ██████╔╝██║     ██║   ██║██║     █████╔╝
//!  ██╔══██╗██║     ██║   ██║██║     ██╔═██╗
//!  ██████╔╝███████╗╚██████╔╝╚██████╗██║  ██╗
//!  ╚═════╝ ╚══════╝ ╚═════╝  ╚═════╝╚═╝  ╚═╝
//! ```

pub mod align;
pub mod color_space;
pub mod colorize;
pub mod compose;
pub mod debug;
pub mod error;
pub mod font;
pub mod gradient;
pub mod options;
pub mod palette;
pub mod render;
pub mod wrap;

pub use color_space::{Hsv, HsvRad, Rgb};
pub use compose::{LineComposer, RenderRow};
pub use debug::{DebugContext, LogSink, MemorySink, TracingSink};
pub use error::{RenderError, Result};
pub use font::{Font, FontFace, FontLibrary, Glyph, Row, Segment, Typeface};
pub use gradient::{gradient, transition};
pub use options::{Align, GradientStops, Options, PartialOptions, PartialViewport, Viewport};
pub use palette::{color_names, Background, ColorToken, Env};
pub use render::{print, render, RenderOutput, Renderer};
pub use wrap::{split_lines, WrapLimits};

/// Core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
