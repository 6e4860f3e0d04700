//! Foreground coloring
//!
//! Turns composed rows into strings. In priority order:
//!
//! 1. a gradient paints every visible column, per logical line or across
//!    the whole output
//! 2. font color regions take colors from the option list, cycling when the
//!    font has more regions than colors were given
//! 3. otherwise text is emitted as-is

use std::collections::BTreeMap;

use unicode_width::UnicodeWidthChar;

use crate::color_space::hex_to_rgb;
use crate::compose::RenderRow;
use crate::font::Row;
use crate::gradient::{gradient, transition};
use crate::options::{GradientStops, Options};
use crate::palette::{foreground, ColorToken, Env};

fn escape_html(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}

fn push_text(out: &mut String, text: &str, env: Env) {
    match env {
        Env::Node => out.push_str(text),
        Env::Browser => escape_html(text, out),
    }
}

fn plain_text(line: &Row) -> String {
    line.iter().map(|s| s.text.as_str()).collect()
}

/// Columns of leading whitespace
fn leading_columns(text: &str) -> usize {
    text.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| c.width().unwrap_or(0))
        .sum()
}

fn text_columns(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Colors one gradient scope: the colors plus the column they start at
struct GradientScope {
    colors: Vec<String>,
    first_column: usize,
}

impl GradientScope {
    fn build(lines: &[String], stops: &GradientStops, hard: bool) -> Self {
        let first_column = lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| leading_columns(line))
            .min()
            .unwrap_or(0);
        let longest = lines.iter().map(|line| text_columns(line)).max().unwrap_or(0);
        let steps = longest.saturating_sub(first_column).max(1);

        let colors = if hard {
            transition(&stops.from, &stops.to, steps)
        } else {
            gradient(&stops.from, &stops.to, steps)
        };

        Self {
            colors,
            first_column,
        }
    }

    fn color_at(&self, column: usize) -> &str {
        let index = column.saturating_sub(self.first_column);
        let last = self.colors.len().saturating_sub(1);
        &self.colors[index.min(last)]
    }
}

/// Paint one line column by column, grouping equal neighbours into a run
fn paint_gradient_line(line: &str, scope: &GradientScope, env: Env) -> String {
    let mut out = String::new();
    let mut run = String::new();
    let mut run_color: Option<&str> = None;
    let mut column = 0;

    let flush = |out: &mut String, run: &mut String, color: Option<&str>| {
        if run.is_empty() {
            return;
        }
        match color {
            Some(hex) => {
                let escape = foreground(hex_to_rgb(hex), env);
                out.push_str(&escape.open);
                push_text(out, run, env);
                out.push_str(&escape.close);
            }
            None => push_text(out, run, env),
        }
        run.clear();
    };

    for ch in line.chars() {
        let color = if ch.is_whitespace() {
            None
        } else {
            Some(scope.color_at(column))
        };
        if color != run_color {
            flush(&mut out, &mut run, run_color);
            run_color = color;
        }
        run.push(ch);
        column += ch.width().unwrap_or(0);
    }
    flush(&mut out, &mut run, run_color);
    out
}

fn paint_gradient(rows: &[RenderRow], options: &Options, stops: &GradientStops) -> Vec<Vec<String>> {
    let texts: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.lines.iter().map(plain_text).collect())
        .collect();

    let hard = options.transition_gradient;
    let scope_for = |logical: Option<usize>| {
        let lines: Vec<String> = rows
            .iter()
            .zip(&texts)
            .filter(|(row, _)| logical.map_or(true, |l| row.logical_line == l))
            .flat_map(|(_, lines)| lines.iter().cloned())
            .collect();
        GradientScope::build(&lines, stops, hard)
    };

    // one shared scope under `None`, or one per logical line
    let mut scopes: BTreeMap<Option<usize>, GradientScope> = BTreeMap::new();
    rows.iter()
        .zip(&texts)
        .map(|(row, lines)| {
            let key = options.independent_gradient.then_some(row.logical_line);
            let scope = scopes.entry(key).or_insert_with(|| scope_for(key));
            lines
                .iter()
                .map(|line| paint_gradient_line(line, scope, options.env))
                .collect()
        })
        .collect()
}

/// Paint font color regions from the option colors
fn paint_regions(rows: &[RenderRow], colors: &[ColorToken], env: Env) -> Vec<Vec<String>> {
    let mut seed = 0;
    rows.iter()
        .map(|row| {
            row.lines
                .iter()
                .map(|line| {
                    let mut out = String::new();
                    for segment in line {
                        let color = segment
                            .region
                            .filter(|_| !colors.is_empty())
                            .and_then(|region| colors[region % colors.len()].resolve(seed));
                        match color {
                            Some(rgb) => {
                                seed += 1;
                                let escape = foreground(rgb, env);
                                out.push_str(&escape.open);
                                push_text(&mut out, &segment.text, env);
                                out.push_str(&escape.close);
                            }
                            None => push_text(&mut out, &segment.text, env),
                        }
                    }
                    out
                })
                .collect()
        })
        .collect()
}

/// Render rows to strings, one `Vec` of lines per visual row
pub fn colorize(rows: &[RenderRow], options: &Options) -> Vec<Vec<String>> {
    match &options.gradient {
        Some(stops) => paint_gradient(rows, options, stops),
        None => paint_regions(rows, &options.colors, options.env),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Segment;
    use pretty_assertions::assert_eq;

    fn row(logical_line: usize, lines: &[&str]) -> RenderRow {
        RenderRow {
            logical_line,
            lines: lines
                .iter()
                .map(|l| vec![Segment::colored(*l, 0)])
                .collect(),
            width: lines.iter().map(|l| l.chars().count()).max().unwrap_or(0),
            chars: 1,
            padding: 0,
        }
    }

    fn options_with_gradient(independent: bool, hard: bool) -> Options {
        Options {
            gradient: Some(GradientStops {
                from: "#ff0000".into(),
                to: "#0000ff".into(),
            }),
            independent_gradient: independent,
            transition_gradient: hard,
            ..Options::default()
        }
    }

    #[test]
    fn test_no_colors_is_plain() {
        let rows = vec![row(0, &["AB"])];
        assert_eq!(colorize(&rows, &Options::default()), vec![vec!["AB".to_string()]]);
    }

    #[test]
    fn test_region_colors() {
        let options = Options {
            colors: vec![ColorToken::parse("red").unwrap()],
            ..Options::default()
        };
        let rows = vec![row(0, &["AB"])];
        assert_eq!(
            colorize(&rows, &options),
            vec![vec!["\u{1b}[38;2;255;0;0mAB\u{1b}[39m".to_string()]]
        );
    }

    #[test]
    fn test_region_colors_cycle() {
        let options = Options {
            colors: vec![ColorToken::parse("red").unwrap(), ColorToken::parse("blue").unwrap()],
            ..Options::default()
        };
        let rows = vec![RenderRow {
            logical_line: 0,
            lines: vec![vec![
                Segment::colored("a", 0),
                Segment::colored("b", 1),
                Segment::colored("c", 2),
            ]],
            width: 3,
            chars: 1,
            padding: 0,
        }];
        let painted = colorize(&rows, &options);
        assert_eq!(
            painted[0][0],
            "\u{1b}[38;2;255;0;0ma\u{1b}[39m\u{1b}[38;2;0;0;255mb\u{1b}[39m\u{1b}[38;2;255;0;0mc\u{1b}[39m"
        );
    }

    #[test]
    fn test_system_color_emits_nothing() {
        let options = Options {
            colors: vec![ColorToken::System],
            ..Options::default()
        };
        let rows = vec![row(0, &["AB"])];
        assert_eq!(colorize(&rows, &options)[0][0], "AB");
    }

    #[test]
    fn test_gradient_wins_over_colors() {
        let mut options = options_with_gradient(false, false);
        options.colors = vec![ColorToken::parse("green").unwrap()];
        let rows = vec![row(0, &["AB"])];
        let painted = colorize(&rows, &options);
        assert!(painted[0][0].starts_with("\u{1b}[38;2;255;0;0mA"));
        assert!(painted[0][0].contains("\u{1b}[38;2;0;0;255mB"));
    }

    #[test]
    fn test_gradient_skips_spaces_and_padding() {
        let options = options_with_gradient(false, false);
        let rows = vec![row(0, &["  A B"])];
        let painted = colorize(&rows, &options);
        assert!(painted[0][0].starts_with("  \u{1b}[38;2;255;0;0mA\u{1b}[39m "));
        assert!(painted[0][0].ends_with("\u{1b}[38;2;0;0;255mB\u{1b}[39m"));
    }

    #[test]
    fn test_transition_is_hard_switch() {
        let options = options_with_gradient(false, true);
        let rows = vec![row(0, &["AAAA"])];
        assert_eq!(
            colorize(&rows, &options)[0][0],
            "\u{1b}[38;2;255;0;0mAA\u{1b}[39m\u{1b}[38;2;0;0;255mAA\u{1b}[39m"
        );
    }

    #[test]
    fn test_independent_gradient_restarts_per_logical_line() {
        let rows = vec![row(0, &["AAAA"]), row(1, &["BB"])];

        let independent = colorize(&rows, &options_with_gradient(true, true));
        assert_eq!(
            independent[1][0],
            "\u{1b}[38;2;255;0;0mB\u{1b}[39m\u{1b}[38;2;0;0;255mB\u{1b}[39m"
        );

        let shared = colorize(&rows, &options_with_gradient(false, true));
        assert_eq!(shared[1][0], "\u{1b}[38;2;255;0;0mBB\u{1b}[39m");
    }

    #[test]
    fn test_browser_spans_escape_html() {
        let options = Options {
            colors: vec![ColorToken::parse("#00ff00").unwrap()],
            env: Env::Browser,
            ..Options::default()
        };
        let rows = vec![row(0, &["<&>"])];
        assert_eq!(
            colorize(&rows, &options)[0][0],
            "<span style=\"color:#00ff00\">&lt;&amp;&gt;</span>"
        );
    }
}
