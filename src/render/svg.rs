//! Minimal SVG document builder.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle<'a> {
    pub size: f64,
    pub anchor: Anchor,
    pub fill: &'a str,
    pub family: &'a str,
    pub bold: bool,
    /// Force the rendered advance width, so layout boxes match exactly.
    pub text_length: Option<f64>,
    /// Rotation in degrees around the anchor point.
    pub rotate: Option<f64>,
}

impl Default for TextStyle<'_> {
    fn default() -> Self {
        Self {
            size: 12.0,
            anchor: Anchor::Start,
            fill: "#262626",
            family: "sans-serif",
            bold: false,
            text_length: None,
            rotate: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SvgDocument {
    width: u32,
    height: u32,
    body: String,
}

impl SvgDocument {
    /// New document filled with `background`.
    pub fn new(width: u32, height: u32, background: &str) -> Self {
        let mut doc = Self {
            width,
            height,
            body: String::new(),
        };
        doc.rect(0.0, 0.0, width as f64, height as f64, background, None, 1.0);
        doc
    }

    #[allow(clippy::too_many_arguments)]
    pub fn rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: &str,
        stroke: Option<&str>,
        opacity: f64,
    ) {
        let _ = write!(
            self.body,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}""#,
            x,
            y,
            w,
            h,
            escape(fill)
        );
        if opacity < 1.0 {
            let _ = write!(self.body, r#" fill-opacity="{:.2}""#, opacity);
        }
        if let Some(stroke) = stroke {
            let _ = write!(self.body, r#" stroke="{}""#, escape(stroke));
        }
        self.body.push_str("/>\n");
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, width: f64) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}"/>"#,
            x1,
            y1,
            x2,
            y2,
            escape(stroke),
            width
        );
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], stroke: &str, width: f64) {
        if points.is_empty() {
            return;
        }
        let coords: Vec<String> = points
            .iter()
            .map(|(x, y)| format!("{:.2},{:.2}", x, y))
            .collect();
        let _ = writeln!(
            self.body,
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{:.2}"/>"#,
            coords.join(" "),
            escape(stroke),
            width
        );
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle<'_>) {
        let _ = write!(
            self.body,
            r#"<text x="{:.2}" y="{:.2}" font-size="{:.2}" font-family="{}" text-anchor="{}" fill="{}""#,
            x,
            y,
            style.size,
            escape(style.family),
            style.anchor.as_str(),
            escape(style.fill)
        );
        if style.bold {
            self.body.push_str(r#" font-weight="bold""#);
        }
        if let Some(length) = style.text_length {
            let _ = write!(
                self.body,
                r#" textLength="{:.2}" lengthAdjust="spacingAndGlyphs""#,
                length
            );
        }
        if let Some(angle) = style.rotate {
            let _ = write!(
                self.body,
                r#" transform="rotate({:.2} {:.2} {:.2})""#,
                angle, x, y
            );
        }
        let _ = writeln!(self.body, ">{}</text>", escape(content));
    }

    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

/// Write a finished document, creating parent directories as needed.
pub fn save(svg: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, svg)?;
    Ok(())
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
