//! Word cloud layout.
//!
//! Words are placed largest first. Each one starts at a font size
//! proportional to its frequency and walks an Archimedean spiral out from the
//! canvas centre until its box is free; if the spiral leaves the canvas the
//! font shrinks and the search restarts. Layout is deterministic.

use super::svg::{SvgDocument, TextStyle};
use crate::analysis::{FrequencyMap, StopWords};
use crate::config::CloudConfig;
use crate::defaults::GLYPH_ASPECT;

/// Occupancy grid resolution in pixels.
const CELL: f64 = 4.0;
/// Empty space kept around each word, in pixels.
const PADDING: f64 = 2.0;
/// Line box height as a multiple of the font size.
const LINE_HEIGHT: f64 = 1.15;
/// Baseline offset from the top of the line box as a multiple of the font size.
const ASCENT: f64 = 0.9;
const SPIRAL_STEP: f64 = 0.1;
/// Spiral radius growth per radian, in cells.
const SPIRAL_GROWTH: f64 = 0.5;
const SHRINK_FACTOR: f64 = 0.9;
const FONT_FAMILY: &str = "monospace";

/// Viridis samples, dark to light.
const PALETTE: &[&str] = &[
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b",
];

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub frequency: f64,
    pub font_size: u32,
    /// Top-left corner of the padded box.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: &'static str,
}

impl PlacedWord {
    pub fn overlaps(&self, other: &PlacedWord) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CloudLayout {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub words: Vec<PlacedWord>,
    /// Candidates that did not fit at or above the minimum font size.
    pub dropped: usize,
    /// Distinct words removed as stopwords.
    pub filtered: usize,
}

/// Lay out the cloud for `frequencies`, skipping `stopwords`.
pub fn layout_cloud(
    frequencies: &FrequencyMap,
    stopwords: &StopWords,
    config: &CloudConfig,
) -> CloudLayout {
    let mut candidates: Vec<(&str, f64)> = frequencies
        .ranked()
        .into_iter()
        .filter(|(word, _)| !stopwords.contains(word))
        .collect();
    let filtered = frequencies.len() - candidates.len();
    candidates.truncate(config.max_words);

    let mut layout = CloudLayout {
        width: config.width,
        height: config.height,
        background: config.background.clone(),
        words: Vec::new(),
        dropped: 0,
        filtered,
    };

    let Some(&(_, max_frequency)) = candidates.first() else {
        return layout;
    };

    let (canvas_w, canvas_h) = (config.width as f64, config.height as f64);
    let mut grid = OccupancyGrid::new(canvas_w, canvas_h);

    for (rank, (word, frequency)) in candidates.into_iter().enumerate() {
        let chars = word.chars().count().max(1) as f64;
        let fit_limit = ((canvas_w - 2.0 * PADDING) / (chars * GLYPH_ASPECT))
            .min((canvas_h - 2.0 * PADDING) / LINE_HEIGHT)
            .floor()
            .max(0.0);
        let target = (frequency / max_frequency * config.max_font_size as f64).round();
        let mut size = target.min(fit_limit) as u32;

        loop {
            if size < config.min_font_size || size == 0 {
                layout.dropped += 1;
                break;
            }
            let (w, h) = box_size(chars, size);
            if let Some((col, row)) = grid.find_spot(w, h) {
                grid.occupy(col, row, w, h);
                layout.words.push(PlacedWord {
                    word: word.to_string(),
                    frequency,
                    font_size: size,
                    x: col as f64 * CELL,
                    y: row as f64 * CELL,
                    width: w,
                    height: h,
                    color: PALETTE[rank % PALETTE.len()],
                });
                break;
            }
            let shrunk = (size as f64 * SHRINK_FACTOR).floor() as u32;
            size = shrunk.min(size - 1);
        }
    }

    layout
}

fn box_size(chars: f64, font_size: u32) -> (f64, f64) {
    let size = font_size as f64;
    (
        chars * GLYPH_ASPECT * size + 2.0 * PADDING,
        size * LINE_HEIGHT + 2.0 * PADDING,
    )
}

impl CloudLayout {
    pub fn to_svg(&self) -> String {
        let mut doc = SvgDocument::new(self.width, self.height, &self.background);
        for placed in &self.words {
            let size = placed.font_size as f64;
            let chars = placed.word.chars().count().max(1) as f64;
            let style = TextStyle {
                size,
                fill: placed.color,
                family: FONT_FAMILY,
                text_length: Some(chars * GLYPH_ASPECT * size),
                ..TextStyle::default()
            };
            doc.text(
                placed.x + PADDING,
                placed.y + PADDING + size * ASCENT,
                &placed.word,
                &style,
            );
        }
        doc.finish()
    }
}

/// Cell occupancy with a summed-area table for O(1) box queries.
struct OccupancyGrid {
    cols: usize,
    rows: usize,
    occupied: Vec<bool>,
    /// `(rows + 1) * (cols + 1)` prefix sums of `occupied`.
    integral: Vec<u32>,
}

impl OccupancyGrid {
    fn new(width: f64, height: f64) -> Self {
        let cols = (width / CELL).ceil().max(1.0) as usize;
        let rows = (height / CELL).ceil().max(1.0) as usize;
        Self {
            cols,
            rows,
            occupied: vec![false; cols * rows],
            integral: vec![0; (cols + 1) * (rows + 1)],
        }
    }

    fn cells(&self, w: f64, h: f64) -> (usize, usize) {
        ((w / CELL).ceil() as usize, (h / CELL).ceil() as usize)
    }

    fn filled(&self, col: usize, row: usize, cw: usize, ch: usize) -> u32 {
        let stride = self.cols + 1;
        let (c1, r1) = (col + cw, row + ch);
        self.integral[r1 * stride + c1] + self.integral[row * stride + col]
            - self.integral[row * stride + c1]
            - self.integral[r1 * stride + col]
    }

    /// First free position along the spiral, in cell coordinates.
    fn find_spot(&self, w: f64, h: f64) -> Option<(usize, usize)> {
        let (cw, ch) = self.cells(w, h);
        if cw == 0 || ch == 0 || cw > self.cols || ch > self.rows {
            return None;
        }

        let start_col = (self.cols - cw) as f64 / 2.0;
        let start_row = (self.rows - ch) as f64 / 2.0;
        let aspect = self.cols as f64 / self.rows as f64;
        let max_radius = (self.cols as f64).hypot(self.rows as f64);

        let mut last = None;
        let mut theta: f64 = 0.0;
        loop {
            let radius = SPIRAL_GROWTH * theta;
            if radius > max_radius {
                return None;
            }
            let col = (start_col + radius * theta.cos() * aspect).round();
            let row = (start_row + radius * theta.sin()).round();
            theta += SPIRAL_STEP;

            if col < 0.0 || row < 0.0 {
                continue;
            }
            let (col, row) = (col as usize, row as usize);
            if col + cw > self.cols || row + ch > self.rows || last == Some((col, row)) {
                continue;
            }
            last = Some((col, row));
            if self.filled(col, row, cw, ch) == 0 {
                return Some((col, row));
            }
        }
    }

    fn occupy(&mut self, col: usize, row: usize, w: f64, h: f64) {
        let (cw, ch) = self.cells(w, h);
        for r in row..(row + ch).min(self.rows) {
            for c in col..(col + cw).min(self.cols) {
                self.occupied[r * self.cols + c] = true;
            }
        }
        self.rebuild_integral();
    }

    fn rebuild_integral(&mut self) {
        let stride = self.cols + 1;
        for r in 0..self.rows {
            let mut row_sum = 0u32;
            for c in 0..self.cols {
                row_sum += u32::from(self.occupied[r * self.cols + c]);
                self.integral[(r + 1) * stride + c + 1] = self.integral[r * stride + c + 1] + row_sum;
            }
        }
    }
}
