// Word cloud layout: font sizing and collision-free placement on a cell grid
use serde::Serialize;

use crate::analysis::top;
use crate::config::CloudConfig;
use crate::types::RankedEntry;

// Placement resolution in pixels
const CELL: f32 = 4.0;
const MARGIN: f32 = 2.0;

// Viridis-like, dark to light; light end dropped so words stay readable on white
pub const PALETTE: [[u8; 3]; 8] = [
    [68, 1, 84],
    [72, 36, 117],
    [65, 68, 135],
    [53, 95, 141],
    [42, 120, 142],
    [33, 145, 140],
    [34, 168, 132],
    [68, 191, 112],
];

/// Width and height in pixels of a word set at a font size.
pub trait TextMeasure {
    fn measure(&self, word: &str, size: f32) -> (f32, f32);
}

/// Font-free estimate used for SVG output, where the browser picks the font.
pub struct ApproxMeasure;

impl TextMeasure for ApproxMeasure {
    fn measure(&self, word: &str, size: f32) -> (f32, f32) {
        (word.chars().count() as f32 * size * 0.6, size * 1.2)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedWord {
    pub word: String,
    pub count: usize,
    pub font_size: f32,
    /// Top-left corner of the word's box
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: [u8; 3],
}

impl PlacedWord {
    pub fn overlaps(&self, other: &PlacedWord) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudLayout {
    pub width: u32,
    pub height: u32,
    pub words: Vec<PlacedWord>,
}

/// Place up to `max_words` of the ranked entries.
///
/// Sizes follow `max_font * (rs * count / max_count + (1 - rs))` and never grow
/// along the ranking. A word that finds no free slot is retried `font_step`
/// smaller; once one fails at `min_font_size` the layout stops.
pub fn layout_cloud(ranked: &[RankedEntry], config: &CloudConfig, measure: &dyn TextMeasure) -> CloudLayout {
    let mut layout = CloudLayout { width: config.width, height: config.height, words: Vec::new() };
    let entries = top(ranked, config.max_words);
    let Some(first) = entries.first() else {
        return layout;
    };

    let mut grid = OccupancyGrid::new(config.width, config.height);
    let max_count = first.count.max(1) as f32;
    let rs = config.relative_scaling;
    let max_font = config.height as f32 * 0.6;
    let mut cap = max_font;

    for (i, entry) in entries.iter().enumerate() {
        let weight = rs * (entry.count as f32 / max_count) + (1.0 - rs);
        let mut size = (max_font * weight).min(cap);

        let placed = loop {
            if size < config.min_font_size {
                break None;
            }
            let (w, h) = measure.measure(&entry.word, size);
            if let Some((x, y)) = grid.find_slot(w + MARGIN, h + MARGIN) {
                break Some((size, x, y, w, h));
            }
            size -= config.font_step;
        };

        let Some((size, x, y, w, h)) = placed else {
            log::debug!("Word cloud full after {} words", layout.words.len());
            break;
        };

        grid.occupy(x, y, w + MARGIN, h + MARGIN);
        cap = size;
        layout.words.push(PlacedWord {
            word: entry.word.clone(),
            count: entry.count,
            font_size: size,
            x,
            y,
            width: w,
            height: h,
            color: PALETTE[i % PALETTE.len()],
        });
    }

    layout
}

// Cell occupancy with a summed-area table so each box test is O(1)
struct OccupancyGrid {
    cols: usize,
    rows: usize,
    cells: Vec<u8>,
    sat: Vec<u32>,
    free: usize,
    // Cell positions ordered outward from the center
    order: Vec<(usize, usize)>,
}

impl OccupancyGrid {
    fn new(width: u32, height: u32) -> Self {
        let cols = ((width as f32 / CELL).floor() as usize).max(1);
        let rows = ((height as f32 / CELL).floor() as usize).max(1);

        let (cx, cy) = (cols as f32 / 2.0, rows as f32 / 2.0);
        let mut order: Vec<(usize, usize)> = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (c, r)))
            .collect();
        // Normalized distance fills the canvas' aspect ratio instead of a circle
        let dist = |&(c, r): &(usize, usize)| {
            let dx = (c as f32 + 0.5 - cx) / cols as f32;
            let dy = (r as f32 + 0.5 - cy) / rows as f32;
            dx * dx + dy * dy
        };
        order.sort_by(|a, b| dist(a).total_cmp(&dist(b)));

        Self {
            cols,
            rows,
            cells: vec![0; cols * rows],
            sat: vec![0; (cols + 1) * (rows + 1)],
            free: cols * rows,
            order,
        }
    }

    fn span(&self, w: f32, h: f32) -> (usize, usize) {
        ((w / CELL).ceil() as usize, (h / CELL).ceil() as usize)
    }

    /// Top-left pixel position of the free box closest to the center.
    fn find_slot(&self, w: f32, h: f32) -> Option<(f32, f32)> {
        let (bw, bh) = self.span(w, h);
        if bw == 0 || bh == 0 || bw > self.cols || bh > self.rows {
            return None;
        }
        if self.free < bw * bh {
            return None;
        }

        self.order.iter().find_map(|&(c, r)| {
            // (c, r) is the box center
            let left = c.checked_sub(bw / 2)?;
            let top = r.checked_sub(bh / 2)?;
            if left + bw > self.cols || top + bh > self.rows {
                return None;
            }
            (self.area(left, top, bw, bh) == 0).then(|| (left as f32 * CELL, top as f32 * CELL))
        })
    }

    fn occupy(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let (bw, bh) = self.span(w, h);
        let left = (x / CELL) as usize;
        let top = (y / CELL) as usize;
        for r in top..(top + bh).min(self.rows) {
            for c in left..(left + bw).min(self.cols) {
                let cell = &mut self.cells[r * self.cols + c];
                if *cell == 0 {
                    *cell = 1;
                    self.free -= 1;
                }
            }
        }
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let stride = self.cols + 1;
        for r in 0..self.rows {
            let mut row_sum = 0u32;
            for c in 0..self.cols {
                row_sum += self.cells[r * self.cols + c] as u32;
                self.sat[(r + 1) * stride + c + 1] = self.sat[r * stride + c + 1] + row_sum;
            }
        }
    }

    fn area(&self, left: usize, top: usize, w: usize, h: usize) -> u32 {
        let stride = self.cols + 1;
        let (right, bottom) = (left + w, top + h);
        self.sat[bottom * stride + right] + self.sat[top * stride + left]
            - self.sat[top * stride + right]
            - self.sat[bottom * stride + left]
    }
}
