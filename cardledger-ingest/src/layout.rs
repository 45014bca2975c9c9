//! Fixed-layout table cutting.
//!
//! A statement page is treated as a loose cloud of positioned text. The
//! layout names the rectangle that holds the transaction table and the x
//! positions that separate its columns; text is grouped into lines by its
//! baseline and into cells by those separators.
//!
//! Nothing here checks that a page really has the expected layout. A
//! statement from a different template yields shifted or empty cells, which
//! the row filter then mostly throws away.

use serde::{Deserialize, Serialize};

/// Page region and column separators, in PDF points measured from the
/// top-left corner of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableLayout {
    /// `[top, left, bottom, right]`
    pub area: [f32; 4],
    /// Column separators, left to right. N separators make N + 1 cells.
    pub columns: Vec<f32>,
    /// Needed to flip PDF's bottom-up y axis.
    pub page_height: f32,
    /// Max baseline distance for two pieces of text to share a line.
    pub row_tolerance: f32,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            area: [195.0, 57.0, 800.0, 353.0],
            columns: vec![58.0, 95.8, 128.0, 301.0],
            page_height: 792.0,
            row_tolerance: 3.0,
        }
    }
}

impl TableLayout {
    pub fn top(&self) -> f32 {
        self.area[0]
    }

    pub fn left(&self) -> f32 {
        self.area[1]
    }

    pub fn bottom(&self) -> f32 {
        self.area[2]
    }

    pub fn right(&self) -> f32 {
        self.area[3]
    }

    pub fn cell_count(&self) -> usize {
        self.columns.len() + 1
    }

    fn cell_index(&self, x: f32) -> usize {
        self.columns.iter().take_while(|sep| **sep <= x).count()
    }

    fn contains(&self, x: f32, top: f32) -> bool {
        x >= self.left() && x <= self.right() && top >= self.top() && top <= self.bottom()
    }
}

/// A run of text on a page. `top` is the baseline's distance from the top
/// edge of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    pub text: String,
    pub x: f32,
    pub top: f32,
    pub width: f32,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, x: f32, top: f32, width: f32) -> Self {
        Self {
            text: text.into(),
            x,
            top,
            width,
        }
    }
}

#[derive(Debug)]
struct Glyph {
    ch: char,
    x: f32,
    top: f32,
    /// Index of the fragment it came from; a new fragment in the same cell
    /// gets a separating space.
    source: usize,
}

/// Cut one page into table lines, top to bottom. Each line has exactly
/// `layout.cell_count()` cells, trimmed, possibly empty.
pub fn assemble_lines(fragments: &[TextFragment], layout: &TableLayout) -> Vec<Vec<String>> {
    let mut glyphs = Vec::new();
    for (source, frag) in fragments.iter().enumerate() {
        let count = frag.text.chars().count();
        if count == 0 {
            continue;
        }
        // Glyph widths aren't known, so spread characters evenly over the run.
        let advance = frag.width.max(0.0) / count as f32;
        for (i, ch) in frag.text.chars().enumerate() {
            let x = frag.x + advance * (i as f32 + 0.5);
            if layout.contains(x, frag.top) {
                glyphs.push(Glyph {
                    ch,
                    x,
                    top: frag.top,
                    source,
                });
            }
        }
    }

    glyphs.sort_by(|a, b| a.top.total_cmp(&b.top).then(a.x.total_cmp(&b.x)));

    let mut lines: Vec<Vec<Glyph>> = Vec::new();
    let mut line_top = f32::NEG_INFINITY;
    for glyph in glyphs {
        match lines.last_mut() {
            Some(line) if glyph.top - line_top <= layout.row_tolerance => line.push(glyph),
            _ => {
                line_top = glyph.top;
                lines.push(vec![glyph]);
            }
        }
    }

    lines
        .into_iter()
        .map(|mut line| {
            line.sort_by(|a, b| a.x.total_cmp(&b.x));
            let mut cells = vec![String::new(); layout.cell_count()];
            let mut last_source = vec![None; layout.cell_count()];
            for glyph in line {
                let idx = layout.cell_index(glyph.x);
                if last_source[idx].is_some_and(|s| s != glyph.source) {
                    cells[idx].push(' ');
                }
                last_source[idx] = Some(glyph.source);
                cells[idx].push(glyph.ch);
            }
            cells.iter().map(|c| collapse_whitespace(c)).collect()
        })
        .collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
