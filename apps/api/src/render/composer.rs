//! Block list → positioned draw operations, page by page.
//!
//! A vertical cursor walks down from the top margin. Every line checks that
//! it fits above the bottom margin and starts a new page otherwise. Section
//! headings are kept with the first body line after them, and the education
//! table repeats its header row on every page it continues onto.

use crate::layout::font_metrics::{get_metrics, FontFace, PageConfig};
use crate::layout::wrap::wrap_text;
use crate::render::document::{Block, Table, TextStyle};

pub const TITLE_SIZE: f32 = 16.0;
const TITLE_LEADING: f32 = 20.0;
const TITLE_SPACE_AFTER: f32 = 6.0;

pub const HEADING_SIZE: f32 = 12.0;
const HEADING_LEADING: f32 = 14.0;
const HEADING_PAD: f32 = 3.0;
const HEADING_SPACE_AFTER: f32 = 6.0;

pub const BODY_SIZE: f32 = 10.0;
const BODY_LEADING: f32 = 12.0;

const BULLET_GLYPH: &str = "\u{2022}";
const BULLET_GLYPH_X: f32 = 6.0;
const BULLET_INDENT: f32 = 18.0;

const CELL_PAD: f32 = 3.0;
const DESCENT: f32 = 0.22;

/// Light blue band behind section headings.
pub const HEADING_FILL: Rgb = Rgb(0.86, 0.90, 0.96);
/// Grey background of table header rows.
pub const TABLE_HEADER_FILL: Rgb = Rgb(0.85, 0.85, 0.85);
const GRID_STROKE: Rgb = Rgb(0.6, 0.6, 0.6);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text run with its baseline starting at (x, y).
    Text {
        x: f32,
        y: f32,
        face: FontFace,
        size: f32,
        text: String,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

/// Lays out all blocks. Always returns at least one page.
pub fn compose(blocks: &[Block], config: &PageConfig) -> Vec<Page> {
    let mut composer = Composer::new(config);
    for block in blocks {
        composer.push_block(block);
    }
    composer.finish()
}

fn face_for(style: TextStyle) -> FontFace {
    match style {
        TextStyle::Body => FontFace::Helvetica,
        TextStyle::Bold => FontFace::HelveticaBold,
    }
}

struct Composer<'a> {
    config: &'a PageConfig,
    pages: Vec<Page>,
    ops: Vec<DrawOp>,
    cursor_y: f32,
}

impl<'a> Composer<'a> {
    fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            ops: Vec::new(),
            cursor_y: config.top_pt(),
        }
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.ops.is_empty() || self.pages.is_empty() {
            self.pages.push(Page { ops: self.ops });
        }
        self.pages
    }

    fn new_page(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.pages.push(Page { ops });
        self.cursor_y = self.config.top_pt();
    }

    /// Breaks the page unless `height` still fits. A fresh page never breaks.
    fn ensure(&mut self, height: f32) {
        if self.cursor_y - height < self.config.bottom_pt() && !self.ops.is_empty() {
            self.new_page();
        }
    }

    fn text(&mut self, x: f32, y: f32, face: FontFace, size: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        self.ops.push(DrawOp::Text {
            x,
            y,
            face,
            size,
            text: text.to_string(),
        });
    }

    fn line(&mut self, x: f32, face: FontFace, size: f32, leading: f32, text: &str) {
        self.ensure(leading);
        let baseline = self.cursor_y - size;
        self.text(x, baseline, face, size, text);
        self.cursor_y -= leading;
    }

    fn push_block(&mut self, block: &Block) {
        let left = self.config.left_pt();
        let width = self.config.content_width_pt();

        match block {
            Block::Title(name) => {
                let metrics = get_metrics(FontFace::HelveticaBold);
                for text in wrap_text(name, metrics, TITLE_SIZE, width) {
                    self.line(left, FontFace::HelveticaBold, TITLE_SIZE, TITLE_LEADING, &text);
                }
                self.cursor_y -= TITLE_SPACE_AFTER;
            }
            Block::ContactTable(rows) => self.contact_table(rows),
            Block::SectionHeading(title) => self.heading(title),
            Block::Line { text, style } => {
                let face = face_for(*style);
                for line in wrap_text(text, get_metrics(face), BODY_SIZE, width) {
                    self.line(left, face, BODY_SIZE, BODY_LEADING, &line);
                }
            }
            Block::Labeled { label, text } => self.labeled(label, text),
            Block::Bullet(text) => self.bullet(text),
            Block::Table(table) => self.table(table),
            Block::Spacer(height) => {
                self.cursor_y = (self.cursor_y - height).max(self.config.bottom_pt());
            }
        }
    }

    fn heading(&mut self, title: &str) {
        let band = HEADING_LEADING + 2.0 * HEADING_PAD;
        self.ensure(band + HEADING_SPACE_AFTER + BODY_LEADING);

        let left = self.config.left_pt();
        self.ops.push(DrawOp::FillRect {
            x: left,
            y: self.cursor_y - band,
            width: self.config.content_width_pt(),
            height: band,
            color: HEADING_FILL,
        });
        let baseline = self.cursor_y - band + HEADING_PAD + DESCENT * HEADING_SIZE;
        self.text(
            left + HEADING_PAD,
            baseline,
            FontFace::HelveticaBold,
            HEADING_SIZE,
            title,
        );
        self.cursor_y -= band + HEADING_SPACE_AFTER;
    }

    fn labeled(&mut self, label: &str, text: &str) {
        let left = self.config.left_pt();
        let label_text = format!("{label}: ");
        let label_width = get_metrics(FontFace::HelveticaBold).width_pt(&label_text, BODY_SIZE);
        let lines = wrap_text(
            text,
            get_metrics(FontFace::Helvetica),
            BODY_SIZE,
            self.config.content_width_pt() - label_width,
        );

        for (i, line) in lines.iter().enumerate() {
            self.ensure(BODY_LEADING);
            let baseline = self.cursor_y - BODY_SIZE;
            if i == 0 {
                self.text(left, baseline, FontFace::HelveticaBold, BODY_SIZE, &label_text);
            }
            self.text(
                left + label_width,
                baseline,
                FontFace::Helvetica,
                BODY_SIZE,
                line,
            );
            self.cursor_y -= BODY_LEADING;
        }
    }

    fn bullet(&mut self, text: &str) {
        let left = self.config.left_pt();
        let lines = wrap_text(
            text,
            get_metrics(FontFace::Helvetica),
            BODY_SIZE,
            self.config.content_width_pt() - BULLET_INDENT,
        );

        for (i, line) in lines.iter().enumerate() {
            self.ensure(BODY_LEADING);
            let baseline = self.cursor_y - BODY_SIZE;
            if i == 0 {
                self.text(
                    left + BULLET_GLYPH_X,
                    baseline,
                    FontFace::Helvetica,
                    BODY_SIZE,
                    BULLET_GLYPH,
                );
            }
            self.text(
                left + BULLET_INDENT,
                baseline,
                FontFace::Helvetica,
                BODY_SIZE,
                line,
            );
            self.cursor_y -= BODY_LEADING;
        }
    }

    fn contact_table(&mut self, rows: &[[String; 2]]) {
        let left = self.config.left_pt();
        let column_width = self.config.content_width_pt() / 2.0;
        let metrics = get_metrics(FontFace::Helvetica);

        for row in rows {
            let cells: Vec<Vec<String>> = row
                .iter()
                .map(|cell| wrap_text(cell, metrics, BODY_SIZE, column_width - CELL_PAD))
                .collect();
            let line_count = cells.iter().map(Vec::len).max().unwrap_or(0);
            if line_count == 0 {
                continue;
            }
            // A row that fits on one page is not split.
            let height = line_count as f32 * BODY_LEADING;
            if height <= self.config.top_pt() - self.config.bottom_pt() {
                self.ensure(height);
            }
            for i in 0..line_count {
                self.ensure(BODY_LEADING);
                let baseline = self.cursor_y - BODY_SIZE;
                for (col, lines) in cells.iter().enumerate() {
                    if let Some(line) = lines.get(i) {
                        let x = left + col as f32 * column_width;
                        self.text(x, baseline, FontFace::Helvetica, BODY_SIZE, line);
                    }
                }
                self.cursor_y -= BODY_LEADING;
            }
        }
    }

    fn table(&mut self, table: &Table) {
        let content_width = self.config.content_width_pt();
        let widths: Vec<f32> = table
            .columns
            .iter()
            .map(|c| c.width_fraction * content_width)
            .collect();

        let header: Vec<Vec<String>> = table
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| wrap_cell(c.title, FontFace::HelveticaBold, *w))
            .collect();
        let header_height = row_height(&header);

        let rows: Vec<Vec<Vec<String>>> = table
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&widths)
                    .map(|(cell, w)| wrap_cell(cell, FontFace::Helvetica, *w))
                    .collect()
            })
            .collect();

        // Body lines that fit under the header on an empty page.
        let page_capacity = self.lines_fitting(self.config.top_pt() - header_height).max(1);

        let first_row_lines = rows.first().map(|r| row_lines(r)).unwrap_or(0);
        self.ensure(header_height + lines_height(first_row_lines.min(page_capacity)));
        self.table_row(&header, &widths, FontFace::HelveticaBold, Some(TABLE_HEADER_FILL));

        for row in rows {
            let mut remaining = row;
            let mut fresh_page = false;
            loop {
                let needed = row_lines(&remaining);
                let mut fit = self.lines_fitting(self.cursor_y);
                if fresh_page {
                    fit = fit.max(1);
                }
                if needed <= fit {
                    self.table_row(&remaining, &widths, FontFace::Helvetica, None);
                    break;
                }
                // Rows taller than a page are split; shorter ones move whole.
                if fit > 0 && (fresh_page || needed > page_capacity) {
                    let rest: Vec<Vec<String>> = remaining
                        .iter_mut()
                        .map(|lines| lines.split_off(fit.min(lines.len())))
                        .collect();
                    self.table_row(&remaining, &widths, FontFace::Helvetica, None);
                    remaining = rest;
                }
                self.new_page();
                self.table_row(&header, &widths, FontFace::HelveticaBold, Some(TABLE_HEADER_FILL));
                fresh_page = true;
            }
        }
    }

    /// Number of padded table lines that fit between `top` and the bottom margin.
    fn lines_fitting(&self, top: f32) -> usize {
        let available = top - self.config.bottom_pt() - 2.0 * CELL_PAD;
        if available < BODY_LEADING {
            0
        } else {
            (available / BODY_LEADING).floor() as usize
        }
    }

    fn table_row(&mut self, cells: &[Vec<String>], widths: &[f32], face: FontFace, fill: Option<Rgb>) {
        let height = row_height(cells);
        let top = self.cursor_y;
        let mut x = self.config.left_pt();

        for (lines, width) in cells.iter().zip(widths) {
            if let Some(color) = fill {
                self.ops.push(DrawOp::FillRect {
                    x,
                    y: top - height,
                    width: *width,
                    height,
                    color,
                });
            }
            self.ops.push(DrawOp::StrokeRect {
                x,
                y: top - height,
                width: *width,
                height,
                color: GRID_STROKE,
            });
            for (i, line) in lines.iter().enumerate() {
                let baseline = top - CELL_PAD - BODY_SIZE - i as f32 * BODY_LEADING;
                self.text(x + CELL_PAD, baseline, face, BODY_SIZE, line);
            }
            x += width;
        }
        self.cursor_y -= height;
    }
}

fn wrap_cell(text: &str, face: FontFace, column_width: f32) -> Vec<String> {
    wrap_text(text, get_metrics(face), BODY_SIZE, column_width - 2.0 * CELL_PAD)
}

/// Lines in a table row: its tallest cell, at least one.
fn row_lines(cells: &[Vec<String>]) -> usize {
    cells.iter().map(Vec::len).max().unwrap_or(0).max(1)
}

fn lines_height(lines: usize) -> f32 {
    lines.max(1) as f32 * BODY_LEADING + 2.0 * CELL_PAD
}

fn row_height(cells: &[Vec<String>]) -> f32 {
    lines_height(row_lines(cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::default_page_config;
    use crate::render::document::Column;

    fn texts(page: &Page) -> Vec<&str> {
        page.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn education_table(rows: usize) -> Table {
        Table {
            columns: vec![
                Column {
                    title: "Degree",
                    width_fraction: 0.5,
                },
                Column {
                    title: "Location",
                    width_fraction: 0.5,
                },
            ],
            rows: (0..rows)
                .map(|i| vec![format!("Degree {i}"), String::new()])
                .collect(),
        }
    }

    #[test]
    fn test_empty_block_list_still_has_one_page() {
        let pages = compose(&[], &default_page_config());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].ops.is_empty());
    }

    #[test]
    fn test_title_is_bold_at_top_margin() {
        let config = default_page_config();
        let pages = compose(&[Block::Title("Jane Doe".to_string())], &config);
        assert_eq!(
            pages[0].ops,
            vec![DrawOp::Text {
                x: config.left_pt(),
                y: config.top_pt() - TITLE_SIZE,
                face: FontFace::HelveticaBold,
                size: TITLE_SIZE,
                text: "Jane Doe".to_string(),
            }]
        );
    }

    #[test]
    fn test_heading_draws_shaded_band() {
        let pages = compose(&[Block::SectionHeading("Skills")], &default_page_config());
        assert!(pages[0]
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::FillRect { color, .. } if *color == HEADING_FILL)));
        assert_eq!(texts(&pages[0]), vec!["Skills"]);
    }

    #[test]
    fn test_bullet_has_glyph_and_indent() {
        let config = default_page_config();
        let pages = compose(&[Block::Bullet("Shipped v2".to_string())], &config);
        match &pages[0].ops[..] {
            [DrawOp::Text { text: glyph, .. }, DrawOp::Text { x, text, .. }] => {
                assert_eq!(glyph, BULLET_GLYPH);
                assert_eq!(text, "Shipped v2");
                assert_eq!(*x, config.left_pt() + BULLET_INDENT);
            }
            other => panic!("unexpected ops {other:?}"),
        }
    }

    #[test]
    fn test_empty_table_cell_draws_no_text() {
        let pages = compose(&[Block::Table(education_table(1))], &default_page_config());
        assert_eq!(texts(&pages[0]), vec!["Degree", "Location", "Degree 0"]);
        let grid_cells = pages[0]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::StrokeRect { .. }))
            .count();
        assert_eq!(grid_cells, 4);
    }

    #[test]
    fn test_long_table_repeats_header_on_each_page() {
        let pages = compose(&[Block::Table(education_table(120))], &default_page_config());
        assert!(pages.len() > 1);
        for page in &pages {
            let header_fills = page
                .ops
                .iter()
                .filter(|op| matches!(op, DrawOp::FillRect { color, .. } if *color == TABLE_HEADER_FILL))
                .count();
            assert_eq!(header_fills, 2, "each page starts with the shaded header row");
            assert_eq!(texts(page)[..2], ["Degree", "Location"]);
        }
        let rows_drawn: usize = pages
            .iter()
            .map(|p| texts(p).iter().filter(|t| t.starts_with("Degree ")).count())
            .sum();
        assert_eq!(rows_drawn, 120);
    }

    fn assert_inside_margins(pages: &[Page], config: &PageConfig) {
        for page in pages {
            for op in &page.ops {
                if let DrawOp::Text { y, .. } = op {
                    assert!(
                        *y >= config.bottom_pt() && *y <= config.top_pt(),
                        "text at y={y} is outside the margins"
                    );
                }
            }
        }
    }

    fn numbered_words(count: usize) -> String {
        (0..count)
            .map(|i| format!("word{i}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_row_taller_than_page_is_split_across_pages() {
        let config = default_page_config();
        let degree = numbered_words(400);
        let mut table = education_table(0);
        table.rows = vec![
            vec![degree.clone(), "Pune".to_string()],
            vec!["Degree after".to_string(), String::new()],
        ];
        let pages = compose(&[Block::Table(table)], &config);

        assert!(pages.len() >= 2);
        assert_inside_margins(&pages, &config);
        for page in &pages {
            assert_eq!(texts(page)[..2], ["Degree", "Location"]);
        }

        let body: Vec<&str> = pages
            .iter()
            .flat_map(|p| texts(p).into_iter().skip(2))
            .filter(|t| t.starts_with("word"))
            .collect();
        assert_eq!(body.join(" "), degree);
        let last = pages.last().unwrap();
        assert!(texts(last).contains(&"Degree after"));
    }

    #[test]
    fn test_tall_contact_cell_continues_on_next_page() {
        let config = default_page_config();
        let email = numbered_words(500);
        let pages = compose(
            &[Block::ContactTable(vec![[email.clone(), "+1 555 0100".to_string()]])],
            &config,
        );

        assert!(pages.len() >= 2);
        assert_inside_margins(&pages, &config);
        let words: Vec<&str> = pages
            .iter()
            .flat_map(texts)
            .filter(|t| t.starts_with("word"))
            .collect();
        assert_eq!(words.join(" "), email);
        assert!(texts(&pages[0]).contains(&"+1 555 0100"));
    }

    #[test]
    fn test_overflow_starts_new_page_and_stays_inside_margins() {
        let config = default_page_config();
        let blocks: Vec<Block> = (0..200)
            .map(|i| Block::Bullet(format!("Contribution number {i}")))
            .collect();
        let pages = compose(&blocks, &config);
        assert!(pages.len() >= 3);
        for page in &pages {
            for op in &page.ops {
                if let DrawOp::Text { y, .. } = op {
                    assert!(*y >= config.bottom_pt() && *y <= config.top_pt());
                }
            }
        }
    }

    #[test]
    fn test_heading_is_kept_with_following_line() {
        let config = default_page_config();
        // 55 body lines leave room for the heading band but not for the line after it.
        let mut blocks: Vec<Block> = (0..55)
            .map(|i| Block::Line {
                text: format!("line {i}"),
                style: TextStyle::Body,
            })
            .collect();
        blocks.push(Block::SectionHeading("Projects"));
        blocks.push(Block::Bullet("First project".to_string()));
        let pages = compose(&blocks, &config);
        assert_eq!(pages.len(), 2);
        assert!(!texts(&pages[0]).contains(&"Projects"));
        let last = pages.last().unwrap();
        assert!(texts(last).contains(&"Projects"));
        assert!(texts(last).contains(&"First project"));
    }
}
