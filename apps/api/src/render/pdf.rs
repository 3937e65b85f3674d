//! PDF encoding of composed pages on top of `lopdf`.
//!
//! Text uses the base-14 Helvetica faces with WinAnsiEncoding, so nothing is
//! embedded. Content streams are left uncompressed. No `/CreationDate` or
//! `/ID` is written, so equal pages always encode to equal bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::layout::font_metrics::{FontFace, PageConfig};
use crate::render::composer::{DrawOp, Page, Rgb};
use crate::render::RenderError;

const PRODUCER: &str = concat!("resume-builder ", env!("CARGO_PKG_VERSION"));
const STROKE_WIDTH: f32 = 0.5;

/// Serializes `pages` into a complete PDF file.
pub fn encode_pdf(pages: &[Page], config: &PageConfig, title: &str) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for face in FontFace::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }

    let resources = dictionary! { "Font" => fonts };
    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page).encode().map_err(failure)?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => resources.clone(),
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                real(config.page_width_pt),
                real(config.page_height_pt),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id: ObjectId = doc.add_object(dictionary! {
        "Title" => Object::string_literal(win_ansi_bytes(title)),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(failure)?;
    Ok(bytes)
}

/// Content-stream operators for one page, in draw order.
pub fn page_content(page: &Page) -> Content {
    let mut operations = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new("rg", rgb(*color)));
                operations.push(Operation::new("re", rect(*x, *y, *width, *height)));
                operations.push(Operation::new("f", vec![]));
                operations.push(Operation::new("Q", vec![]));
            }
            DrawOp::StrokeRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new("RG", rgb(*color)));
                operations.push(Operation::new("w", vec![real(STROKE_WIDTH)]));
                operations.push(Operation::new("re", rect(*x, *y, *width, *height)));
                operations.push(Operation::new("S", vec![]));
                operations.push(Operation::new("Q", vec![]));
            }
            DrawOp::Text {
                x,
                y,
                face,
                size,
                text,
            } => {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![Object::Name(face.resource_name().into()), real(*size)],
                ));
                operations.push(Operation::new("Td", vec![real(*x), real(*y)]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(win_ansi_bytes(text))],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
        }
    }
    Content { operations }
}

/// Rounds to two decimals; whole values are written as integers.
fn real(value: f32) -> Object {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        Object::Integer(rounded as i64)
    } else {
        Object::Real(rounded.into())
    }
}

fn rgb(Rgb(r, g, b): Rgb) -> Vec<Object> {
    vec![real(r), real(g), real(b)]
}

fn rect(x: f32, y: f32, width: f32, height: f32) -> Vec<Object> {
    vec![real(x), real(y), real(width), real(height)]
}

fn failure(e: impl std::fmt::Display) -> RenderError {
    RenderError::Failure(e.to_string())
}

/// Encodes `text` as WinAnsi bytes.
pub fn win_ansi_bytes(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

/// Maps a character to its WinAnsiEncoding byte; unmappable characters become `?`.
pub fn win_ansi_byte(c: char) -> u8 {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => code as u8,
        0x09 | 0x0A | 0x0D => b' ',
        _ => match c {
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02C6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8A,
            '\u{2039}' => 0x8B,
            '\u{0152}' => 0x8C,
            '\u{017D}' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{02DC}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9A,
            '\u{203A}' => 0x9B,
            '\u{0153}' => 0x9C,
            '\u{017E}' => 0x9E,
            '\u{0178}' => 0x9F,
            _ => b'?',
        },
    }
}

/// Parses rendered bytes back for assertions.
#[cfg(test)]
pub(crate) mod inspect {
    use lopdf::content::Content;
    use lopdf::Document;

    pub fn load(bytes: &[u8]) -> Document {
        Document::load_mem(bytes).unwrap()
    }

    pub fn page_count(bytes: &[u8]) -> usize {
        load(bytes).get_pages().len()
    }

    /// Every `Tj` string in page order, decoded from WinAnsi as Latin-1.
    pub fn text_runs(bytes: &[u8]) -> Vec<String> {
        let doc = load(bytes);
        let mut runs = Vec::new();
        for page_id in doc.get_pages().into_values() {
            let data = doc.get_page_content(page_id).unwrap();
            let content = Content::decode(&data).unwrap();
            for op in content.operations.iter().filter(|op| op.operator == "Tj") {
                let raw = op.operands[0].as_str().unwrap();
                runs.push(raw.iter().map(|&b| b as char).collect());
            }
        }
        runs
    }
}
