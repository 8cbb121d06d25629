//! The page the tool draws: optional ellipses and one centered cell
//! of text, laid out in millimetres from the top-left margin.

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::Context;
use mkpdf_core::{Align, Color, Cursor, Frame, PdfDocument, Unit};
use tracing::{debug, warn};

use crate::config::RenderConfig;

/// Text cell size in millimetres.
const CELL_WIDTH: f64 = 200.0;
const CELL_HEIGHT: f64 = 10.0;

/// Knuth's multiplicative hashing constant (2^32 / golden ratio).
const KNUTH: u32 = 2_654_435_761;

const MIN_RADIUS: f64 = 5.0;
const MAX_RADIUS: f64 = 30.0;

/// Outline color relative to the fill.
const OUTLINE_SHADE: f64 = 0.6;

/// One ellipse, in millimetres from the top-left of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseSpec {
    pub x: f64,
    pub y: f64,
    pub rx: f64,
    pub ry: f64,
    pub color: Color,
}

fn hash(v: u32) -> u32 {
    v.wrapping_add(1).wrapping_mul(KNUTH)
}

/// High 24 bits of `h` as a fraction in [0, 1).
fn unit_fraction(h: u32) -> f64 {
    f64::from(h >> 8) / f64::from(1u32 << 24)
}

/// Ellipse number `index` for a page of `width` x `height` mm.
/// Each attribute comes from the next round of hashing, so the same
/// index and seed always give the same ellipse.
pub fn ellipse_at(index: u32, seed: u32, width: f64, height: f64) -> EllipseSpec {
    let mut h = index.wrapping_add(seed);
    let mut next = || {
        h = hash(h);
        h
    };
    let x = unit_fraction(next()) * width;
    let y = unit_fraction(next()) * height;
    let rx = MIN_RADIUS + unit_fraction(next()) * (MAX_RADIUS - MIN_RADIUS);
    let ry = MIN_RADIUS + unit_fraction(next()) * (MAX_RADIUS - MIN_RADIUS);
    let c = next();
    let color = Color::from_rgb8((c >> 24) as u8, (c >> 16) as u8, (c >> 8) as u8);
    EllipseSpec {
        x,
        y,
        rx,
        ry,
        color,
    }
}

fn draw_ellipses<W: Write>(doc: &mut PdfDocument<W>, frame: &Frame, count: u32, seed: u32) {
    if count == 0 {
        return;
    }
    doc.save_state().set_line_width(0.5);
    for i in 0..count {
        let e = ellipse_at(i, seed, frame.width(), frame.height());
        doc.set_fill_color(e.color)
            .set_stroke_color(e.color.scaled(OUTLINE_SHADE))
            .ellipse(
                frame.x_pt(e.x),
                frame.y_pt(e.y),
                frame.len_pt(e.rx),
                frame.len_pt(e.ry),
            )
            .fill_stroke();
    }
    doc.restore_state();
    debug!(count, seed, "ellipses drawn");
}

/// Draw the page described by `config` into `writer`.
pub fn render<W: Write>(config: &RenderConfig, writer: W) -> mkpdf_core::Result<W> {
    let mut doc = PdfDocument::new(writer)?;
    doc.set_info("Creator", "mkpdf");
    if let Some(title) = &config.title {
        doc.set_info("Title", title);
    }
    if let Some(author) = &config.author {
        doc.set_info("Author", author);
    }
    doc.set_compression(config.compress);

    let (width, height) = config.page_size.dimensions(config.orientation);
    doc.begin_page(width, height);
    let frame = Frame::new(Unit::Mm, width, height);

    doc.set_font(config.font, config.font_size);
    draw_ellipses(&mut doc, &frame, config.ellipse_count, config.seed);

    doc.set_text_color(config.text_color);
    Cursor::new(frame).cell(&mut doc, CELL_WIDTH, CELL_HEIGHT, &config.text, Align::Center);

    doc.end_document()
}

/// Render to the file at `config.output`. Returns the bytes written.
/// A partly written file is removed when rendering fails.
pub fn write_file(config: &RenderConfig) -> anyhow::Result<u64> {
    let path = &config.output;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let result = render(config, BufWriter::new(file))
        .map_err(anyhow::Error::from)
        .and_then(|mut writer| {
            writer.flush()?;
            Ok(writer.get_ref().metadata()?.len())
        });
    if result.is_err() {
        if let Err(err) = std::fs::remove_file(path) {
            warn!(path = %path.display(), %err, "could not remove partial output");
        }
    }
    result.with_context(|| format!("writing PDF to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(config: &RenderConfig) -> String {
        let bytes = render(config, Vec::new()).expect("render should succeed");
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn ellipses_are_deterministic() {
        let a: Vec<_> = (0..20).map(|i| ellipse_at(i, 3, 210.0, 297.0)).collect();
        let b: Vec<_> = (0..20).map(|i| ellipse_at(i, 3, 210.0, 297.0)).collect();
        assert_eq!(a, b);
        assert_ne!(a[0], a[1]);
        assert_ne!(ellipse_at(0, 0, 210.0, 297.0), ellipse_at(0, 1, 210.0, 297.0));
    }

    #[test]
    fn ellipses_stay_in_range() {
        for i in 0..500 {
            let e = ellipse_at(i, 0, 210.0, 297.0);
            assert!((0.0..210.0).contains(&e.x));
            assert!((0.0..297.0).contains(&e.y));
            assert!((MIN_RADIUS..MAX_RADIUS).contains(&e.rx));
            assert!((MIN_RADIUS..MAX_RADIUS).contains(&e.ry));
        }
    }

    #[test]
    fn seed_shifts_the_sequence() {
        assert_eq!(ellipse_at(5, 0, 100.0, 100.0), ellipse_at(2, 3, 100.0, 100.0));
    }

    #[test]
    fn hello_page_has_centered_text_only() {
        let output = render_to_string(&RenderConfig::hello("unused.pdf"));
        assert!(output.starts_with("%PDF-1.7"));
        assert!(output.contains("/Count 1"));
        assert!(output.contains("/MediaBox [0 0 595.28 841.89]"));
        assert!(output.contains("(Hello World!) Tj"));
        assert!(output.contains("/F1 12 Tf"));
        assert!(output.contains("/Creator (mkpdf)"));
        assert!(!output.contains(" c\n"));
    }

    #[test]
    fn ellipse_page_draws_each_ellipse() {
        let mut config = RenderConfig::hello("unused.pdf");
        config.ellipse_count = 12;
        let output = render_to_string(&config);
        assert_eq!(output.matches(" c\n").count(), 12 * 4);
        assert_eq!(output.matches("B\n").count(), 12);
        assert!(output.contains("(Hello World!) Tj"));
    }

    #[test]
    fn text_is_drawn_after_ellipses() {
        let mut config = RenderConfig::hello("unused.pdf");
        config.ellipse_count = 3;
        let output = render_to_string(&config);
        let last_fill = output.rfind("B\n").expect("ellipse fill");
        let text = output.find("(Hello World!) Tj").expect("text");
        assert!(last_fill < text);
    }

    #[test]
    fn write_file_reports_size() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = RenderConfig::hello(dir.path().join("hello.pdf"));
        let len = write_file(&config).expect("write should succeed");
        let bytes = std::fs::read(&config.output).expect("output exists");
        assert_eq!(len, bytes.len() as u64);
        assert!(bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn largest_font_size_writes_plain_numbers() {
        let mut config = RenderConfig::hello("unused.pdf");
        config.font_size = 1000.0;
        config.text = "W".repeat(200);
        let output = render_to_string(&config);
        let td = output.lines().find(|l| l.ends_with(" Td")).expect("text position");
        for operand in td.split(' ').take(2) {
            let value: f64 = operand.parse().expect("numeric operand");
            assert!(value.is_finite(), "operand {operand}");
            assert!(operand.len() < 16, "operand {operand}");
        }
    }

    #[test]
    fn failed_render_leaves_no_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = RenderConfig::hello(dir.path().join("broken.pdf"));
        config.font_size = f64::INFINITY;
        let err = write_file(&config).unwrap_err();
        assert!(format!("{err:#}").contains("broken.pdf"));
        assert!(!config.output.exists());
    }

    #[test]
    fn write_file_names_unwritable_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = RenderConfig::hello(dir.path().join("no-such-dir").join("x.pdf"));
        let err = write_file(&config).unwrap_err();
        assert!(format!("{err:#}").contains("no-such-dir"));
    }
}
