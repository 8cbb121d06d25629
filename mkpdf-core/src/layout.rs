//! Top-left, user-unit page layout on top of `PdfDocument`.
//!
//! `PdfDocument` speaks PDF points with the origin at the bottom-left.
//! A `Frame` maps positions given in millimetres (or any `Unit`) from
//! the top-left corner onto that space, and a `Cursor` places text
//! cells one after another the way report generators do.

use std::io::Write;

use crate::document::PdfDocument;
use crate::fonts::FontMetrics;

/// Length unit of a layout frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Pt,
    Mm,
    Cm,
    In,
}

impl Unit {
    /// Points per unit.
    pub fn scale(&self) -> f64 {
        match self {
            Unit::Pt => 1.0,
            Unit::Mm => 72.0 / 25.4,
            Unit::Cm => 72.0 / 2.54,
            Unit::In => 72.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page format. Custom sizes are given in points, portrait.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Custom(f64, f64),
}

impl PageSize {
    /// Width and height in points for `orientation`.
    pub fn dimensions(&self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = match self {
            PageSize::A3 => (841.89, 1190.55),
            PageSize::A4 => (595.28, 841.89),
            PageSize::A5 => (420.94, 595.28),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom(w, h) => (*w, *h),
        };
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Parse a format name such as "a4" or "Letter".
    pub fn from_name(name: &str) -> Option<PageSize> {
        match name.to_ascii_lowercase().as_str() {
            "a3" => Some(PageSize::A3),
            "a4" => Some(PageSize::A4),
            "a5" => Some(PageSize::A5),
            "letter" => Some(PageSize::Letter),
            "legal" => Some(PageSize::Legal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Maps top-left user-unit coordinates onto a page's PDF space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    k: f64,
    width_pt: f64,
    height_pt: f64,
}

impl Frame {
    pub fn new(unit: Unit, width_pt: f64, height_pt: f64) -> Self {
        Frame {
            k: unit.scale(),
            width_pt,
            height_pt,
        }
    }

    pub fn scale(&self) -> f64 {
        self.k
    }

    /// Page width in user units.
    pub fn width(&self) -> f64 {
        self.width_pt / self.k
    }

    /// Page height in user units.
    pub fn height(&self) -> f64 {
        self.height_pt / self.k
    }

    pub fn x_pt(&self, x: f64) -> f64 {
        x * self.k
    }

    pub fn y_pt(&self, y: f64) -> f64 {
        self.height_pt - y * self.k
    }

    pub fn len_pt(&self, v: f64) -> f64 {
        v * self.k
    }
}

/// Default page margin: 1 cm, in points.
const DEFAULT_MARGIN_PT: f64 = 28.35;

/// Current writing position for cell-based text layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    frame: Frame,
    x: f64,
    y: f64,
    left: f64,
    top: f64,
    right: f64,
    cell_margin: f64,
    last_height: f64,
}

impl Cursor {
    /// Cursor at the top-left margin of `frame`.
    pub fn new(frame: Frame) -> Self {
        let margin = DEFAULT_MARGIN_PT / frame.scale();
        Cursor {
            frame,
            x: margin,
            y: margin,
            left: margin,
            top: margin,
            right: margin,
            cell_margin: margin / 10.0,
            last_height: 0.0,
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Left, top and right margins in user units.
    pub fn margins(&self) -> (f64, f64, f64) {
        (self.left, self.top, self.right)
    }

    pub fn set_xy(&mut self, x: f64, y: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the left, top and right margins. A cursor outside the new
    /// top-left margins is moved inside them.
    pub fn set_margins(&mut self, left: f64, top: f64, right: f64) -> &mut Self {
        self.left = left;
        self.top = top;
        self.right = right;
        if self.x < left {
            self.x = left;
        }
        if self.y < top {
            self.y = top;
        }
        self
    }

    /// Write `text` in a `w` x `h` cell at the cursor, then move the
    /// cursor right by the cell width. A width of 0 extends the cell
    /// to the right margin.
    pub fn cell<W: Write>(
        &mut self,
        doc: &mut PdfDocument<W>,
        w: f64,
        h: f64,
        text: &str,
        align: Align,
    ) -> &mut Self {
        let w = if w == 0.0 {
            self.frame.width() - self.right - self.x
        } else {
            w
        };

        if !text.is_empty() {
            let (font, size_pt) = doc.current_font();
            let k = self.frame.scale();
            let text_width = FontMetrics::measure_text(text, font, size_pt) / k;
            let dx = match align {
                Align::Left => self.cell_margin,
                Align::Center => (w - text_width) / 2.0,
                Align::Right => w - self.cell_margin - text_width,
            };
            let baseline = self.y + 0.5 * h + 0.3 * size_pt / k;
            doc.place_text(
                text,
                self.frame.x_pt(self.x + dx),
                self.frame.y_pt(baseline),
            );
        }

        self.x += w;
        self.last_height = h;
        self
    }

    /// Line break: back to the left margin and down by `h`, or by the
    /// height of the last cell.
    pub fn ln(&mut self, h: Option<f64>) -> &mut Self {
        self.x = self.left;
        self.y += h.unwrap_or(self.last_height);
        self
    }
}
