use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use tracing::debug;

use crate::error::{PdfError, Result};
use crate::fonts::BuiltinFont;
use crate::graphics::{ellipse_curves, Color};
use crate::objects::{ObjId, PdfObject};
use crate::writer::{escape_pdf_string, PdfWriter};

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
const FIRST_FREE_OBJ_NUM: u32 = 3;

const DEFAULT_FONT: BuiltinFont = BuiltinFont::Helvetica;
const DEFAULT_FONT_SIZE: f64 = 12.0;
const PRODUCER: &str = concat!("mkpdf-core ", env!("CARGO_PKG_VERSION"));

/// High-level API for building PDF documents.
///
/// Generic over `Write` so it works with files (`BufWriter<File>`),
/// in-memory buffers (`Vec<u8>`), or any other writer.
///
/// Coordinates are PDF points with the origin at the bottom-left of
/// the page. Pages are written incrementally: `end_page()` flushes the
/// page to the writer and drops its content from memory.
///
/// Drawing calls chain and never fail on their own. Calling one while
/// no page is open records `PdfError::NoOpenPage`, which is returned by
/// the next `end_page()` or `end_document()`.
pub struct PdfDocument<W: Write> {
    writer: PdfWriter<W>,
    info: Vec<(String, String)>,
    compress: bool,
    page_obj_ids: Vec<ObjId>,
    font_obj_ids: BTreeMap<BuiltinFont, ObjId>,
    current_page: Option<PageBuilder>,
    font: BuiltinFont,
    font_size: f64,
    text_color: Option<Color>,
    next_obj_num: u32,
    deferred: Option<PdfError>,
}

struct PageBuilder {
    width: f64,
    height: f64,
    content_ops: Vec<u8>,
    fonts: BTreeSet<BuiltinFont>,
}

impl PdfDocument<BufWriter<File>> {
    /// Create a new PDF document that writes to a file.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> PdfDocument<W> {
    /// Create a document on `writer` and write the PDF header.
    pub fn new(writer: W) -> Result<Self> {
        let mut pdf_writer = PdfWriter::new(writer);
        pdf_writer.write_header()?;
        Ok(PdfDocument {
            writer: pdf_writer,
            info: Vec::new(),
            compress: false,
            page_obj_ids: Vec::new(),
            font_obj_ids: BTreeMap::new(),
            current_page: None,
            font: DEFAULT_FONT,
            font_size: DEFAULT_FONT_SIZE,
            text_color: None,
            next_obj_num: FIRST_FREE_OBJ_NUM,
            deferred: None,
        })
    }

    /// Set a document info entry (e.g. "Creator", "Title").
    /// Setting the same key twice keeps the last value.
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        self.info.retain(|(k, _)| k != key);
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    /// Compress page content streams with Flate.
    pub fn set_compression(&mut self, enabled: bool) -> &mut Self {
        self.compress = enabled;
        self
    }

    /// Begin a new page of `width` x `height` points. An open page is
    /// closed first.
    pub fn begin_page(&mut self, width: f64, height: f64) -> &mut Self {
        if self.current_page.is_some() {
            if let Err(err) = self.end_page() {
                self.deferred.get_or_insert(err);
            }
        }
        self.current_page = Some(PageBuilder {
            width,
            height,
            content_ops: Vec::new(),
            fonts: BTreeSet::new(),
        });
        self
    }

    /// Size of the open page in points.
    pub fn page_size(&self) -> Option<(f64, f64)> {
        self.current_page.as_ref().map(|p| (p.width, p.height))
    }

    /// Font used by subsequent text calls. Persists across pages.
    pub fn set_font(&mut self, font: BuiltinFont, size: f64) -> &mut Self {
        self.font = font;
        self.font_size = size;
        self
    }

    /// Font and size in points used by text calls.
    pub fn current_font(&self) -> (BuiltinFont, f64) {
        (self.font, self.font_size)
    }

    /// Color used by subsequent text calls. Unlike the fill color it
    /// only affects text.
    pub fn set_text_color(&mut self, color: Color) -> &mut Self {
        self.text_color = Some(color);
        self
    }

    /// Place text with its baseline starting at (x, y).
    pub fn place_text(&mut self, text: &str, x: f64, y: f64) -> &mut Self {
        let (font, size) = (self.font, self.font_size);
        let mut values = vec![size, x, y];
        if let Some(c) = self.text_color {
            values.extend([c.r, c.g, c.b]);
        }
        if !self.check_numbers("place_text", &values) {
            return self;
        }
        let mut ops = format!(
            "BT\n/{} {} Tf\n{} {} Td\n({}) Tj\nET\n",
            font.pdf_name(),
            format_coord(size),
            format_coord(x),
            format_coord(y),
            escape_pdf_string(text),
        );
        if let Some(c) = self.text_color {
            ops = format!("q\n{} rg\n{}Q\n", format_color(c), ops);
        }
        if let Some(page) = self.page_mut("place_text") {
            page.fonts.insert(font);
            page.content_ops.extend_from_slice(ops.as_bytes());
        }
        self
    }

    /// Stroke color for subsequent paths (`RG`).
    pub fn set_stroke_color(&mut self, color: Color) -> &mut Self {
        self.push_op(
            "set_stroke_color",
            &[color.r, color.g, color.b],
            format!("{} RG\n", format_color(color)),
        )
    }

    /// Fill color for subsequent paths (`rg`).
    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        self.push_op(
            "set_fill_color",
            &[color.r, color.g, color.b],
            format!("{} rg\n", format_color(color)),
        )
    }

    /// Line width in points.
    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.push_op("set_line_width", &[width], format!("{} w\n", format_coord(width)))
    }

    /// Start a new subpath at (x, y).
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push_op(
            "move_to",
            &[x, y],
            format!("{} {} m\n", format_coord(x), format_coord(y)),
        )
    }

    /// Straight segment from the current point to (x, y).
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push_op(
            "line_to",
            &[x, y],
            format!("{} {} l\n", format_coord(x), format_coord(y)),
        )
    }

    /// Cubic Bezier from the current point to (x3, y3).
    pub fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> &mut Self {
        self.push_op(
            "curve_to",
            &[x1, y1, x2, y2, x3, y3],
            curve_op([(x1, y1), (x2, y2), (x3, y3)]),
        )
    }

    /// Rectangle path with its lower-left corner at (x, y).
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.push_op(
            "rect",
            &[x, y, width, height],
            format!(
                "{} {} {} {} re\n",
                format_coord(x),
                format_coord(y),
                format_coord(width),
                format_coord(height),
            ),
        )
    }

    /// Closed ellipse path centered on (cx, cy). Paint it with
    /// `stroke`, `fill` or `fill_stroke`.
    pub fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) -> &mut Self {
        if !self.check_numbers("ellipse", &[cx, cy, rx, ry]) {
            return self;
        }
        let (start, curves) = ellipse_curves(cx, cy, rx, ry);
        let mut ops = format!("{} {} m\n", format_coord(start.0), format_coord(start.1));
        for curve in curves {
            ops.push_str(&curve_op(curve));
        }
        ops.push_str("h\n");
        self.push_op("ellipse", &[], ops)
    }

    /// Closed circle path of radius `r`.
    pub fn circle(&mut self, cx: f64, cy: f64, r: f64) -> &mut Self {
        self.ellipse(cx, cy, r, r)
    }

    /// Close the current subpath (`h`).
    pub fn close_path(&mut self) -> &mut Self {
        self.push_op("close_path", &[], "h\n".to_string())
    }

    /// Stroke the current path (`S`).
    pub fn stroke(&mut self) -> &mut Self {
        self.push_op("stroke", &[], "S\n".to_string())
    }

    /// Fill the current path, nonzero winding (`f`).
    pub fn fill(&mut self) -> &mut Self {
        self.push_op("fill", &[], "f\n".to_string())
    }

    /// Fill, then stroke the current path (`B`).
    pub fn fill_stroke(&mut self) -> &mut Self {
        self.push_op("fill_stroke", &[], "B\n".to_string())
    }

    /// Push the graphics state (`q`).
    pub fn save_state(&mut self) -> &mut Self {
        self.push_op("save_state", &[], "q\n".to_string())
    }

    /// Pop the graphics state (`Q`).
    pub fn restore_state(&mut self) -> &mut Self {
        self.push_op("restore_state", &[], "Q\n".to_string())
    }

    fn page_mut(&mut self, op: &'static str) -> Option<&mut PageBuilder> {
        if self.current_page.is_none() {
            self.deferred.get_or_insert(PdfError::NoOpenPage { op });
            return None;
        }
        self.current_page.as_mut()
    }

    /// Record `InvalidNumber` for the first value a PDF real cannot hold.
    fn check_numbers(&mut self, op: &'static str, values: &[f64]) -> bool {
        match values.iter().find(|v| !is_pdf_real(**v)) {
            Some(&value) => {
                self.deferred.get_or_insert(PdfError::InvalidNumber { op, value });
                false
            }
            None => true,
        }
    }

    fn push_op(&mut self, op: &'static str, values: &[f64], content: String) -> &mut Self {
        if !self.check_numbers(op, values) {
            return self;
        }
        if let Some(page) = self.page_mut(op) {
            page.content_ops.extend_from_slice(content.as_bytes());
        }
        self
    }

    fn alloc_obj_id(&mut self) -> ObjId {
        let id = ObjId(self.next_obj_num, 0);
        self.next_obj_num += 1;
        id
    }

    /// Object id of `font`, writing its dictionary on first use.
    fn font_obj_id(&mut self, font: BuiltinFont) -> Result<ObjId> {
        if let Some(&id) = self.font_obj_ids.get(&font) {
            return Ok(id);
        }
        let id = self.alloc_obj_id();
        let mut entries = vec![
            ("Type", PdfObject::name("Font")),
            ("Subtype", PdfObject::name("Type1")),
            ("BaseFont", PdfObject::name(font.pdf_base_name())),
        ];
        if !font.is_symbolic() {
            entries.push(("Encoding", PdfObject::name("WinAnsiEncoding")));
        }
        self.writer.write_object(id, &PdfObject::dict(entries))?;
        self.font_obj_ids.insert(font, id);
        Ok(id)
    }

    /// End the current page: write its fonts, content stream and page
    /// dictionary, then free the page content.
    pub fn end_page(&mut self) -> Result<()> {
        if let Some(err) = self.deferred.take() {
            return Err(err);
        }
        let page = self
            .current_page
            .take()
            .ok_or(PdfError::NoOpenPage { op: "end_page" })?;

        let mut font_refs = Vec::with_capacity(page.fonts.len());
        for &font in &page.fonts {
            let id = self.font_obj_id(font)?;
            font_refs.push((font.pdf_name(), PdfObject::reference(id)));
        }

        let content_id = self.alloc_obj_id();
        let page_id = self.alloc_obj_id();

        let raw_len = page.content_ops.len();
        let content_stream = if self.compress {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&page.content_ops)?;
            PdfObject::stream(
                vec![("Filter", PdfObject::name("FlateDecode"))],
                encoder.finish()?,
            )
        } else {
            PdfObject::stream(vec![], page.content_ops)
        };
        self.writer.write_object(content_id, &content_stream)?;

        let resources = if font_refs.is_empty() {
            PdfObject::dict(vec![])
        } else {
            PdfObject::dict(vec![("Font", PdfObject::dict(font_refs))])
        };
        let page_dict = PdfObject::dict(vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", PdfObject::reference(PAGES_OBJ)),
            ("MediaBox", PdfObject::media_box(page.width, page.height)),
            ("Contents", PdfObject::reference(content_id)),
            ("Resources", resources),
        ]);
        self.writer.write_object(page_id, &page_dict)?;
        self.page_obj_ids.push(page_id);

        debug!(
            page = self.page_obj_ids.len(),
            content_bytes = raw_len,
            compressed = self.compress,
            "page written"
        );
        Ok(())
    }

    /// Finish the document: write the info dictionary, page tree,
    /// catalog, xref table and trailer. Returns the inner writer.
    pub fn end_document(mut self) -> Result<W> {
        if self.current_page.is_some() {
            self.end_page()?;
        }
        if let Some(err) = self.deferred.take() {
            return Err(err);
        }

        if !self.info.iter().any(|(k, _)| k == "Producer") {
            self.info.push(("Producer".to_string(), PRODUCER.to_string()));
        }
        let info_id = self.alloc_obj_id();
        let info_obj = PdfObject::dict(
            self.info
                .iter()
                .map(|(k, v)| (k.as_str(), PdfObject::literal_string(v)))
                .collect(),
        );
        self.writer.write_object(info_id, &info_obj)?;

        let kids = self
            .page_obj_ids
            .iter()
            .map(|id| PdfObject::reference(*id))
            .collect();
        let pages = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            ("Kids", PdfObject::array(kids)),
            ("Count", PdfObject::Integer(self.page_obj_ids.len() as i64)),
        ]);
        self.writer.write_object(PAGES_OBJ, &pages)?;

        let catalog = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::reference(PAGES_OBJ)),
        ]);
        self.writer.write_object(CATALOG_OBJ, &catalog)?;

        self.writer.write_xref_and_trailer(CATALOG_OBJ, Some(info_id))?;
        debug!(
            pages = self.page_obj_ids.len(),
            objects = self.writer.object_count(),
            bytes = self.writer.current_offset(),
            "document written"
        );
        Ok(self.writer.into_inner())
    }
}

fn curve_op(curve: [(f64, f64); 3]) -> String {
    let [(x1, y1), (x2, y2), (x3, y3)] = curve;
    format!(
        "{} {} {} {} {} {} c\n",
        format_coord(x1),
        format_coord(y1),
        format_coord(x2),
        format_coord(y2),
        format_coord(x3),
        format_coord(y3),
    )
}

/// Largest magnitude of a PDF real (PDF 32000-1:2008, Annex C).
const MAX_PDF_REAL: f64 = f32::MAX as f64;

fn is_pdf_real(v: f64) -> bool {
    v.is_finite() && v.abs() <= MAX_PDF_REAL
}

fn format_color(c: Color) -> String {
    format!("{} {} {}", format_coord(c.r), format_coord(c.g), format_coord(c.b))
}

/// Format a number for content streams: integers without a decimal
/// point, everything else with at most four decimals. Values outside
/// the PDF real range are written as 0; drawing calls reject them
/// before they get here.
pub(crate) fn format_coord(v: f64) -> String {
    if !is_pdf_real(v) {
        return "0".to_string();
    }
    if v == v.floor() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.4}", v);
        let s = s.trim_end_matches('0').trim_end_matches('.');
        if s == "-0" {
            "0".to_string()
        } else {
            s.to_string()
        }
    }
}
