use mkpdf_core::{Align, Color, Cursor, Frame, Orientation, PageSize, PdfDocument, Unit};

fn main() -> mkpdf_core::Result<()> {
    let path = "graphics_output.pdf";
    let (width, height) = PageSize::A4.dimensions(Orientation::Portrait);

    let mut doc = PdfDocument::create(path)?;
    doc.set_info("Title", "Shapes Demo");
    doc.begin_page(width, height);

    // Page border
    doc.set_stroke_color(Color::BLACK);
    doc.set_line_width(1.0);
    doc.rect(36.0, 36.0, width - 72.0, height - 72.0);
    doc.stroke();

    // Overlapping ellipses with darker outlines
    doc.save_state();
    for (i, color) in [
        Color::from_rgb8(230, 80, 60),
        Color::from_rgb8(60, 160, 90),
        Color::from_rgb8(50, 100, 220),
    ]
    .into_iter()
    .enumerate()
    {
        let cx = 200.0 + 100.0 * i as f64;
        doc.set_fill_color(color)
            .set_stroke_color(color.scaled(0.6))
            .ellipse(cx, 420.0, 90.0, 50.0)
            .fill_stroke();
    }
    doc.restore_state();

    // Headline laid out in millimetres from the top-left margin
    let mut cursor = Cursor::new(Frame::new(Unit::Mm, width, height));
    doc.set_text_color(Color::from_rgb8(40, 40, 40));
    cursor.cell(&mut doc, 0.0, 10.0, "Shapes Demo", Align::Center);

    doc.end_document()?;
    println!("Generated: {}", path);
    Ok(())
}
