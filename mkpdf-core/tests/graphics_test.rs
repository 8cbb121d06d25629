use mkpdf_core::{Color, PdfDocument};

fn content(build: impl FnOnce(&mut PdfDocument<Vec<u8>>)) -> String {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.begin_page(612.0, 792.0);
    build(&mut doc);
    let bytes = doc.end_document().unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[test]
fn stroke_line_produces_operators() {
    let output = content(|doc| {
        doc.move_to(100.0, 200.0).line_to(300.0, 400.0).stroke();
    });
    assert!(output.contains("100 200 m\n300 400 l\nS\n"));
}

#[test]
fn color_operators() {
    let output = content(|doc| {
        doc.set_stroke_color(Color::rgb(1.0, 0.0, 0.0));
        doc.set_fill_color(Color::rgb(0.0, 0.5, 1.0));
    });
    assert!(output.contains("1 0 0 RG\n"));
    assert!(output.contains("0 0.5 1 rg\n"));
}

#[test]
fn rgb8_color_is_normalized() {
    let output = content(|doc| {
        doc.set_fill_color(Color::from_rgb8(255, 51, 0));
    });
    assert!(output.contains("1 0.2 0 rg\n"));
}

#[test]
fn line_width_and_rect() {
    let output = content(|doc| {
        doc.set_line_width(2.5).rect(50.0, 50.0, 200.0, 100.0).fill_stroke();
    });
    assert!(output.contains("2.5 w\n50 50 200 100 re\nB\n"));
}

#[test]
fn curve_to_operator() {
    let output = content(|doc| {
        doc.move_to(0.0, 0.0)
            .curve_to(10.0, 20.0, 30.0, 40.0, 50.0, 60.0)
            .close_path()
            .fill();
    });
    assert!(output.contains("0 0 m\n10 20 30 40 50 60 c\nh\nf\n"));
}

#[test]
fn ellipse_is_four_curves() {
    let output = content(|doc| {
        doc.ellipse(100.0, 100.0, 50.0, 20.0).stroke();
    });
    assert!(output.contains("150 100 m\n"));
    assert_eq!(output.matches(" c\n").count(), 4);
    // Top point of the first arc: control distance 0.5523 * rx.
    assert!(output.contains("150 111.0457 127.6142 120 100 120 c\n"));
    assert!(output.contains("h\nS\n"));
}

#[test]
fn circle_uses_equal_radii() {
    let output = content(|doc| {
        doc.circle(0.0, 0.0, 10.0).fill();
    });
    assert!(output.contains("10 0 m\n10 5.5228 5.5228 10 0 10 c\n"));
}

#[test]
fn save_restore_state_chain() {
    let output = content(|doc| {
        doc.save_state()
            .set_stroke_color(Color::gray(0.5))
            .set_line_width(2.0)
            .move_to(10.0, 10.0)
            .line_to(100.0, 100.0)
            .stroke()
            .restore_state();
    });
    assert!(output.contains("q\n0.5 0.5 0.5 RG\n2 w\n10 10 m\n100 100 l\nS\nQ\n"));
}

#[test]
fn graphics_with_text() {
    let output = content(|doc| {
        doc.place_text("Hello", 72.0, 720.0);
        doc.set_stroke_color(Color::rgb(0.0, 0.0, 1.0));
        doc.rect(72.0, 700.0, 100.0, 20.0).stroke();
    });
    assert!(output.contains("(Hello) Tj"));
    assert!(output.contains("0 0 1 RG\n72 700 100 20 re\nS\n"));
    assert!(output.starts_with("%PDF-1.7"));
    assert!(output.contains("/Count 1"));
}
