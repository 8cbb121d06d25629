use mkpdf_core::{Align, Cursor, Frame, Orientation, PageSize, PdfDocument, Unit};

fn a4_mm() -> (PdfDocument<Vec<u8>>, Cursor) {
    let (w, h) = PageSize::A4.dimensions(Orientation::Portrait);
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.begin_page(w, h);
    (doc, Cursor::new(Frame::new(Unit::Mm, w, h)))
}

fn td_operands(output: &str) -> (f64, f64) {
    let line = output
        .lines()
        .find(|l| l.ends_with(" Td"))
        .expect("text position");
    let mut parts = line.split(' ');
    let x = parts.next().unwrap().parse().unwrap();
    let y = parts.next().unwrap().parse().unwrap();
    (x, y)
}

#[test]
fn centered_cell_matches_metrics() {
    let (mut doc, mut cursor) = a4_mm();
    cursor.cell(&mut doc, 200.0, 10.0, "Hello World!", Align::Center);
    let bytes = doc.end_document().unwrap();
    let (x, y) = td_operands(&String::from_utf8_lossy(&bytes));

    // Cell starts at the 28.35pt margin and is 200mm wide. The text is
    // 65.34pt wide at 12pt.
    let cell_pt = 200.0 * 72.0 / 25.4;
    let expected_x = 28.35 + (cell_pt - 65.34) / 2.0;
    // Baseline sits at half the cell height plus 0.3 em.
    let expected_y = 841.89 - (28.35 + 5.0 * 72.0 / 25.4 + 0.3 * 12.0);
    assert!((x - expected_x).abs() < 1e-3, "x = {x}, expected {expected_x}");
    assert!((y - expected_y).abs() < 1e-3, "y = {y}, expected {expected_y}");
}

#[test]
fn left_and_right_alignment_use_cell_margin() {
    let (mut doc, mut cursor) = a4_mm();
    cursor.cell(&mut doc, 100.0, 10.0, "L", Align::Left);
    let left = doc.end_document().unwrap();
    let (lx, _) = td_operands(&String::from_utf8_lossy(&left));
    assert!((lx - (28.35 + 2.835)).abs() < 1e-3);

    let (mut doc, mut cursor) = a4_mm();
    cursor.cell(&mut doc, 100.0, 10.0, "R", Align::Right);
    let right = doc.end_document().unwrap();
    let (rx, _) = td_operands(&String::from_utf8_lossy(&right));
    // R = 722/1000 em at 12pt.
    let expected = 28.35 + 100.0 * 72.0 / 25.4 - 2.835 - 8.664;
    assert!((rx - expected).abs() < 1e-3);
}

#[test]
fn empty_cell_draws_nothing_but_advances() {
    let (mut doc, mut cursor) = a4_mm();
    let (left, top, right) = cursor.margins();
    assert!((left - 10.0).abs() < 0.01 && left == top && top == right);
    let (x0, _) = cursor.position();
    cursor.cell(&mut doc, 40.0, 10.0, "", Align::Center);
    assert!((cursor.position().0 - (x0 + 40.0)).abs() < 1e-9);
    let bytes = doc.end_document().unwrap();
    assert!(!String::from_utf8_lossy(&bytes).contains(" Tj"));
}

#[test]
fn cells_on_consecutive_lines() {
    let (mut doc, mut cursor) = a4_mm();
    cursor
        .cell(&mut doc, 0.0, 10.0, "first", Align::Left)
        .ln(None)
        .cell(&mut doc, 0.0, 10.0, "second", Align::Left);
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    let ys: Vec<f64> = output
        .lines()
        .filter(|l| l.ends_with(" Td"))
        .map(|l| l.split(' ').nth(1).unwrap().parse().unwrap())
        .collect();
    assert_eq!(ys.len(), 2);
    assert!((ys[0] - ys[1] - 10.0 * 72.0 / 25.4).abs() < 1e-3);
}
