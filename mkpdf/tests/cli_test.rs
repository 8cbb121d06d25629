use std::path::Path;
use std::process::{Command, Output};

fn mkpdf(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mkpdf"))
        .args(args)
        .env_clear()
        .output()
        .expect("binary should run")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

#[test]
fn writes_non_empty_pdf_to_given_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.pdf");

    let out = mkpdf(&[path_arg(&path)]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let bytes = std::fs::read(&path).unwrap();
    assert!(!bytes.is_empty());
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(bytes.ends_with(b"%%EOF\n"));
}

#[test]
fn ellipse_variant_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.pdf");
    let second = dir.path().join("b.pdf");

    for path in [&first, &second] {
        let out = mkpdf(&["--ellipses", "30", "--seed", "9", path_arg(path)]);
        assert!(out.status.success());
    }

    let a = std::fs::read(&first).unwrap();
    let b = std::fs::read(&second).unwrap();
    assert_eq!(a, b);
    assert!(String::from_utf8_lossy(&a).contains(" c\n"));
}

#[test]
fn env_vars_configure_the_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("env.pdf");

    let out = Command::new(env!("CARGO_BIN_EXE_mkpdf"))
        .arg(&path)
        .env_clear()
        .env("MKPDF_TEXT", "From env")
        .env("MKPDF_PAGE_SIZE", "letter")
        .env("MKPDF_LANDSCAPE", "1")
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let text = String::from_utf8_lossy(&std::fs::read(&path).unwrap()).into_owned();
    assert!(text.contains("(From env) Tj"));
    assert!(text.contains("/MediaBox [0 0 792.0 612.0]"));
}

#[test]
fn missing_argument_fails() {
    let out = mkpdf(&[]);
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn unwritable_path_fails_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.pdf");

    let out = mkpdf(&[path_arg(&path)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("missing"));
}

#[test]
fn invalid_setting_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.pdf");

    let out = mkpdf(&["--font", "Papyrus", path_arg(&path)]);
    assert!(!out.status.success());
    assert!(!path.exists());
}
