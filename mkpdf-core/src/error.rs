use std::io;

use thiserror::Error;

/// Errors raised while building or writing a PDF document.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("i/o error while writing PDF: {0}")]
    Io(#[from] io::Error),

    /// A page-level operation ran while no page was open.
    #[error("`{op}` called with no open page")]
    NoOpenPage { op: &'static str },

    /// A coordinate, size or color component that is not a finite
    /// number within the range a PDF real can hold.
    #[error("`{op}` given out-of-range number {value}")]
    InvalidNumber { op: &'static str, value: f64 },

    #[error("unknown font family {family:?} with style {style:?}")]
    UnknownFont { family: String, style: String },
}

pub type Result<T> = std::result::Result<T, PdfError>;
