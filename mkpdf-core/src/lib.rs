pub mod document;
pub mod error;
pub mod fonts;
pub mod graphics;
pub mod layout;
pub mod objects;
pub mod writer;

pub use document::PdfDocument;
pub use error::{PdfError, Result};
pub use fonts::{BuiltinFont, FontMetrics};
pub use graphics::Color;
pub use layout::{Align, Cursor, Frame, Orientation, PageSize, Unit};
