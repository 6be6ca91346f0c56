pub mod document;
pub mod extract;
pub mod text;

pub use document::{DocumentOverview, PdfDocument};
