//! Format implementations
//!
//! Each module converts between the document tree and one text representation.

pub mod delta;
pub mod html;
pub mod sem;
pub mod synopsis;
pub mod tag;

pub use delta::DeltaFormat;
pub use html::{HtmlFormat, HtmlOptions};
pub use sem::{ParseOptions, SemFormat};
pub use synopsis::{SynopsisFormat, SynopsisPrinter};
pub use tag::{TagFormat, TagPrinter};
