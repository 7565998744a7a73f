//! Report formatting utilities.

pub mod csv;
pub mod json;
pub mod text;

pub use self::csv::{CSV_HEADER, save_csv, write_csv};
pub use json::format_papers_json;
pub use text::format_papers_text;
