pub mod docx;

pub use docx::{attachment_filename, DocxGenerator};
