pub mod document;
pub mod enhance;
pub mod report;
pub mod template;

pub use document::*;
pub use enhance::*;
pub use report::*;
pub use template::*;
