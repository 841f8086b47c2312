pub mod json;
pub mod markdown;
pub mod terminal;
pub mod tsv;

pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;
pub use tsv::TsvWriter;
