pub mod columns;
pub mod reader;

pub use columns::{classify, ClassifiedColumns, RoundColumn};
pub use reader::{detect_delimiter, parse, RawRecord, Table};
