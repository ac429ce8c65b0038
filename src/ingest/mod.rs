pub mod reader;
pub mod scanner;

pub use reader::read_records;
pub use scanner::InputSources;
