pub mod line_parser;
pub mod log_file;

pub use line_parser::parse_log_line;
pub use log_file::{for_each_event, LogFile};
