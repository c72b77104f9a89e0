pub mod event;
pub mod report;

pub use event::LogEvent;
pub use report::{IpRow, UserIpRow};
