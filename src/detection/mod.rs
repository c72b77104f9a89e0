pub mod aggregator;
pub mod failure_tally;
pub mod ip_users;

pub use aggregator::{aggregate_reader, analyze_logs, AggregateStats, Aggregates};
pub use failure_tally::FailureTally;
pub use ip_users::IpUserSet;
