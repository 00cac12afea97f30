//! Command implementations.

pub mod classify;
pub mod config;
pub mod decode;
pub mod scan;
pub mod watch;

pub use self::classify::execute_classify;
pub use self::config::execute_config;
pub use self::decode::execute_decode;
pub use self::scan::execute_scan;
pub use self::watch::execute_watch;
