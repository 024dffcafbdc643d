//! Standard listener implementations.

pub mod logging;
pub mod timed;
pub mod traced;

pub use logging::LoggingListener;
pub use timed::Timed;
pub use traced::Traced;
