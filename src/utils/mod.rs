mod format;
mod logger;

pub use format::group_digits;
pub use logger::setup_logger;
