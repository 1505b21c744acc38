//! Input/output
mod ron;

pub use self::ron::ContactReport;
