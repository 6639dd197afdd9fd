pub mod config;
pub mod detect;
pub mod format;
pub mod reconcile;
pub mod report;
pub mod runtime;
pub mod tag;
