pub mod ai;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod session;
pub mod types;

pub use session::{ChatSession, SessionOptions, SkipReason, Submission};
