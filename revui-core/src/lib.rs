pub mod client;
pub mod error;
pub mod parse;

pub use client::JjClient;
pub use error::JjError;
pub use parse::{log_template, parse_log, resolve_elided_links};
