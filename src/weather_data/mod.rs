pub mod aggregate;
pub mod error;
pub mod fetcher;
pub mod progress;
pub mod source;
