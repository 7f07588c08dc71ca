pub mod demo;
pub mod error;
pub mod fetcher;
pub mod source;
