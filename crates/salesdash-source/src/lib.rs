pub mod client;
pub mod error;

pub use client::SalesClient;
pub use error::SourceError;
