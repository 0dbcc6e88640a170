pub mod client;
pub mod source;

pub use client::{ApiClient, ClientCredentials};
pub use source::{ApiSource, Source};
