//! Relays batch translation requests dropped in S3 through Amazon
//! Translate, writing the consolidated results to a response bucket.

pub mod app;
pub mod client;
pub mod conf;
pub mod error;
pub mod request;
pub mod store;
pub mod translate;
pub mod trigger;
