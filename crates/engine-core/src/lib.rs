pub mod connectors;
pub mod error;
pub mod fetcher;
pub mod settings;
pub mod sync;
pub mod transform;
