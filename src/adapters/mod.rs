// Adapters layer: concrete implementations of domain ports for external systems.

pub mod http;

pub use http::HttpTriviaSource;
