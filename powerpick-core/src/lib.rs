pub mod context;
pub mod error;
pub mod frequency;
pub mod generator;
pub mod models;
pub mod parser;
pub mod scoring;
pub mod session;

pub use error::CoreError;
