//! Alignment classifier backed by the generative-language `generateContent`
//! endpoint with a fixed JSON response schema.

mod client;
mod prompt;
mod schema;

pub use client::GeminiClassifier;
