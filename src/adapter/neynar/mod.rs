//! Social graph adapter for the Neynar v2 API.

mod client;
mod models;

pub use client::NeynarClient;
