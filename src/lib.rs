#![warn(rust_2018_idioms)]

pub mod adapter;
pub mod app;
pub mod chart;
pub mod config;
pub mod domain;
pub mod error;
pub mod handler;
pub mod healthcheck;
pub mod port;
pub mod service;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod util;

pub use healthcheck::{healthcheck, healthcheck_with_port};
