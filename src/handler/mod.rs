pub mod analyze;
pub mod friends;
pub mod health;
pub mod layout;
pub mod mint;
pub mod share;
pub mod token;

use crate::domain::{Coordinate, Fid};
use crate::error::ApiError;

/// Parses an optional numeric query parameter, rejecting garbage.
fn parse_fid(raw: Option<&str>) -> Result<Option<Fid>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ApiError::BadRequest("Invalid FID".to_string())),
    }
}

fn coordinate(raw: Option<String>) -> Option<f64> {
    raw.and_then(|s| Coordinate::Text(s).value())
}
