pub mod gemini;
pub mod mint_image;
pub mod neynar;
pub mod postgres;

pub use gemini::GeminiClassifier;
pub use mint_image::HttpMintImageSource;
pub use neynar::NeynarClient;
pub use postgres::{PgFollowingStore, PgMintStore};
