//! Interfaces to the outside world. Adapters implement these; services and
//! handlers only see the traits.

pub mod classifier;
pub mod mint_image;
pub mod social_graph;
pub mod store;

pub use classifier::AlignmentClassifier;
pub use mint_image::MintImageSource;
pub use social_graph::SocialGraph;
pub use store::{FollowingStore, MintStore};
