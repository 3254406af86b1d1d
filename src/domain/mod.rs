pub mod category;
pub mod classification;
pub mod entity;
pub mod mint;
pub mod point;
pub mod profile;

pub use category::{Category, CategoryLabel, Disposition, Stance, UnknownCategory};
pub use classification::{ClassificationResult, Evidence, Narrative, RawClassification};
pub use entity::{DisplayMeta, EntityRecord, EntityRole, PositionedEntity};
pub use mint::{MetadataAttribute, MintImageRequest, MintRecord, NewMint, TokenMetadata};
pub use point::{Coordinate, DOMAIN_MAX, DOMAIN_MIN, Point, sign};
pub use profile::{Cast, Fid, FollowedUser, FollowingSnapshot, Page, UserInfo, UserProfile};
