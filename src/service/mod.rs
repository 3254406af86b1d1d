//! Per-request orchestration over the ports and the chart core.

pub mod analysis;
pub mod friends;
pub mod mint;

pub use analysis::{AnalysisService, AnalyzeRequest, ProfileAnalysis};
pub use friends::{FriendMint, FriendsError, FriendsOutcome, FriendsReport, FriendsService};
pub use mint::{LatestToken, MintError, MintService, SaveMintRequest, SavedMint};
