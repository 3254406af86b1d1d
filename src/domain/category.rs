use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// X-axis disposition, the first segment of a category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Requires `x <= 0`.
    Builder,
    /// Requires `x >= 0`.
    Speculator,
}

/// Y-axis stance, the second segment of a category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stance {
    /// Requires `y <= 0`.
    Decentralist,
    /// Requires `y >= 0`.
    Pragmatist,
}

impl Disposition {
    /// Sign the x coordinate must carry for this disposition.
    #[must_use]
    pub const fn required_sign(self) -> f64 {
        match self {
            Self::Builder => -1.0,
            Self::Speculator => 1.0,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Builder => "Builder",
            Self::Speculator => "Speculator",
        }
    }
}

impl Stance {
    /// Sign the y coordinate must carry for this stance.
    #[must_use]
    pub const fn required_sign(self) -> f64 {
        match self {
            Self::Decentralist => -1.0,
            Self::Pragmatist => 1.0,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Decentralist => "Decentralist",
            Self::Pragmatist => "Pragmatist",
        }
    }
}

/// One of the four fixed chart tags, e.g. `Builder-Pragmatist`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryLabel {
    pub disposition: Disposition,
    pub stance: Stance,
}

impl CategoryLabel {
    pub const ALL: [CategoryLabel; 4] = [
        CategoryLabel::new(Disposition::Builder, Stance::Decentralist),
        CategoryLabel::new(Disposition::Builder, Stance::Pragmatist),
        CategoryLabel::new(Disposition::Speculator, Stance::Decentralist),
        CategoryLabel::new(Disposition::Speculator, Stance::Pragmatist),
    ];

    #[must_use]
    pub const fn new(disposition: Disposition, stance: Stance) -> Self {
        Self {
            disposition,
            stance,
        }
    }

    /// Bare tag without any description.
    #[must_use]
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Description the classifier is offered alongside the tag.
    #[must_use]
    pub const fn blurb(&self) -> &'static str {
        match (self.disposition, self.stance) {
            (Disposition::Builder, Stance::Decentralist) => {
                "The cypherpunk idealist building trustless systems"
            }
            (Disposition::Builder, Stance::Pragmatist) => {
                "The practical developer creating useful applications"
            }
            (Disposition::Speculator, Stance::Decentralist) => {
                "The principle-driven investor in decentralized projects"
            }
            (Disposition::Speculator, Stance::Pragmatist) => {
                "The opportunistic trader focused on gains"
            }
        }
    }

    /// `"<tag>: <blurb>"`, the form the classifier answers with.
    #[must_use]
    pub fn described(&self) -> String {
        format!("{self}: {}", self.blurb())
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.disposition.as_str(), self.stance.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized category label: {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for CategoryLabel {
    type Err = UnknownCategory;

    /// Segment-based parse: the text before the first `:` is split on `-`
    /// into exactly two segments, each matched case-insensitively.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let tag = raw.split(':').next().unwrap_or_default().trim();
        let mut segments = tag.split('-').map(str::trim);

        let (Some(first), Some(second), None) = (segments.next(), segments.next(), segments.next())
        else {
            return Err(UnknownCategory(raw.to_string()));
        };

        let disposition = if first.eq_ignore_ascii_case("builder") {
            Disposition::Builder
        } else if first.eq_ignore_ascii_case("speculator") {
            Disposition::Speculator
        } else {
            return Err(UnknownCategory(raw.to_string()));
        };

        let stance = if second.eq_ignore_ascii_case("decentralist") {
            Stance::Decentralist
        } else if second.eq_ignore_ascii_case("pragmatist") {
            Stance::Pragmatist
        } else {
            return Err(UnknownCategory(raw.to_string()));
        };

        Ok(Self::new(disposition, stance))
    }
}

/// A category string as produced by the classifier and stored with mints.
///
/// The raw text is kept verbatim (it usually carries a description after a
/// colon); the parsed label is derived on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn label(&self) -> Option<CategoryLabel> {
        self.0.parse().ok()
    }

    /// Text before the first colon, trimmed.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.split(':').next().unwrap_or_default().trim()
    }

    /// Text after the first colon, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0
            .split_once(':')
            .map(|(_, rest)| rest.trim())
            .filter(|rest| !rest.is_empty())
    }
}

impl From<CategoryLabel> for Category {
    fn from(label: CategoryLabel) -> Self {
        Self(label.described())
    }
}
