use serde::Serialize;

use crate::domain::{CategoryLabel, Disposition, Point, PositionedEntity, Stance};

/// One of the four strict-sign regions of the chart. Points on an axis belong
/// to none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// `x < 0, y > 0`
    BuilderPragmatist,
    /// `x < 0, y < 0`
    BuilderDecentralist,
    /// `x > 0, y > 0`
    SpeculatorPragmatist,
    /// `x > 0, y < 0`
    SpeculatorDecentralist,
}

impl Quadrant {
    #[must_use]
    pub fn of(point: Point) -> Option<Self> {
        let Point { x, y } = point;
        if x < 0.0 && y > 0.0 {
            Some(Self::BuilderPragmatist)
        } else if x < 0.0 && y < 0.0 {
            Some(Self::BuilderDecentralist)
        } else if x > 0.0 && y > 0.0 {
            Some(Self::SpeculatorPragmatist)
        } else if x > 0.0 && y < 0.0 {
            Some(Self::SpeculatorDecentralist)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn label(self) -> CategoryLabel {
        match self {
            Self::BuilderPragmatist => CategoryLabel::new(Disposition::Builder, Stance::Pragmatist),
            Self::BuilderDecentralist => {
                CategoryLabel::new(Disposition::Builder, Stance::Decentralist)
            }
            Self::SpeculatorPragmatist => {
                CategoryLabel::new(Disposition::Speculator, Stance::Pragmatist)
            }
            Self::SpeculatorDecentralist => {
                CategoryLabel::new(Disposition::Speculator, Stance::Decentralist)
            }
        }
    }
}

/// Entity ids grouped by quadrant for the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantBuckets {
    pub builder_pragmatist: Vec<String>,
    pub builder_decentralist: Vec<String>,
    pub speculator_pragmatist: Vec<String>,
    pub speculator_decentralist: Vec<String>,
}

impl QuadrantBuckets {
    #[must_use]
    pub fn bucket(&self, quadrant: Quadrant) -> &[String] {
        match quadrant {
            Quadrant::BuilderPragmatist => &self.builder_pragmatist,
            Quadrant::BuilderDecentralist => &self.builder_decentralist,
            Quadrant::SpeculatorPragmatist => &self.speculator_pragmatist,
            Quadrant::SpeculatorDecentralist => &self.speculator_decentralist,
        }
    }

    fn bucket_mut(&mut self, quadrant: Quadrant) -> &mut Vec<String> {
        match quadrant {
            Quadrant::BuilderPragmatist => &mut self.builder_pragmatist,
            Quadrant::BuilderDecentralist => &mut self.builder_decentralist,
            Quadrant::SpeculatorPragmatist => &mut self.speculator_pragmatist,
            Quadrant::SpeculatorDecentralist => &mut self.speculator_decentralist,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.builder_pragmatist.len()
            + self.builder_decentralist.len()
            + self.speculator_pragmatist.len()
            + self.speculator_decentralist.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Groups entities by the quadrant of their point. Entities on an axis or
/// without a point are left out.
#[must_use]
pub fn group_by_quadrant(entities: &[PositionedEntity]) -> QuadrantBuckets {
    let mut buckets = QuadrantBuckets::default();
    for entity in entities {
        if let Some(quadrant) = entity.point.and_then(Quadrant::of) {
            buckets.bucket_mut(quadrant).push(entity.id.clone());
        }
    }
    buckets
}
