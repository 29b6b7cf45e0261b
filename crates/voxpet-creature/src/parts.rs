//! Species-specific part sets behind a shared rig interface
//!
//! The animator only sees `PartRig`: body, head, tail, legs and an optional
//! appendage set. It never branches on species.

use crate::model::NodeId;

/// How appendages sway and flail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendageKind {
    /// Flap around Z, symmetric
    Wing,
    /// Droop outward around Z, mirrored per side
    Ear,
}

/// Species appendages (wings, ears) as seen by the animator
#[derive(Debug, Clone, Copy)]
pub struct Appendages<'a> {
    pub kind: AppendageKind,
    pub nodes: &'a [NodeId],
}

/// Leg phase pattern for the walk cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gait {
    /// Two legs in anti-phase
    Biped,
    /// Four legs moving in diagonal pairs
    Quadruped,
}

impl Gait {
    pub fn for_leg_count(count: usize) -> Self {
        if count >= 4 {
            Gait::Quadruped
        } else {
            Gait::Biped
        }
    }
}

/// Capability interface every species part set provides
pub trait PartRig {
    fn body(&self) -> NodeId;
    fn head(&self) -> NodeId;
    fn tail(&self) -> NodeId;
    fn legs(&self) -> &[NodeId];
    fn appendages(&self) -> Option<Appendages<'_>>;

    fn gait(&self) -> Gait {
        Gait::for_leg_count(self.legs().len())
    }
}

/// Chicken comb shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombStyle {
    /// Three stepped blades front to back
    Mohawk,
    /// A single low slab
    Flat,
}

impl CombStyle {
    /// Map the 4-way comb roll onto a shape (roll 0 is a mohawk)
    pub fn from_roll(roll: i32) -> Self {
        if roll == 0 {
            CombStyle::Mohawk
        } else {
            CombStyle::Flat
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChickenParts {
    pub body: NodeId,
    pub head: NodeId,
    pub tail: NodeId,
    pub legs: [NodeId; 2],
    pub wings: [NodeId; 2],
    pub comb_roll: i32,
    pub comb: CombStyle,
    pub chest_patch: bool,
}

#[derive(Debug, Clone)]
pub struct PigParts {
    pub body: NodeId,
    pub head: NodeId,
    pub tail: NodeId,
    pub legs: [NodeId; 4],
    pub ears: [NodeId; 2],
    pub spotted: bool,
}

/// Tagged part set
#[derive(Debug, Clone)]
pub enum SpeciesParts {
    Chicken(ChickenParts),
    Pig(PigParts),
}

impl PartRig for ChickenParts {
    fn body(&self) -> NodeId {
        self.body
    }
    fn head(&self) -> NodeId {
        self.head
    }
    fn tail(&self) -> NodeId {
        self.tail
    }
    fn legs(&self) -> &[NodeId] {
        &self.legs
    }
    fn appendages(&self) -> Option<Appendages<'_>> {
        Some(Appendages {
            kind: AppendageKind::Wing,
            nodes: &self.wings,
        })
    }
}

impl PartRig for PigParts {
    fn body(&self) -> NodeId {
        self.body
    }
    fn head(&self) -> NodeId {
        self.head
    }
    fn tail(&self) -> NodeId {
        self.tail
    }
    fn legs(&self) -> &[NodeId] {
        &self.legs
    }
    fn appendages(&self) -> Option<Appendages<'_>> {
        Some(Appendages {
            kind: AppendageKind::Ear,
            nodes: &self.ears,
        })
    }
}

impl SpeciesParts {
    fn rig(&self) -> &dyn PartRig {
        match self {
            SpeciesParts::Chicken(parts) => parts,
            SpeciesParts::Pig(parts) => parts,
        }
    }
}

impl PartRig for SpeciesParts {
    fn body(&self) -> NodeId {
        self.rig().body()
    }
    fn head(&self) -> NodeId {
        self.rig().head()
    }
    fn tail(&self) -> NodeId {
        self.rig().tail()
    }
    fn legs(&self) -> &[NodeId] {
        self.rig().legs()
    }
    fn appendages(&self) -> Option<Appendages<'_>> {
        self.rig().appendages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gait_from_leg_count() {
        assert_eq!(Gait::for_leg_count(2), Gait::Biped);
        assert_eq!(Gait::for_leg_count(4), Gait::Quadruped);
    }

    #[test]
    fn test_comb_roll_mapping() {
        assert_eq!(CombStyle::from_roll(0), CombStyle::Mohawk);
        for roll in [-1, 1, 2, 3] {
            assert_eq!(CombStyle::from_roll(roll), CombStyle::Flat);
        }
    }
}
