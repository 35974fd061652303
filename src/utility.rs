use crate::perception::WorldState;

/// Distance at which a target stops being worth attacking and hunting
/// saturates. Overridable through [`crate::AgentConfig::engagement_range`].
pub const ENGAGEMENT_RANGE: f32 = 50.0;

/// The mutually exclusive behavioural strategies a tank can pursue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Attack,
    Flee,
    Hunt,
}

/// Desirability of each behavioural category, each in [0, 1]. Transient:
/// recomputed from the world snapshot every selection cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtilityScores {
    pub attack: f32,
    pub flee: f32,
    pub hunt: f32,
}

impl UtilityScores {
    pub fn evaluate(world: &WorldState) -> Self {
        Self::evaluate_with_range(world, ENGAGEMENT_RANGE)
    }

    /// With no target, attack degrades to 0 and hunt to 1 rather than
    /// erroring.
    pub fn evaluate_with_range(world: &WorldState, range: f32) -> Self {
        let distance = world
            .target
            .map(|target| world.pose.position.distance(target));
        Self {
            attack: distance.map_or(0.0, |d| clamp01(1.0 - d / range)),
            flee: clamp01(1.0 - world.health_ratio()),
            hunt: distance.map_or(1.0, |d| clamp01(d / range)),
        }
    }

    /// Picks the highest-scoring category. Comparisons use `>=` in the
    /// order attack, flee, hunt, so the earlier category wins ties.
    pub fn select(&self) -> Category {
        if self.attack >= self.flee && self.attack >= self.hunt {
            Category::Attack
        } else if self.flee >= self.attack && self.flee >= self.hunt {
            Category::Flee
        } else {
            Category::Hunt
        }
    }
}

fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}
