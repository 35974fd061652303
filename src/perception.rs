use glam::Vec2;

use crate::blackboard::Blackboard;

/// Position and facing of a tank on the plane. `heading` is in radians,
/// measured clockwise from the +Y axis, so a heading of zero faces "north".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    pub heading: f32,
}

impl Pose {
    pub fn new(position: Vec2, heading: f32) -> Self {
        Self { position, heading }
    }

    /// Expresses a world-space point in this pose's local frame:
    /// +Y ahead of the tank, +X to its right.
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        let rel = point - self.position;
        let (sin, cos) = self.heading.sin_cos();
        let right = Vec2::new(cos, -sin);
        let forward = Vec2::new(sin, cos);
        Vec2::new(rel.dot(right), rel.dot(forward))
    }
}

/// Snapshot of the world as sampled by the host before a tick.
///
/// `target` is the position of the primary target, or `None` when no target
/// has been registered. Utility scores and perception degrade to fixed
/// defaults instead of erroring when it is absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldState {
    pub pose: Pose,
    pub target: Option<Vec2>,
    pub health: f32,
    pub max_health: f32,
}

impl WorldState {
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            target: None,
            health: 1.0,
            max_health: 1.0,
        }
    }

    /// Current health as a fraction of maximum, clamped to [0, 1].
    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }
}

/// Append-only list of enemy targets. Only the first registered target is
/// consulted by perception and utility scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetRegistry<T> {
    targets: Vec<T>,
}

impl<T> Default for TargetRegistry<T> {
    fn default() -> Self {
        Self { targets: vec![] }
    }
}

impl<T> TargetRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, target: T) {
        self.targets.push(target);
    }

    pub fn primary(&self) -> Option<&T> {
        self.targets.first()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// What one perception pass derives about the primary target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub distance: f32,
    pub in_front: bool,
    pub on_right: bool,
    pub off_centre: f32,
}

/// Resamples the primary target into tank-local terms, or `None` when no
/// target exists.
pub fn observe(world: &WorldState) -> Option<Observation> {
    let target = world.target?;
    let local = world.pose.to_local(target);
    let heading = local.normalize_or_zero();
    Some(Observation {
        distance: local.length(),
        in_front: heading.y > 0.0,
        on_right: heading.x > 0.0,
        off_centre: heading.x.abs(),
    })
}

/// The perception step run by Service nodes: writes the current observation
/// into the blackboard. With no target the keys stay unset, so conditions
/// keep failing closed.
pub fn refresh(world: &WorldState, blackboard: &mut Blackboard) {
    if let Some(obs) = observe(world) {
        blackboard.target_distance = Some(obs.distance);
        blackboard.target_in_front = Some(obs.in_front);
        blackboard.target_on_right = Some(obs.on_right);
        blackboard.target_off_centre = Some(obs.off_centre);
    }
}
