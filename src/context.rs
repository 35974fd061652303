use crate::{blackboard::Blackboard, perception::WorldState};

/// Everything a node can see during one tick.
///
/// The world snapshot is sampled by the host once per frame; the blackboard
/// is owned by the [`crate::Root`] the tree was built against. `delta` is
/// the time in seconds since the previous tick, which is how Wait and
/// Service nodes suspend without blocking the caller.
pub struct Context<'a> {
    pub world: &'a WorldState,
    pub blackboard: &'a mut Blackboard,
    pub delta: f32,
}
