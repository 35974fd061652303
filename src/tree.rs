use crate::{
    blackboard::Blackboard, context::Context, error::TreeError, nodes::Node,
    perception::WorldState, BehaviorCallback, BehaviorResult,
};

/// Owns one behaviour tree and the blackboard it was built against.
///
/// Trees are ticked cooperatively: the host calls [`Root::tick`] once per
/// frame with the elapsed time and a fresh world snapshot, and no node ever
/// blocks the caller. Stopping a root halts its in-flight Wait and Service
/// timers immediately; a stopped root can be started again from scratch.
pub struct Root {
    node: Node,
    blackboard: Blackboard,
    started: bool,
}

impl std::fmt::Debug for Root {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Root")
            .field("blackboard", &self.blackboard)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

impl Root {
    pub fn new(node: Node) -> Result<Self, TreeError> {
        node.validate()?;
        Ok(Self {
            node,
            blackboard: Blackboard::default(),
            started: false,
        })
    }

    pub fn start(&mut self) {
        self.started = true;
    }

    /// Cancels all in-flight node state and forgets the blackboard
    /// contents. Must be called before replacing a root so that Wait and
    /// Service timers do not appear to carry over.
    pub fn stop(&mut self) {
        self.started = false;
        self.node.reset();
        self.blackboard = Blackboard::default();
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    /// Ticks the tree once. Ticking an unstarted root starts it.
    pub fn tick(
        &mut self,
        delta: f32,
        world: &WorldState,
        arg: BehaviorCallback,
    ) -> BehaviorResult {
        if !self.started {
            self.started = true;
        }
        let mut ctx = Context {
            world,
            blackboard: &mut self.blackboard,
            delta,
        };
        self.node.tick(arg, &mut ctx)
    }
}
