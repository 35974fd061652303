//! # tank-ai
//!
//! A minimal utility-driven behaviour tree implementation for tank agents.
//!
//! This crate reworks a pair of game AI exercises into a host-independent
//! library: a small behaviour tree interpreter, a utility selector that
//! picks among attack / flee / hunt strategies, and a noise-based terrain
//! height-field generator. Nothing here talks to an engine; the host owns
//! the frame loop and calls in with a time step, a world snapshot, and an
//! actuator callback.
//!
//! ## Ticking a tree
//!
//! A behaviour tree is a [`Node`] owned by a [`Root`]. Leaf actions emit
//! [`Command`]s through a callback supplied to every tick, so the tree
//! never needs a reference to whatever drives the tank:
//!
//! ```rust
//! use glam::Vec2;
//! use tank_ai::{BehaviorResult, Command, Node, Pose, Root, WorldState};
//!
//! let tree = Node::sequence(vec![
//!     Node::action(|| Command::Turn(-0.05)),
//!     Node::action(|| Command::Fire(1.0)),
//! ]);
//! let mut root = Root::new(tree).unwrap();
//! root.start();
//!
//! let world = WorldState::new(Pose::new(Vec2::ZERO, 0.0));
//! let mut commands = vec![];
//! let result = root.tick(0.016, &world, &mut |cmd| commands.push(cmd));
//! assert_eq!(result, BehaviorResult::Success);
//! assert_eq!(commands, vec![Command::Turn(-0.05), Command::Fire(1.0)]);
//! ```
//!
//! Execution is cooperative and single threaded: one tick call is in
//! flight at a time, and suspending nodes (Wait, Service) track elapsed
//! time across ticks instead of blocking.
//!
//! ## Utility-driven agents
//!
//! [`TankAgent`] re-scores the three behavioural categories every tick and
//! keeps the best one's tree running, rebuilding it only when the winning
//! category changes:
//!
//! ```rust
//! use glam::Vec2;
//! use tank_ai::{AgentConfig, Category, Pose, TankAgent, WorldState};
//!
//! let mut agent = TankAgent::new(AgentConfig::default()).unwrap();
//! let mut world = WorldState::new(Pose::new(Vec2::ZERO, 0.0));
//! world.target = Some(Vec2::new(0.0, 8.0));
//!
//! agent.tick(0.016, &world, &mut |_cmd| ());
//! assert_eq!(agent.category(), Category::Attack);
//! ```
//!
//! ## Loading a tree from text
//!
//! Trees can also be authored in a small text format and loaded at
//! runtime. The AST borrows the source string:
//!
//! ```rust
//! use tank_ai::{load, parse_file};
//!
//! let source = r#"
//! ## Track a target to the right, otherwise sweep left.
//! tree main = Selector {
//!     Condition (targetOnRight == true, restart) { Turn (0.2) }
//!     Turn (-0.2)
//! }
//! "#;
//!
//! let (_, tree_source) = parse_file(source).unwrap();
//! let mut root = load(&tree_source).unwrap();
//! root.start();
//! ```

mod agent;
pub mod behaviours;
mod blackboard;
mod config;
mod context;
pub mod error;
mod nodes;
pub mod parser;
pub mod perception;
mod terrain;
mod tree;
mod utility;

pub use crate::agent::{Behaviour, TankAgent};
pub use crate::blackboard::{Blackboard, BlackboardKey, Value};
pub use crate::config::{AgentConfig, Config, TerrainConfig};
pub use crate::context::Context;
pub use crate::nodes::{ConditionOp, Node, Restart};
pub use crate::parser::{load, parse_file, TreeSource};
pub use crate::perception::{Observation, Pose, TargetRegistry, WorldState};
pub use crate::terrain::{HeightMap, MapKind, TerrainGenerator};
pub use crate::tree::Root;
pub use crate::utility::{Category, UtilityScores, ENGAGEMENT_RANGE};
pub use ::glam::Vec2;

/// Outcome of ticking a node.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum BehaviorResult {
    Success,
    Fail,
    /// The node should keep running in the next tick
    Running,
}

/// One actuator command. Velocities are in -1..1 (negative is reverse or
/// left), fire force in 0..1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Move(f32),
    Turn(f32),
    Fire(f32),
}

/// Callback through which action nodes reach the environment. A closure is
/// used rather than a stored trait object so the actuator can borrow
/// host-side state whose lifetime is shorter than the tree's.
pub type BehaviorCallback<'a> = &'a mut dyn FnMut(Command);
