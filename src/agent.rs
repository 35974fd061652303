use tracing::{debug, error, info};

use crate::{
    behaviours,
    config::AgentConfig,
    error::TreeError,
    nodes::Node,
    perception::WorldState,
    tree::Root,
    utility::{Category, UtilityScores},
    BehaviorResult, Command,
};

/// The fixed behaviours a tank can be locked to, selectable by number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    TurnSlowly,
    Spin,
    TrackAndFire,
    Engage,
}

impl Behaviour {
    /// Maps a numeric selector to a behaviour; anything unrecognized falls
    /// back to the default turn-slowly behaviour.
    pub fn from_index(index: i32) -> Self {
        match index {
            1 => Self::Spin,
            2 => Self::TrackAndFire,
            3 => Self::Engage,
            _ => Self::TurnSlowly,
        }
    }
}

/// Drives one tank: re-scores the behavioural categories every tick and
/// keeps the highest-scoring behaviour tree running.
///
/// The host owns the loop; it calls [`TankAgent::tick`] once per frame with
/// the elapsed time, a world snapshot, and an actuator callback. The active
/// tree is rebuilt only when the selected category changes, so in-progress
/// Wait timers and sequence cursors survive re-selection cycles that keep
/// the same category. Switching stops the old tree first, which cancels its
/// timers, and the new tree gets a fresh blackboard.
pub struct TankAgent {
    config: AgentConfig,
    root: Root,
    category: Category,
    fixed: Option<Behaviour>,
    scores: UtilityScores,
}

impl TankAgent {
    /// Utility-driven agent. Starts hunting: before the first tick there is
    /// no world snapshot, and with no target hunt utility is 1.
    pub fn new(config: AgentConfig) -> Result<Self, TreeError> {
        let category = Category::Hunt;
        let mut root = Root::new(build_category(category, &config))?;
        root.start();
        info!(?category, "initialising utility agent");
        Ok(Self {
            config,
            root,
            category,
            fixed: None,
            scores: UtilityScores {
                attack: 0.0,
                flee: 0.0,
                hunt: 1.0,
            },
        })
    }

    /// Agent locked to one fixed behaviour; utility scores are still
    /// computed for inspection but never cause a switch.
    pub fn with_behaviour(behaviour: Behaviour, config: AgentConfig) -> Result<Self, TreeError> {
        let node = build_behaviour(behaviour, &config);
        let mut root = Root::new(node)?;
        root.start();
        info!(?behaviour, "initialising fixed-behaviour agent");
        Ok(Self {
            config,
            root,
            category: Category::Hunt,
            fixed: Some(behaviour),
            scores: UtilityScores {
                attack: 0.0,
                flee: 0.0,
                hunt: 1.0,
            },
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Scores computed on the most recent tick.
    pub fn scores(&self) -> UtilityScores {
        self.scores
    }

    pub fn tick(
        &mut self,
        delta: f32,
        world: &WorldState,
        actuate: &mut dyn FnMut(Command),
    ) -> BehaviorResult {
        self.scores = UtilityScores::evaluate_with_range(world, self.config.engagement_range);
        if self.fixed.is_none() {
            let category = self.scores.select();
            if category != self.category {
                self.switch_to(category);
            }
        }
        self.root.tick(delta, world, actuate)
    }

    fn switch_to(&mut self, category: Category) {
        match Root::new(build_category(category, &self.config)) {
            Ok(mut next) => {
                self.root.stop();
                next.start();
                debug!(from = ?self.category, to = ?category, scores = ?self.scores, "switching behaviour");
                self.root = next;
                self.category = category;
            }
            Err(err) => error!(%err, "keeping current behaviour"),
        }
    }
}

fn build_category(category: Category, config: &AgentConfig) -> Node {
    match category {
        Category::Attack => behaviours::track_and_fire(config),
        Category::Flee => behaviours::flee(config),
        Category::Hunt => behaviours::hunt(config),
    }
}

fn build_behaviour(behaviour: Behaviour, config: &AgentConfig) -> Node {
    match behaviour {
        Behaviour::TurnSlowly => behaviours::turn_slowly(config),
        Behaviour::Spin => behaviours::spin(config.spin_turn, config.spin_fire),
        Behaviour::TrackAndFire => behaviours::track_and_fire(config),
        Behaviour::Engage => behaviours::engage(config),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::perception::Pose;
    use glam::Vec2;

    fn world(distance: f32, health: f32) -> WorldState {
        let mut world = WorldState::new(Pose::new(Vec2::ZERO, 0.0));
        world.target = Some(Vec2::new(0.0, distance));
        world.health = health;
        world.max_health = 100.0;
        world
    }

    #[test]
    fn distant_target_selects_hunt() {
        let mut agent = TankAgent::new(AgentConfig::default()).unwrap();
        agent.tick(0.016, &world(100.0, 100.0), &mut |_| ());
        assert_eq!(agent.category(), Category::Hunt);
    }

    #[test]
    fn close_target_selects_attack() {
        let mut agent = TankAgent::new(AgentConfig::default()).unwrap();
        agent.tick(0.016, &world(5.0, 100.0), &mut |_| ());
        assert_eq!(agent.category(), Category::Attack);
        assert!(agent.scores().attack > 0.8);
    }

    #[test]
    fn low_health_beats_distant_target() {
        let mut agent = TankAgent::new(AgentConfig::default()).unwrap();
        agent.tick(0.016, &world(45.0, 5.0), &mut |_| ());
        assert_eq!(agent.category(), Category::Flee);
    }

    #[test]
    fn category_is_stable_without_a_change_in_scores() {
        let mut agent = TankAgent::new(AgentConfig::default()).unwrap();
        let snapshot = world(100.0, 100.0);
        // Hunt issues a full-speed move burst; the first command of the
        // burst must not be re-issued while the category is unchanged.
        let mut commands = vec![];
        for _ in 0..4 {
            agent.tick(0.1, &snapshot, &mut |cmd| commands.push(cmd));
        }
        assert_eq!(commands, vec![Command::Move(1.0)]);
    }

    #[test]
    fn fixed_behaviour_never_switches() {
        let mut agent =
            TankAgent::with_behaviour(Behaviour::Spin, AgentConfig::default()).unwrap();
        let mut commands = vec![];
        agent.tick(0.016, &world(5.0, 1.0), &mut |cmd| commands.push(cmd));
        // A utility agent would attack here; the fixed agent keeps spinning.
        assert_eq!(
            commands,
            vec![Command::Turn(-0.05), Command::Fire(1.0)]
        );
    }

    #[test]
    fn behaviour_indices_are_stable() {
        assert_eq!(Behaviour::from_index(0), Behaviour::TurnSlowly);
        assert_eq!(Behaviour::from_index(1), Behaviour::Spin);
        assert_eq!(Behaviour::from_index(2), Behaviour::TrackAndFire);
        assert_eq!(Behaviour::from_index(3), Behaviour::Engage);
        assert_eq!(Behaviour::from_index(42), Behaviour::TurnSlowly);
    }
}
