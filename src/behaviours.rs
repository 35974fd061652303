//! The canned behaviour trees, expressed as [`Node`] builders. All of them
//! are parameterized by [`AgentConfig`].

use crate::{
    blackboard::{BlackboardKey, Value},
    config::AgentConfig,
    nodes::{ConditionOp, Node, Restart},
    perception, Command,
};

/// Constantly spin and fire on the spot.
pub fn spin(turn: f32, shoot: f32) -> Node {
    Node::sequence(vec![
        Node::action(move || Command::Turn(turn)),
        Node::action(move || Command::Fire(shoot)),
    ])
}

/// Just turn slowly. The default behaviour.
pub fn turn_slowly(config: &AgentConfig) -> Node {
    let turn = config.idle_turn;
    Node::action(move || Command::Turn(turn))
}

/// Turn to face the target and fire: either fire on target, turn right
/// toward a target on the right, or fall back to turning left. The whole
/// selector sits under a perception refresh service.
pub fn track_and_fire(config: &AgentConfig) -> Node {
    Node::service(
        config.service_interval,
        perception::refresh,
        Node::selector(vec![
            firing(config),
            track_target_on_right(config),
            turn_left(config),
        ]),
    )
}

/// Like [`track_and_fire`], but stops the tank first and bursts forward
/// while firing once it faces the target.
pub fn engage(config: &AgentConfig) -> Node {
    Node::service(
        config.service_interval,
        perception::refresh,
        Node::sequence(vec![
            Node::action(|| Command::Move(0.0)),
            Node::action(|| Command::Turn(0.0)),
            Node::selector(vec![
                fire_and_move(config),
                track_target_on_right(config),
                turn_left(config),
            ]),
        ]),
    )
}

/// Back away at full speed for one burst.
pub fn flee(config: &AgentConfig) -> Node {
    Node::sequence(vec![
        Node::action(|| Command::Move(-1.0)),
        Node::wait(config.burst_wait),
    ])
}

/// Drive toward the target at full speed for one burst.
pub fn hunt(config: &AgentConfig) -> Node {
    Node::sequence(vec![
        Node::action(|| Command::Move(1.0)),
        Node::wait(config.burst_wait),
    ])
}

/// Stop turning, settle, then fire with a random force. Guarded on facing
/// the target; losing the aim restarts the guard immediately.
fn firing(config: &AgentConfig) -> Node {
    Node::condition(
        BlackboardKey::TargetOffCentre,
        ConditionOp::Le,
        Value::Number(config.aim_tolerance),
        Restart::Immediate,
        Node::sequence(vec![
            Node::action(|| Command::Turn(0.0)),
            Node::wait(config.aim_wait),
            random_fire(),
        ]),
    )
}

/// Burst forward for a short random time, then fire.
fn fire_and_move(config: &AgentConfig) -> Node {
    Node::condition(
        BlackboardKey::TargetOffCentre,
        ConditionOp::Le,
        Value::Number(config.aim_tolerance),
        Restart::Immediate,
        Node::sequence(vec![random_move(), random_fire()]),
    )
}

/// Turn toward a target known to be on our right.
fn track_target_on_right(config: &AgentConfig) -> Node {
    let turn = config.track_turn;
    Node::condition(
        BlackboardKey::TargetOnRight,
        ConditionOp::Eq,
        Value::Bool(true),
        Restart::Immediate,
        Node::action(move || Command::Turn(turn)),
    )
}

fn turn_left(config: &AgentConfig) -> Node {
    let turn = -config.track_turn;
    Node::action(move || Command::Turn(turn))
}

/// Fire with a random power.
fn random_fire() -> Node {
    Node::action(|| Command::Fire(fastrand::f32()))
}

/// Move forward at full speed for a random time.
fn random_move() -> Node {
    let duration = 0.1 + fastrand::f32() * 0.2;
    Node::sequence(vec![
        Node::action(|| Command::Move(1.0)),
        Node::wait(duration),
        Node::action(|| Command::Move(0.0)),
    ])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        perception::{Pose, WorldState},
        tree::Root,
        BehaviorResult,
    };
    use glam::Vec2;

    fn facing_target_world() -> WorldState {
        let mut world = WorldState::new(Pose::new(Vec2::ZERO, 0.0));
        world.target = Some(Vec2::new(0.0, 10.0));
        world
    }

    #[test]
    fn spin_emits_turn_then_fire() {
        let mut root = Root::new(spin(-0.05, 1.0)).unwrap();
        root.start();
        let mut commands = vec![];
        let result = root.tick(0.016, &facing_target_world(), &mut |cmd| {
            commands.push(cmd)
        });
        assert_eq!(result, BehaviorResult::Success);
        assert_eq!(commands, vec![Command::Turn(-0.05), Command::Fire(1.0)]);
    }

    #[test]
    fn track_and_fire_turns_left_when_target_is_on_the_left() {
        let config = AgentConfig::default();
        let mut world = facing_target_world();
        // Target behind on the left: not facing it, not on the right.
        world.target = Some(Vec2::new(-10.0, -1.0));
        let mut root = Root::new(track_and_fire(&config)).unwrap();
        root.start();
        let mut commands = vec![];
        root.tick(0.016, &world, &mut |cmd| commands.push(cmd));
        assert_eq!(commands, vec![Command::Turn(-config.track_turn)]);
    }

    #[test]
    fn track_and_fire_settles_aim_before_firing() {
        let config = AgentConfig::default();
        let world = facing_target_world();
        let mut root = Root::new(track_and_fire(&config)).unwrap();
        root.start();

        // Facing the target: the firing sequence stops the turret then
        // waits out the aim pause before any Fire command.
        let mut commands = vec![];
        root.tick(0.1, &world, &mut |cmd| commands.push(cmd));
        assert_eq!(commands, vec![Command::Turn(0.0)]);

        let mut commands = vec![];
        for _ in 0..30 {
            root.tick(0.1, &world, &mut |cmd| commands.push(cmd));
        }
        assert!(commands
            .iter()
            .any(|cmd| matches!(cmd, Command::Fire(force) if (0.0..=1.0).contains(force))));
    }

    #[test]
    fn flee_reverses_then_waits() {
        let config = AgentConfig::default();
        let mut root = Root::new(flee(&config)).unwrap();
        root.start();
        let world = facing_target_world();

        let mut commands = vec![];
        assert_eq!(
            root.tick(0.5, &world, &mut |cmd| commands.push(cmd)),
            BehaviorResult::Running
        );
        assert_eq!(commands, vec![Command::Move(-1.0)]);

        // Burst expires after `burst_wait` seconds in total.
        for _ in 0..2 {
            assert_eq!(
                root.tick(0.5, &world, &mut |_| ()),
                BehaviorResult::Running
            );
        }
        assert_eq!(root.tick(0.5, &world, &mut |_| ()), BehaviorResult::Success);
    }
}
