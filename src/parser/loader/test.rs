use super::*;
use crate::{
    error::TreeError, parse_file, perception::Pose, BehaviorResult, Command, WorldState,
};
use glam::Vec2;

fn load_source(source: &str) -> Result<crate::Root, LoadError> {
    let (rest, tree_source) = parse_file(source).unwrap();
    assert_eq!(rest, "");
    load(&tree_source)
}

#[test]
fn test_load_and_tick() {
    let mut root = load_source(
        r#"
tree main = Sequence {
    Move (1)
    Turn (-0.05)
    Fire (0.5)
}
"#,
    )
    .unwrap();
    root.start();

    let world = WorldState::new(Pose::new(Vec2::ZERO, 0.0));
    let mut commands = vec![];
    let result = root.tick(0.016, &world, &mut |cmd| commands.push(cmd));
    assert_eq!(result, BehaviorResult::Success);
    assert_eq!(
        commands,
        vec![Command::Move(1.0), Command::Turn(-0.05), Command::Fire(0.5)]
    );
}

#[test]
fn test_service_and_condition() {
    // A cut-down track-and-fire: the service samples the target into the
    // blackboard, the condition steers by it.
    let mut root = load_source(
        r#"
tree main = Service (0.2) {
    Selector {
        Condition (targetOnRight == true, restart) {
            Turn (0.2)
        }
        Turn (-0.2)
    }
}
"#,
    )
    .unwrap();
    root.start();

    let mut world = WorldState::new(Pose::new(Vec2::ZERO, 0.0));
    world.target = Some(Vec2::new(5.0, 5.0));

    let mut commands = vec![];
    root.tick(0.016, &world, &mut |cmd| commands.push(cmd));
    assert_eq!(commands, vec![Command::Turn(0.2)]);

    // No target on a fresh tree: keys stay unset and the fallback runs.
    let mut root = load_source(
        r#"
tree main = Selector {
    Condition (targetOnRight == true, restart) {
        Turn (0.2)
    }
    Turn (-0.2)
}
"#,
    )
    .unwrap();
    root.start();
    let world = WorldState::new(Pose::new(Vec2::ZERO, 0.0));
    let mut commands = vec![];
    root.tick(0.016, &world, &mut |cmd| commands.push(cmd));
    assert_eq!(commands, vec![Command::Turn(-0.2)]);
}

#[test]
fn test_missing_main() {
    let err = load_source("tree spin = Sequence {\n    Turn (1)\n}\n").unwrap_err();
    assert!(matches!(err, LoadError::MissingTree));
}

#[test]
fn test_unknown_node() {
    let err = load_source("tree main = Sequence {\n    Teleport (1)\n}\n").unwrap_err();
    assert!(matches!(err, LoadError::UnknownNode(node) if node == "Teleport"));
}

#[test]
fn test_unknown_key() {
    let err = load_source(
        "tree main = Condition (targetSpeed > 1) {\n    Move (1)\n}\n",
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::UnknownKey(key) if key == "targetSpeed"));
}

#[test]
fn test_bad_arguments() {
    let err = load_source("tree main = Sequence {\n    Wait (fast)\n}\n").unwrap_err();
    assert!(matches!(err, LoadError::BadArgument { node, .. } if node == "Wait"));

    let err = load_source("tree main = Sequence {\n    Fire (2, 3)\n}\n").unwrap_err();
    assert!(matches!(err, LoadError::BadArgument { node, .. } if node == "Fire"));
}

#[test]
fn test_bad_children() {
    let err = load_source("tree main = Sequence {\n    Move (1) {\n        Turn (1)\n    }\n}\n")
        .unwrap_err();
    assert!(matches!(err, LoadError::BadChildren { node, .. } if node == "Move"));

    let err = load_source("tree main = Service (0.2) {\n    Move (1)\n    Turn (1)\n}\n")
        .unwrap_err();
    assert!(matches!(err, LoadError::BadChildren { node, .. } if node == "Service"));
}

#[test]
fn test_empty_composite() {
    let err = load_source("tree main = Sequence {\n}\n").unwrap_err();
    assert!(matches!(
        err,
        LoadError::Tree(TreeError::EmptyComposite("Sequence"))
    ));
}
