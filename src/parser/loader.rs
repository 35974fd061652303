use super::nom_parser::{ArgDef, TreeDef, TreeSource};
use crate::{
    blackboard::BlackboardKey, error::LoadError, nodes::Node, nodes::Restart, perception,
    tree::Root, Command,
};

/// Instantiates a behaviour tree from a parsed AST.
///
/// The tree named `main` becomes the root. Node types are the closed
/// vocabulary of this crate (`Sequence`, `Selector`, `Condition`,
/// `Service`, `Wait`, `Move`, `Turn`, `Fire`), so dispatch is a plain
/// match rather than a constructor registry.
pub fn load(tree_source: &TreeSource) -> Result<Root, LoadError> {
    let main = tree_source
        .tree_defs
        .iter()
        .find(|tree| tree.name == "main")
        .ok_or(LoadError::MissingTree)?;

    let node = build_node(&main.root)?;
    Ok(Root::new(node)?)
}

fn build_node(def: &TreeDef) -> Result<Node, LoadError> {
    match def.ty {
        "Sequence" => Ok(Node::sequence(build_children(def)?)),
        "Selector" => Ok(Node::selector(build_children(def)?)),
        "Condition" => {
            let (key, op, value) = match def.args.first() {
                Some(ArgDef::Compare { key, op, value }) => (*key, *op, *value),
                _ => return Err(bad_args(def, "key <op> value [, restart]")),
            };
            let restart = match def.args.get(1) {
                None => Restart::OnCompletion,
                Some(ArgDef::Ident(flag)) if *flag == "restart" => Restart::Immediate,
                Some(_) => return Err(bad_args(def, "key <op> value [, restart]")),
            };
            if def.args.len() > 2 {
                return Err(bad_args(def, "key <op> value [, restart]"));
            }
            let key = BlackboardKey::from_name(key)
                .ok_or_else(|| LoadError::UnknownKey(key.to_owned()))?;
            Ok(Node::condition(key, op, value, restart, only_child(def)?))
        }
        "Service" => {
            let interval = number_arg(def, "interval in seconds")?;
            Ok(Node::service(interval, perception::refresh, only_child(def)?))
        }
        "Wait" => {
            no_children(def)?;
            Ok(Node::wait(number_arg(def, "duration in seconds")?))
        }
        "Move" => {
            no_children(def)?;
            let velocity = number_arg(def, "velocity in -1..1")?;
            Ok(Node::action(move || Command::Move(velocity)))
        }
        "Turn" => {
            no_children(def)?;
            let velocity = number_arg(def, "velocity in -1..1")?;
            Ok(Node::action(move || Command::Turn(velocity)))
        }
        "Fire" => {
            no_children(def)?;
            match def.args.as_slice() {
                [ArgDef::Number(force)] => {
                    let force = *force;
                    Ok(Node::action(move || Command::Fire(force)))
                }
                [ArgDef::Random] => Ok(Node::action(|| Command::Fire(fastrand::f32()))),
                _ => Err(bad_args(def, "force in 0..1, or random")),
            }
        }
        _ => Err(LoadError::UnknownNode(def.ty.to_owned())),
    }
}

fn build_children(def: &TreeDef) -> Result<Vec<Node>, LoadError> {
    def.children.iter().map(build_node).collect()
}

fn only_child(def: &TreeDef) -> Result<Node, LoadError> {
    match def.children.as_slice() {
        [child] => build_node(child),
        _ => Err(LoadError::BadChildren {
            node: def.ty.to_owned(),
            expected: "exactly one child",
        }),
    }
}

fn no_children(def: &TreeDef) -> Result<(), LoadError> {
    if def.children.is_empty() {
        Ok(())
    } else {
        Err(LoadError::BadChildren {
            node: def.ty.to_owned(),
            expected: "no children",
        })
    }
}

fn number_arg(def: &TreeDef, expected: &'static str) -> Result<f32, LoadError> {
    match def.args.as_slice() {
        [ArgDef::Number(value)] => Ok(*value),
        _ => Err(bad_args(def, expected)),
    }
}

fn bad_args(def: &TreeDef, expected: &'static str) -> LoadError {
    LoadError::BadArgument {
        node: def.ty.to_owned(),
        expected,
    }
}

#[cfg(test)]
mod test;
