use tracing::debug;

use crate::{
    blackboard::{Blackboard, BlackboardKey, Value},
    context::Context,
    error::TreeError,
    perception::WorldState,
    BehaviorCallback, BehaviorResult, Command,
};

/// Comparison operators available to condition nodes. Ordering operators on
/// a boolean key evaluate to condition-false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// What a condition does to a running child when its predicate turns false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restart {
    /// Re-check every tick; stop the child immediately when the predicate
    /// no longer holds.
    Immediate,
    /// Let a running child finish before re-checking the predicate.
    OnCompletion,
}

pub type ServiceFn = Box<dyn FnMut(&WorldState, &mut Blackboard)>;

/// One unit of execution in a behaviour tree.
///
/// A closed variant set rather than a node trait: the node vocabulary of
/// this crate is fixed, so `tick` can match exhaustively and the tree needs
/// no boxed trait objects beyond the leaf callbacks.
pub enum Node {
    /// Leaf; emits one actuator command per tick and always succeeds.
    Action(Box<dyn FnMut() -> Command>),
    /// Ticks children in order; fails on the first failing child, succeeds
    /// once every child has succeeded. A running child suspends the
    /// sequence, which resumes from the same child on the next tick.
    Sequence { children: Vec<Node>, current: usize },
    /// Ticks children in order; succeeds on the first succeeding child,
    /// fails only when every child has failed.
    Selector { children: Vec<Node>, current: usize },
    /// Gates its child on a blackboard predicate. A missing key fails
    /// closed.
    Condition {
        key: BlackboardKey,
        op: ConditionOp,
        value: Value,
        restart: Restart,
        child: Box<Node>,
        running: bool,
    },
    /// Runs a side-effecting callback on first tick and then once per
    /// `interval`, then ticks its child regardless of the callback.
    Service {
        interval: f32,
        elapsed: Option<f32>,
        callback: ServiceFn,
        child: Box<Node>,
    },
    /// Leaf; keeps running until `duration` has elapsed across ticks, then
    /// succeeds exactly once and re-arms.
    Wait { duration: f32, elapsed: f32 },
}

impl Node {
    pub fn action(callback: impl FnMut() -> Command + 'static) -> Self {
        Self::Action(Box::new(callback))
    }

    pub fn sequence(children: Vec<Node>) -> Self {
        Self::Sequence {
            children,
            current: 0,
        }
    }

    pub fn selector(children: Vec<Node>) -> Self {
        Self::Selector {
            children,
            current: 0,
        }
    }

    pub fn condition(
        key: BlackboardKey,
        op: ConditionOp,
        value: Value,
        restart: Restart,
        child: Node,
    ) -> Self {
        Self::Condition {
            key,
            op,
            value,
            restart,
            child: Box::new(child),
            running: false,
        }
    }

    pub fn service(
        interval: f32,
        callback: impl FnMut(&WorldState, &mut Blackboard) + 'static,
        child: Node,
    ) -> Self {
        Self::Service {
            interval,
            elapsed: None,
            callback: Box::new(callback),
            child: Box::new(child),
        }
    }

    pub fn wait(duration: f32) -> Self {
        Self::Wait {
            duration,
            elapsed: 0.0,
        }
    }

    pub fn tick(&mut self, arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        match self {
            Node::Action(callback) => {
                arg(callback());
                BehaviorResult::Success
            }
            Node::Sequence { children, current } => {
                while *current < children.len() {
                    match children[*current].tick(arg, ctx) {
                        BehaviorResult::Success => *current += 1,
                        BehaviorResult::Running => return BehaviorResult::Running,
                        BehaviorResult::Fail => {
                            *current = 0;
                            return BehaviorResult::Fail;
                        }
                    }
                }
                *current = 0;
                BehaviorResult::Success
            }
            Node::Selector { children, current } => {
                while *current < children.len() {
                    match children[*current].tick(arg, ctx) {
                        BehaviorResult::Fail => *current += 1,
                        BehaviorResult::Running => return BehaviorResult::Running,
                        BehaviorResult::Success => {
                            *current = 0;
                            return BehaviorResult::Success;
                        }
                    }
                }
                *current = 0;
                BehaviorResult::Fail
            }
            Node::Condition {
                key,
                op,
                value,
                restart,
                child,
                running,
            } => {
                let pass = evaluate(ctx.blackboard.get(*key), *op, *value);
                let res = match restart {
                    Restart::Immediate => {
                        if pass {
                            child.tick(arg, ctx)
                        } else {
                            if *running {
                                child.reset();
                            }
                            BehaviorResult::Fail
                        }
                    }
                    Restart::OnCompletion => {
                        if *running || pass {
                            child.tick(arg, ctx)
                        } else {
                            BehaviorResult::Fail
                        }
                    }
                };
                *running = res == BehaviorResult::Running;
                res
            }
            Node::Service {
                interval,
                elapsed,
                callback,
                child,
            } => {
                match elapsed {
                    None => {
                        callback(ctx.world, ctx.blackboard);
                        *elapsed = Some(0.0);
                    }
                    Some(since_last) => {
                        *since_last += ctx.delta;
                        if *since_last >= *interval {
                            callback(ctx.world, ctx.blackboard);
                            *since_last = 0.0;
                        }
                    }
                }
                child.tick(arg, ctx)
            }
            Node::Wait { duration, elapsed } => {
                *elapsed += ctx.delta;
                if *elapsed >= *duration {
                    *elapsed = 0.0;
                    BehaviorResult::Success
                } else {
                    BehaviorResult::Running
                }
            }
        }
    }

    /// Discards all in-flight state: composite cursors, condition gates,
    /// Wait and Service timers. Used when a tree is stopped.
    pub fn reset(&mut self) {
        match self {
            Node::Action(_) => {}
            Node::Sequence { children, current } | Node::Selector { children, current } => {
                *current = 0;
                for child in children {
                    child.reset();
                }
            }
            Node::Condition { child, running, .. } => {
                *running = false;
                child.reset();
            }
            Node::Service { elapsed, child, .. } => {
                *elapsed = None;
                child.reset();
            }
            Node::Wait { elapsed, .. } => *elapsed = 0.0,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), TreeError> {
        match self {
            Node::Sequence { children, .. } => {
                if children.is_empty() {
                    return Err(TreeError::EmptyComposite("Sequence"));
                }
                children.iter().try_for_each(Node::validate)
            }
            Node::Selector { children, .. } => {
                if children.is_empty() {
                    return Err(TreeError::EmptyComposite("Selector"));
                }
                children.iter().try_for_each(Node::validate)
            }
            Node::Condition { child, .. } | Node::Service { child, .. } => child.validate(),
            Node::Action(_) | Node::Wait { .. } => Ok(()),
        }
    }
}

fn evaluate(actual: Option<Value>, op: ConditionOp, expected: Value) -> bool {
    let Some(actual) = actual else {
        return false;
    };
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => match op {
            ConditionOp::Eq => a == b,
            ConditionOp::Ne => a != b,
            ConditionOp::Lt => a < b,
            ConditionOp::Le => a <= b,
            ConditionOp::Gt => a > b,
            ConditionOp::Ge => a >= b,
        },
        (Value::Bool(a), Value::Bool(b)) => match op {
            ConditionOp::Eq => a == b,
            ConditionOp::Ne => a != b,
            _ => {
                debug!(?op, "ordering comparison on a boolean key");
                false
            }
        },
        (actual, expected) => {
            debug!(?actual, ?expected, "type-mismatched condition");
            false
        }
    }
}
