use tracing::debug;

/// The keys a perception pass writes and condition nodes read.
///
/// The original blackboard was a string-keyed map of dynamically typed
/// values. A closed key set makes typos unrepresentable and lets condition
/// evaluation match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlackboardKey {
    TargetDistance,
    TargetInFront,
    TargetOnRight,
    TargetOffCentre,
}

impl BlackboardKey {
    /// Key name as it appears in tree source files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TargetDistance => "targetDistance",
            Self::TargetInFront => "targetInFront",
            Self::TargetOnRight => "targetOnRight",
            Self::TargetOffCentre => "targetOffCentre",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "targetDistance" => Self::TargetDistance,
            "targetInFront" => Self::TargetInFront,
            "targetOnRight" => Self::TargetOnRight,
            "targetOffCentre" => Self::TargetOffCentre,
            _ => return None,
        })
    }
}

impl std::fmt::Display for BlackboardKey {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(f32),
    Bool(bool),
}

/// Observations shared between the perception pass and condition nodes.
///
/// One blackboard lives for exactly one tree instance; rebuilding the tree
/// recreates it. A field is `None` until the first perception pass that has
/// a target to report, and conditions on an unset key fail closed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Blackboard {
    pub target_distance: Option<f32>,
    pub target_in_front: Option<bool>,
    pub target_on_right: Option<bool>,
    pub target_off_centre: Option<f32>,
}

impl Blackboard {
    pub fn get(&self, key: BlackboardKey) -> Option<Value> {
        match key {
            BlackboardKey::TargetDistance => self.target_distance.map(Value::Number),
            BlackboardKey::TargetInFront => self.target_in_front.map(Value::Bool),
            BlackboardKey::TargetOnRight => self.target_on_right.map(Value::Bool),
            BlackboardKey::TargetOffCentre => self.target_off_centre.map(Value::Number),
        }
    }

    /// Writes `value` under `key`. A value whose type does not match the
    /// key's schema is dropped; readers will keep failing closed.
    pub fn set(&mut self, key: BlackboardKey, value: Value) {
        match (key, value) {
            (BlackboardKey::TargetDistance, Value::Number(v)) => self.target_distance = Some(v),
            (BlackboardKey::TargetInFront, Value::Bool(v)) => self.target_in_front = Some(v),
            (BlackboardKey::TargetOnRight, Value::Bool(v)) => self.target_on_right = Some(v),
            (BlackboardKey::TargetOffCentre, Value::Number(v)) => self.target_off_centre = Some(v),
            (key, value) => debug!(%key, ?value, "dropping type-mismatched blackboard write"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keyed_access() {
        let mut bb = Blackboard::default();
        assert_eq!(bb.get(BlackboardKey::TargetDistance), None);
        bb.set(BlackboardKey::TargetDistance, Value::Number(12.5));
        bb.set(BlackboardKey::TargetOnRight, Value::Bool(true));
        assert_eq!(
            bb.get(BlackboardKey::TargetDistance),
            Some(Value::Number(12.5))
        );
        assert_eq!(bb.get(BlackboardKey::TargetOnRight), Some(Value::Bool(true)));
    }

    #[test]
    fn mismatched_write_is_dropped() {
        let mut bb = Blackboard::default();
        bb.set(BlackboardKey::TargetDistance, Value::Bool(true));
        assert_eq!(bb.get(BlackboardKey::TargetDistance), None);
    }

    #[test]
    fn key_names_round_trip() {
        for key in [
            BlackboardKey::TargetDistance,
            BlackboardKey::TargetInFront,
            BlackboardKey::TargetOnRight,
            BlackboardKey::TargetOffCentre,
        ] {
            assert_eq!(BlackboardKey::from_name(key.name()), Some(key));
        }
        assert_eq!(BlackboardKey::from_name("targetSpeed"), None);
    }
}
