use std::fmt::{self, Display, Formatter};

#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum TreeError {
    EmptyComposite(&'static str),
}

impl Display for TreeError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            Self::EmptyComposite(kind) => {
                write!(fmt, "{} node requires at least one child", kind)
            }
        }
    }
}

impl std::error::Error for TreeError {}

#[derive(Debug)]
#[non_exhaustive]
pub enum LoadError {
    MissingTree,
    UnknownNode(String),
    UnknownKey(String),
    BadArgument { node: String, expected: &'static str },
    BadChildren { node: String, expected: &'static str },
    Tree(TreeError),
}

impl Display for LoadError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            Self::MissingTree => write!(fmt, "The main tree does not exist"),
            Self::UnknownNode(node) => write!(fmt, "Node type not found {:?}", node),
            Self::UnknownKey(key) => write!(fmt, "Blackboard key not found {:?}", key),
            Self::BadArgument { node, expected } => {
                write!(fmt, "Node {} expects arguments ({})", node, expected)
            }
            Self::BadChildren { node, expected } => {
                write!(fmt, "Node {} expects {}", node, expected)
            }
            Self::Tree(e) => e.fmt(fmt),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<TreeError> for LoadError {
    fn from(err: TreeError) -> Self {
        Self::Tree(err)
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub enum ConfigError {
    Yaml(serde_yaml::Error),
    Io(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            Self::Yaml(e) => e.fmt(fmt),
            Self::Io(e) => e.fmt(fmt),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
