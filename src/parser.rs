mod loader;
mod nom_parser;

pub use self::{
    loader::load,
    nom_parser::{parse_file, ArgDef, TreeDef, TreeRootDef, TreeSource},
};
