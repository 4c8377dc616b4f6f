pub mod emitters;
pub mod generator;
pub mod type_names;

pub use emitters::scaffold::ScaffoldOptions;
pub use generator::{TypeScriptConfig, TypeScriptError, TypeScriptGenerator};
