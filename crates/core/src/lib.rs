pub mod animation;
pub mod bundle;
pub mod error;
pub mod flatten;
pub mod loader;
pub mod merge;
pub mod naming;
pub mod normalize;
pub mod types;

// Re-export commonly used types
pub use animation::{compile_animation, Animation, Keyframe};
pub use bundle::{compile_style_sheet, Compiler};
pub use error::{Error, Result};
pub use flatten::flatten;
pub use naming::{HashIds, IdGenerator, RandomIds, SequentialIds};
pub use normalize::normalize_property;
pub use types::{
    AnimationBundle, CompileOptions, Declaration, DeclarationValue, NamingMode, Rule,
    StyleNode, StyleSheetBundle, StyleSheetMap, StyleTree,
};
