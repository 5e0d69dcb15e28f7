//! Setter engine.
//!
//! - `annotation`: the `# kpt-set: ` comment format
//! - `registry`: decoded setter configuration
//! - `pattern`: template compiler and matcher
//! - `create`: forward annotator (setters to annotations)
//! - `list`: reverse resolver (annotations to setter usage)
//! - `error`: error taxonomy

pub mod annotation;
pub mod create;
pub mod error;
pub mod list;
pub mod pattern;
pub mod registry;

pub use annotation::SETTER_COMMENT_PREFIX;
pub use create::{CreateSetters, MatchResult, annotate};
pub use error::{InputError, SetterError, TraversalError};
pub use list::{ListSetters, SetterKind, TallyRecord, resolve};
pub use pattern::{BindingSet, Template};
pub use registry::{ListSetter, ScalarSetter, SetterRegistry};
