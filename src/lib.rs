//! kpt-setters - create and list setter annotations on YAML packages
//!
//! A setter is a named value (or set of values) that a configuration author
//! wants to parameterize. `create` finds where setter values occur in YAML
//! resources and records a `# kpt-set: <template>` comment next to them;
//! `list` reads those comments back, solves each template against the
//! current field value, and counts how often each setter is in use.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, reporting)
//! - `config`: Project configuration file loading and parsing
//! - `core`: Setter engine (registry, template matcher, annotator, resolver)
//! - `document`: YAML document tree, traversal and comment write-back
//! - `logging`: Diagnostic logging setup

pub mod cli;
pub mod config;
pub mod core;
pub mod document;
pub mod logging;
