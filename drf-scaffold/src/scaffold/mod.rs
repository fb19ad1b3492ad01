//! App scaffolding engine
//!
//! Derives the module identifiers, copies the app template, generates the
//! entity code and patches the shared project files. Every text change is
//! computed in memory first (see [`plan`]) and written only once the whole
//! run is known to be valid.

pub mod copier;
pub mod descriptor;
pub mod entity;
pub mod generator;
pub mod helpers;
pub mod input;
pub mod patcher;
pub mod plan;
pub mod registry;

pub use copier::{CopyReport, TemplateCopier};
pub use descriptor::{ModuleDescriptor, Placement};
pub use entity::{EntitySpec, FieldSpec};
pub use generator::{CodeGenerator, GeneratedFragment, WriteMode};
pub use helpers::TemplateHelpers;
pub use input::{collect_entity, EntitySource, FieldInput, ScriptedSource, TerminalSource};
pub use patcher::{insert_if_absent, EditLog, SubstringMatcher, TextEdit, TextMatcher};
pub use plan::{CommitEvent, PlannedFile, ScaffoldPlan};
pub use registry::{SharedFileEdit, SharedFileKind};
