//! Sources of the entity answers
//!
//! The pipeline asks three things, in order: whether to add a model, the
//! model name, then field names until the source signals it is done.
//! [`TerminalSource`] asks a person; [`ScriptedSource`] replays answers given
//! on the command line or in tests.

use std::collections::VecDeque;

use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use super::entity::EntitySpec;
use crate::error::Result;

/// Next answer to the field prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    /// A field name
    Field(String),
    /// No more fields
    Done,
}

/// Producer of the entity answers
pub trait EntitySource {
    /// Whether the user wants a model generated
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read.
    fn wants_entity(&mut self) -> Result<bool>;

    /// Raw model name
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read.
    fn entity_name(&mut self) -> Result<String>;

    /// Next field name, or [`FieldInput::Done`]
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read.
    fn next_field(&mut self) -> Result<FieldInput>;
}

/// Run the prompts in order and build the entity, `None` if declined
///
/// # Errors
///
/// Returns an error if the source fails or the model name is empty.
pub fn collect_entity(source: &mut dyn EntitySource) -> Result<Option<EntitySpec>> {
    if !source.wants_entity()? {
        tracing::debug!("model generation declined");
        return Ok(None);
    }

    let name = source.entity_name()?;
    let mut fields = Vec::new();
    while let FieldInput::Field(field) = source.next_field()? {
        fields.push(field);
    }

    let entity = EntitySpec::new(&name, fields)?;
    tracing::debug!(
        model = entity.name(),
        fields = entity.fields().len(),
        "collected model definition"
    );
    Ok(Some(entity))
}

/// Interactive prompts on the terminal
#[derive(Default)]
pub struct TerminalSource {
    theme: ColorfulTheme,
}

impl TerminalSource {
    /// Create a terminal source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntitySource for TerminalSource {
    fn wants_entity(&mut self) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Do you want to add a model?")
            .default(false)
            .interact()?)
    }

    fn entity_name(&mut self) -> Result<String> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt("Enter model name")
            .interact_text()?)
    }

    fn next_field(&mut self) -> Result<FieldInput> {
        let field: String = Input::with_theme(&self.theme)
            .with_prompt("Enter field name (or leave blank to finish)")
            .allow_empty(true)
            .interact_text()?;

        let field = field.trim();
        if field.is_empty() {
            Ok(FieldInput::Done)
        } else {
            Ok(FieldInput::Field(field.to_string()))
        }
    }
}

/// Pre-recorded answers
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    entity: Option<String>,
    fields: VecDeque<String>,
}

impl ScriptedSource {
    /// Answers that decline model generation
    #[must_use]
    pub fn declined() -> Self {
        Self::default()
    }

    /// Answers that request `entity` with `fields`
    pub fn entity<I, S>(entity: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entity: Some(entity.into()),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

impl EntitySource for ScriptedSource {
    fn wants_entity(&mut self) -> Result<bool> {
        Ok(self.entity.is_some())
    }

    fn entity_name(&mut self) -> Result<String> {
        Ok(self.entity.clone().unwrap_or_default())
    }

    fn next_field(&mut self) -> Result<FieldInput> {
        // A blank entry ends the list, same as at the terminal
        match self.fields.pop_front() {
            Some(field) if !field.trim().is_empty() => Ok(FieldInput::Field(field)),
            _ => Ok(FieldInput::Done),
        }
    }
}
