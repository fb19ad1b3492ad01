//! Entity description collected from the user

use super::helpers::TemplateHelpers;
use crate::error::{Result, ScaffoldError};

/// One text attribute of an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Attribute name, used verbatim
    pub name: String,
}

impl FieldSpec {
    /// Create a field
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Entity to generate model, serializer, handler and routes for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpec {
    name: String,
    fields: Vec<FieldSpec>,
}

impl EntitySpec {
    /// Build an entity from the raw name and the ordered field names
    ///
    /// The name is title-cased with whitespace removed (`blog post` -> `BlogPost`).
    /// Field names are trimmed; blanks are dropped, everything else is kept
    /// as typed, duplicates included.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidInput`] if the name is empty after normalization.
    pub fn new<I, S>(raw_name: &str, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = TemplateHelpers::to_entity_name(raw_name);
        if name.is_empty() {
            return Err(ScaffoldError::InvalidInput(
                "model name must not be empty".to_string(),
            ));
        }

        let fields = fields
            .into_iter()
            .map(|field| field.as_ref().trim().to_string())
            .filter(|field| !field.is_empty())
            .map(FieldSpec::new)
            .collect();

        Ok(Self { name, fields })
    }

    /// Class name of the entity
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in input order
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Lower-cased name used as the route segment
    #[must_use]
    pub fn route_segment(&self) -> String {
        TemplateHelpers::to_route_segment(&self.name)
    }
}
