use std::fs::read_to_string;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use casidx_core::errors::TypeSystemError;
use casidx_core::models::{PriorityConflict, TypePriorities, TypePriorityBuilder, TypeSystem};

use crate::index::AnnotationIndex;
use crate::options::{IndexOptions, SameSpanPolicy};

#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct TypeDeclaration {
    pub name: String,
    /// Defaults to the root annotation type.
    pub parent: Option<String>,
}

///
/// The on-disk description of a type system, its priorities and the index options.
///
/// ```toml
/// same_span_policy = "exclude"
/// priorities = [["Sentence", "Token"]]
///
/// [[types]]
/// name = "Sentence"
///
/// [[types]]
/// name = "Token"
/// ```
///
/// Types must be declared after their parent.
///
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone, Default)]
pub struct IndexConfig {
    #[serde(default)]
    pub same_span_policy: SameSpanPolicy,
    #[serde(default)]
    pub priorities: Vec<Vec<String>>,
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error("Invalid type declaration: {0}")]
    TypeSystem(#[from] TypeSystemError),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Everything needed to build an [`AnnotationIndex`].
#[derive(Debug, Clone)]
pub struct Schema {
    pub type_system: TypeSystem,
    pub priorities: TypePriorities,
    pub options: IndexOptions,
    /// Priority declarations dropped because they contradicted earlier ones.
    pub conflicts: Vec<PriorityConflict>,
}

impl Schema {
    /// An empty index using this schema's priorities and options.
    pub fn index(&self) -> AnnotationIndex {
        AnnotationIndex::with_options(self.priorities.clone(), self.options)
    }
}

impl TryFrom<&Path> for IndexConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

impl IndexConfig {
    pub fn build(&self) -> ConfigResult<Schema> {
        let mut type_system = TypeSystem::new();
        for declaration in &self.types {
            let parent = declaration
                .parent
                .as_deref()
                .unwrap_or(TypeSystem::ANNOTATION_NAME);
            type_system.add_type_named(&declaration.name, parent)?;
        }

        let mut builder = TypePriorityBuilder::new();
        for chain in &self.priorities {
            let names: Vec<&str> = chain.iter().map(String::as_str).collect();
            builder.add_names(&type_system, &names)?;
        }
        let priorities = builder.build(&type_system);

        info!(
            "Loaded {} types, {} priority chains, same span policy: {}",
            type_system.len() - 1,
            self.priorities.len(),
            self.same_span_policy
        );

        Ok(Schema {
            priorities,
            options: IndexOptions {
                same_span_policy: self.same_span_policy,
            },
            conflicts: builder.conflicts().to_vec(),
            type_system,
        })
    }
}
