//! Field registry
//!
//! A registry is built from explicit declarations, checked against the record
//! type's attribute list, and then only read.

use std::any::type_name;
use std::collections::HashMap;

use super::errors::{RegistryError, RegistryResult};
use super::record::Record;
use super::types::{DataType, FieldDeclaration, FieldDescriptor};

/// Logical field name → descriptor, in declaration order
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: Vec<(String, FieldDescriptor)>,
    index: HashMap<String, usize>,
}

impl FieldRegistry {
    /// Starts a declaration
    pub fn builder() -> FieldRegistryBuilder {
        FieldRegistryBuilder::default()
    }

    /// Builds a registry for `R` from a list of declarations
    pub fn from_declarations<R: Record>(
        declarations: impl IntoIterator<Item = FieldDeclaration>,
    ) -> RegistryResult<Self> {
        declarations
            .into_iter()
            .fold(Self::builder(), FieldRegistryBuilder::declare)
            .build_for::<R>()
    }

    /// Looks up a logical field. Unknown names are `None`, not errors.
    pub fn lookup(&self, logical_name: &str) -> Option<&FieldDescriptor> {
        self.index
            .get(logical_name)
            .map(|&position| &self.fields[position].1)
    }

    /// All fields, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields
            .iter()
            .map(|(name, descriptor)| (name.as_str(), descriptor))
    }

    /// Fields flagged for global search, in declaration order
    pub fn global_fields(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.iter().filter(|(_, descriptor)| descriptor.global)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Collects field declarations for one record type
#[derive(Debug, Clone, Default)]
pub struct FieldRegistryBuilder {
    declarations: Vec<FieldDeclaration>,
}

impl FieldRegistryBuilder {
    /// Declares a text field
    pub fn text(self, logical_name: &str, attribute_name: &str, global: bool) -> Self {
        self.declare(FieldDeclaration::new(
            logical_name,
            attribute_name,
            DataType::Text,
            global,
        ))
    }

    /// Declares a numeric field
    pub fn numeric(self, logical_name: &str, attribute_name: &str, global: bool) -> Self {
        self.declare(FieldDeclaration::new(
            logical_name,
            attribute_name,
            DataType::Numeric,
            global,
        ))
    }

    /// Declares a date field
    pub fn date(self, logical_name: &str, attribute_name: &str, global: bool) -> Self {
        self.declare(FieldDeclaration::new(
            logical_name,
            attribute_name,
            DataType::Date,
            global,
        ))
    }

    /// Adds a declaration
    pub fn declare(mut self, declaration: FieldDeclaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Validates every declaration against `R` and freezes the registry.
    ///
    /// Fails on the first declaration that names a missing attribute, disagrees
    /// with the attribute's data type, or reuses a logical name.
    pub fn build_for<R: Record>(self) -> RegistryResult<FieldRegistry> {
        let attributes = R::attributes();
        let mut registry = FieldRegistry::default();

        for decl in self.declarations {
            let attribute = attributes
                .iter()
                .find(|attr| attr.name == decl.attribute_name)
                .ok_or_else(|| RegistryError::UnknownAttribute {
                    record: type_name::<R>(),
                    field: decl.logical_name.clone(),
                    attribute: decl.attribute_name.clone(),
                })?;

            if attribute.data_type != decl.data_type {
                return Err(RegistryError::DataTypeMismatch {
                    record: type_name::<R>(),
                    field: decl.logical_name,
                    attribute: decl.attribute_name,
                    declared: decl.data_type,
                    actual: attribute.data_type,
                });
            }

            if registry.index.contains_key(&decl.logical_name) {
                return Err(RegistryError::DuplicateField(decl.logical_name));
            }

            registry
                .index
                .insert(decl.logical_name.clone(), registry.fields.len());
            registry.fields.push((
                decl.logical_name,
                FieldDescriptor::new(decl.attribute_name, decl.data_type, decl.global),
            ));
        }

        Ok(registry)
    }
}
