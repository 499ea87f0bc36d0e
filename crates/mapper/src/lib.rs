//! Type system mapping for the LLM SDK Generator
//!
//! One mapper per target language, sharing a common contract: render a
//! complete native declaration for an IR type, render type references with
//! the language's nullable strategy applied exactly once, translate
//! constraints into runtime guards, and expose the language's naming
//! convention. Mappers are stateless; a validated `CanonicalSchema` may be
//! shared by reference across concurrent mapper invocations.

mod golang;
mod naming;
mod python;
mod typescript;

pub use golang::GoMapper;
pub use naming::{
    to_camel_case, to_flat_case, to_kebab_case, to_pascal_case, to_screaming_snake_case,
    to_snake_case, Case, NamingConvention,
};
pub use python::PythonMapper;
pub use typescript::TypeScriptMapper;

use llm_sdk_generator_common::{
    AdditionalProperties, CanonicalSchema, Constraints, Result, TargetLanguage, TypeDefinition,
    TypeKind, TypeReference,
};

/// A rendered native type declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    /// Native type name, naming-convention transformed
    pub name: String,

    /// Complete declaration source
    pub code: String,

    /// Fully rendered import lines the declaration needs
    pub imports: Vec<String>,

    /// Package-level runtime dependencies the declaration pulls in
    pub dependencies: Vec<String>,
}

/// Contract shared by every target language mapper
pub trait LanguageMapper: Send + Sync {
    fn language(&self) -> TargetLanguage;

    fn naming(&self) -> &NamingConvention;

    /// Extension for generated source files, without the dot
    fn file_extension(&self) -> &'static str;

    /// Render a complete native declaration for one IR type
    fn map_type(&self, schema: &CanonicalSchema, definition: &TypeDefinition)
        -> Result<MappedType>;

    /// Render a type reference in native syntax
    ///
    /// The nullable wrapper (option type, `| null`, pointer) is applied
    /// exactly once per optional marker, never stacked.
    fn map_type_reference(
        &self,
        schema: &CanonicalSchema,
        reference: &TypeReference,
    ) -> Result<String>;

    /// Translate constraints into runtime guard statements over `expr`
    fn map_constraints(&self, constraints: &Constraints, expr: &str) -> Vec<String>;

    /// File name (without extension) for one generated type
    fn type_file_name(&self, type_name: &str) -> String;
}

/// Mapper registry
pub fn mapper_for(language: TargetLanguage) -> Box<dyn LanguageMapper> {
    match language {
        TargetLanguage::TypeScript => Box::new(TypeScriptMapper::new()),
        TargetLanguage::Python => Box::new(PythonMapper::new()),
        TargetLanguage::Go => Box::new(GoMapper::new()),
    }
}

/// Resolve a named reference to its definition, failing hard on danglers
///
/// Mappers only run on validated schemas, so a dangling id here is a caller
/// bug surfaced as an error rather than a silent fidelity loss.
pub(crate) fn resolve<'a>(
    schema: &'a CanonicalSchema,
    type_id: &str,
) -> Result<&'a TypeDefinition> {
    schema.type_by_id(type_id).ok_or_else(|| {
        llm_sdk_generator_common::GeneratorError::Generation(format!(
            "type reference '{}' does not resolve; was the schema validated?",
            type_id
        ))
    })
}

/// Ids of every named type a kind refers to, in declaration order
pub(crate) fn named_reference_ids(kind: &TypeKind) -> Vec<&str> {
    let mut ids = Vec::new();
    match kind {
        TypeKind::Object {
            properties,
            additional_properties,
            ..
        } => {
            for property in properties {
                if let Some(id) = property.type_ref.type_id() {
                    ids.push(id);
                }
            }
            if let Some(AdditionalProperties::Typed(reference)) = additional_properties {
                if let Some(id) = reference.type_id() {
                    ids.push(id);
                }
            }
        }
        TypeKind::Array { items, .. } => {
            if let Some(id) = items.type_id() {
                ids.push(id);
            }
        }
        TypeKind::Map { values } => {
            if let Some(id) = values.type_id() {
                ids.push(id);
            }
        }
        TypeKind::Union { variants, .. } => {
            for variant in variants {
                if let Some(id) = variant.type_id() {
                    ids.push(id);
                }
            }
        }
        _ => {}
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_every_language() {
        for language in [
            TargetLanguage::TypeScript,
            TargetLanguage::Python,
            TargetLanguage::Go,
        ] {
            assert_eq!(mapper_for(language).language(), language);
        }
    }
}
