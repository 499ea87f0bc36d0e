//! Two-phase validation of canonical schema documents
//!
//! The structural phase checks that the document is well-formed on its own
//! terms: identifiers present, type ids unique, constraints sane,
//! discriminator mappings pointing at actual variants. The semantic phase
//! assumes a well-formed document and checks cross-references: every type
//! reference resolves, `required` names declared properties, operation ids
//! are globally unique, and endpoint auth ids resolve to declared schemes.
//!
//! Semantic validation never stops at the first error; it accumulates every
//! violation so callers can fix a whole batch at once.

use crate::schema::{
    AdditionalProperties, CanonicalSchema, Constraints, TypeKind, TypeReference,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Stable machine-readable violation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCode {
    InvalidTypeReference,
    DuplicateOperationId,
    InvalidRequiredProperty,
    InvalidAuthReference,
    DuplicateTypeId,
    EmptyIdentifier,
    InvalidConstraint,
    UnknownDiscriminatorVariant,
}

impl ValidationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationCode::InvalidTypeReference => "invalid_type_reference",
            ValidationCode::DuplicateOperationId => "duplicate_operation_id",
            ValidationCode::InvalidRequiredProperty => "invalid_required_property",
            ValidationCode::InvalidAuthReference => "invalid_auth_reference",
            ValidationCode::DuplicateTypeId => "duplicate_type_id",
            ValidationCode::EmptyIdentifier => "empty_identifier",
            ValidationCode::InvalidConstraint => "invalid_constraint",
            ValidationCode::UnknownDiscriminatorVariant => "unknown_discriminator_variant",
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validation violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Dotted/bracketed locator into the document, e.g. "endpoints[3].operationId"
    pub path: String,

    pub message: String,

    pub code: ValidationCode,
}

impl ValidationError {
    fn new(path: impl Into<String>, message: impl Into<String>, code: ValidationCode) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            code,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.code, self.path, self.message)
    }
}

/// Outcome of validating a schema document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Whether any accumulated error carries the given code
    pub fn has_code(&self, code: ValidationCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }
}

/// Accumulated violations, carried by `GeneratorError::Validation`
#[derive(Debug, Clone)]
pub struct ValidationFailure(pub Vec<ValidationError>);

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} violation(s)", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  {}", error)?;
        }
        Ok(())
    }
}

/// Schema validator
pub struct Validator;

impl Validator {
    /// Validate a schema, accumulating every violation
    ///
    /// Structural failures short-circuit: semantic checks only run against a
    /// structurally sound document.
    pub fn validate(schema: &CanonicalSchema) -> ValidationResult {
        let structural = Self::check_structure(schema);
        if !structural.is_empty() {
            return ValidationResult::from_errors(structural);
        }

        ValidationResult::from_errors(Self::check_semantics(schema))
    }

    /// Validate and fail hard, listing all accumulated errors
    ///
    /// Call sites other than this one must treat validation as non-fatal and
    /// inspect the `ValidationResult`.
    pub fn assert_valid(schema: &CanonicalSchema) -> crate::Result<()> {
        let result = Self::validate(schema);
        if result.valid {
            Ok(())
        } else {
            Err(crate::GeneratorError::Validation(ValidationFailure(
                result.errors,
            )))
        }
    }

    fn check_structure(schema: &CanonicalSchema) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut seen_type_ids: HashSet<&str> = HashSet::new();

        for (i, ty) in schema.types.iter().enumerate() {
            if ty.id.is_empty() {
                errors.push(ValidationError::new(
                    format!("types[{}].id", i),
                    "type id must not be empty",
                    ValidationCode::EmptyIdentifier,
                ));
            }
            if ty.name.is_empty() {
                errors.push(ValidationError::new(
                    format!("types[{}].name", i),
                    "type name must not be empty",
                    ValidationCode::EmptyIdentifier,
                ));
            }
            if !ty.id.is_empty() && !seen_type_ids.insert(&ty.id) {
                errors.push(ValidationError::new(
                    format!("types[{}].id", i),
                    format!("type id '{}' is declared more than once", ty.id),
                    ValidationCode::DuplicateTypeId,
                ));
            }

            match &ty.kind {
                TypeKind::Primitive {
                    constraints: Some(constraints),
                    ..
                } => {
                    Self::check_constraints(constraints, &format!("types[{}].constraints", i), &mut errors);
                }
                TypeKind::Object { properties, .. } => {
                    for (j, property) in properties.iter().enumerate() {
                        if property.name.is_empty() {
                            errors.push(ValidationError::new(
                                format!("types[{}].properties[{}].name", i, j),
                                "property name must not be empty",
                                ValidationCode::EmptyIdentifier,
                            ));
                        }
                        if let Some(constraints) = &property.constraints {
                            Self::check_constraints(
                                constraints,
                                &format!("types[{}].properties[{}].constraints", i, j),
                                &mut errors,
                            );
                        }
                    }
                }
                TypeKind::Array {
                    min_items,
                    max_items,
                    ..
                } => {
                    if let (Some(min), Some(max)) = (min_items, max_items) {
                        if min > max {
                            errors.push(ValidationError::new(
                                format!("types[{}].minItems", i),
                                format!("minItems {} exceeds maxItems {}", min, max),
                                ValidationCode::InvalidConstraint,
                            ));
                        }
                    }
                }
                TypeKind::Union {
                    variants,
                    discriminator,
                } => {
                    if variants.is_empty() {
                        errors.push(ValidationError::new(
                            format!("types[{}].variants", i),
                            "union must declare at least one variant",
                            ValidationCode::InvalidConstraint,
                        ));
                    }
                    if let Some(discriminator) = discriminator {
                        let variant_ids: HashSet<&str> =
                            variants.iter().filter_map(|v| v.type_id()).collect();
                        for (literal, target) in &discriminator.mapping {
                            if !variant_ids.contains(target.as_str()) {
                                errors.push(ValidationError::new(
                                    format!("types[{}].discriminator.mapping.{}", i, literal),
                                    format!(
                                        "discriminator literal '{}' maps to '{}', which is not a variant of this union",
                                        literal, target
                                    ),
                                    ValidationCode::UnknownDiscriminatorVariant,
                                ));
                            }
                        }
                    }
                }
                TypeKind::Enum { values } => {
                    if values.is_empty() {
                        errors.push(ValidationError::new(
                            format!("types[{}].values", i),
                            "enum must declare at least one value",
                            ValidationCode::InvalidConstraint,
                        ));
                    }
                }
                _ => {}
            }
        }

        for (i, endpoint) in schema.endpoints.iter().enumerate() {
            if endpoint.operation_id.is_empty() {
                errors.push(ValidationError::new(
                    format!("endpoints[{}].operationId", i),
                    "operationId must not be empty",
                    ValidationCode::EmptyIdentifier,
                ));
            }
        }

        for (i, scheme) in schema.authentication.iter().enumerate() {
            if scheme.id.is_empty() {
                errors.push(ValidationError::new(
                    format!("authentication[{}].id", i),
                    "auth scheme id must not be empty",
                    ValidationCode::EmptyIdentifier,
                ));
            }
        }

        errors
    }

    fn check_constraints(constraints: &Constraints, path: &str, errors: &mut Vec<ValidationError>) {
        if let (Some(min), Some(max)) = (constraints.minimum, constraints.maximum) {
            if min > max {
                errors.push(ValidationError::new(
                    path,
                    format!("minimum {} exceeds maximum {}", min, max),
                    ValidationCode::InvalidConstraint,
                ));
            }
        }
        if let (Some(min), Some(max)) = (constraints.min_length, constraints.max_length) {
            if min > max {
                errors.push(ValidationError::new(
                    path,
                    format!("minLength {} exceeds maxLength {}", min, max),
                    ValidationCode::InvalidConstraint,
                ));
            }
        }
        if let Some(values) = &constraints.enum_values {
            if values.is_empty() {
                errors.push(ValidationError::new(
                    path,
                    "enum constraint must list at least one value",
                    ValidationCode::InvalidConstraint,
                ));
            }
        }
    }

    fn check_semantics(schema: &CanonicalSchema) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let type_ids: HashSet<&str> = schema.types.iter().map(|t| t.id.as_str()).collect();
        let auth_ids: HashSet<&str> = schema
            .authentication
            .iter()
            .map(|a| a.id.as_str())
            .collect();

        // Invariant 1: every type reference resolves
        for (path, reference) in collect_references(schema) {
            if let Some(type_id) = reference.type_id() {
                if !type_ids.contains(type_id) {
                    errors.push(ValidationError::new(
                        path,
                        format!("reference to undeclared type '{}'", type_id),
                        ValidationCode::InvalidTypeReference,
                    ));
                }
            }
        }

        // Invariant 2: required is a subset of declared property names
        for (i, ty) in schema.types.iter().enumerate() {
            if let TypeKind::Object {
                properties,
                required,
                ..
            } = &ty.kind
            {
                let names: HashSet<&str> = properties.iter().map(|p| p.name.as_str()).collect();
                for (j, name) in required.iter().enumerate() {
                    if !names.contains(name.as_str()) {
                        errors.push(ValidationError::new(
                            format!("types[{}].required[{}]", i, j),
                            format!(
                                "required property '{}' is not declared on type '{}'",
                                name, ty.name
                            ),
                            ValidationCode::InvalidRequiredProperty,
                        ));
                    }
                }
            }
        }

        // Invariant 3: operation ids are globally unique
        let mut seen_operations: HashMap<&str, usize> = HashMap::new();
        for (i, endpoint) in schema.endpoints.iter().enumerate() {
            if let Some(first) = seen_operations.get(endpoint.operation_id.as_str()) {
                errors.push(ValidationError::new(
                    format!("endpoints[{}].operationId", i),
                    format!(
                        "operationId '{}' already used by endpoints[{}]",
                        endpoint.operation_id, first
                    ),
                    ValidationCode::DuplicateOperationId,
                ));
            } else {
                seen_operations.insert(&endpoint.operation_id, i);
            }
        }

        // Invariant 4: endpoint auth ids resolve to declared schemes
        for (i, endpoint) in schema.endpoints.iter().enumerate() {
            for (j, auth_id) in endpoint.authentication.iter().enumerate() {
                if !auth_ids.contains(auth_id.as_str()) {
                    errors.push(ValidationError::new(
                        format!("endpoints[{}].authentication[{}]", i, j),
                        format!("reference to undeclared auth scheme '{}'", auth_id),
                        ValidationCode::InvalidAuthReference,
                    ));
                }
            }
        }

        errors
    }
}

/// Collect every type reference in the document with its locator path
fn collect_references(schema: &CanonicalSchema) -> Vec<(String, &TypeReference)> {
    let mut refs = Vec::new();

    for (i, ty) in schema.types.iter().enumerate() {
        match &ty.kind {
            TypeKind::Object {
                properties,
                additional_properties,
                ..
            } => {
                for (j, property) in properties.iter().enumerate() {
                    refs.push((
                        format!("types[{}].properties[{}].type", i, j),
                        &property.type_ref,
                    ));
                }
                if let Some(AdditionalProperties::Typed(reference)) = additional_properties {
                    refs.push((format!("types[{}].additionalProperties", i), reference));
                }
            }
            TypeKind::Array { items, .. } => {
                refs.push((format!("types[{}].items", i), items));
            }
            TypeKind::Map { values } => {
                refs.push((format!("types[{}].values", i), values));
            }
            TypeKind::Union { variants, .. } => {
                for (j, variant) in variants.iter().enumerate() {
                    refs.push((format!("types[{}].variants[{}]", i, j), variant));
                }
            }
            _ => {}
        }
    }

    for (i, endpoint) in schema.endpoints.iter().enumerate() {
        for (j, parameter) in endpoint.parameters.iter().enumerate() {
            refs.push((
                format!("endpoints[{}].parameters[{}].type", i, j),
                &parameter.type_ref,
            ));
        }
        if let Some(body) = &endpoint.request_body {
            refs.push((format!("endpoints[{}].requestBody.type", i), &body.type_ref));
        }
        for (j, response) in endpoint.responses.iter().enumerate() {
            refs.push((
                format!("endpoints[{}].responses[{}].type", i, j),
                &response.type_ref,
            ));
            for (k, header) in response.headers.iter().enumerate() {
                refs.push((
                    format!("endpoints[{}].responses[{}].headers[{}].type", i, j, k),
                    &header.type_ref,
                ));
            }
        }
    }

    for (i, error) in schema.errors.iter().enumerate() {
        if let Some(reference) = &error.type_ref {
            refs.push((format!("errors[{}].type", i), reference));
        }
    }

    refs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;
    use chrono::Utc;

    fn empty_schema() -> CanonicalSchema {
        CanonicalSchema {
            metadata: SchemaMetadata {
                provider_id: "test".to_string(),
                provider_name: "Test".to_string(),
                schema_version: "v1".to_string(),
                generated_at: Utc::now(),
            },
            capabilities: ProviderCapabilities::default(),
            types: vec![],
            endpoints: vec![],
            authentication: vec![],
            errors: vec![],
            config: None,
        }
    }

    fn object_type(id: &str, properties: Vec<PropertyDefinition>, required: Vec<&str>) -> TypeDefinition {
        TypeDefinition {
            id: id.to_string(),
            name: id.to_string(),
            kind: TypeKind::Object {
                properties,
                required: required.into_iter().map(String::from).collect(),
                additional_properties: None,
                discriminator: None,
            },
            description: None,
            deprecated: None,
        }
    }

    fn property(name: &str, type_ref: TypeReference) -> PropertyDefinition {
        PropertyDefinition {
            name: name.to_string(),
            type_ref,
            required: false,
            default: None,
            constraints: None,
            deprecated: false,
            description: None,
        }
    }

    fn endpoint(id: &str, operation_id: &str, path: &str) -> EndpointDefinition {
        EndpointDefinition {
            id: id.to_string(),
            operation_id: operation_id.to_string(),
            method: HttpMethod::Get,
            path: path.to_string(),
            parameters: vec![],
            request_body: None,
            responses: vec![],
            streaming: false,
            authentication: vec![],
            rate_limit: None,
            deprecated: false,
            description: None,
        }
    }

    #[test]
    fn test_empty_schema_is_valid() {
        let result = Validator::validate(&empty_schema());
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_dangling_type_reference_is_reported() {
        let mut schema = empty_schema();
        schema.types.push(object_type(
            "User",
            vec![property("profile", TypeReference::named("Profile"))],
            vec![],
        ));

        let result = Validator::validate(&schema);
        assert!(!result.valid);
        assert!(result.has_code(ValidationCode::InvalidTypeReference));
        assert_eq!(result.errors[0].path, "types[0].properties[0].type");
    }

    #[test]
    fn test_required_must_name_declared_properties() {
        let mut schema = empty_schema();
        schema.types.push(object_type(
            "User",
            vec![property(
                "id",
                TypeReference::primitive(PrimitiveType::String),
            )],
            vec!["id", "email"],
        ));

        let result = Validator::validate(&schema);
        assert!(!result.valid);
        assert!(result.has_code(ValidationCode::InvalidRequiredProperty));
        assert_eq!(result.errors[0].path, "types[0].required[1]");
    }

    #[test]
    fn test_duplicate_operation_ids_are_reported() {
        let mut schema = empty_schema();
        schema.endpoints.push(endpoint("e1", "listUsers", "/users"));
        schema
            .endpoints
            .push(endpoint("e2", "listUsers", "/users/{id}"));

        let result = Validator::validate(&schema);
        assert!(!result.valid);
        assert!(result.has_code(ValidationCode::DuplicateOperationId));
    }

    #[test]
    fn test_dangling_auth_reference_is_reported() {
        let mut schema = empty_schema();
        let mut ep = endpoint("e1", "listUsers", "/users");
        ep.authentication.push("bearer".to_string());
        schema.endpoints.push(ep);

        let result = Validator::validate(&schema);
        assert!(!result.valid);
        assert!(result.has_code(ValidationCode::InvalidAuthReference));
    }

    #[test]
    fn test_semantic_errors_accumulate() {
        let mut schema = empty_schema();
        schema.types.push(object_type(
            "User",
            vec![property("profile", TypeReference::named("Profile"))],
            vec!["email"],
        ));
        schema.endpoints.push(endpoint("e1", "listUsers", "/users"));
        schema
            .endpoints
            .push(endpoint("e2", "listUsers", "/users/{id}"));

        let result = Validator::validate(&schema);
        assert_eq!(result.errors.len(), 3);
    }

    #[test]
    fn test_structural_errors_short_circuit_semantic_checks() {
        let mut schema = empty_schema();
        // Duplicate type id (structural) plus a dangling reference (semantic):
        // only the structural error may surface.
        schema.types.push(object_type("User", vec![], vec![]));
        schema.types.push(object_type(
            "User",
            vec![property("profile", TypeReference::named("Profile"))],
            vec![],
        ));

        let result = Validator::validate(&schema);
        assert!(!result.valid);
        assert!(result.has_code(ValidationCode::DuplicateTypeId));
        assert!(!result.has_code(ValidationCode::InvalidTypeReference));
    }

    #[test]
    fn test_discriminator_mapping_must_target_variants() {
        let mut schema = empty_schema();
        schema.types.push(object_type("Text", vec![], vec![]));
        schema.types.push(object_type("Image", vec![], vec![]));

        let mut mapping = indexmap::IndexMap::new();
        mapping.insert("text".to_string(), "Text".to_string());
        mapping.insert("audio".to_string(), "Audio".to_string());

        schema.types.push(TypeDefinition {
            id: "ContentBlock".to_string(),
            name: "ContentBlock".to_string(),
            kind: TypeKind::Union {
                variants: vec![TypeReference::named("Text"), TypeReference::named("Image")],
                discriminator: Some(UnionDiscriminator {
                    property_name: "type".to_string(),
                    mapping,
                }),
            },
            description: None,
            deprecated: None,
        });

        let result = Validator::validate(&schema);
        assert!(!result.valid);
        assert!(result.has_code(ValidationCode::UnknownDiscriminatorVariant));
    }

    #[test]
    fn test_assert_valid_lists_all_errors() {
        let mut schema = empty_schema();
        schema.endpoints.push(endpoint("e1", "listUsers", "/users"));
        schema
            .endpoints
            .push(endpoint("e2", "listUsers", "/users/{id}"));

        let err = Validator::assert_valid(&schema).unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("duplicate_operation_id"));
        assert!(rendered.contains("endpoints[1].operationId"));
    }
}
