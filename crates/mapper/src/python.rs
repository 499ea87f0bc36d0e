//! Python type system mapper
//!
//! Objects render as dataclasses with constraint guards in `__post_init__`,
//! enums as `str`-backed `Enum` classes, unions as `Union[...]` aliases.
//! Optionality and nullability both render as `Optional[...]`, applied
//! exactly once even when a property is optional and its reference nullable.

use crate::naming::{Case, NamingConvention};
use crate::{named_reference_ids, resolve, LanguageMapper, MappedType};
use llm_sdk_generator_common::{
    CanonicalSchema, Constraints, PrimitiveType, PropertyDefinition, ReferenceTarget, Result,
    TargetLanguage, TypeDefinition, TypeKind, TypeReference,
};

const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "None", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

pub struct PythonMapper {
    naming: NamingConvention,
}

impl PythonMapper {
    pub fn new() -> Self {
        Self {
            naming: NamingConvention {
                type_case: Case::Pascal,
                property_case: Case::Snake,
                method_case: Case::Snake,
                constant_case: Case::ScreamingSnake,
                enum_member_case: Case::ScreamingSnake,
                package_case: Case::Snake,
            },
        }
    }

    /// Property name with keyword collisions escaped ("from" → "from_")
    fn field_name(&self, name: &str) -> String {
        let name = self.naming.property_name(name);
        if KEYWORDS.contains(&name.as_str()) {
            format!("{}_", name)
        } else {
            name
        }
    }

    fn render_object(
        &self,
        schema: &CanonicalSchema,
        definition: &TypeDefinition,
        properties: &[PropertyDefinition],
        discriminator: Option<&str>,
    ) -> Result<MappedType> {
        let name = self.naming.type_name(&definition.name);
        let mut code = String::new();
        code.push_str("@dataclass\n");
        code.push_str(&format!("class {}:\n", name));
        if let Some(description) = &definition.description {
            code.push_str(&format!("    \"\"\"{}\"\"\"\n\n", description));
        }

        // Dataclass ordering: fields without defaults must precede fields
        // with defaults, so required properties render first.
        let (required, optional): (Vec<_>, Vec<_>) =
            properties.iter().partition(|p| p.required);
        let mut needs_optional_import = false;
        let mut guards = Vec::new();

        if required.is_empty() && optional.is_empty() {
            code.push_str("    pass\n");
        }

        for property in required.iter().chain(optional.iter()) {
            let field = if discriminator == Some(property.name.as_str()) {
                // Keep the wire spelling of the discriminator field.
                property.name.clone()
            } else {
                self.field_name(&property.name)
            };
            let mut annotation = self.map_type_reference(schema, &property.type_ref)?;
            if !property.required {
                if !property.type_ref.nullable {
                    annotation = format!("Optional[{}]", annotation);
                }
                needs_optional_import = true;
                code.push_str(&format!("    {}: {} = None\n", field, annotation));
            } else {
                code.push_str(&format!("    {}: {}\n", field, annotation));
            }

            if let Some(constraints) = &property.constraints {
                let expr = format!("self.{}", field);
                let body = self.map_constraints(constraints, &expr);
                if !body.is_empty() {
                    guards.push(format!("        if {} is not None:\n", expr));
                    for guard in body {
                        guards.push(format!("            {}\n", guard));
                    }
                }
            }
            if property.type_ref.nullable {
                needs_optional_import = true;
            }
        }

        if !guards.is_empty() {
            code.push('\n');
            code.push_str("    def __post_init__(self) -> None:\n");
            for line in &guards {
                code.push_str(line);
            }
        }

        let mut imports = vec!["from dataclasses import dataclass".to_string()];
        if guards.iter().any(|g| g.contains("re.match")) {
            imports.push("import re".to_string());
        }
        if needs_optional_import {
            imports.push("from typing import Optional".to_string());
        }
        imports.extend(self.relative_imports(schema, definition, &name)?);

        Ok(MappedType {
            name,
            code,
            imports,
            dependencies: vec![],
        })
    }

    fn relative_imports(
        &self,
        schema: &CanonicalSchema,
        definition: &TypeDefinition,
        self_name: &str,
    ) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        for type_id in named_reference_ids(&definition.kind) {
            let name = self.naming.type_name(&resolve(schema, type_id)?.name);
            if name == self_name {
                continue;
            }
            let line = format!("from .{} import {}", self.type_file_name(&name), name);
            if !lines.contains(&line) {
                lines.push(line);
            }
        }
        Ok(lines)
    }
}

impl Default for PythonMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageMapper for PythonMapper {
    fn language(&self) -> TargetLanguage {
        TargetLanguage::Python
    }

    fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    fn file_extension(&self) -> &'static str {
        "py"
    }

    fn type_file_name(&self, type_name: &str) -> String {
        crate::naming::to_snake_case(type_name)
    }

    fn map_type(&self, schema: &CanonicalSchema, definition: &TypeDefinition) -> Result<MappedType> {
        match &definition.kind {
            TypeKind::Object {
                properties,
                discriminator,
                ..
            } => self.render_object(schema, definition, properties, discriminator.as_deref()),

            TypeKind::Enum { values } => {
                let name = self.naming.type_name(&definition.name);
                let mut code = String::new();
                code.push_str(&format!("class {}(str, Enum):\n", name));
                if let Some(description) = &definition.description {
                    code.push_str(&format!("    \"\"\"{}\"\"\"\n\n", description));
                }
                for value in values {
                    code.push_str(&format!(
                        "    {} = \"{}\"\n",
                        self.naming.enum_member_name(&value.display_name),
                        value.value
                    ));
                }
                Ok(MappedType {
                    name,
                    code,
                    imports: vec!["from enum import Enum".to_string()],
                    dependencies: vec![],
                })
            }

            TypeKind::Union {
                variants,
                discriminator,
            } => {
                let name = self.naming.type_name(&definition.name);
                let rendered: Vec<String> = variants
                    .iter()
                    .map(|variant| self.map_type_reference(schema, variant))
                    .collect::<Result<_>>()?;
                let mut code = String::new();
                if let Some(discriminator) = discriminator {
                    code.push_str(&format!(
                        "# Discriminated on \"{}\".\n",
                        discriminator.property_name
                    ));
                }
                code.push_str(&format!("{} = Union[{}]\n", name, rendered.join(", ")));
                let mut imports = vec!["from typing import Union".to_string()];
                imports.extend(self.relative_imports(schema, definition, &name)?);
                Ok(MappedType {
                    name,
                    code,
                    imports,
                    dependencies: vec![],
                })
            }

            TypeKind::Array { items, .. } => {
                let name = self.naming.type_name(&definition.name);
                let item = self.map_type_reference(schema, items)?;
                let mut imports = vec!["from typing import List".to_string()];
                imports.extend(self.relative_imports(schema, definition, &name)?);
                Ok(MappedType {
                    code: format!("{} = List[{}]\n", name, item),
                    name,
                    imports,
                    dependencies: vec![],
                })
            }

            TypeKind::Map { values } => {
                let name = self.naming.type_name(&definition.name);
                let value = self.map_type_reference(schema, values)?;
                let mut imports = vec!["from typing import Dict".to_string()];
                imports.extend(self.relative_imports(schema, definition, &name)?);
                Ok(MappedType {
                    code: format!("{} = Dict[str, {}]\n", name, value),
                    name,
                    imports,
                    dependencies: vec![],
                })
            }

            TypeKind::Primitive { primitive, .. } => {
                let name = self.naming.type_name(&definition.name);
                Ok(MappedType {
                    code: format!("{} = {}\n", name, primitive_name(*primitive)),
                    name,
                    imports: if *primitive == PrimitiveType::Any {
                        vec!["from typing import Any".to_string()]
                    } else {
                        vec![]
                    },
                    dependencies: vec![],
                })
            }
        }
    }

    fn map_type_reference(
        &self,
        schema: &CanonicalSchema,
        reference: &TypeReference,
    ) -> Result<String> {
        let base = match &reference.target {
            ReferenceTarget::Primitive(primitive) => primitive_name(*primitive).to_string(),
            ReferenceTarget::TypeId(type_id) => {
                format!("\"{}\"", self.naming.type_name(&resolve(schema, type_id)?.name))
            }
        };
        if reference.nullable {
            Ok(format!("Optional[{}]", base))
        } else {
            Ok(base)
        }
    }

    fn map_constraints(&self, constraints: &Constraints, expr: &str) -> Vec<String> {
        let mut guards = Vec::new();
        if let Some(minimum) = constraints.minimum {
            guards.push(format!(
                "if {expr} < {minimum}: raise ValueError(\"{expr} must be >= {minimum}\")"
            ));
        }
        if let Some(maximum) = constraints.maximum {
            guards.push(format!(
                "if {expr} > {maximum}: raise ValueError(\"{expr} must be <= {maximum}\")"
            ));
        }
        if let Some(min_length) = constraints.min_length {
            guards.push(format!(
                "if len({expr}) < {min_length}: raise ValueError(\"{expr} is too short\")"
            ));
        }
        if let Some(max_length) = constraints.max_length {
            guards.push(format!(
                "if len({expr}) > {max_length}: raise ValueError(\"{expr} is too long\")"
            ));
        }
        if let Some(pattern) = &constraints.pattern {
            guards.push(format!(
                "if not re.match({:?}, {expr}): raise ValueError(\"{expr} has an invalid format\")",
                pattern
            ));
        }
        if let Some(values) = &constraints.enum_values {
            let literals: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            guards.push(format!(
                "if {expr} not in ({},): raise ValueError(\"{expr} is not an allowed value\")",
                literals.join(", ")
            ));
        }
        guards
    }
}

fn primitive_name(primitive: PrimitiveType) -> &'static str {
    match primitive {
        PrimitiveType::String => "str",
        PrimitiveType::Integer => "int",
        PrimitiveType::Float => "float",
        PrimitiveType::Boolean => "bool",
        PrimitiveType::Null => "None",
        PrimitiveType::Any => "Any",
        PrimitiveType::Binary => "bytes",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_sdk_generator_common::{EnumValue, ProviderCapabilities, SchemaMetadata};

    fn schema_with(types: Vec<TypeDefinition>) -> CanonicalSchema {
        CanonicalSchema {
            metadata: SchemaMetadata {
                provider_id: "test".into(),
                provider_name: "Test".into(),
                schema_version: "v1".into(),
                generated_at: chrono::DateTime::from_timestamp(0, 0).unwrap(),
            },
            capabilities: ProviderCapabilities::default(),
            types,
            endpoints: vec![],
            authentication: vec![],
            errors: vec![],
            config: None,
        }
    }

    fn property(name: &str, type_ref: TypeReference, required: bool) -> PropertyDefinition {
        PropertyDefinition {
            name: name.into(),
            type_ref,
            required,
            default: None,
            constraints: None,
            deprecated: false,
            description: None,
        }
    }

    #[test]
    fn test_optional_fields_follow_required_fields() {
        let schema = schema_with(vec![TypeDefinition {
            id: "User".into(),
            name: "User".into(),
            kind: TypeKind::Object {
                properties: vec![
                    property("bio", TypeReference::primitive(PrimitiveType::String), false),
                    property("id", TypeReference::primitive(PrimitiveType::String), true),
                ],
                required: vec!["id".into()],
                additional_properties: None,
                discriminator: None,
            },
            description: None,
            deprecated: None,
        }]);

        let mapper = PythonMapper::new();
        let mapped = mapper.map_type(&schema, &schema.types[0]).unwrap();

        let id_at = mapped.code.find("    id: str\n").unwrap();
        let bio_at = mapped.code.find("    bio: Optional[str] = None\n").unwrap();
        assert!(id_at < bio_at, "required field must precede defaulted field");
        assert!(mapped.imports.contains(&"from typing import Optional".to_string()));
    }

    #[test]
    fn test_optional_nullable_wraps_once() {
        let schema = schema_with(vec![TypeDefinition {
            id: "User".into(),
            name: "User".into(),
            kind: TypeKind::Object {
                properties: vec![property(
                    "bio",
                    TypeReference::primitive(PrimitiveType::String).nullable(),
                    false,
                )],
                required: vec![],
                additional_properties: None,
                discriminator: None,
            },
            description: None,
            deprecated: None,
        }]);

        let mapper = PythonMapper::new();
        let mapped = mapper.map_type(&schema, &schema.types[0]).unwrap();
        assert!(mapped.code.contains("bio: Optional[str] = None"));
        assert!(!mapped.code.contains("Optional[Optional"));
    }

    #[test]
    fn test_keyword_property_is_escaped() {
        let mapper = PythonMapper::new();
        assert_eq!(mapper.field_name("from"), "from_");
        assert_eq!(mapper.field_name("model"), "model");
    }

    #[test]
    fn test_enum_members_scream() {
        let schema = schema_with(vec![TypeDefinition {
            id: "StopReason".into(),
            name: "stop_reason".into(),
            kind: TypeKind::Enum {
                values: vec![EnumValue {
                    value: "end_turn".into(),
                    display_name: "end_turn".into(),
                }],
            },
            description: None,
            deprecated: None,
        }]);

        let mapper = PythonMapper::new();
        let mapped = mapper.map_type(&schema, &schema.types[0]).unwrap();
        assert!(mapped.code.contains("class StopReason(str, Enum):"));
        assert!(mapped.code.contains("    END_TURN = \"end_turn\"\n"));
    }

    #[test]
    fn test_constraint_guards_render_in_post_init() {
        let schema = schema_with(vec![TypeDefinition {
            id: "Request".into(),
            name: "Request".into(),
            kind: TypeKind::Object {
                properties: vec![PropertyDefinition {
                    name: "temperature".into(),
                    type_ref: TypeReference::primitive(PrimitiveType::Float),
                    required: false,
                    default: None,
                    constraints: Some(Constraints {
                        minimum: Some(0.0),
                        maximum: Some(2.0),
                        ..Default::default()
                    }),
                    deprecated: false,
                    description: None,
                }],
                required: vec![],
                additional_properties: None,
                discriminator: None,
            },
            description: None,
            deprecated: None,
        }]);

        let mapper = PythonMapper::new();
        let mapped = mapper.map_type(&schema, &schema.types[0]).unwrap();
        assert!(mapped.code.contains("def __post_init__(self) -> None:"));
        assert!(mapped.code.contains("if self.temperature is not None:"));
        assert!(mapped.code.contains("self.temperature < 0"));
    }
}
