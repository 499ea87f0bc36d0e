//! Go type system mapper
//!
//! Objects render as structs with json tags, enums as string types with a
//! validating wrapper (Go has no native enums with associated values),
//! unions as runtime-tagged wrappers that keep the raw payload so the
//! discriminator literal round-trips byte-for-byte. Optionality and
//! nullability render as a pointer, applied exactly once.

use crate::naming::{Case, NamingConvention};
use crate::{named_reference_ids, resolve, LanguageMapper, MappedType};
use llm_sdk_generator_common::{
    CanonicalSchema, Constraints, GeneratorError, PrimitiveType, PropertyDefinition,
    ReferenceTarget, Result, TargetLanguage, TypeDefinition, TypeKind, TypeReference,
    UnionDiscriminator,
};

pub struct GoMapper {
    naming: NamingConvention,
}

impl GoMapper {
    pub fn new() -> Self {
        Self {
            naming: NamingConvention {
                type_case: Case::Pascal,
                property_case: Case::Pascal,
                method_case: Case::Pascal,
                constant_case: Case::Pascal,
                enum_member_case: Case::Pascal,
                package_case: Case::Flat,
            },
        }
    }

    fn render_object(
        &self,
        schema: &CanonicalSchema,
        definition: &TypeDefinition,
        properties: &[PropertyDefinition],
    ) -> Result<MappedType> {
        let name = self.naming.type_name(&definition.name);
        let mut code = String::new();
        if let Some(description) = &definition.description {
            code.push_str(&format!("// {} {}\n", name, description));
        }
        code.push_str(&format!("type {} struct {{\n", name));

        let mut guards = Vec::new();
        for property in properties {
            let field = self.naming.property_name(&property.name);
            let optional = !property.required || property.type_ref.nullable;
            let mut rendered = self.base_reference(schema, &property.type_ref)?;
            if optional && needs_pointer(&property.type_ref) {
                rendered = format!("*{}", rendered);
            }
            let tag = if property.required {
                format!("`json:\"{}\"`", property.name)
            } else {
                format!("`json:\"{},omitempty\"`", property.name)
            };
            code.push_str(&format!("\t{} {} {}\n", field, rendered, tag));

            if let Some(constraints) = &property.constraints {
                let expr = if optional && needs_pointer(&property.type_ref) {
                    format!("*v.{}", field)
                } else {
                    format!("v.{}", field)
                };
                let body = self.map_constraints(constraints, &expr);
                if !body.is_empty() {
                    if optional && needs_pointer(&property.type_ref) {
                        guards.push(format!("\tif v.{} != nil {{\n", field));
                        for guard in body {
                            guards.push(format!("\t{}\n", guard));
                        }
                        guards.push("\t}\n".to_string());
                    } else {
                        for guard in body {
                            guards.push(format!("{}\n", guard));
                        }
                    }
                }
            }
        }
        code.push_str("}\n");

        let mut imports = vec![];
        if !guards.is_empty() {
            code.push('\n');
            code.push_str(&format!("func (v {}) Validate() error {{\n", name));
            for line in &guards {
                code.push_str(line);
            }
            code.push_str("\treturn nil\n}\n");
            imports.push("fmt".to_string());
            if guards.iter().any(|g| g.contains("regexp.")) {
                imports.push("regexp".to_string());
            }
        }

        Ok(MappedType {
            name,
            code,
            imports,
            dependencies: vec![],
        })
    }

    fn render_union(
        &self,
        schema: &CanonicalSchema,
        definition: &TypeDefinition,
        variants: &[TypeReference],
        discriminator: Option<&UnionDiscriminator>,
    ) -> Result<MappedType> {
        let name = self.naming.type_name(&definition.name);

        // A tagged wrapper needs named variants to unmarshal into.
        for variant in variants {
            if variant.type_id().is_none() {
                tracing::warn!(union = definition.name.as_str(), "primitive union variant");
                return Err(GeneratorError::Unsupported(format!(
                    "union '{}' has a primitive variant, which Go cannot represent as a tagged wrapper",
                    definition.name
                )));
            }
        }

        let mut code = String::new();
        match discriminator {
            Some(discriminator) => {
                code.push_str(&format!(
                    "// {} is a tagged union discriminated on \"{}\".\n",
                    name, discriminator.property_name
                ));
                code.push_str(&format!("type {} struct {{\n\tKind string\n\traw  json.RawMessage\n}}\n\n", name));

                code.push_str(&format!("func (u *{}) UnmarshalJSON(data []byte) error {{\n", name));
                code.push_str(&format!(
                    "\tvar head struct {{\n\t\tKind string `json:\"{}\"`\n\t}}\n",
                    discriminator.property_name
                ));
                code.push_str("\tif err := json.Unmarshal(data, &head); err != nil {\n\t\treturn err\n\t}\n");
                code.push_str("\tu.Kind = head.Kind\n\tu.raw = append(u.raw[:0], data...)\n\treturn nil\n}\n\n");

                code.push_str(&format!(
                    "func (u {}) MarshalJSON() ([]byte, error) {{\n\treturn u.raw, nil\n}}\n",
                    name
                ));

                for (literal, target) in &discriminator.mapping {
                    let variant_name = self.naming.type_name(&resolve(schema, target)?.name);
                    code.push('\n');
                    code.push_str(&format!(
                        "func (u {}) As{}() (*{}, bool) {{\n",
                        name, variant_name, variant_name
                    ));
                    code.push_str(&format!("\tif u.Kind != \"{}\" {{\n\t\treturn nil, false\n\t}}\n", literal));
                    code.push_str(&format!("\tvar out {}\n", variant_name));
                    code.push_str("\tif err := json.Unmarshal(u.raw, &out); err != nil {\n\t\treturn nil, false\n\t}\n");
                    code.push_str("\treturn &out, true\n}\n");
                }
            }
            None => {
                code.push_str(&format!("// {} holds one of its variants as raw JSON.\n", name));
                code.push_str(&format!("type {} struct {{\n\traw json.RawMessage\n}}\n\n", name));
                code.push_str(&format!(
                    "func (u *{}) UnmarshalJSON(data []byte) error {{\n\tu.raw = append(u.raw[:0], data...)\n\treturn nil\n}}\n\n",
                    name
                ));
                code.push_str(&format!(
                    "func (u {}) MarshalJSON() ([]byte, error) {{\n\treturn u.raw, nil\n}}\n",
                    name
                ));
                for variant in variants {
                    let Some(type_id) = variant.type_id() else {
                        continue;
                    };
                    let variant_name = self.naming.type_name(&resolve(schema, type_id)?.name);
                    code.push('\n');
                    code.push_str(&format!(
                        "func (u {}) As{}() (*{}, error) {{\n\tvar out {}\n\tif err := json.Unmarshal(u.raw, &out); err != nil {{\n\t\treturn nil, err\n\t}}\n\treturn &out, nil\n}}\n",
                        name, variant_name, variant_name, variant_name
                    ));
                }
            }
        }

        Ok(MappedType {
            name,
            code,
            imports: vec!["encoding/json".to_string()],
            dependencies: vec![],
        })
    }
}

impl Default for GoMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageMapper for GoMapper {
    fn language(&self) -> TargetLanguage {
        TargetLanguage::Go
    }

    fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    fn file_extension(&self) -> &'static str {
        "go"
    }

    fn type_file_name(&self, type_name: &str) -> String {
        crate::naming::to_snake_case(type_name)
    }

    fn map_type(&self, schema: &CanonicalSchema, definition: &TypeDefinition) -> Result<MappedType> {
        // References within one generated package need no imports in Go, but
        // they must still resolve.
        for type_id in named_reference_ids(&definition.kind) {
            resolve(schema, type_id)?;
        }

        match &definition.kind {
            TypeKind::Object { properties, .. } => {
                self.render_object(schema, definition, properties)
            }

            TypeKind::Enum { values } => {
                let name = self.naming.type_name(&definition.name);
                let mut code = String::new();
                if let Some(description) = &definition.description {
                    code.push_str(&format!("// {} {}\n", name, description));
                }
                code.push_str(&format!("type {} string\n\nconst (\n", name));
                let mut members = Vec::new();
                for value in values {
                    let member = format!("{}{}", name, self.naming.enum_member_name(&value.display_name));
                    code.push_str(&format!("\t{} {} = \"{}\"\n", member, name, value.value));
                    members.push(member);
                }
                code.push_str(")\n\n");
                code.push_str(&format!("// Valid reports whether v is a known {}.\n", name));
                code.push_str(&format!("func (v {}) Valid() bool {{\n\tswitch v {{\n\tcase {}:\n\t\treturn true\n\t}}\n\treturn false\n}}\n", name, members.join(", ")));
                Ok(MappedType {
                    name,
                    code,
                    imports: vec![],
                    dependencies: vec![],
                })
            }

            TypeKind::Union {
                variants,
                discriminator,
            } => self.render_union(schema, definition, variants, discriminator.as_ref()),

            TypeKind::Array { items, .. } => {
                let name = self.naming.type_name(&definition.name);
                let item = self.base_reference(schema, items)?;
                Ok(MappedType {
                    code: format!("type {} []{}\n", name, item),
                    name,
                    imports: vec![],
                    dependencies: vec![],
                })
            }

            TypeKind::Map { values } => {
                let name = self.naming.type_name(&definition.name);
                let value = self.base_reference(schema, values)?;
                Ok(MappedType {
                    code: format!("type {} map[string]{}\n", name, value),
                    name,
                    imports: vec![],
                    dependencies: vec![],
                })
            }

            TypeKind::Primitive {
                primitive,
                constraints,
            } => {
                let name = self.naming.type_name(&definition.name);
                let mut code = format!("type {} {}\n", name, primitive_name(*primitive));
                let mut imports = vec![];
                if let Some(constraints) = constraints {
                    let guards = self.map_constraints(constraints, &format!("{}(v)", primitive_name(*primitive)));
                    if !guards.is_empty() {
                        code.push('\n');
                        code.push_str(&format!("func (v {}) Validate() error {{\n", name));
                        for guard in &guards {
                            code.push_str(guard);
                            code.push('\n');
                        }
                        code.push_str("\treturn nil\n}\n");
                        imports.push("fmt".to_string());
                        if guards.iter().any(|g| g.contains("regexp.")) {
                            imports.push("regexp".to_string());
                        }
                    }
                }
                Ok(MappedType {
                    name,
                    code,
                    imports,
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
        let base = self.base_reference(schema, reference)?;
        if reference.nullable && needs_pointer(reference) {
            Ok(format!("*{}", base))
        } else {
            Ok(base)
        }
    }

    fn map_constraints(&self, constraints: &Constraints, expr: &str) -> Vec<String> {
        let mut guards = Vec::new();
        if let Some(minimum) = constraints.minimum {
            guards.push(format!(
                "\tif {expr} < {minimum} {{\n\t\treturn fmt.Errorf(\"{expr} must be >= {minimum}\")\n\t}}"
            ));
        }
        if let Some(maximum) = constraints.maximum {
            guards.push(format!(
                "\tif {expr} > {maximum} {{\n\t\treturn fmt.Errorf(\"{expr} must be <= {maximum}\")\n\t}}"
            ));
        }
        if let Some(min_length) = constraints.min_length {
            guards.push(format!(
                "\tif len({expr}) < {min_length} {{\n\t\treturn fmt.Errorf(\"{expr} is too short\")\n\t}}"
            ));
        }
        if let Some(max_length) = constraints.max_length {
            guards.push(format!(
                "\tif len({expr}) > {max_length} {{\n\t\treturn fmt.Errorf(\"{expr} is too long\")\n\t}}"
            ));
        }
        if let Some(pattern) = &constraints.pattern {
            guards.push(format!(
                "\tif !regexp.MustCompile({:?}).MatchString({expr}) {{\n\t\treturn fmt.Errorf(\"{expr} has an invalid format\")\n\t}}",
                pattern
            ));
        }
        guards
    }
}

impl GoMapper {
    /// Reference without the pointer wrapper; pointer application happens at
    /// the property/reference site exactly once
    fn base_reference(&self, schema: &CanonicalSchema, reference: &TypeReference) -> Result<String> {
        Ok(match &reference.target {
            ReferenceTarget::Primitive(primitive) => primitive_name(*primitive).to_string(),
            ReferenceTarget::TypeId(type_id) => {
                self.naming.type_name(&resolve(schema, type_id)?.name)
            }
        })
    }
}

/// Slices, maps and `any` are already nilable; wrapping them in a pointer
/// would double-encode absence
fn needs_pointer(reference: &TypeReference) -> bool {
    !matches!(
        reference.target,
        ReferenceTarget::Primitive(PrimitiveType::Any)
            | ReferenceTarget::Primitive(PrimitiveType::Binary)
            | ReferenceTarget::Primitive(PrimitiveType::Null)
    )
}

fn primitive_name(primitive: PrimitiveType) -> &'static str {
    match primitive {
        PrimitiveType::String => "string",
        PrimitiveType::Integer => "int64",
        PrimitiveType::Float => "float64",
        PrimitiveType::Boolean => "bool",
        PrimitiveType::Null => "any",
        PrimitiveType::Any => "any",
        PrimitiveType::Binary => "[]byte",
    }
}
