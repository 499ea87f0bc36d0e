//! TypeScript type system mapper
//!
//! Objects render as interfaces, enums as string enums, unions as native
//! union types (discriminated when the IR carries a discriminator).
//! Optionality uses `?`, nullability uses `| null`; each is applied exactly
//! once. Constraints become generated runtime guard functions since the
//! language has no declarative validation.

use crate::naming::{Case, NamingConvention};
use crate::{named_reference_ids, resolve, LanguageMapper, MappedType};
use llm_sdk_generator_common::{
    CanonicalSchema, Constraints, PrimitiveType, PropertyDefinition, ReferenceTarget, Result,
    TargetLanguage, TypeDefinition, TypeKind, TypeReference,
};

pub struct TypeScriptMapper {
    naming: NamingConvention,
}

impl TypeScriptMapper {
    pub fn new() -> Self {
        Self {
            naming: NamingConvention {
                type_case: Case::Pascal,
                property_case: Case::Camel,
                method_case: Case::Camel,
                constant_case: Case::ScreamingSnake,
                enum_member_case: Case::Pascal,
                package_case: Case::Kebab,
            },
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

        if let Some(description) = &definition.description {
            code.push_str(&format!("/** {} */\n", description));
        }
        code.push_str(&format!("export interface {} {{\n", name));

        let mut guards = Vec::new();
        for property in properties {
            // The discriminator field keeps its wire spelling so instances
            // round-trip; everything else follows the naming convention.
            let property_name = if discriminator == Some(property.name.as_str()) {
                property.name.clone()
            } else {
                self.naming.property_name(&property.name)
            };
            let marker = if property.required { "" } else { "?" };
            let rendered = self.map_type_reference(schema, &property.type_ref)?;

            if let Some(description) = &property.description {
                code.push_str(&format!("  /** {} */\n", description));
            }
            if property.deprecated {
                code.push_str("  /** @deprecated */\n");
            }
            code.push_str(&format!("  {}{}: {};\n", property_name, marker, rendered));

            if let Some(constraints) = &property.constraints {
                let expr = format!("value.{}", property_name);
                let body = self.map_constraints(constraints, &expr);
                if !body.is_empty() {
                    guards.push(format!("  if ({} != null) {{\n", expr));
                    for guard in body {
                        guards.push(format!("    {}\n", guard));
                    }
                    guards.push("  }\n".to_string());
                }
            }
        }
        code.push_str("}\n");

        if !guards.is_empty() {
            code.push('\n');
            code.push_str(&format!("export function validate{}(value: {}): void {{\n", name, name));
            for line in guards {
                code.push_str(&line);
            }
            code.push_str("}\n");
        }

        Ok(MappedType {
            imports: self.imports_for(schema, definition, &name)?,
            dependencies: vec![],
            name,
            code,
        })
    }

    /// Relative import lines for every named type this declaration touches
    fn imports_for(
        &self,
        schema: &CanonicalSchema,
        definition: &TypeDefinition,
        self_name: &str,
    ) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for type_id in named_reference_ids(&definition.kind) {
            let name = self.naming.type_name(&resolve(schema, type_id)?.name);
            if name != self_name && !names.contains(&name) {
                names.push(name);
            }
        }
        Ok(names
            .into_iter()
            .map(|name| {
                format!(
                    "import {{ {} }} from \"./{}\";",
                    name,
                    self.type_file_name(&name)
                )
            })
            .collect())
    }
}

impl Default for TypeScriptMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageMapper for TypeScriptMapper {
    fn language(&self) -> TargetLanguage {
        TargetLanguage::TypeScript
    }

    fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    fn file_extension(&self) -> &'static str {
        "ts"
    }

    fn type_file_name(&self, type_name: &str) -> String {
        crate::naming::to_kebab_case(type_name)
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
                if let Some(description) = &definition.description {
                    code.push_str(&format!("/** {} */\n", description));
                }
                code.push_str(&format!("export enum {} {{\n", name));
                for value in values {
                    code.push_str(&format!(
                        "  {} = \"{}\",\n",
                        self.naming.enum_member_name(&value.display_name),
                        value.value
                    ));
                }
                code.push_str("}\n");
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
            } => {
                let name = self.naming.type_name(&definition.name);
                let rendered: Vec<String> = variants
                    .iter()
                    .map(|variant| self.map_type_reference(schema, variant))
                    .collect::<Result<_>>()?;
                let mut code = String::new();
                if let Some(discriminator) = discriminator {
                    code.push_str(&format!(
                        "/** Discriminated on `{}`. */\n",
                        discriminator.property_name
                    ));
                }
                code.push_str(&format!("export type {} = {};\n", name, rendered.join(" | ")));
                Ok(MappedType {
                    imports: self.imports_for(schema, definition, &name)?,
                    dependencies: vec![],
                    name,
                    code,
                })
            }

            TypeKind::Array { items, .. } => {
                let name = self.naming.type_name(&definition.name);
                let item = self.map_type_reference(schema, items)?;
                let rendered = if item.contains(' ') {
                    format!("Array<{}>", item)
                } else {
                    format!("{}[]", item)
                };
                Ok(MappedType {
                    imports: self.imports_for(schema, definition, &name)?,
                    dependencies: vec![],
                    code: format!("export type {} = {};\n", name, rendered),
                    name,
                })
            }

            TypeKind::Map { values } => {
                let name = self.naming.type_name(&definition.name);
                let value = self.map_type_reference(schema, values)?;
                Ok(MappedType {
                    imports: self.imports_for(schema, definition, &name)?,
                    dependencies: vec![],
                    code: format!("export type {} = Record<string, {}>;\n", name, value),
                    name,
                })
            }

            TypeKind::Primitive {
                primitive,
                constraints,
            } => {
                let name = self.naming.type_name(&definition.name);
                let mut code = format!("export type {} = {};\n", name, primitive_name(*primitive));
                if let Some(constraints) = constraints {
                    let guards = self.map_constraints(constraints, "value");
                    if !guards.is_empty() {
                        code.push('\n');
                        code.push_str(&format!(
                            "export function validate{}(value: {}): void {{\n",
                            name, name
                        ));
                        for guard in guards {
                            code.push_str(&format!("  {}\n", guard));
                        }
                        code.push_str("}\n");
                    }
                }
                Ok(MappedType {
                    name,
                    code,
                    imports: vec![],
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
                self.naming.type_name(&resolve(schema, type_id)?.name)
            }
        };
        if reference.nullable {
            Ok(format!("{} | null", base))
        } else {
            Ok(base)
        }
    }

    fn map_constraints(&self, constraints: &Constraints, expr: &str) -> Vec<String> {
        let mut guards = Vec::new();
        if let Some(minimum) = constraints.minimum {
            guards.push(format!(
                "if ({expr} < {minimum}) {{ throw new RangeError(\"{expr} must be >= {minimum}\"); }}"
            ));
        }
        if let Some(maximum) = constraints.maximum {
            guards.push(format!(
                "if ({expr} > {maximum}) {{ throw new RangeError(\"{expr} must be <= {maximum}\"); }}"
            ));
        }
        if let Some(min_length) = constraints.min_length {
            guards.push(format!(
                "if ({expr}.length < {min_length}) {{ throw new RangeError(\"{expr} is too short\"); }}"
            ));
        }
        if let Some(max_length) = constraints.max_length {
            guards.push(format!(
                "if ({expr}.length > {max_length}) {{ throw new RangeError(\"{expr} is too long\"); }}"
            ));
        }
        if let Some(pattern) = &constraints.pattern {
            guards.push(format!(
                "if (!new RegExp({:?}).test({expr})) {{ throw new RangeError(\"{expr} has an invalid format\"); }}",
                pattern
            ));
        }
        if let Some(values) = &constraints.enum_values {
            let literals: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            guards.push(format!(
                "if (![{}].includes({expr} as never)) {{ throw new RangeError(\"{expr} is not an allowed value\"); }}",
                literals.join(", ")
            ));
        }
        guards
    }
}

fn primitive_name(primitive: PrimitiveType) -> &'static str {
    match primitive {
        PrimitiveType::String => "string",
        PrimitiveType::Integer | PrimitiveType::Float => "number",
        PrimitiveType::Boolean => "boolean",
        PrimitiveType::Null => "null",
        PrimitiveType::Any => "unknown",
        PrimitiveType::Binary => "Uint8Array",
    }
}
