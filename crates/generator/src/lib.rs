//! Code generation engine for LLM client SDKs
//!
//! Drives template-based generation from a validated `CanonicalSchema` in a
//! fixed stage order: type declarations, the error hierarchy, one auth
//! handler per scheme, resource modules grouped by leading path segment, the
//! top-level client, then feature-gated utilities. The engine only produces
//! in-memory `GeneratedFile` records; writing them anywhere is the caller's
//! concern.

mod context;
mod templates;

pub use context::{
    resource_group, AuthContext, ErrorContext, MethodContext, ResourceContext, TypeImport,
};

use llm_sdk_generator_common::{
    CanonicalSchema, GenerationConfig, GeneratorError, Result, TargetLanguage, Validator,
};
use llm_sdk_generator_mapper::{mapper_for, LanguageMapper};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tera::Tera;
use tracing::debug;

/// What a generated file is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Source,
    Test,
    Config,
    Doc,
}

/// One generated file, never written by the engine itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
    pub kind: FileKind,
}

/// Build-surface description of the generated package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageMetadata {
    pub package_name: String,
    pub version: String,
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
    pub scripts: IndexMap<String, String>,
}

/// Everything one generation run produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPackage {
    pub files: Vec<GeneratedFile>,
    pub metadata: PackageMetadata,
}

impl GeneratedPackage {
    /// The generated file at a path, if any
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }
}

/// SDK generator for one (schema, target-language) pair
pub struct ClientGenerator<'a> {
    schema: &'a CanonicalSchema,
    config: GenerationConfig,
    mapper: Box<dyn LanguageMapper>,
    tera: Tera,
}

impl<'a> ClientGenerator<'a> {
    /// Create a generator; the schema must pass validation first
    pub fn new(schema: &'a CanonicalSchema, config: GenerationConfig) -> Result<Self> {
        Validator::assert_valid(schema)?;
        let mapper = mapper_for(config.language);
        let tera = templates::load_templates(config.language)?;
        Ok(Self {
            schema,
            config,
            mapper,
            tera,
        })
    }

    /// Generate the complete file set plus package metadata
    pub fn generate(&self) -> Result<GeneratedPackage> {
        let mut files = Vec::new();
        let mut dependencies = Vec::new();

        self.generate_types(&mut files, &mut dependencies)?;
        self.generate_errors(&mut files)?;
        self.generate_auth(&mut files)?;
        self.generate_transport(&mut files)?;

        let resources = context::build_resources(self.schema, self.mapper.as_ref())?;
        self.generate_resources(&resources, &mut files)?;
        self.generate_client(&resources, &mut files)?;
        self.generate_utilities(&mut files)?;
        self.generate_manifest(&mut files)?;

        let features = &self.config.features;
        if features.generate_docs {
            self.generate_readme(&resources, &mut files)?;
        }
        if features.generate_examples {
            self.generate_example(&resources, &mut files)?;
        }
        if features.generate_tests {
            self.generate_tests(&resources, &mut files)?;
        }

        debug!(
            language = %self.config.language,
            files = files.len(),
            "generation complete"
        );

        Ok(GeneratedPackage {
            files,
            metadata: self.metadata(dependencies),
        })
    }

    /// Base template context shared by every stage
    fn base_context(&self) -> tera::Context {
        let mut ctx = tera::Context::new();
        ctx.insert("package_name", &self.config.package.name);
        ctx.insert("package_version", &self.config.package.version);
        ctx.insert("author", &self.config.package.author);
        ctx.insert("license", &self.config.package.license);
        ctx.insert("provider_id", &self.schema.metadata.provider_id);
        ctx.insert("provider_name", &self.schema.metadata.provider_name);
        ctx.insert("schema_version", &self.schema.metadata.schema_version);
        ctx.insert("generated_at", &self.schema.metadata.generated_at.to_rfc3339());
        ctx.insert("options", &self.config.options);
        ctx.insert(
            "package_ident",
            &self.mapper.naming().package_name(&self.config.package.name),
        );
        ctx.insert(
            "module_path",
            &self
                .config
                .option_str("modulePath")
                .map(String::from)
                .unwrap_or_else(|| {
                    format!(
                        "example.com/{}",
                        self.mapper.naming().package_name(&self.config.package.name)
                    )
                }),
        );
        ctx
    }

    fn render(&self, template: &str, ctx: &tera::Context) -> Result<String> {
        self.tera
            .render(template, ctx)
            .map_err(|e| GeneratorError::Generation(format!("Template error in {}: {}", template, e)))
    }

    fn py_package(&self) -> String {
        self.mapper.naming().package_name(&self.config.package.name)
    }

    /// Stage 1: one declaration file per IR type
    fn generate_types(
        &self,
        files: &mut Vec<GeneratedFile>,
        dependencies: &mut Vec<String>,
    ) -> Result<()> {
        let mut init_entries = Vec::new();

        for definition in &self.schema.types {
            let mapped = self.mapper.map_type(self.schema, definition)?;
            for dependency in &mapped.dependencies {
                if !dependencies.contains(dependency) {
                    dependencies.push(dependency.clone());
                }
            }

            let file_name = self.mapper.type_file_name(&mapped.name);
            let mut ctx = self.base_context();
            ctx.insert("type_name", &mapped.name);
            ctx.insert("imports", &mapped.imports);
            ctx.insert("code", &mapped.code);

            let path = match self.config.language {
                TargetLanguage::TypeScript => format!("src/types/{}.ts", file_name),
                TargetLanguage::Python => format!("{}/models/{}.py", self.py_package(), file_name),
                TargetLanguage::Go => format!("model_{}.go", file_name),
            };
            files.push(GeneratedFile {
                path,
                content: self.render("type", &ctx)?,
                kind: FileKind::Source,
            });
            init_entries.push(InitEntry {
                module: file_name,
                symbol: mapped.name,
            });
        }

        if self.config.language == TargetLanguage::Python {
            files.push(self.python_init(&format!("{}/models/__init__.py", self.py_package()), &init_entries)?);
        }
        Ok(())
    }

    /// Stage 2: the error hierarchy module
    fn generate_errors(&self, files: &mut Vec<GeneratedFile>) -> Result<()> {
        let errors = context::build_errors(self.schema, self.mapper.as_ref());
        let mut ctx = self.base_context();
        ctx.insert("errors", &errors);

        let path = match self.config.language {
            TargetLanguage::TypeScript => "src/errors.ts".to_string(),
            TargetLanguage::Python => format!("{}/errors.py", self.py_package()),
            TargetLanguage::Go => "errors.go".to_string(),
        };
        files.push(GeneratedFile {
            path,
            content: self.render("errors", &ctx)?,
            kind: FileKind::Source,
        });
        Ok(())
    }

    /// Stage 3: one auth handler module per declared scheme
    fn generate_auth(&self, files: &mut Vec<GeneratedFile>) -> Result<()> {
        let schemes = context::build_auth(self.schema, self.mapper.as_ref());
        let mut init_entries = Vec::new();

        for scheme in &schemes {
            let mut ctx = self.base_context();
            ctx.insert("auth", scheme);

            let path = match self.config.language {
                TargetLanguage::TypeScript => format!("src/auth/{}.ts", scheme.file_name),
                TargetLanguage::Python => {
                    format!("{}/auth/{}.py", self.py_package(), scheme.file_name)
                }
                TargetLanguage::Go => format!("auth_{}.go", scheme.file_name),
            };
            files.push(GeneratedFile {
                path,
                content: self.render("auth", &ctx)?,
                kind: FileKind::Source,
            });
            init_entries.push(InitEntry {
                module: scheme.file_name.clone(),
                symbol: scheme.type_name.clone(),
            });
        }

        if self.config.language == TargetLanguage::Python && !init_entries.is_empty() {
            files.push(self.python_init(&format!("{}/auth/__init__.py", self.py_package()), &init_entries)?);
        }
        Ok(())
    }

    /// The transport seam resources and the client call through
    fn generate_transport(&self, files: &mut Vec<GeneratedFile>) -> Result<()> {
        let ctx = self.base_context();
        let path = match self.config.language {
            TargetLanguage::TypeScript => "src/transport.ts".to_string(),
            TargetLanguage::Python => format!("{}/transport.py", self.py_package()),
            TargetLanguage::Go => "transport.go".to_string(),
        };
        files.push(GeneratedFile {
            path,
            content: self.render("transport", &ctx)?,
            kind: FileKind::Source,
        });
        Ok(())
    }

    /// Stage 4: one resource module per path-segment group
    fn generate_resources(
        &self,
        resources: &[ResourceContext],
        files: &mut Vec<GeneratedFile>,
    ) -> Result<()> {
        let mut init_entries = Vec::new();

        for resource in resources {
            let mut ctx = self.base_context();
            ctx.insert("resource", resource);

            let path = match self.config.language {
                TargetLanguage::TypeScript => format!("src/resources/{}.ts", resource.file_name),
                TargetLanguage::Python => {
                    format!("{}/resources/{}.py", self.py_package(), resource.file_name)
                }
                TargetLanguage::Go => format!("resource_{}.go", resource.file_name),
            };
            files.push(GeneratedFile {
                path,
                content: self.render("resource", &ctx)?,
                kind: FileKind::Source,
            });
            init_entries.push(InitEntry {
                module: resource.file_name.clone(),
                symbol: resource.type_name.clone(),
            });
        }

        if self.config.language == TargetLanguage::Python && !init_entries.is_empty() {
            files.push(self.python_init(
                &format!("{}/resources/__init__.py", self.py_package()),
                &init_entries,
            )?);
        }
        Ok(())
    }

    /// Stage 5: the top-level client aggregating all resources
    fn generate_client(
        &self,
        resources: &[ResourceContext],
        files: &mut Vec<GeneratedFile>,
    ) -> Result<()> {
        let mut ctx = self.base_context();
        ctx.insert("resources", resources);

        let path = match self.config.language {
            TargetLanguage::TypeScript => "src/client.ts".to_string(),
            TargetLanguage::Python => format!("{}/client.py", self.py_package()),
            TargetLanguage::Go => "client.go".to_string(),
        };
        files.push(GeneratedFile {
            path,
            content: self.render("client", &ctx)?,
            kind: FileKind::Source,
        });

        if self.config.language == TargetLanguage::Python {
            files.push(self.python_init(
                &format!("{}/__init__.py", self.py_package()),
                &[InitEntry {
                    module: "client".to_string(),
                    symbol: "Client".to_string(),
                }],
            )?);
        }
        Ok(())
    }

    /// Stage 6: cross-cutting utilities, each behind its feature flag
    fn generate_utilities(&self, files: &mut Vec<GeneratedFile>) -> Result<()> {
        let features = &self.config.features;
        let capabilities = &self.schema.capabilities;
        let ctx = self.base_context();

        let mut utilities: Vec<(&str, &str)> = Vec::new();
        if features.include_retry {
            utilities.push(("retry", "retry"));
        }
        if features.rate_limiting(capabilities) {
            utilities.push(("rate_limit", "rate_limit"));
        }
        if features.streaming(capabilities) {
            utilities.push(("streaming", "streaming"));
        }

        for (template, stem) in utilities {
            let path = match self.config.language {
                TargetLanguage::TypeScript => format!("src/{}.ts", stem.replace('_', "-")),
                TargetLanguage::Python => format!("{}/{}.py", self.py_package(), stem),
                TargetLanguage::Go => format!("{}.go", stem.replace('_', "")),
            };
            files.push(GeneratedFile {
                path,
                content: self.render(template, &ctx)?,
                kind: FileKind::Source,
            });
        }
        Ok(())
    }

    /// The package manifest the external build pipeline consumes
    fn generate_manifest(&self, files: &mut Vec<GeneratedFile>) -> Result<()> {
        let ctx = self.base_context();
        let path = match self.config.language {
            TargetLanguage::TypeScript => "package.json".to_string(),
            TargetLanguage::Python => "pyproject.toml".to_string(),
            TargetLanguage::Go => "go.mod".to_string(),
        };
        files.push(GeneratedFile {
            path,
            content: self.render("package", &ctx)?,
            kind: FileKind::Config,
        });
        Ok(())
    }

    fn generate_readme(
        &self,
        resources: &[ResourceContext],
        files: &mut Vec<GeneratedFile>,
    ) -> Result<()> {
        let mut ctx = self.base_context();
        ctx.insert("resources", resources);
        files.push(GeneratedFile {
            path: "README.md".to_string(),
            content: self.render("readme", &ctx)?,
            kind: FileKind::Doc,
        });
        Ok(())
    }

    fn generate_example(
        &self,
        resources: &[ResourceContext],
        files: &mut Vec<GeneratedFile>,
    ) -> Result<()> {
        let mut ctx = self.base_context();
        ctx.insert("resources", resources);
        let path = match self.config.language {
            TargetLanguage::TypeScript => "examples/basic.ts".to_string(),
            TargetLanguage::Python => "examples/basic.py".to_string(),
            TargetLanguage::Go => "examples/main.go".to_string(),
        };
        files.push(GeneratedFile {
            path,
            content: self.render("example", &ctx)?,
            kind: FileKind::Source,
        });
        Ok(())
    }

    fn generate_tests(
        &self,
        resources: &[ResourceContext],
        files: &mut Vec<GeneratedFile>,
    ) -> Result<()> {
        let mut ctx = self.base_context();
        ctx.insert("resources", resources);
        let path = match self.config.language {
            TargetLanguage::TypeScript => "tests/client.test.ts".to_string(),
            TargetLanguage::Python => "tests/test_client.py".to_string(),
            TargetLanguage::Go => "client_test.go".to_string(),
        };
        files.push(GeneratedFile {
            path,
            content: self.render("test", &ctx)?,
            kind: FileKind::Test,
        });
        Ok(())
    }

    fn python_init(&self, path: &str, entries: &[InitEntry]) -> Result<GeneratedFile> {
        let mut ctx = self.base_context();
        ctx.insert("entries", entries);
        Ok(GeneratedFile {
            path: path.to_string(),
            content: self.render("init", &ctx)?,
            kind: FileKind::Source,
        })
    }

    fn metadata(&self, extra_dependencies: Vec<String>) -> PackageMetadata {
        let mut dependencies = extra_dependencies;
        let mut dev_dependencies = Vec::new();
        let mut scripts = IndexMap::new();

        match self.config.language {
            TargetLanguage::TypeScript => {
                dev_dependencies.push("typescript".to_string());
                dev_dependencies.push("vitest".to_string());
                scripts.insert("build".to_string(), "tsc".to_string());
                scripts.insert("test".to_string(), "vitest run".to_string());
            }
            TargetLanguage::Python => {
                dev_dependencies.push("pytest".to_string());
                scripts.insert("test".to_string(), "pytest".to_string());
            }
            TargetLanguage::Go => {
                scripts.insert("test".to_string(), "go test ./...".to_string());
            }
        }
        dependencies.sort();
        dependencies.dedup();

        PackageMetadata {
            package_name: self.config.package.name.clone(),
            version: self.config.package.version.clone(),
            dependencies,
            dev_dependencies,
            scripts,
        }
    }
}

#[derive(Serialize)]
struct InitEntry {
    module: String,
    symbol: String,
}

/// Generate one package (convenience function)
pub fn generate_package(
    schema: &CanonicalSchema,
    config: GenerationConfig,
) -> Result<GeneratedPackage> {
    ClientGenerator::new(schema, config)?.generate()
}

/// Generate packages for many target languages concurrently
///
/// The validated schema is shared by reference across workers; nothing
/// mutates it, so no locking is involved.
pub fn generate_targets(
    schema: &CanonicalSchema,
    configs: &[GenerationConfig],
) -> Result<Vec<GeneratedPackage>> {
    configs
        .par_iter()
        .map(|config| generate_package(schema, config.clone()))
        .collect()
}
