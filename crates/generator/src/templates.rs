//! Template loading and management
//!
//! One embedded template set per target language, registered under stable
//! names so the engine can drive every language through the same stages.

use llm_sdk_generator_common::{GeneratorError, Result, TargetLanguage};
use std::collections::HashMap;
use tera::{Tera, Value};

macro_rules! register {
    ($tera:expr, $name:literal, $path:literal) => {
        $tera
            .add_raw_template($name, include_str!($path))
            .map_err(|e| {
                GeneratorError::Generation(format!("Failed to load {} template: {}", $name, e))
            })?;
    };
}

/// Load the template set for one target language
pub fn load_templates(language: TargetLanguage) -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("pascal", pascal_filter);
    tera.register_filter("snake", snake_filter);

    match language {
        TargetLanguage::TypeScript => {
            register!(tera, "type", "../templates/typescript/type.ts.tera");
            register!(tera, "transport", "../templates/typescript/transport.ts.tera");
            register!(tera, "errors", "../templates/typescript/errors.ts.tera");
            register!(tera, "auth", "../templates/typescript/auth.ts.tera");
            register!(tera, "resource", "../templates/typescript/resource.ts.tera");
            register!(tera, "client", "../templates/typescript/client.ts.tera");
            register!(tera, "retry", "../templates/typescript/retry.ts.tera");
            register!(tera, "rate_limit", "../templates/typescript/rate-limit.ts.tera");
            register!(tera, "streaming", "../templates/typescript/streaming.ts.tera");
            register!(tera, "package", "../templates/typescript/package.json.tera");
            register!(tera, "readme", "../templates/typescript/README.md.tera");
            register!(tera, "test", "../templates/typescript/client.test.ts.tera");
            register!(tera, "example", "../templates/typescript/example.ts.tera");
        }
        TargetLanguage::Python => {
            register!(tera, "type", "../templates/python/type.py.tera");
            register!(tera, "transport", "../templates/python/transport.py.tera");
            register!(tera, "errors", "../templates/python/errors.py.tera");
            register!(tera, "auth", "../templates/python/auth.py.tera");
            register!(tera, "resource", "../templates/python/resource.py.tera");
            register!(tera, "client", "../templates/python/client.py.tera");
            register!(tera, "retry", "../templates/python/retry.py.tera");
            register!(tera, "rate_limit", "../templates/python/rate_limit.py.tera");
            register!(tera, "streaming", "../templates/python/streaming.py.tera");
            register!(tera, "package", "../templates/python/pyproject.toml.tera");
            register!(tera, "readme", "../templates/python/README.md.tera");
            register!(tera, "test", "../templates/python/test_client.py.tera");
            register!(tera, "example", "../templates/python/example.py.tera");
            register!(tera, "init", "../templates/python/init.py.tera");
        }
        TargetLanguage::Go => {
            register!(tera, "type", "../templates/go/type.go.tera");
            register!(tera, "transport", "../templates/go/transport.go.tera");
            register!(tera, "errors", "../templates/go/errors.go.tera");
            register!(tera, "auth", "../templates/go/auth.go.tera");
            register!(tera, "resource", "../templates/go/resource.go.tera");
            register!(tera, "client", "../templates/go/client.go.tera");
            register!(tera, "retry", "../templates/go/retry.go.tera");
            register!(tera, "rate_limit", "../templates/go/ratelimit.go.tera");
            register!(tera, "streaming", "../templates/go/streaming.go.tera");
            register!(tera, "package", "../templates/go/go.mod.tera");
            register!(tera, "readme", "../templates/go/README.md.tera");
            register!(tera, "test", "../templates/go/client_test.go.tera");
            register!(tera, "example", "../templates/go/example.go.tera");
        }
    }

    Ok(tera)
}

/// Filter converting any identifier spelling to PascalCase
fn pascal_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let input = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("pascal filter expects a string"))?;
    Ok(Value::String(llm_sdk_generator_mapper::to_pascal_case(input)))
}

/// Filter converting any identifier spelling to snake_case
fn snake_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let input = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("snake filter expects a string"))?;
    Ok(Value::String(llm_sdk_generator_mapper::to_snake_case(input)))
}
