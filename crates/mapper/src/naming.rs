//! Identifier casing
//!
//! Shared case converters plus the per-language `NamingConvention`: six pure
//! functions (type, property, method, constant, enum member, package) so the
//! same IR name always renders to the same identifier across a whole run.

/// Split an identifier into lowercase words
///
/// Handles snake_case, kebab-case, camelCase, PascalCase, dotted ids, and
/// uppercase runs ("HTTPServer" → ["http", "server"]).
fn words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = input.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch == '_' || ch == '-' || ch == ' ' || ch == '.' || ch == '/' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if ch.is_uppercase() {
            let boundary = i > 0
                && (chars[i - 1].is_lowercase()
                    || chars[i - 1].is_ascii_digit()
                    || (i + 1 < chars.len() && chars[i + 1].is_lowercase()));
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.extend(ch.to_lowercase());
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

pub fn to_snake_case(input: &str) -> String {
    words(input).join("_")
}

pub fn to_screaming_snake_case(input: &str) -> String {
    words(input)
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

pub fn to_kebab_case(input: &str) -> String {
    words(input).join("-")
}

pub fn to_pascal_case(input: &str) -> String {
    words(input).iter().map(|w| capitalize(w)).collect()
}

pub fn to_camel_case(input: &str) -> String {
    let words = words(input);
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Lowercase with no separators, for Go package names
pub fn to_flat_case(input: &str) -> String {
    words(input).concat()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Identifier casing styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Snake,
    ScreamingSnake,
    Kebab,
    Pascal,
    Camel,
    Flat,
}

impl Case {
    pub fn apply(&self, input: &str) -> String {
        match self {
            Case::Snake => to_snake_case(input),
            Case::ScreamingSnake => to_screaming_snake_case(input),
            Case::Kebab => to_kebab_case(input),
            Case::Pascal => to_pascal_case(input),
            Case::Camel => to_camel_case(input),
            Case::Flat => to_flat_case(input),
        }
    }
}

/// One target language's naming rules
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    pub type_case: Case,
    pub property_case: Case,
    pub method_case: Case,
    pub constant_case: Case,
    pub enum_member_case: Case,
    pub package_case: Case,
}

impl NamingConvention {
    pub fn type_name(&self, input: &str) -> String {
        self.type_case.apply(input)
    }

    pub fn property_name(&self, input: &str) -> String {
        self.property_case.apply(input)
    }

    pub fn method_name(&self, input: &str) -> String {
        self.method_case.apply(input)
    }

    pub fn constant_name(&self, input: &str) -> String {
        self.constant_case.apply(input)
    }

    pub fn enum_member_name(&self, input: &str) -> String {
        self.enum_member_case.apply(input)
    }

    pub fn package_name(&self, input: &str) -> String {
        self.package_case.apply(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_splitting_handles_uppercase_runs() {
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_snake_case("XMLParser"), "xml_parser");
        assert_eq!(to_snake_case("createChatCompletion"), "create_chat_completion");
        assert_eq!(to_snake_case("models.generateContent"), "models_generate_content");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn test_pascal_and_camel() {
        assert_eq!(to_pascal_case("chat_message"), "ChatMessage");
        assert_eq!(to_pascal_case("createChatCompletion"), "CreateChatCompletion");
        assert_eq!(to_camel_case("stop_reason"), "stopReason");
        assert_eq!(to_camel_case("CreateMessageRequest"), "createMessageRequest");
    }

    #[test]
    fn test_screaming_kebab_flat() {
        assert_eq!(to_screaming_snake_case("maxTokens"), "MAX_TOKENS");
        assert_eq!(to_kebab_case("ChatMessage"), "chat-message");
        assert_eq!(to_flat_case("LlmClient"), "llmclient");
    }

    #[test]
    fn test_naming_is_deterministic() {
        let convention = NamingConvention {
            type_case: Case::Pascal,
            property_case: Case::Camel,
            method_case: Case::Camel,
            constant_case: Case::ScreamingSnake,
            enum_member_case: Case::Pascal,
            package_case: Case::Kebab,
        };
        for input in ["stop_reason", "HTTPServer", "createChatCompletion"] {
            assert_eq!(convention.type_name(input), convention.type_name(input));
            assert_eq!(convention.method_name(input), convention.method_name(input));
        }
    }
}
