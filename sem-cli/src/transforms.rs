//! Inspect transforms
//!
//! Each transform is a stage + format combination (e.g., "ast-tag", "token-json").
//!
//! 1. **Tokenization** - Raw text → Token stream
//!    - `token-simple`: one token per line, `line:column KIND`
//!    - `token-json`: JSON array of tokens with positions
//!
//! 2. **Parsing** - Tokens → Document tree
//!    - `ast-tag`: XML-like tag format
//!    - `ast-json`: JSON representation

use sem_babel::formats::sem::lexer::tokenize;
use sem_babel::formats::sem::token::Token;
use sem_babel::formats::tag::serialize_text;

/// All available inspect transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["token-simple", "token-json", "ast-tag", "ast-json"];

/// Execute a named transform on SEM source.
pub fn execute_transform(source: &str, transform_name: &str) -> Result<String, String> {
    match transform_name {
        "token-simple" => {
            let tokens = tokenize(source).map_err(|e| format!("Transform failed: {e}"))?;
            Ok(tokens_to_simple(&tokens))
        }
        "token-json" => {
            let tokens = tokenize(source).map_err(|e| format!("Transform failed: {e}"))?;
            serde_json::to_string_pretty(&tokens)
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        "ast-tag" => {
            let text = sem_babel::formats::sem::parse(source)
                .map_err(|e| format!("Transform failed: {e}"))?;
            Ok(format!("{}\n", serialize_text(&text)))
        }
        "ast-json" => {
            let text = sem_babel::formats::sem::parse(source)
                .map_err(|e| format!("Transform failed: {e}"))?;
            serde_json::to_string_pretty(&text)
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        other => Err(format!("Unknown transform '{other}'")),
    }
}

fn tokens_to_simple(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| format!("{}:{} {}\n", token.line, token.column, token.kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_simple_lists_positions() {
        let output = execute_transform("= A =\n", "token-simple").unwrap();
        assert_eq!(
            output,
            "1:1 HEADING_START(1)\n1:2 TEXT(\" A \")\n1:5 HEADING_STOP(1)\n2:1 SEPARATOR\n"
        );
    }

    #[test]
    fn token_json_is_an_array() {
        let output = execute_transform("a", "token-json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["kind"], "TEXT");
        assert_eq!(value[0]["value"], "a");
        assert_eq!(value[1]["kind"], "SEPARATOR");
    }

    #[test]
    fn ast_transforms_report_parse_errors() {
        let err = execute_transform("*a /b* c/", "ast-tag").unwrap_err();
        assert!(err.starts_with("Transform failed"));
        assert!(execute_transform("a", "ast-json").is_ok());
    }

    #[test]
    fn unknown_transform() {
        assert!(execute_transform("a", "ir-json").is_err());
    }
}
