//! Extract command implementation

use crate::cli::ExtractArgs;
use crate::nlp::Extractor;

/// Handle `brick extract`: entities of `args.text` as pretty JSON.
pub fn handle_extract(args: &ExtractArgs) -> anyhow::Result<String> {
    let entities = Extractor::default().extract(&args.text);
    Ok(serde_json::to_string_pretty(&entities)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_outputs_camel_case_json() {
        let out = handle_extract(&ExtractArgs {
            text: "anything halal? hello!".to_string(),
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["dietaryPreferences"][0], "halal");
        assert_eq!(value["isGreeting"], true);
    }
}
