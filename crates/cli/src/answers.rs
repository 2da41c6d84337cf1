use anyhow::Context;
use riskfolio_core::questionnaire::Answers;
use serde_json::Value;

/// Reads an answers file.
///
/// Two shapes are accepted: an array of option indices in question order
/// (`[0, 1, 2, ...]`), or an object keyed by question index
/// (`{"0": 0, "2": 4, ...}`). Completeness is checked later by the
/// questionnaire, not here.
pub fn parse_answers(text: &str) -> anyhow::Result<Answers> {
    let value: Value = serde_json::from_str(text).context("answers file is not valid JSON")?;
    match value {
        Value::Array(_) => {
            let options: Vec<usize> =
                serde_json::from_value(value).context("answers array must contain option indices")?;
            Ok(options.into_iter().enumerate().collect())
        }
        Value::Object(_) => serde_json::from_value(value)
            .context("answers object must map question indices to option indices"),
        _ => anyhow::bail!("answers must be a JSON array or object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_is_read_in_question_order() {
        let answers = parse_answers("[0, 1, 2]").unwrap();
        assert_eq!(answers.get(&0), Some(&0));
        assert_eq!(answers.get(&2), Some(&2));
        assert_eq!(answers.len(), 3);
    }

    #[test]
    fn object_keys_are_question_indices() {
        let answers = parse_answers(r#"{"13": 0, "2": 4}"#).unwrap();
        assert_eq!(answers.get(&13), Some(&0));
        assert_eq!(answers.get(&2), Some(&4));
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(parse_answers("3").is_err());
        assert!(parse_answers(r#"["a"]"#).is_err());
        assert!(parse_answers(r#"{"x": 1}"#).is_err());
    }
}
