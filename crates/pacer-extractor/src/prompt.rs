//! LLM prompt engineering for field extraction

use pacer_domain::ChatMessage;

/// Builds the two-message exchange sent to the model
pub struct PromptBuilder {
    text: String,
}

impl PromptBuilder {
    /// Create a new prompt builder for the given user text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The fixed system instruction
    pub fn system_instructions() -> &'static str {
        EXTRACTION_INSTRUCTIONS
    }

    /// Build the ordered messages: system instruction, then the user text as-is
    pub fn build(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(EXTRACTION_INSTRUCTIONS),
            ChatMessage::user(self.text.clone()),
        ]
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You are an assistant for extracting information from text written in Polish.
You will receive a short self-description and extract the following information:

"sex" - Sex of the person: "M" for male (mężczyzna), "K" for female (kobieta).
"age" - Age of the person in whole years.
"pace" - The average pace, in minutes per kilometre, at which the person runs 5 km.

Return exactly this JSON object:
{
    "sex": "...",
    "age": ...,
    "pace": ...
}

All three keys must be present. Use null for any value that cannot be determined from the text.
Return only the JSON object: no markdown code blocks, no explanations, nothing else.

Example text:
hej, nazywam się Marek Marucha, jestem mężczyzną, mam 37 lat i biegnę 5km ze średnim tempem 5.23 minut na kilometr

Expected output:
{
    "sex": "M",
    "age": 37,
    "pace": 5.23
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_fields, AGE_KEY, PACE_KEY, SEX_KEY};
    use pacer_domain::{ChatRole, Sex};

    #[test]
    fn test_two_messages_in_order() {
        let messages = PromptBuilder::new("mam 40 lat").build();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(messages[1].content, "mam 40 lat");
    }

    #[test]
    fn test_user_text_passed_through_unchanged() {
        let messages = PromptBuilder::new("").build();
        assert_eq!(messages[1].content, "");

        let messages = PromptBuilder::new("  {weird} input\n").build();
        assert_eq!(messages[1].content, "  {weird} input\n");
    }

    #[test]
    fn test_instructions_name_every_key() {
        let instructions = PromptBuilder::system_instructions();
        for key in [SEX_KEY, AGE_KEY, PACE_KEY] {
            assert!(instructions.contains(&format!("\"{}\"", key)));
        }
        assert!(instructions.contains("null"));
        assert!(instructions.contains("only the JSON object"));
    }

    #[test]
    fn test_worked_example_satisfies_parser() {
        // The example output must itself be a valid reply
        let instructions = PromptBuilder::system_instructions();
        let example = instructions
            .split("Expected output:")
            .nth(1)
            .unwrap();

        let fields = parse_fields(example).unwrap();
        assert_eq!(fields.sex, Some(Sex::Male));
        assert_eq!(fields.age, Some(37));
        assert_eq!(fields.pace, Some(5.23));
    }
}
