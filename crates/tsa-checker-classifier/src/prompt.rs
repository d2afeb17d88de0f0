//! Instruction prompt sent to the completion API

/// Build the prompt asking the model for a JSON verdict on one item.
///
/// The description line is included only for a non-empty description.
pub fn build_prompt(item: &str, description: Option<&str>) -> String {
    let description_line = match description {
        Some(description) if !description.is_empty() => {
            format!("Additional description: {description}")
        }
        _ => String::new(),
    };

    format!(
        r#"
You are an expert TSA (Transportation Security Administration) assistant. Analyze the following item and determine if it can be carried in carry-on luggage, checked baggage, or both.

Item: {item}
{description_line}

Please provide a detailed analysis in the following JSON format:
{{
    "carry_on_allowed": true/false,
    "checked_baggage_allowed": true/false,
    "description": "Clear explanation of TSA rules for this item",
    "restrictions": "Any size, quantity, or packaging restrictions (if applicable)",
    "additional_notes": "Any important safety or regulatory notes"
}}

Base your response on current TSA regulations. Be specific about any size limits, liquid restrictions, or special requirements. If the item is prohibited in both carry-on and checked baggage, explain why.
"#
    )
}
