//! Reading a verdict out of the model's free-text reply
//!
//! Models wrap their JSON in prose or code fences often enough that the reply
//! is searched for the outermost `{ ... }` span rather than parsed whole. The
//! span runs from the first `{` to the last `}` even when that covers several
//! objects; such a span fails to parse and falls back like any other garbage.

use serde_json::{Map, Value};
use tracing::{debug, warn};
use tsa_checker_core::CheckResult;

/// Note attached when the reply contains no `{ ... }` span
pub const NO_JSON_NOTE: &str = "Unable to parse structured response from AI";

/// Note attached when the `{ ... }` span is not valid JSON
pub const MALFORMED_JSON_NOTE: &str =
    "Response format error - please verify information with official TSA guidelines";

/// Description used when the model omits one
pub const MISSING_DESCRIPTION: &str = "No description available";

/// How the reply was read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// A JSON object was found and read
    Structured,
    /// No `{ ... }` span in the reply
    NoJson,
    /// A `{ ... }` span that did not parse
    Malformed,
}

impl ReplyOutcome {
    /// Label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::NoJson => "no_json",
            Self::Malformed => "malformed",
        }
    }
}

/// A result together with how it was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub result: CheckResult,
    pub outcome: ReplyOutcome,
}

/// The substring from the first `{` through the last `}`, if any.
pub fn extract_json_candidate(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Turn a model reply into a result for `item`.
///
/// Never fails: anything unreadable yields a fail-closed result carrying the
/// raw reply as its description.
pub fn interpret_reply(item: &str, reply: &str) -> Interpretation {
    let Some(candidate) = extract_json_candidate(reply) else {
        warn!("Model reply contains no JSON object, failing closed");
        return Interpretation {
            result: CheckResult::fail_closed(item, reply, NO_JSON_NOTE),
            outcome: ReplyOutcome::NoJson,
        };
    };

    match serde_json::from_str::<Map<String, Value>>(candidate) {
        Ok(fields) => Interpretation {
            result: from_fields(item, &fields),
            outcome: ReplyOutcome::Structured,
        },
        Err(e) => {
            warn!("Model reply JSON did not parse ({}), failing closed", e);
            debug!("Unparseable candidate: {}", candidate);
            Interpretation {
                result: CheckResult::fail_closed(item, reply, MALFORMED_JSON_NOTE),
                outcome: ReplyOutcome::Malformed,
            }
        }
    }
}

fn from_fields(item: &str, fields: &Map<String, Value>) -> CheckResult {
    CheckResult {
        item: item.to_string(),
        carry_on_allowed: fields.get("carry_on_allowed").is_some_and(coerce_flag),
        checked_baggage_allowed: fields
            .get("checked_baggage_allowed")
            .is_some_and(coerce_flag),
        description: optional_text(fields.get("description"))
            .unwrap_or_else(|| MISSING_DESCRIPTION.to_string()),
        restrictions: optional_text(fields.get("restrictions")),
        additional_notes: optional_text(fields.get("additional_notes")),
    }
}

/// Lenient boolean reading; anything unrecognised is `false`.
fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "on" | "t" | "1"
        ),
        _ => false,
    }
}

fn optional_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
