//! Request and result shapes exchanged over HTTP

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Body of `POST /check-item`
///
/// Both fields default when missing so that an absent item is reported as an
/// invalid input rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    /// Name of the item to check
    #[serde(default)]
    pub item: Option<String>,

    /// Optional free-text detail about the item
    #[serde(default)]
    pub description: Option<String>,
}

impl CheckRequest {
    /// Create a request for the given item
    pub fn new(item: impl Into<String>) -> Self {
        Self {
            item: Some(item.into()),
            description: None,
        }
    }

    /// The trimmed item name, rejecting missing or blank items
    pub fn validated_item(&self) -> Result<&str> {
        self.item
            .as_deref()
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .ok_or_else(|| Error::invalid_input("Item name is required"))
    }

    /// The description as supplied, if any
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Answer returned by `POST /check-item`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Echo of the requested item, never taken from the model reply
    pub item: String,

    /// Whether the item may travel in the cabin
    pub carry_on_allowed: bool,

    /// Whether the item may travel in the hold
    pub checked_baggage_allowed: bool,

    /// Human-readable rationale
    pub description: String,

    /// Size, quantity or packaging limits
    pub restrictions: Option<String>,

    /// Other safety or regulatory notes
    pub additional_notes: Option<String>,
}

impl CheckResult {
    /// Conservative answer used when the model reply cannot be read.
    ///
    /// Both allowances are false so an unreadable answer never reads as "allowed".
    pub fn fail_closed(
        item: impl Into<String>,
        raw_reply: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            item: item.into(),
            carry_on_allowed: false,
            checked_baggage_allowed: false,
            description: raw_reply.into(),
            restrictions: None,
            additional_notes: Some(note.into()),
        }
    }

    /// True when the item may travel in neither the cabin nor the hold
    pub fn is_prohibited(&self) -> bool {
        !self.carry_on_allowed && !self.checked_baggage_allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_validated_item_trims() {
        let req = CheckRequest::new("  pocket knife \n");
        assert_eq!(req.validated_item().unwrap(), "pocket knife");
    }

    #[test]
    fn test_missing_or_blank_item_rejected() {
        for req in [
            CheckRequest::default(),
            CheckRequest::new(""),
            CheckRequest::new("   "),
            CheckRequest::new("\t\n"),
        ] {
            let err = req.validated_item().unwrap_err();
            assert_eq!(err.status_code(), 400);
            assert_eq!(err.to_string(), "Item name is required");
        }
    }

    #[test]
    fn test_request_deserializes_without_fields() {
        let req: CheckRequest = serde_json::from_str("{}").unwrap();
        assert!(req.item.is_none());
        assert!(req.description.is_none());

        let req: CheckRequest =
            serde_json::from_str(r#"{"item": "laptop", "description": "15 inch"}"#).unwrap();
        assert_eq!(req.validated_item().unwrap(), "laptop");
        assert_eq!(req.description(), Some("15 inch"));
    }

    #[test]
    fn test_result_serializes_absent_fields_as_null() {
        let result = CheckResult {
            item: "12oz bottle of shampoo".to_string(),
            carry_on_allowed: false,
            checked_baggage_allowed: true,
            description: "Liquids over 3.4oz...".to_string(),
            restrictions: None,
            additional_notes: None,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "item": "12oz bottle of shampoo",
                "carry_on_allowed": false,
                "checked_baggage_allowed": true,
                "description": "Liquids over 3.4oz...",
                "restrictions": null,
                "additional_notes": null,
            })
        );
    }

    #[test]
    fn test_fail_closed_is_prohibited() {
        let result = CheckResult::fail_closed("lighter", "hmm, not sure", "could not parse");
        assert!(result.is_prohibited());
        assert_eq!(result.description, "hmm, not sure");
        assert_eq!(result.additional_notes.as_deref(), Some("could not parse"));
        assert!(result.restrictions.is_none());
    }

    proptest! {
        #[test]
        fn prop_validated_item_is_trimmed_input(item in "[ \t]{0,3}[a-zA-Z0-9][a-zA-Z0-9 .,-]{0,30}[ \t]{0,3}") {
            let req = CheckRequest::new(item.clone());
            prop_assert_eq!(req.validated_item().unwrap(), item.trim());
        }

        #[test]
        fn prop_whitespace_only_item_rejected(item in "[ \t\r\n]{0,10}") {
            let req = CheckRequest::new(item);
            prop_assert!(req.validated_item().is_err());
        }
    }
}
