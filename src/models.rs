use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact-form submission as received from the website.
///
/// Every field is optional on the wire. A missing key, `null` and `""` are all
/// treated as absent by the validator.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub how_did_you_hear: Option<String>,
    #[serde(default)]
    pub how_can_we_help: Option<String>,
}

/// A submission that passed validation.
///
/// Names are trimmed and digit-free, the email has a mailbox shape, the phone
/// (if any) is a valid international number, and optional fields are `""`
/// instead of absent. Only [`crate::validation::validate`] produces one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedLead {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub how_did_you_hear: String,
    pub how_can_we_help: String,
}

/// Row appended to the lead store after the notification went out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    #[serde(flatten)]
    pub lead: ValidatedLead,
    /// When the notification email was sent
    pub sent_at: DateTime<Utc>,
}

impl LeadRecord {
    pub fn new(lead: ValidatedLead, sent_at: DateTime<Utc>) -> Self {
        Self { lead, sent_at }
    }
}

/// Email handed to the mail dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Confirmation returned by a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub message_id: String,
}

/// JSON body of every response from the lead endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_submission() {
        let json = r#"
        {
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@doe.com",
            "phone": "+14155552671",
            "howDidYouHear": "Google",
            "howCanWeHelp": "Pricing"
        }
        "#;

        let submission: LeadSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.first_name.as_deref(), Some("Jane"));
        assert_eq!(submission.how_did_you_hear.as_deref(), Some("Google"));
        assert_eq!(submission.how_can_we_help.as_deref(), Some("Pricing"));
    }

    #[test]
    fn test_parse_missing_and_null_fields() {
        let json = r#"{"firstName": "Jane", "phone": null}"#;

        let submission: LeadSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.first_name.as_deref(), Some("Jane"));
        assert!(submission.last_name.is_none());
        assert!(submission.phone.is_none());
    }

    #[test]
    fn test_record_serializes_flat_with_timestamp() {
        let lead = ValidatedLead {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@doe.com".to_string(),
            phone: String::new(),
            how_did_you_hear: String::new(),
            how_can_we_help: String::new(),
        };
        let record = LeadRecord::new(lead, Utc::now());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["firstName"], "Jane");
        assert_eq!(value["phone"], "");
        assert!(value["sentAt"].is_string());
    }
}
