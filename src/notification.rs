use crate::models::{OutgoingEmail, ValidatedLead};

/// Subject line of every lead notification.
pub const LEAD_SUBJECT: &str = "New Lead From Website";

/// Build the plain-text notification for a validated lead.
///
/// Field order is fixed so the mailbox on the other end can be scanned (or
/// parsed) reliably.
pub fn compose(lead: &ValidatedLead, from: &str, to: &str) -> OutgoingEmail {
    OutgoingEmail {
        from: from.to_string(),
        to: to.to_string(),
        subject: LEAD_SUBJECT.to_string(),
        body: format_lead_body(lead),
    }
}

fn format_lead_body(lead: &ValidatedLead) -> String {
    let mut body = String::from("You have a new lead:\n");
    body.push_str(&format!("First Name: {}\n", lead.first_name));
    body.push_str(&format!("Last Name: {}\n", lead.last_name));
    body.push_str(&format!("Email: {}\n", lead.email));
    body.push_str(&format!("Phone: {}\n", lead.phone));
    body.push_str(&format!(
        "How Did You Hear About Us?: {}\n",
        lead.how_did_you_hear
    ));
    body.push_str(&format!("How Can We Help?: {}\n", lead.how_can_we_help));
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead() -> ValidatedLead {
        ValidatedLead {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@doe.com".to_string(),
            phone: "+14155552671".to_string(),
            how_did_you_hear: "Google".to_string(),
            how_can_we_help: "Pricing".to_string(),
        }
    }

    #[test]
    fn test_compose_sets_envelope_and_subject() {
        let email = compose(&lead(), "forms@example.com", "sales@example.com");

        assert_eq!(email.from, "forms@example.com");
        assert_eq!(email.to, "sales@example.com");
        assert_eq!(email.subject, "New Lead From Website");
    }

    #[test]
    fn test_body_lists_fields_in_order() {
        let body = format_lead_body(&lead());

        let expected = "You have a new lead:\n\
                        First Name: Jane\n\
                        Last Name: Doe\n\
                        Email: jane@doe.com\n\
                        Phone: +14155552671\n\
                        How Did You Hear About Us?: Google\n\
                        How Can We Help?: Pricing\n";
        assert_eq!(body, expected);
    }

    #[test]
    fn test_body_keeps_empty_optional_labels() {
        let mut lead = lead();
        lead.phone = String::new();
        lead.how_can_we_help = String::new();

        let body = format_lead_body(&lead);
        assert!(body.contains("Phone: \n"));
        assert!(body.contains("How Can We Help?: \n"));
    }
}
