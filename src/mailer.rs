//! Mail dispatch for lead notifications.

use std::fmt;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use uuid::Uuid;

use crate::config::MailConfig;
use crate::models::{DeliveryReceipt, OutgoingEmail};

/// Failure to hand a message to the mail server.
#[derive(Debug, Clone)]
pub enum DispatchError {
    /// Sender or recipient is not a valid mailbox.
    InvalidAddress(String),
    /// The message could not be assembled.
    Build(String),
    /// Connection, authentication or delivery failure.
    Transport(String),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::InvalidAddress(addr) => write!(f, "Invalid mail address: {}", addr),
            DispatchError::Build(msg) => write!(f, "Failed to build message: {}", msg),
            DispatchError::Transport(msg) => write!(f, "SMTP error: {}", msg),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Sends one email and waits for the server to accept it.
///
/// No retries: a failure is reported once to the caller.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, DispatchError>;
}

/// SMTP mailer backed by lettre.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build the transport. Does not open a connection.
    ///
    /// Sender and recipient are parsed here so a bad address fails at startup
    /// instead of on every request.
    pub fn new(config: &MailConfig) -> Result<Self, DispatchError> {
        for address in [&config.from, &config.to] {
            address
                .parse::<Mailbox>()
                .map_err(|_| DispatchError::InvalidAddress(address.clone()))?;
        }

        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| DispatchError::Transport(e.to_string()))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ))
            .build();

        tracing::info!(
            "SMTP transport ready: {}:{} ({})",
            config.host,
            config.port,
            if config.secure { "TLS" } else { "STARTTLS" }
        );

        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, DispatchError> {
        let (message, message_id) = build_message(email)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        tracing::debug!("SMTP server replied {}", response.code());

        Ok(DeliveryReceipt { message_id })
    }
}

/// Assemble a plain-text lettre message with a fresh Message-ID.
pub fn build_message(email: &OutgoingEmail) -> Result<(Message, String), DispatchError> {
    let from: Mailbox = email
        .from
        .parse()
        .map_err(|_| DispatchError::InvalidAddress(email.from.clone()))?;
    let to: Mailbox = email
        .to
        .parse()
        .map_err(|_| DispatchError::InvalidAddress(email.to.clone()))?;

    let message_id = format!("<{}@{}>", Uuid::new_v4(), from.email.domain());

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(&email.subject)
        .message_id(Some(message_id.clone()))
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())
        .map_err(|e| DispatchError::Build(e.to_string()))?;

    Ok((message, message_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            from: "Website <forms@example.com>".to_string(),
            to: "sales@example.com".to_string(),
            subject: "New Lead From Website".to_string(),
            body: "You have a new lead:\nFirst Name: Jane\n".to_string(),
        }
    }

    #[test]
    fn test_build_message_sets_headers() {
        let (message, message_id) = build_message(&email()).unwrap();

        assert!(message_id.starts_with('<'));
        assert!(message_id.ends_with("@example.com>"));

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: New Lead From Website"));
        assert!(raw.contains("To: sales@example.com"));
        assert!(raw.contains(&format!("Message-ID: {}", message_id)));
        assert!(raw.contains("First Name: Jane"));
    }

    #[test]
    fn test_build_message_rejects_bad_address() {
        let mut email = email();
        email.to = "not an address".to_string();

        match build_message(&email) {
            Err(DispatchError::InvalidAddress(addr)) => assert_eq!(addr, "not an address"),
            other => panic!("Expected InvalidAddress, got {:?}", other.map(|(_, id)| id)),
        }
    }

    #[test]
    fn test_message_ids_are_unique() {
        let (_, first) = build_message(&email()).unwrap();
        let (_, second) = build_message(&email()).unwrap();
        assert_ne!(first, second);
    }

    fn mail_config() -> MailConfig {
        MailConfig {
            user: "user".to_string(),
            password: "secret".to_string(),
            host: "smtp.example.com".to_string(),
            port: 465,
            secure: true,
            from: "forms@example.com".to_string(),
            to: "sales@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_smtp_mailer_builds_without_connecting() {
        assert!(SmtpMailer::new(&mail_config()).is_ok());
    }

    #[test]
    fn test_smtp_mailer_rejects_bad_sender_or_recipient() {
        let mut config = mail_config();
        config.from = "forms at example dot com".to_string();
        match SmtpMailer::new(&config) {
            Err(DispatchError::InvalidAddress(addr)) => {
                assert_eq!(addr, "forms at example dot com")
            }
            _ => panic!("Expected InvalidAddress for sender"),
        }

        let mut config = mail_config();
        config.to = "sales@".to_string();
        match SmtpMailer::new(&config) {
            Err(DispatchError::InvalidAddress(addr)) => assert_eq!(addr, "sales@"),
            _ => panic!("Expected InvalidAddress for recipient"),
        }
    }
}
