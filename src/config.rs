use std::fmt;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 465;
const DEFAULT_DESTINATION: &str = "contact@tagsolutionltd.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub mail: MailConfig,
    /// Enables lead persistence when set
    pub database_url: Option<String>,
}

/// SMTP settings for the lead notification.
#[derive(Clone)]
pub struct MailConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    /// Implicit TLS when true, STARTTLS otherwise
    pub secure: bool,
    pub from: String,
    pub to: String,
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let user = var("EMAIL_USER")
            .ok_or_else(|| anyhow::anyhow!("EMAIL_USER environment variable required"))
            .and_then(|user| {
                if user.trim().is_empty() {
                    anyhow::bail!("EMAIL_USER cannot be empty");
                }
                Ok(user)
            })?;

        let mail = MailConfig {
            password: var("EMAIL_PASS")
                .ok_or_else(|| anyhow::anyhow!("EMAIL_PASS environment variable required"))
                .and_then(|pass| {
                    if pass.trim().is_empty() {
                        anyhow::bail!("EMAIL_PASS cannot be empty");
                    }
                    Ok(pass)
                })?,
            host: var("SMTP_HOST")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            port: match var("SMTP_PORT") {
                Some(port) => port.parse().map_err(|_| {
                    anyhow::anyhow!("SMTP_PORT must be a valid number between 1-65535")
                })?,
                None => DEFAULT_SMTP_PORT,
            },
            secure: match var("SMTP_SECURE") {
                Some(secure) => parse_bool(&secure)
                    .ok_or_else(|| anyhow::anyhow!("SMTP_SECURE must be true or false"))?,
                None => true,
            },
            from: var("EMAIL_FROM")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| user.clone()),
            to: var("EMAIL_TO")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DESTINATION.to_string()),
            user,
        };

        let config = Self {
            port: var("PORT")
                .unwrap_or_else(|| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            mail,
            database_url: var("DATABASE_URL")
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })
                .transpose()?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::debug!("SMTP host: {}:{}", config.mail.host, config.mail.port);
        tracing::debug!("Lead notifications go to {}", config.mail.to);
        if config.database_url.is_some() {
            tracing::info!("Lead persistence enabled");
        }
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
