//! Mailjet HTTP client.
//!
//! ```rust,no_run
//! use kariyer_mail::{MailClient, Recipient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = kariyer_common::config::init()?;
//!     let mail = MailClient::new(&settings.mail())?;
//!     let status = mail
//!         .send_plain_text("Welcome", "Hello!", &Recipient::new("a@b.com", "Ada"))
//!         .await?;
//!     println!("{status}");
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use kariyer_common::config::MailSettings;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::dto::{
    Address, OutgoingMessage, PlainEmail, Recipient, SendRequest, SendResponse, TemplateEmail,
};
use crate::error::{MailError, MailResult};

/// Sends transactional email from the configured sender identity.
#[derive(Clone)]
pub struct MailClient {
    http: Client,
    send_url: String,
    api_key: String,
    secret_key: String,
    sender_email: String,
    sender_name: String,
}

impl MailClient {
    pub fn new(settings: &MailSettings) -> MailResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("kariyer-mail/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            send_url: format!("{}/v3.1/send", settings.api_url.trim_end_matches('/')),
            api_key: settings.api_key.clone(),
            secret_key: settings.secret_key.clone(),
            sender_email: settings.sender_email.clone(),
            sender_name: settings.sender_name.clone(),
        })
    }

    /// Send a Mailjet template with the given variables.
    pub async fn send_template(
        &self,
        to: &Recipient,
        template_id: i64,
        variables: &Map<String, Value>,
    ) -> MailResult<String> {
        let message = OutgoingMessage {
            from: self.sender(),
            to: vec![address(to)],
            template_language: true,
            template_id: Some(template_id),
            variables: Some(variables),
            subject: None,
            text_part: None,
            html_part: None,
        };
        self.dispatch(message).await
    }

    /// Same as [`send_template`](Self::send_template), from a prepared form.
    pub async fn send_template_email(&self, email: &TemplateEmail) -> MailResult<String> {
        self.send_template(&email.to, email.template_id, &email.variables)
            .await
    }

    /// Send a plain-text message.
    pub async fn send_plain_text(
        &self,
        subject: &str,
        body: &str,
        to: &Recipient,
    ) -> MailResult<String> {
        self.send_email(&PlainEmail {
            to: to.clone(),
            subject: subject.to_owned(),
            text: body.to_owned(),
            html: None,
        })
        .await
    }

    /// Send a message with inline text and, optionally, an HTML part.
    pub async fn send_email(&self, email: &PlainEmail) -> MailResult<String> {
        let message = OutgoingMessage {
            from: self.sender(),
            to: vec![address(&email.to)],
            template_language: true,
            template_id: None,
            variables: None,
            subject: Some(&email.subject),
            text_part: Some(&email.text),
            html_part: email.html.as_deref(),
        };
        self.dispatch(message).await
    }

    fn sender(&self) -> Address<'_> {
        Address {
            email: &self.sender_email,
            name: &self.sender_name,
        }
    }

    async fn dispatch(&self, message: OutgoingMessage<'_>) -> MailResult<String> {
        let recipient = message.to.first().map(|a| a.email.to_owned()).unwrap_or_default();
        let request = SendRequest {
            messages: vec![message],
        };

        debug!(to = %recipient, "Sending email through Mailjet");
        let resp = self
            .http
            .post(&self.send_url)
            .basic_auth(&self.api_key, Some(&self.secret_key))
            .json(&request)
            .send()
            .await
            .inspect_err(|e| error!(to = %recipient, "Mailjet request failed: {e}"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(to = %recipient, status = status.as_u16(), "Mailjet rejected email");
            return Err(MailError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SendResponse = resp.json().await?;
        parsed
            .messages
            .into_iter()
            .next()
            .map(|m| m.status)
            .ok_or(MailError::EmptyResult)
    }
}

fn address(recipient: &Recipient) -> Address<'_> {
    Address {
        email: &recipient.email,
        name: &recipient.name,
    }
}
