//! Email forms and the Mailjet v3.1 wire format.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Someone a message is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub email: String,
    pub name: String,
}

impl Recipient {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

/// A message rendered by a Mailjet-hosted template.
#[derive(Debug, Clone)]
pub struct TemplateEmail {
    pub to: Recipient,
    pub template_id: i64,
    pub variables: Map<String, Value>,
}

/// A message with inline content.
#[derive(Debug, Clone)]
pub struct PlainEmail {
    pub to: Recipient,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

// ------------------------------------------------------------------
// Wire format
// ------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SendRequest<'a> {
    pub messages: Vec<OutgoingMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Address<'a> {
    #[serde(rename = "Email")]
    pub email: &'a str,
    #[serde(rename = "Name")]
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct OutgoingMessage<'a> {
    #[serde(rename = "From")]
    pub from: Address<'a>,
    #[serde(rename = "To")]
    pub to: Vec<Address<'a>>,
    #[serde(rename = "TemplateLanguage")]
    pub template_language: bool,
    #[serde(rename = "TemplateID", skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
    #[serde(rename = "Variables", skip_serializing_if = "Option::is_none")]
    pub variables: Option<&'a Map<String, Value>>,
    #[serde(rename = "Subject", skip_serializing_if = "Option::is_none")]
    pub subject: Option<&'a str>,
    #[serde(rename = "TextPart", skip_serializing_if = "Option::is_none")]
    pub text_part: Option<&'a str>,
    #[serde(rename = "HTMLPart", skip_serializing_if = "Option::is_none")]
    pub html_part: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SendResponse {
    #[serde(default)]
    pub messages: Vec<MessageResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct MessageResult {
    pub status: String,
}
