use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::config::{Config, ContactConfig, OwnerConfig};
use crate::content::blog::escape_html;
use crate::error::{PortfolioError, Result};

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Contact-form relay backed by the Resend HTTP API. Constructed per
/// request; `None` when no API key is configured, which puts the contact
/// endpoint into mock mode.
pub struct ResendMailer {
    api_key: String,
    from_address: String,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

impl ResendMailer {
    pub fn from_env(contact: &ContactConfig) -> Option<Self> {
        let api_key = Config::resend_api_key()?;
        Some(Self {
            api_key,
            from_address: contact.from_address.clone(),
            http: reqwest::Client::new(),
        })
    }

    pub async fn send(&self, to: &str, subject: &str, html: &str, reply_to: &str) -> Result<()> {
        debug!(to, subject, "sending email via Resend");

        let body = SendRequest {
            from: &self.from_address,
            to: [to],
            subject,
            html,
            reply_to: Some(reply_to),
        };

        let resp = self
            .http
            .post(RESEND_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .timeout(Duration::from_secs(15))
            .send()
            .await
            .map_err(|e| PortfolioError::Email(format!("resend send failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(PortfolioError::Email(format!(
                "resend returned {status}: {body}"
            )));
        }

        Ok(())
    }
}

// -- Templates -----------------------------------------------------------

/// Notification sent to the site owner for each contact-form submission.
/// All visitor-supplied fields are escaped before interpolation.
pub fn notification_email(name: &str, email: &str, message: &str) -> String {
    let message_html = escape_html(message).replace('\n', "<br>");
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #333; border-bottom: 2px solid #7c3aed; padding-bottom: 10px;">New Contact Form Submission</h2>
  <div style="background: #f8f9fa; padding: 20px; border-radius: 8px;">
    <p><strong>Name:</strong> {name}</p>
    <p><strong>Email:</strong> {email}</p>
    <p><strong>Message:</strong></p>
    <div style="background: white; padding: 15px; border-radius: 5px; border-left: 4px solid #7c3aed;">{message}</div>
  </div>
  <p style="color: #666; font-size: 12px;">This message was sent from your portfolio contact form.</p>
</div>"#,
        name = escape_html(name),
        email = escape_html(email),
        message = message_html,
    )
}

/// Confirmation sent back to the visitor.
pub fn confirmation_email(name: &str, owner: &OwnerConfig, base_url: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h1 style="color: #333;">Message Received!</h1>
  <p>Hi <strong>{name}</strong>,</p>
  <p>Thank you for reaching out through my portfolio. I typically respond within
  24 hours and will get back to you as soon as possible.</p>
  <p>In the meantime, feel free to explore
  <a href="{base_url}/projects">my projects</a> and
  <a href="{base_url}/experience">experience</a>, or find me on
  <a href="{github}">GitHub</a>.</p>
  <p style="color: #666;">Best regards,<br><strong>{owner_name}</strong><br>{owner_title}</p>
</div>"#,
        name = escape_html(name),
        base_url = base_url,
        github = owner.github_url,
        owner_name = escape_html(&owner.name),
        owner_title = escape_html(&owner.title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_escapes_visitor_input() {
        let html = notification_email("<b>Eve</b>", "eve@example.com", "hi <script>x</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(html.contains("eve@example.com"));
    }

    #[test]
    fn notification_converts_newlines() {
        let html = notification_email("A", "a@example.com", "line one\nline two");
        assert!(html.contains("line one<br>line two"));
    }

    #[test]
    fn confirmation_includes_owner_and_links() {
        let owner = OwnerConfig::default();
        let html = confirmation_email("Visitor", &owner, "https://example.com");
        assert!(html.contains("Visitor"));
        assert!(html.contains(&owner.name));
        assert!(html.contains("https://example.com/projects"));
        assert!(html.contains(&owner.github_url));
    }

    #[test]
    fn mailer_absent_without_api_key() {
        unsafe {
            std::env::remove_var("RESEND_API_KEY");
        }
        assert!(ResendMailer::from_env(&ContactConfig::default()).is_none());
    }
}
