// src/comms/mailer.rs

use crate::config::MailerConfig;
use crate::errors::ServerError;
use serde_json::json;

/// Transactional mail via Brevo's v3 API. The only mail this app sends is
/// the password-reset link.
pub struct BrevoMailer {
    cfg: MailerConfig,
}

impl BrevoMailer {
    pub fn new(cfg: MailerConfig) -> Self {
        Self { cfg }
    }

    pub fn send_reset_link(&self, to_email: &str, reset_link: &str) -> Result<(), ServerError> {
        let client = reqwest::blocking::Client::new();

        let subject = "Reset your LeadLedger password";
        let html_content = format!(
            r#"
            <html>
                <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
                    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
                        <h2>Password reset</h2>
                        <p>Click the link below to choose a new password. This link expires in 15 minutes and can be used once.</p>
                        <p style="margin: 25px 0;">
                            <a href="{link}" style="background-color: #007bff; color: white; padding: 10px 20px; text-decoration: none; border-radius: 5px; display: inline-block;">
                                Reset Password
                            </a>
                        </p>
                        <p style="font-size: 0.9em; color: #666;">
                            Or copy and paste this link into your browser:<br>
                            <a href="{link}" style="color: #007bff;">{link}</a>
                        </p>
                        <hr style="margin-top: 30px; border: none; border-top: 1px solid #eee;">
                        <p style="font-size: 0.8em; color: #999;">
                            If you didn't ask to reset your password, you can safely ignore this email.
                        </p>
                    </div>
                </body>
            </html>
            "#,
            link = reset_link
        );

        let body = json!({
            "sender": {
                "name": self.cfg.sender_name,
                "email": self.cfg.sender_email
            },
            "to": [
                {
                    "email": to_email
                }
            ],
            "subject": subject,
            "htmlContent": html_content
        });

        let response = client
            .post("https://api.brevo.com/v3/smtp/email")
            .header("api-key", &self.cfg.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .map_err(|e| ServerError::MailError(format!("failed to send email request: {e}")))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let text = response.text().unwrap_or_else(|_| "(no body)".to_string());
            Err(ServerError::MailError(format!(
                "Brevo API error: {status} - {text}"
            )))
        }
    }
}

/// Deliver a reset link, or log it when no mailer is configured (local
/// development). Delivery problems are the caller's to surface.
pub fn deliver_reset_link(
    mailer: &Option<MailerConfig>,
    to_email: &str,
    reset_link: &str,
) -> Result<(), ServerError> {
    match mailer {
        Some(cfg) => BrevoMailer::new(cfg.clone()).send_reset_link(to_email, reset_link),
        None => {
            log::info!("no mailer configured; reset link for {to_email}: {reset_link}");
            Ok(())
        }
    }
}
