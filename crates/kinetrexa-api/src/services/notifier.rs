//! Email notifier for application status changes via SMTP.
//!
//! Strictly best-effort: a failed send is logged and never fails the admin
//! request that triggered it.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;

use kinetrexa_core::models::{Application, ApplicationStatus};
use kinetrexa_core::Config;

/// Status-change notifier. `None` if notifications are disabled or SMTP is
/// not configured.
#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
    frontend_url: Option<String>,
}

impl Notifier {
    /// Create the notifier from config. Returns `None` if disabled or SMTP not configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        if !config.email_notifications_enabled() {
            tracing::debug!("Email notifications disabled (EMAIL_NOTIFICATIONS_ENABLED=false)");
            return None;
        }
        let host = config.smtp_host()?;
        let from = config.smtp_from()?.to_string();
        let port = config.smtp_port().unwrap_or(587);

        let mailer = if config.smtp_tls() {
            let b = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).ok()?;
            let b = b.port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Notifier initialized (SMTP with STARTTLS)");
            b.build()
        } else {
            let b = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Notifier initialized (SMTP)");
            b.build()
        };

        Some(Self {
            mailer: Arc::new(mailer),
            from,
            frontend_url: config.frontend_url().map(String::from),
        })
    }

    /// Notify the applicant that their status changed. Errors are logged, not returned.
    pub async fn send_status_update(&self, application: &Application, domain: &str) {
        let subject = format!(
            "Your KineTrexa application {} is now {}",
            application.public_id, application.status
        );
        let body = self.status_body(application, domain);

        if let Err(err) = self
            .send(&application.applicant.email, &subject, &body)
            .await
        {
            tracing::warn!(
                error = %err,
                public_id = %application.public_id,
                "Failed to send status notification"
            );
        } else {
            tracing::info!(
                public_id = %application.public_id,
                status = %application.status,
                "Status notification sent"
            );
        }
    }

    fn status_body(&self, application: &Application, domain: &str) -> String {
        let mut body = format!(
            "Hi {},\n\nYour application {} for the {} internship is now: {}.\n",
            application.applicant.first_name, application.public_id, domain, application.status
        );

        match application.status {
            ApplicationStatus::Selected => {
                body.push_str("\nYour offer letter is now available for download.\n");
            }
            ApplicationStatus::Completed => {
                body.push_str(
                    "\nCongratulations on completing the program! Your certificate becomes \
                     available once the internship officially ends.\n",
                );
            }
            _ => {}
        }

        if let Some(ref url) = self.frontend_url {
            body.push_str(&format!(
                "\nTrack your application: {}/check-status\n",
                url.trim_end_matches('/')
            ));
        }

        body.push_str("\n- The KineTrexa Team\n");
        body
    }

    async fn send(&self, to: &str, subject: &str, body_plain: &str) -> Result<(), String> {
        let to_addr: Mailbox = to
            .parse()
            .map_err(|e| format!("Invalid recipient address: {}", e))?;
        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|e| format!("Invalid SMTP_FROM: {}", e))?;

        let email = Message::builder()
            .from(from_addr)
            .to(to_addr)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body_plain.to_string())
            .map_err(|e| e.to_string())?;

        self.mailer.send(email).await.map_err(|e| e.to_string())?;
        Ok(())
    }
}
