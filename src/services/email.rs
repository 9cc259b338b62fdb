//! Email dispatch
//!
//! Transactional mail for signup, contact and quote submissions. The SMTP
//! transport is built per send and failures are reported to the caller
//! exactly once — no retry, no queueing. With no SMTP host configured every
//! send fails with a clear message; callers decide whether that is fatal.

use anyhow::{anyhow, Result};
use lettre::{
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::SmtpConfig;

pub struct EmailService {
    smtp: SmtpConfig,
    public_base_url: String,
}

impl EmailService {
    pub fn new(smtp: SmtpConfig, public_base_url: String) -> Self {
        Self {
            smtp,
            public_base_url,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.smtp.is_enabled()
    }

    /// Welcome mail for a freshly created admin account. Carries the
    /// credentials the account was created with, like the legacy system did.
    pub async fn send_signup_email(
        &self,
        to: &str,
        name: &str,
        username: &str,
        password: &str,
    ) -> Result<()> {
        let subject = format!("[{}] Your admin account", self.smtp.from_name);
        let body = format!(
            "<html><body>\
             <h2>Welcome, {name}!</h2>\
             <p>An administrator account has been created for you.</p>\
             <p><b>Username:</b> {username}<br/>\
             <b>Password:</b> {password}</p>\
             <p>Sign in at <a href=\"{base}/admin\">{base}/admin</a>.</p>\
             </body></html>",
            name = name,
            username = username,
            password = password,
            base = self.public_base_url,
        );
        self.send(to, subject, body).await
    }

    /// Notify the site inbox about a contact submission.
    pub async fn send_contact_notification(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        message: &str,
    ) -> Result<()> {
        let to = self.smtp.notify_address.clone();
        if to.is_empty() {
            return Err(anyhow!("Notification address is not configured"));
        }
        let subject = format!("[{}] New contact message from {}", self.smtp.from_name, name);
        let body = format!(
            "<html><body>\
             <h2>New contact message</h2>\
             <p><b>Name:</b> {name}<br/>\
             <b>Email:</b> {email}<br/>\
             <b>Phone:</b> {phone}</p>\
             <blockquote>{message}</blockquote>\
             </body></html>",
            name = name,
            email = email,
            phone = phone.unwrap_or("-"),
            message = message,
        );
        self.send(&to, subject, body).await
    }

    /// Confirm receipt to the visitor who submitted the contact form.
    pub async fn send_contact_confirmation(&self, to: &str, name: &str) -> Result<()> {
        let subject = format!("[{}] We received your message", self.smtp.from_name);
        let body = format!(
            "<html><body>\
             <h2>Thank you, {name}!</h2>\
             <p>We received your message and will get back to you shortly.</p>\
             <p>The {team} team</p>\
             </body></html>",
            name = name,
            team = self.smtp.from_name,
        );
        self.send(to, subject, body).await
    }

    /// Notify the site inbox about a quote request.
    pub async fn send_quote_notification(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        service: Option<&str>,
        message: &str,
    ) -> Result<()> {
        let to = self.smtp.notify_address.clone();
        if to.is_empty() {
            return Err(anyhow!("Notification address is not configured"));
        }
        let subject = format!("[{}] New quote request from {}", self.smtp.from_name, name);
        let body = format!(
            "<html><body>\
             <h2>New quote request</h2>\
             <p><b>Name:</b> {name}<br/>\
             <b>Email:</b> {email}<br/>\
             <b>Phone:</b> {phone}<br/>\
             <b>Service:</b> {service}</p>\
             <blockquote>{message}</blockquote>\
             </body></html>",
            name = name,
            email = email,
            phone = phone,
            service = service.unwrap_or("-"),
            message = message,
        );
        self.send(&to, subject, body).await
    }

    /// Confirm receipt to the visitor who requested a quote.
    pub async fn send_quote_confirmation(&self, to: &str, name: &str) -> Result<()> {
        let subject = format!("[{}] We received your quote request", self.smtp.from_name);
        let body = format!(
            "<html><body>\
             <h2>Thank you, {name}!</h2>\
             <p>We received your quote request and will contact you with an \
             estimate shortly.</p>\
             <p>The {team} team</p>\
             </body></html>",
            name = name,
            team = self.smtp.from_name,
        );
        self.send(to, subject, body).await
    }

    async fn send(&self, to: &str, subject: String, html_body: String) -> Result<()> {
        if !self.is_enabled() {
            return Err(anyhow!("SMTP host is not configured"));
        }

        let from = format!("{} <{}>", self.smtp.from_name, self.smtp.from_address);
        let email = Message::builder()
            .from(from.parse().map_err(|e| anyhow!("Invalid from address: {}", e))?)
            .to(to.parse().map_err(|e| anyhow!("Invalid to address: {}", e))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body)
            .map_err(|e| anyhow!("Failed to build email: {}", e))?;

        let creds = Credentials::new(self.smtp.username.clone(), self.smtp.password.clone());
        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.smtp.host)
                .map_err(|e| anyhow!("Failed to create SMTP transport: {}", e))?
                .credentials(creds)
                .port(self.smtp.port)
                .build();

        mailer
            .send(email)
            .await
            .map_err(|e| anyhow!("Failed to send email: {}", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disabled_service() -> EmailService {
        EmailService::new(
            SmtpConfig {
                host: String::new(),
                port: 587,
                username: String::new(),
                password: String::new(),
                from_address: String::new(),
                from_name: "Atrium".into(),
                notify_address: String::new(),
            },
            "http://localhost:3000".into(),
        )
    }

    #[tokio::test]
    async fn sends_fail_cleanly_when_unconfigured() {
        let service = disabled_service();
        assert!(!service.is_enabled());

        let err = service
            .send_signup_email("a@x.com", "A", "a", "pw123")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }

    #[tokio::test]
    async fn notification_requires_notify_address() {
        let config = SmtpConfig {
            host: "smtp.example.com".into(),
            port: 587,
            username: "user".into(),
            password: "pass".into(),
            from_address: "noreply@example.com".into(),
            from_name: "Atrium".into(),
            notify_address: String::new(),
        };
        let service = EmailService::new(config, "http://localhost:3000".into());

        let err = service
            .send_contact_notification("V", "v@x.com", None, "hello")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Notification address"));
    }
}
