// 📧 Statement notifications
//
// EmailNotifier renders the monthly statement and hands it to a MailTransport.
// Real SMTP delivery is outside this crate; LogTransport records the message
// in the log and Outbox keeps it in memory.

use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::models::MonthlyReportRow;

pub const DEFAULT_SUBJECT: &str = "Monthly Financial Statement";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

// ============================================================================
// TRANSPORTS
// ============================================================================

pub trait MailTransport: Send + Sync {
    fn deliver(&self, message: &StatementMessage);
}

/// Writes each message to the log instead of sending it
#[derive(Debug, Clone, Default)]
pub struct LogTransport {
    sender: Option<String>,
}

impl LogTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sender(sender: impl Into<String>) -> Self {
        LogTransport {
            sender: Some(sender.into()),
        }
    }
}

impl MailTransport for LogTransport {
    fn deliver(&self, message: &StatementMessage) {
        info!(
            from = self.sender.as_deref().unwrap_or("-"),
            to = %message.to,
            subject = %message.subject,
            "sending email:\n{}",
            message.body
        );
    }
}

/// Keeps delivered messages in memory
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    sent: Arc<Mutex<Vec<StatementMessage>>>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<StatementMessage> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.messages().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MailTransport for Outbox {
    fn deliver(&self, message: &StatementMessage) {
        match self.sent.lock() {
            Ok(mut sent) => sent.push(message.clone()),
            Err(_) => warn!(to = %message.to, "outbox lock poisoned, message dropped"),
        }
    }
}

// ============================================================================
// NOTIFIER
// ============================================================================

pub trait StatementNotifier: Send + Sync {
    /// Fire and forget; delivery problems are not reported back
    fn send_monthly_statement(&self, email: &str, balance: f64, monthly_report: &[MonthlyReportRow]);
}

pub struct EmailNotifier {
    transport: Arc<dyn MailTransport>,
    subject: String,
}

impl EmailNotifier {
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self::with_subject(transport, DEFAULT_SUBJECT)
    }

    pub fn with_subject(transport: Arc<dyn MailTransport>, subject: impl Into<String>) -> Self {
        EmailNotifier {
            transport,
            subject: subject.into(),
        }
    }

    pub fn compose(&self, email: &str, balance: f64, monthly_report: &[MonthlyReportRow]) -> StatementMessage {
        StatementMessage {
            to: email.to_string(),
            subject: self.subject.clone(),
            body: render_statement(balance, monthly_report),
        }
    }
}

impl StatementNotifier for EmailNotifier {
    fn send_monthly_statement(&self, email: &str, balance: f64, monthly_report: &[MonthlyReportRow]) {
        let message = self.compose(email, balance, monthly_report);
        self.transport.deliver(&message);
    }
}

/// Statement body: balance line, then one line per report row
pub fn render_statement(balance: f64, monthly_report: &[MonthlyReportRow]) -> String {
    let mut body = format!("Your current balance: ${:.2}\n\n", balance);
    body.push_str("Transactions this month:\n");

    for row in monthly_report {
        body.push_str(&format!(
            "- {}: {} transactions, total: ${:.2}\n",
            row.transaction_type, row.count, row.total
        ));
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_statement_format() {
        let report = vec![
            MonthlyReportRow::new("income", 150.0, 2),
            MonthlyReportRow::new("deduction", 20.5, 1),
        ];

        assert_eq!(
            render_statement(75.0, &report),
            "Your current balance: $75.00\n\n\
             Transactions this month:\n\
             - income: 2 transactions, total: $150.00\n\
             - deduction: 1 transactions, total: $20.50\n"
        );
    }

    #[test]
    fn test_render_statement_without_rows() {
        assert_eq!(
            render_statement(-12.5, &[]),
            "Your current balance: $-12.50\n\nTransactions this month:\n"
        );
    }

    #[test]
    fn test_notifier_delivers_through_transport() {
        let outbox = Outbox::new();
        let notifier = EmailNotifier::new(Arc::new(outbox.clone()));

        notifier.send_monthly_statement("ada@example.com", 10.0, &[]);

        let sent = outbox.messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ada@example.com");
        assert_eq!(sent[0].subject, DEFAULT_SUBJECT);
        assert!(sent[0].body.starts_with("Your current balance: $10.00"));
    }

    #[test]
    fn test_custom_subject() {
        let notifier = EmailNotifier::with_subject(Arc::new(LogTransport::new()), "Your statement");
        let message = notifier.compose("bob@example.com", 0.0, &[]);

        assert_eq!(message.subject, "Your statement");
        // LogTransport only logs
        notifier.send_monthly_statement("bob@example.com", 0.0, &[]);
    }
}
