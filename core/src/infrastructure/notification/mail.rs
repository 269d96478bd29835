use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::domain::{
    common::{MailConfig, entities::app_errors::CoreError},
    notification::{entities::EmailMessage, ports::TaskNotifier},
    task::entities::Task,
};

/// Number of suppressed messages kept; older ones are discarded first.
pub const OUTBOX_CAPACITY: usize = 100;

/// Mail adapter. With `suppress_send` the latest messages are kept in a
/// bounded in-memory outbox instead of being delivered.
#[derive(Debug, Clone)]
pub struct MailNotifier {
    config: MailConfig,
    outbox: Arc<Mutex<VecDeque<EmailMessage>>>,
}

impl MailNotifier {
    pub fn new(config: MailConfig) -> Self {
        Self {
            config,
            outbox: Arc::new(Mutex::new(VecDeque::with_capacity(OUTBOX_CAPACITY))),
        }
    }

    pub fn outbox(&self) -> Vec<EmailMessage> {
        self.outbox
            .lock()
            .map(|messages| messages.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn send(&self, message: EmailMessage) -> Result<(), CoreError> {
        if !self.config.suppress_send {
            warn!(
                from = %self.config.from,
                "No mail transport configured, dropping message"
            );
            return Ok(());
        }

        info!(
            from = %self.config.from,
            recipients = ?message.recipients,
            subject = %message.subject,
            "Mail suppressed, recorded in outbox"
        );
        let mut outbox = self
            .outbox
            .lock()
            .map_err(|_| CoreError::InternalServerError)?;
        if outbox.len() == OUTBOX_CAPACITY {
            outbox.pop_front();
        }
        outbox.push_back(message);

        Ok(())
    }
}

impl TaskNotifier for MailNotifier {
    async fn notify_task_assigned(&self, recipient: String, task: Task) -> Result<(), CoreError> {
        self.send(EmailMessage::task_assigned(recipient, task.id))
    }
}
