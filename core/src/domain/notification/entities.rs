use uuid::Uuid;

pub const TASK_ASSIGNED_SUBJECT: &str = "Welcome Email to Datahub";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub recipients: Vec<String>,
    pub body: String,
}

impl EmailMessage {
    pub fn task_assigned(recipient: String, task_id: Uuid) -> Self {
        Self {
            subject: TASK_ASSIGNED_SUBJECT.to_string(),
            recipients: vec![recipient],
            body: format!("You have assigned the task {task_id}"),
        }
    }
}
