//! Row types for the LexFlow data store

use serde::{Deserialize, Serialize};

/// Role of an application user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Lawyer,
    Client,
}

/// Application-level user record, keyed by the identity provider's user id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Equals the id of the identity this profile belongs to
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub created_at: String,
    pub updated_at: String,
}

/// Status of a legal case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessStatus {
    Active,
    Pending,
    Closed,
    Archived,
}

/// A legal case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub id: String,
    /// Court-assigned case number
    pub number: String,
    pub title: String,
    pub description: Option<String>,
    pub status: ProcessStatus,
    pub client_id: String,
    pub lawyer_id: String,
    pub court: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Status of a deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineStatus {
    Pending,
    Completed,
    Overdue,
}

/// A deadline attached to a process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    pub id: String,
    pub process_id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: String,
    pub status: DeadlineStatus,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Title of a process embedded in a joined query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessTitle {
    pub title: String,
}

/// A deadline joined with the title of its owning process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineWithProcess {
    #[serde(flatten)]
    pub deadline: Deadline,
    /// Embedded parent row from `processes(title)`; `None` when the join
    /// found no parent
    pub processes: Option<ProcessTitle>,
}

/// Kind of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Deadline,
    Process,
    Document,
    System,
}

/// A notification targeted at one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub read: bool,
    pub created_at: String,
}

/// A client of the practice, as registered by a lawyer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: String,
    /// Set when the client also has an application login
    pub user_id: Option<String>,
    pub lawyer_id: String,
    pub full_name: String,
    pub cpf_cnpj: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
