//! Read-side aggregation for the dashboard
//!
//! Issues a fixed set of independent queries and merges the results into
//! one view model. Each section carries its own result so a caller can
//! tell an empty section from one that failed to load; one query failing
//! never prevents the others from populating.

use reqwest::Client;

use crate::error::Error;
use crate::models::{DeadlineWithProcess, Notification, Process};
use crate::store::TableClient;

/// How many rows each list section fetches
const SECTION_LIMIT: i32 = 5;

/// One dashboard section: the loaded data, or the error that prevented
/// loading it
pub type Section<T> = Result<T, Error>;

/// Scalar counts shown at the top of the dashboard
#[derive(Debug)]
pub struct DashboardStats {
    pub total_processes: Section<u64>,
    pub active_processes: Section<u64>,
    pub pending_deadlines: Section<u64>,
    pub total_clients: Section<u64>,
}

/// View model for the dashboard of one authenticated viewer
#[derive(Debug)]
pub struct DashboardData {
    /// Most recent processes, newest first
    pub recent_processes: Section<Vec<Process>>,

    /// Pending deadlines closest to their due date first, joined with the
    /// owning process title
    pub pending_deadlines: Section<Vec<DeadlineWithProcess>>,

    /// Unread notifications for the viewer, newest first
    pub unread_notifications: Section<Vec<Notification>>,

    pub stats: DashboardStats,
}

/// Read-side client for the dashboard queries
pub struct Dashboard {
    url: String,
    key: String,
    schema: String,
    client: Client,
}

impl Dashboard {
    /// Create a new Dashboard client
    pub(crate) fn new(url: &str, key: &str, schema: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            schema: schema.to_string(),
            client,
        }
    }

    fn table(&self, name: &str) -> TableClient {
        TableClient::new(&self.url, &self.key, name, &self.schema, self.client.clone())
    }

    /// Load the dashboard for one viewer
    ///
    /// The queries are independent and issued sequentially; none writes
    /// and none depends on another's result.
    pub async fn load(&self, viewer_id: &str) -> DashboardData {
        let recent_processes = self.recent_processes().await;
        let pending_deadlines = self.pending_deadlines().await;
        let unread_notifications = self.unread_notifications(viewer_id).await;

        let stats = DashboardStats {
            total_processes: self.table("processes").count().execute().await,
            active_processes: self
                .table("processes")
                .count()
                .eq("status", "active")
                .execute()
                .await,
            pending_deadlines: self
                .table("deadlines")
                .count()
                .eq("status", "pending")
                .execute()
                .await,
            total_clients: self.table("clients").count().execute().await,
        };

        DashboardData {
            recent_processes,
            pending_deadlines,
            unread_notifications,
            stats,
        }
    }

    async fn recent_processes(&self) -> Section<Vec<Process>> {
        self.table("processes")
            .select("*")
            .order("created_at", false)
            .limit(SECTION_LIMIT)
            .execute()
            .await
    }

    async fn pending_deadlines(&self) -> Section<Vec<DeadlineWithProcess>> {
        self.table("deadlines")
            .select("*, processes(title)")
            .eq("status", "pending")
            .order("due_date", true)
            .limit(SECTION_LIMIT)
            .execute()
            .await
    }

    async fn unread_notifications(&self, viewer_id: &str) -> Section<Vec<Notification>> {
        self.table("notifications")
            .select("*")
            .eq("user_id", viewer_id)
            .eq("read", false)
            .order("created_at", false)
            .limit(SECTION_LIMIT)
            .execute()
            .await
    }
}
