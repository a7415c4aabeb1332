use serde::{Deserialize, Serialize};

/// Member record as returned by the club backend search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRecord {
    pub id: i64,
    pub name: String,
    pub membership_type: String,
    pub expiry_date: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Member needing an SMS reminder; `days_until_expiry` is computed server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderRecord {
    pub id: i64,
    pub name: String,
    pub membership_type: String,
    pub phone: String,
    pub expiry_date: String,
    pub days_until_expiry: i64,
}

/// Slim contact row from the members-with-phones endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneContact {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

/// Result of asking the backend to send a single SMS reminder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub days_until_expiry: Option<i64>,
}

/// One month of revenue for the trend bars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueMonth {
    pub label: String,
    pub total: f64,
}

/// Typed dashboard summary. Loaded once at startup and handed straight to the
/// renderers; numbers are never read back out of markup.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardSummary {
    pub total_members: u64,
    pub active_memberships: u64,
    pub expiring_soon: u64,
    pub payments_due: u64,
    pub classes_today: u64,
    pub member_satisfaction: f64,
    pub members_with_phones: u64,
    pub members_needing_reminders: u64,
    pub recent_reminders: u64,
    #[serde(default)]
    pub revenue_months: Vec<RevenueMonth>,
}

impl DashboardSummary {
    /// Expired slice for the membership doughnut.
    pub fn expired_memberships(&self) -> u64 {
        self.total_members.saturating_sub(self.active_memberships)
    }

    /// Satisfaction clamped to the 1.0–5.0 scale the card displays.
    pub fn satisfaction_display(&self) -> f64 {
        self.member_satisfaction.clamp(1.0, 5.0)
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Response for the send-reminder endpoints. On success the page is told when
/// to reload the reminder list; on failure nothing is scheduled.
#[derive(Debug, Serialize, Deserialize)]
pub struct SendReminderResponse {
    pub success: bool,
    pub notification: NotificationView,
    #[serde(default)]
    pub reload_after_ms: Option<u64>,
}

/// Notification as shipped to the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationView {
    pub id: u64,
    pub message: String,
    pub severity: String,
}
