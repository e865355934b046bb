//! Domain model for the admin console
//!
//! Row types backing the management tables, plus the notification and
//! settings records the chrome and settings screen work with. Everything
//! derives serde so rows round-trip through the config/export paths.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Row activation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Status::Active)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Status::Active => Status::Inactive,
            Status::Inactive => Status::Active,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Active" => Some(Status::Active),
            "Inactive" => Some(Status::Inactive),
            _ => None,
        }
    }
}

/// Discount kind for promo codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PromoKind {
    #[default]
    Percentage,
    Flat,
}

impl PromoKind {
    pub fn label(&self) -> &'static str {
        match self {
            PromoKind::Percentage => "Percentage",
            PromoKind::Flat => "Flat",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Percentage" => Some(PromoKind::Percentage),
            "Flat" => Some(PromoKind::Flat),
            _ => None,
        }
    }
}

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Role {
    Admin,
    Moderator,
    #[default]
    User,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Moderator => "Moderator",
            Role::User => "User",
        }
    }

    pub fn all() -> &'static [Role] {
        &[Role::Admin, Role::Moderator, Role::User]
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Admin" => Some(Role::Admin),
            "Moderator" => Some(Role::Moderator),
            "User" => Some(Role::User),
            _ => None,
        }
    }
}

/// Shop bundle kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BundleType {
    #[default]
    Aura,
    Call,
}

impl BundleType {
    pub fn label(&self) -> &'static str {
        match self {
            BundleType::Aura => "Aura Bundle",
            BundleType::Call => "Call Bundle",
        }
    }
}

/// Scheduled event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRow {
    pub id: u64,
    pub name: String,
    /// Bundle label the event promotes ("Aura Bundle", "Call Bundle", ...)
    pub bundle: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: Status,
    pub state: String,
}

/// Game listed on the game management screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRow {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub created: NaiveDate,
    pub status: Status,
}

/// Promo code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoRow {
    pub id: u64,
    pub code: String,
    pub kind: PromoKind,
    /// Discount value: "50%" for percentage, aura amount for flat
    pub value: String,
    pub max_uses: u32,
    pub status: Status,
}

/// Shop bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleRow {
    pub id: u64,
    pub bundle_type: BundleType,
    pub aura_amount: u32,
    /// Display price: "$4.99" for aura bundles, "10 min" for call bundles
    pub price: String,
    pub stock: u32,
    pub created: NaiveDate,
    pub status: Status,
}

/// Registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub joined: NaiveDate,
    pub role: Role,
    pub status: Status,
}

/// Aura package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRow {
    pub id: u64,
    pub name: String,
    pub duration: String,
    pub price: f64,
    pub stock: u32,
    pub status: Status,
}

/// Header notification entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub description: String,
    pub time: String,
    pub read: bool,
}

/// One month of activity for the dashboard chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStat {
    pub month: &'static str,
    pub matches: u64,
    /// Engagement trend index plotted alongside the match count
    pub trend: u64,
}

/// Live server metrics shown on the dashboard, jittered within bounds on
/// each refresh tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerMetrics {
    pub uptime_pct: f64,
    pub latency_ms: f64,
    pub error_rate_pct: f64,
    pub churn_rate_pct: f64,
}

impl Default for ServerMetrics {
    fn default() -> Self {
        Self {
            uptime_pct: 99.98,
            latency_ms: 82.0,
            error_rate_pct: 0.03,
            churn_rate_pct: 3.5,
        }
    }
}

impl ServerMetrics {
    /// Bounded random walk, one step per refresh.
    pub fn jitter<R: rand::Rng>(&mut self, rng: &mut R) {
        self.uptime_pct = (self.uptime_pct + rng.gen_range(-0.01..0.01)).clamp(99.90, 99.99);
        self.latency_ms = (self.latency_ms + rng.gen_range(-4.0..4.0)).clamp(50.0, 120.0);
        self.error_rate_pct = (self.error_rate_pct + rng.gen_range(-0.005..0.005)).clamp(0.0, 0.1);
        self.churn_rate_pct = (self.churn_rate_pct + rng.gen_range(-0.1..0.1)).clamp(2.0, 5.0);
    }
}

/// Video call settings, edited on the settings screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoCallSettings {
    /// Initial call length in seconds before a user must add time
    pub timer_seconds: u32,
    pub free_add_time_uses: u32,
    pub max_call_duration_min: u32,
    /// Call overlay color as "#RRGGBB"
    pub overlay_color: String,
    pub saved_colors: Vec<String>,
}

impl Default for VideoCallSettings {
    fn default() -> Self {
        Self {
            timer_seconds: 60,
            free_add_time_uses: 3,
            max_call_duration_min: 30,
            overlay_color: "#4F46E5".to_string(),
            saved_colors: vec![
                "#ef4444".to_string(),
                "#f97316".to_string(),
                "#eab308".to_string(),
                "#22c55e".to_string(),
                "#06b6d4".to_string(),
                "#3b82f6".to_string(),
                "#8b5cf6".to_string(),
                "#ec4899".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_toggle_round_trip() {
        assert_eq!(Status::Active.toggled(), Status::Inactive);
        assert_eq!(Status::Inactive.toggled(), Status::Active);
        assert_eq!(Status::from_label("Active"), Some(Status::Active));
        assert_eq!(Status::from_label("Deleted"), None);
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::all().len(), 3);
        for role in Role::all() {
            assert_eq!(Role::from_label(role.label()), Some(*role));
        }
    }

    #[test]
    fn test_server_metrics_stay_bounded() {
        let mut metrics = ServerMetrics::default();
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            metrics.jitter(&mut rng);
            assert!((99.90..=99.99).contains(&metrics.uptime_pct));
            assert!((50.0..=120.0).contains(&metrics.latency_ms));
            assert!((0.0..=0.1).contains(&metrics.error_rate_pct));
            assert!((2.0..=5.0).contains(&metrics.churn_rate_pct));
        }
    }

    #[test]
    fn test_event_row_serde_round_trip() {
        let row = EventRow {
            id: 1,
            name: "Aura Bundle Event".to_string(),
            bundle: "Aura Bundle".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            start_time: "10:00 AM".to_string(),
            end_time: "12:00 PM".to_string(),
            status: Status::Active,
            state: "California".to_string(),
        };
        let json = serde_json::to_string(&row).unwrap();
        let back: EventRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }
}
