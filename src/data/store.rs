//! In-memory data store
//!
//! Holds every collection the screens manage. Mutations follow the
//! management-table contract: new rows are inserted at the top with an
//! Active status, ids grow from the current maximum, and toggling flips
//! a single row's status in place.

use serde::Serialize;

use super::mock;
use super::model::{
    BundleRow, EventRow, GameRow, Notification, PackageRow, PromoRow, ServerMetrics, Status,
    UserRow, VideoCallSettings,
};
use crate::error::Error;

/// Row that can live in a managed table.
pub trait TableRow {
    fn id(&self) -> u64;
    fn status_mut(&mut self) -> &mut Status;
}

macro_rules! impl_table_row {
    ($($row:ty),+ $(,)?) => {
        $(impl TableRow for $row {
            fn id(&self) -> u64 {
                self.id
            }

            fn status_mut(&mut self) -> &mut Status {
                &mut self.status
            }
        })+
    };
}

impl_table_row!(EventRow, GameRow, PromoRow, BundleRow, UserRow, PackageRow);

/// Next id for a new row: one past the current maximum.
pub fn next_id<T: TableRow>(rows: &[T]) -> u64 {
    rows.iter().map(TableRow::id).max().unwrap_or(0) + 1
}

/// Insert a freshly created row at the top of the table.
pub fn insert_top<T: TableRow>(rows: &mut Vec<T>, row: T) {
    rows.insert(0, row);
}

/// Flip one row's status. Returns false when the id is unknown.
pub fn toggle_status<T: TableRow>(rows: &mut [T], id: u64) -> bool {
    match rows.iter_mut().find(|row| row.id() == id) {
        Some(row) => {
            let status = row.status_mut();
            *status = status.toggled();
            true
        }
        None => false,
    }
}

/// Remove one row. Returns false when the id is unknown.
pub fn delete_row<T: TableRow>(rows: &mut Vec<T>, id: u64) -> bool {
    let before = rows.len();
    rows.retain(|row| row.id() != id);
    rows.len() != before
}

pub fn find_mut<T: TableRow>(rows: &mut [T], id: u64) -> Option<&mut T> {
    rows.iter_mut().find(|row| row.id() == id)
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DataStore {
    pub events: Vec<EventRow>,
    pub games: Vec<GameRow>,
    pub promos: Vec<PromoRow>,
    pub bundles: Vec<BundleRow>,
    pub users: Vec<UserRow>,
    pub packages: Vec<PackageRow>,
    pub notifications: Vec<Notification>,
    pub settings: VideoCallSettings,
    pub metrics: ServerMetrics,
}

impl DataStore {
    /// Store populated with the seed fixtures.
    pub fn seeded() -> Self {
        Self {
            events: mock::seed_events(),
            games: mock::seed_games(),
            promos: mock::seed_promos(),
            bundles: mock::seed_bundles(),
            users: mock::seed_users(),
            packages: mock::seed_packages(),
            notifications: mock::seed_notifications(),
            settings: VideoCallSettings::default(),
            metrics: ServerMetrics::default(),
        }
    }

    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn mark_notification_read(&mut self, id: &str) {
        if let Some(notification) = self.notifications.iter_mut().find(|n| n.id == id) {
            notification.read = true;
        }
    }

    pub fn mark_all_notifications_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }
    }

    /// Every collection as pretty JSON, for the fixture export flag.
    pub fn export_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Status;

    #[test]
    fn test_next_id_is_one_past_max() {
        let store = DataStore::seeded();
        assert_eq!(next_id(&store.events), 4);
        assert_eq!(next_id(&Vec::<EventRow>::new()), 1);
    }

    #[test]
    fn test_insert_top_puts_new_row_first() {
        let mut store = DataStore::seeded();
        let mut row = store.events[0].clone();
        row.id = next_id(&store.events);
        row.name = "Spring Launch".to_string();
        insert_top(&mut store.events, row);
        assert_eq!(store.events[0].name, "Spring Launch");
        assert_eq!(store.events.len(), 4);
    }

    #[test]
    fn test_toggle_status_flips_only_target() {
        let mut store = DataStore::seeded();
        assert!(toggle_status(&mut store.events, 1));
        assert_eq!(store.events[0].status, Status::Inactive);
        assert_eq!(store.events[1].status, Status::Active);
        assert!(!toggle_status(&mut store.events, 99));
    }

    #[test]
    fn test_delete_row_removes_by_id() {
        let mut store = DataStore::seeded();
        assert!(delete_row(&mut store.games, 2));
        assert_eq!(store.games.len(), 2);
        assert!(store.games.iter().all(|g| g.id != 2));
        assert!(!delete_row(&mut store.games, 2));
    }

    #[test]
    fn test_notification_read_tracking() {
        let mut store = DataStore::seeded();
        assert_eq!(store.unread_notifications(), 2);
        store.mark_notification_read("n1");
        assert_eq!(store.unread_notifications(), 1);
        store.mark_all_notifications_read();
        assert_eq!(store.unread_notifications(), 0);
    }

    #[test]
    fn test_export_json_carries_every_collection() {
        let store = DataStore::seeded();
        let json = store.export_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for key in [
            "events",
            "games",
            "promos",
            "bundles",
            "users",
            "packages",
            "notifications",
            "settings",
            "metrics",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["events"].as_array().unwrap().len(), 3);
    }
}
