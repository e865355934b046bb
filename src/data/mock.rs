//! Seed data for the console
//!
//! Every management screen starts from these rows. The seeds mirror the
//! production fixtures so renders stay deterministic in tests.

use chrono::NaiveDate;

use super::model::{
    BundleRow, BundleType, EventRow, GameRow, MonthlyStat, Notification, PackageRow, PromoKind,
    PromoRow, Role, Status, UserRow,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn seed_events() -> Vec<EventRow> {
    vec![
        EventRow {
            id: 1,
            name: "Aura Bundle Event".to_string(),
            bundle: "Aura Bundle".to_string(),
            date: date(2025, 2, 1),
            start_time: "10:00 AM".to_string(),
            end_time: "12:00 PM".to_string(),
            status: Status::Active,
            state: "California".to_string(),
        },
        EventRow {
            id: 2,
            name: "Call Bundle Event".to_string(),
            bundle: "Call Bundle".to_string(),
            date: date(2025, 2, 2),
            start_time: "11:00 AM".to_string(),
            end_time: "01:00 PM".to_string(),
            status: Status::Active,
            state: "Texas".to_string(),
        },
        EventRow {
            id: 3,
            name: "Premium Bundle Event".to_string(),
            bundle: "Premium Bundle".to_string(),
            date: date(2025, 2, 3),
            start_time: "12:00 PM".to_string(),
            end_time: "02:00 PM".to_string(),
            status: Status::Inactive,
            state: "Florida".to_string(),
        },
    ]
}

pub fn seed_games() -> Vec<GameRow> {
    vec![
        GameRow {
            id: 1,
            name: "Aura Bundle Event".to_string(),
            description: "An exciting game with Aura bundles.".to_string(),
            created: date(2025, 2, 1),
            status: Status::Active,
        },
        GameRow {
            id: 2,
            name: "Call Bundle Event".to_string(),
            description: "A thrilling Call bundle event.".to_string(),
            created: date(2025, 2, 2),
            status: Status::Active,
        },
        GameRow {
            id: 3,
            name: "Premium Bundle Event".to_string(),
            description: "Premium bundles with exclusive features.".to_string(),
            created: date(2025, 2, 3),
            status: Status::Inactive,
        },
    ]
}

pub fn seed_promos() -> Vec<PromoRow> {
    vec![
        PromoRow {
            id: 1,
            code: "AURA50".to_string(),
            kind: PromoKind::Percentage,
            value: "50%".to_string(),
            max_uses: 200,
            status: Status::Active,
        },
        PromoRow {
            id: 2,
            code: "CALL100".to_string(),
            kind: PromoKind::Flat,
            value: "100".to_string(),
            max_uses: 50,
            status: Status::Active,
        },
        PromoRow {
            id: 3,
            code: "PREMIUM25".to_string(),
            kind: PromoKind::Percentage,
            value: "25%".to_string(),
            max_uses: 100,
            status: Status::Inactive,
        },
    ]
}

pub fn seed_bundles() -> Vec<BundleRow> {
    vec![
        BundleRow {
            id: 1,
            bundle_type: BundleType::Aura,
            aura_amount: 550,
            price: "$4.99".to_string(),
            stock: 2000,
            created: date(2025, 2, 1),
            status: Status::Active,
        },
        BundleRow {
            id: 2,
            bundle_type: BundleType::Call,
            aura_amount: 100,
            price: "10 min".to_string(),
            stock: 950,
            created: date(2025, 2, 2),
            status: Status::Active,
        },
        BundleRow {
            id: 3,
            bundle_type: BundleType::Aura,
            aura_amount: 3000,
            price: "$19.99".to_string(),
            stock: 120,
            created: date(2025, 2, 3),
            status: Status::Inactive,
        },
    ]
}

pub fn seed_users() -> Vec<UserRow> {
    vec![
        UserRow {
            id: 1,
            name: "Sabbir Ahmed".to_string(),
            email: "sabbir@example.com".to_string(),
            address: "Dhaka, BD".to_string(),
            phone: "+8801711000000".to_string(),
            joined: date(2025, 2, 1),
            role: Role::Admin,
            status: Status::Active,
        },
        UserRow {
            id: 2,
            name: "Arif Hossain".to_string(),
            email: "arif@example.com".to_string(),
            address: "Chattogram, BD".to_string(),
            phone: "+8801811000000".to_string(),
            joined: date(2025, 2, 5),
            role: Role::User,
            status: Status::Active,
        },
        UserRow {
            id: 3,
            name: "Nusrat Jahan".to_string(),
            email: "nusrat@example.com".to_string(),
            address: "Sylhet, BD".to_string(),
            phone: "+8801911000000".to_string(),
            joined: date(2025, 2, 10),
            role: Role::Moderator,
            status: Status::Inactive,
        },
    ]
}

pub fn seed_packages() -> Vec<PackageRow> {
    vec![
        PackageRow {
            id: 1,
            name: "Starter Aura".to_string(),
            duration: "7 days".to_string(),
            price: 4.99,
            stock: 2000,
            status: Status::Active,
        },
        PackageRow {
            id: 2,
            name: "Pro Aura".to_string(),
            duration: "30 days".to_string(),
            price: 9.99,
            stock: 950,
            status: Status::Active,
        },
        PackageRow {
            id: 3,
            name: "Premium Aura".to_string(),
            duration: "90 days".to_string(),
            price: 19.99,
            stock: 120,
            status: Status::Inactive,
        },
    ]
}

pub fn seed_notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: "n1".to_string(),
            title: "Payment received".to_string(),
            description: "Invoice #AUR-1029 has been paid.".to_string(),
            time: "2 min ago".to_string(),
            read: false,
        },
        Notification {
            id: "n2".to_string(),
            title: "New user signup".to_string(),
            description: "Rakib Hasan just joined.".to_string(),
            time: "10 min ago".to_string(),
            read: false,
        },
        Notification {
            id: "n3".to_string(),
            title: "Server status".to_string(),
            description: "US-East latency back to normal.".to_string(),
            time: "1 hour ago".to_string(),
            read: true,
        },
    ]
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn monthly(matches: [u64; 12], trend: [u64; 12]) -> Vec<MonthlyStat> {
    MONTHS
        .iter()
        .zip(matches)
        .zip(trend)
        .map(|((month, matches), trend)| MonthlyStat {
            month,
            matches,
            trend,
        })
        .collect()
}

/// Monthly activity for the dashboard chart, keyed by year.
pub fn seed_monthly(year: u16) -> Vec<MonthlyStat> {
    match year {
        2023 => monthly(
            [18, 28, 22, 32, 12, 48, 16, 42, 52, 38, 28, 20],
            [55, 58, 62, 64, 68, 72, 66, 69, 71, 78, 58, 52],
        ),
        _ => monthly(
            [20, 35, 25, 40, 15, 60, 20, 55, 60, 45, 35, 25],
            [60, 65, 76, 68, 78, 87, 72, 74, 76, 93, 63, 58],
        ),
    }
}

/// Retention cohorts as (label, percentage).
pub fn seed_retention() -> Vec<(&'static str, u16)> {
    vec![("Day 1", 56), ("Day 7", 64), ("Day 30", 76)]
}

/// Top cities as (rank, city, population, signups).
pub fn seed_cities() -> Vec<(u8, &'static str, &'static str, u32)> {
    vec![
        (1, "New York", "8M", 300),
        (2, "Los Angeles", "8M", 300),
        (3, "Chicago", "8M", 300),
        (4, "New York", "8M", 300),
    ]
}

/// Gender demographics as (label, count, share).
pub fn seed_demographics() -> Vec<(&'static str, u32, &'static str)> {
    vec![
        ("Men", 93, "31.00%"),
        ("Women", 85, "28.33%"),
        ("Non-Binary", 53, "17.67%"),
        ("Trans Men", 43, "14.33%"),
        ("Trans Women", 26, "8.67%"),
    ]
}
