use chrono::{Local, NaiveDate};

/// Display category for a membership, derived at render time from the expiry
/// date and the current calendar date. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatus {
    Expired,
    ExpiringSoon,
    Active,
    /// The expiry date could not be parsed. Rendered as its own badge rather
    /// than silently passing as Active.
    Unknown,
}

impl MemberStatus {
    pub fn label(self) -> &'static str {
        match self {
            MemberStatus::Expired => "EXPIRED",
            MemberStatus::ExpiringSoon => "EXPIRING SOON",
            MemberStatus::Active => "ACTIVE",
            MemberStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            MemberStatus::Expired => "status-expired",
            MemberStatus::ExpiringSoon => "status-expiring",
            MemberStatus::Active => "status-active",
            MemberStatus::Unknown => "status-unknown",
        }
    }
}

/// Calendar-day difference from `today` to `expiry`, not time-of-day aware.
pub fn days_until(today: NaiveDate, expiry: NaiveDate) -> i64 {
    (expiry - today).num_days()
}

pub fn classify(expiry_date: &str) -> MemberStatus {
    classify_at(Local::now().date_naive(), expiry_date)
}

pub fn classify_at(today: NaiveDate, expiry_date: &str) -> MemberStatus {
    let Ok(expiry) = NaiveDate::parse_from_str(expiry_date.trim(), "%Y-%m-%d") else {
        return MemberStatus::Unknown;
    };
    classify_days(days_until(today, expiry))
}

pub fn classify_days(days: i64) -> MemberStatus {
    if days < 0 {
        MemberStatus::Expired
    } else if days <= 7 {
        MemberStatus::ExpiringSoon
    } else {
        MemberStatus::Active
    }
}

/// Urgency line for a reminder row, from the server-computed day count.
/// Counts of zero or less are urgent.
pub fn urgency_label(days_until_expiry: i64) -> (String, bool) {
    match days_until_expiry {
        0 => ("EXPIRES TODAY!".to_string(), true),
        d if d < 0 => (format!("EXPIRED {} DAYS AGO!", d.abs()), true),
        1 => ("Expires TOMORROW!".to_string(), false),
        d => (format!("Expires in {d} days"), false),
    }
}
