use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::f32::consts::PI;

pub const CROP: &str = "Pink Oyster";

pub fn cycle_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 1).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub label: String,
    pub temperature: f32,
    pub humidity: f32,
}

/// 25 hourly samples ending at `now` (local wall clock), oldest first.
pub fn generate_history<R: Rng + ?Sized>(now: NaiveDateTime, rng: &mut R) -> Vec<HistoryPoint> {
    (0..=24i64)
        .rev()
        .map(|i| {
            let at = now - Duration::hours(i);
            let hour_factor = ((24 - i) as f32 * PI / 12.0).sin();
            HistoryPoint {
                label: at.format("%H:%M").to_string(),
                temperature: 28.0 + hour_factor * 2.0 + rng.random_range(0.0..1.5),
                humidity: 82.0 - hour_factor * 4.0 + rng.random_range(0.0..3.0),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn new(kind: ActivityKind, message: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            kind,
            message: message.into(),
            at,
        }
    }
}

/// The entries shown before the feed has produced anything.
pub fn activity_log(now: DateTime<Utc>) -> Vec<ActivityEntry> {
    let ago = |mins: i64| now - Duration::minutes(mins);
    vec![
        ActivityEntry::new(
            ActivityKind::Warning,
            "Humidity dropped below 70%, humidifier activated",
            ago(2),
        ),
        ActivityEntry::new(ActivityKind::Info, "Humidifier running at 80% capacity", ago(1)),
        ActivityEntry::new(
            ActivityKind::Success,
            "Humidity levels restored to optimal range",
            now,
        ),
        ActivityEntry::new(ActivityKind::Info, "Temperature adjustment initiated", ago(15)),
        ActivityEntry::new(ActivityKind::Info, "New growth detected in section A3", ago(60)),
    ]
}

pub const MAX_ACTIVITY_ENTRIES: usize = 1_000;

/// Bounded log, newest first.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    capacity: usize,
}

impl ActivityLog {
    /// `capacity` comes from user config and is clamped to
    /// `1..=MAX_ACTIVITY_ENTRIES`.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_ACTIVITY_ENTRIES);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keeps `seed` in its given order, truncated to capacity.
    pub fn seeded(capacity: usize, seed: Vec<ActivityEntry>) -> Self {
        let mut log = Self::new(capacity);
        log.entries.extend(seed);
        log.entries.truncate(log.capacity);
        log
    }

    pub fn push(&mut self, entry: ActivityEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskIcon {
    Droplets,
    Clock,
    Sun,
    Calendar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CareTask {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: TaskIcon,
    pub target: Option<&'static str>,
    pub interval: Option<&'static str>,
    pub due: Option<&'static str>,
    pub completed: bool,
}

pub fn care_tasks() -> [CareTask; 4] {
    [
        CareTask {
            id: "humidity",
            title: "Maintain Humidity",
            description: "Keep humidity levels within optimal range",
            icon: TaskIcon::Droplets,
            target: Some("80-85%"),
            interval: Some("Continuous"),
            due: None,
            completed: true,
        },
        CareTask {
            id: "humidifier",
            title: "Humidifier Check",
            description: "Activate humidifier when levels drop below threshold",
            icon: TaskIcon::Clock,
            target: Some("< 75%"),
            interval: Some("Every 5 minutes"),
            due: None,
            completed: true,
        },
        CareTask {
            id: "lights",
            title: "Grow Light Schedule",
            description: "Automated lighting for optimal growth",
            icon: TaskIcon::Sun,
            target: None,
            interval: Some("1:00 AM - 3:00 AM daily"),
            due: None,
            completed: true,
        },
        CareTask {
            id: "harvest",
            title: "Scheduled Harvest",
            description: "Optimal time to harvest Pink Oyster mushrooms",
            icon: TaskIcon::Calendar,
            target: None,
            interval: None,
            due: Some("April 14, 2025"),
            completed: false,
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Article {
    pub title: &'static str,
    pub body: &'static str,
}

pub const KNOWLEDGE_BASE: [Article; 3] = [
    Article {
        title: "How to optimize humidity for mushroom growing?",
        body: "Maintaining humidity levels between 80-90% is optimal for most mushroom \
               varieties. Use a humidifier to increase humidity and monitor regularly.",
    },
    Article {
        title: "Understanding temperature control for Pink Oysters",
        body: "Pink Oyster mushrooms thrive in temperatures between 18-24°C (64-75°F). \
               Avoid temperature fluctuations for optimal growth.",
    },
    Article {
        title: "Troubleshooting common growth issues",
        body: "If your mushrooms are growing slowly or showing discoloration, check \
               humidity levels, air circulation, and substrate moisture content.",
    },
];

/// Case-insensitive match on title or body; an empty query matches all.
pub fn search_articles(query: &str) -> Vec<&'static Article> {
    let q = query.trim().to_lowercase();
    KNOWLEDGE_BASE
        .iter()
        .filter(|a| {
            q.is_empty() || a.title.to_lowercase().contains(&q) || a.body.to_lowercase().contains(&q)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketCategory {
    Technical,
    Growing,
    Equipment,
    Other,
}

impl TicketCategory {
    pub const ALL: [TicketCategory; 4] = [
        TicketCategory::Technical,
        TicketCategory::Growing,
        TicketCategory::Equipment,
        TicketCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TicketCategory::Technical => "Technical Issue",
            TicketCategory::Growing => "Growing Problem",
            TicketCategory::Equipment => "Equipment Malfunction",
            TicketCategory::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketDraft {
    pub subject: String,
    pub description: String,
    pub category: Option<TicketCategory>,
}

impl TicketDraft {
    /// First required field still empty, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.subject.trim().is_empty() {
            Some("Subject")
        } else if self.description.trim().is_empty() {
            Some("Description")
        } else if self.category.is_none() {
            Some("Category")
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
