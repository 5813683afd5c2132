use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const TEMP_OPTIMAL: (f32, f32) = (20.0, 30.0);
pub const HUMIDITY_OPTIMAL: (f32, f32) = (80.0, 95.0);

/// Semantic colour of a reading; the viewer palette decides the actual colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Good,
    Caution,
    Critical,
    Info,
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MushroomHealth {
    Healthy,
    Warning,
    Alert,
}

impl MushroomHealth {
    pub fn label(self) -> &'static str {
        match self {
            MushroomHealth::Healthy => "Healthy",
            MushroomHealth::Warning => "Warning",
            MushroomHealth::Alert => "Alert",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MushroomHealth::Healthy => "Growth progressing as expected",
            MushroomHealth::Warning => "Conditions need attention",
            MushroomHealth::Alert => "Immediate intervention required",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            MushroomHealth::Healthy => Tone::Good,
            MushroomHealth::Warning => Tone::Caution,
            MushroomHealth::Alert => Tone::Critical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub temperature: f32,
    pub humidity: f32,
    pub battery_percentage: f32,
    pub is_charging: bool,
    pub lighting_level: f32,
    pub mushroom_health: MushroomHealth,
    pub last_updated: DateTime<Utc>,
}

impl Metrics {
    pub fn sample(now: DateTime<Utc>) -> Self {
        Self {
            temperature: 28.5,
            humidity: 82.0,
            battery_percentage: 78.0,
            is_charging: false,
            lighting_level: 65.0,
            mushroom_health: MushroomHealth::Healthy,
            last_updated: now,
        }
    }

    pub fn temperature_reading(&self) -> Reading {
        Reading::classify(self.temperature, TEMP_OPTIMAL)
    }

    pub fn humidity_reading(&self) -> Reading {
        Reading::classify(self.humidity, HUMIDITY_OPTIMAL)
    }

    pub fn battery_band(&self) -> BatteryBand {
        BatteryBand::of(self.battery_percentage)
    }

    pub fn battery_icon(&self) -> BatteryIcon {
        BatteryIcon::select(self.battery_percentage, self.is_charging)
    }

    /// Health derived from the climate readings alone.
    pub fn assess_health(&self) -> MushroomHealth {
        let temp = self.temperature_reading();
        let hum = self.humidity_reading();
        if self.humidity < 70.0 || self.temperature > TEMP_OPTIMAL.1 + 5.0 {
            MushroomHealth::Alert
        } else if temp != Reading::Optimal || hum != Reading::Optimal {
            MushroomHealth::Warning
        } else {
            MushroomHealth::Healthy
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    TooLow,
    Optimal,
    TooHigh,
}

impl Reading {
    /// Range is inclusive on both ends.
    pub fn classify(value: f32, (lo, hi): (f32, f32)) -> Self {
        if value < lo {
            Reading::TooLow
        } else if value > hi {
            Reading::TooHigh
        } else {
            Reading::Optimal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Reading::TooLow => "Too low",
            Reading::Optimal => "Optimal",
            Reading::TooHigh => "Too high",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Reading::Optimal => Tone::Good,
            Reading::TooLow => Tone::Info,
            Reading::TooHigh => Tone::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryBand {
    Critical,
    Low,
    Ok,
}

impl BatteryBand {
    pub fn of(percentage: f32) -> Self {
        if percentage <= 15.0 {
            BatteryBand::Critical
        } else if percentage <= 50.0 {
            BatteryBand::Low
        } else {
            BatteryBand::Ok
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            BatteryBand::Critical => Tone::Critical,
            BatteryBand::Low => Tone::Caution,
            BatteryBand::Ok => Tone::Good,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryIcon {
    Charging,
    Low,
    Medium,
    Full,
    Normal,
}

impl BatteryIcon {
    pub fn select(percentage: f32, is_charging: bool) -> Self {
        if is_charging {
            BatteryIcon::Charging
        } else if percentage <= 15.0 {
            BatteryIcon::Low
        } else if percentage <= 50.0 {
            BatteryIcon::Medium
        } else if percentage >= 90.0 {
            BatteryIcon::Full
        } else {
            BatteryIcon::Normal
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            BatteryIcon::Charging => "⚡",
            BatteryIcon::Low => "▁",
            BatteryIcon::Medium => "▄",
            BatteryIcon::Full => "█",
            BatteryIcon::Normal => "▆",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthStage {
    Colonization,
    PrimordiaFormation,
    Fruiting,
    Harvest,
}

impl GrowthStage {
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d <= 7 => GrowthStage::Colonization,
            d if d <= 14 => GrowthStage::PrimordiaFormation,
            d if d <= 21 => GrowthStage::Fruiting,
            _ => GrowthStage::Harvest,
        }
    }

    pub fn since(cycle_start: NaiveDate, today: NaiveDate) -> Self {
        Self::from_days((today - cycle_start).num_days())
    }

    pub fn label(self) -> &'static str {
        match self {
            GrowthStage::Colonization => "Colonization",
            GrowthStage::PrimordiaFormation => "Primordia Formation",
            GrowthStage::Fruiting => "Fruiting",
            GrowthStage::Harvest => "Harvest",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HarvestCountdown {
    pub days: i64,
    pub hours: i64,
}

impl HarvestCountdown {
    /// Whole days and leftover hours until `target`; zero once it has passed.
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining = target - now;
        if remaining < Duration::zero() {
            return Self::default();
        }
        Self {
            days: remaining.num_days(),
            hours: remaining.num_hours() % 24,
        }
    }

    pub fn is_due(&self) -> bool {
        self.days == 0 && self.hours == 0
    }
}

impl std::fmt::Display for HarvestCountdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d {}h", self.days, self.hours)
    }
}

/// "Just now", "N min ago", "N h ago" or "N d ago".
pub fn relative_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now - then;
    let mins = age.num_minutes();
    if mins < 1 {
        "Just now".to_string()
    } else if mins < 60 {
        format!("{mins} min ago")
    } else if age.num_hours() < 24 {
        format!("{} h ago", age.num_hours())
    } else {
        format!("{} d ago", age.num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn optimal_ranges_are_inclusive() {
        assert_eq!(Reading::classify(20.0, TEMP_OPTIMAL), Reading::Optimal);
        assert_eq!(Reading::classify(30.0, TEMP_OPTIMAL), Reading::Optimal);
        assert_eq!(Reading::classify(19.9, TEMP_OPTIMAL), Reading::TooLow);
        assert_eq!(Reading::classify(95.1, HUMIDITY_OPTIMAL), Reading::TooHigh);
    }

    #[test]
    fn battery_bands_and_icons() {
        assert_eq!(BatteryBand::of(15.0), BatteryBand::Critical);
        assert_eq!(BatteryBand::of(50.0), BatteryBand::Low);
        assert_eq!(BatteryBand::of(51.0), BatteryBand::Ok);
        assert_eq!(BatteryIcon::select(10.0, true), BatteryIcon::Charging);
        assert_eq!(BatteryIcon::select(92.0, false), BatteryIcon::Full);
        assert_eq!(BatteryIcon::select(70.0, false), BatteryIcon::Normal);
    }

    #[test]
    fn growth_stage_boundaries() {
        assert_eq!(GrowthStage::from_days(7), GrowthStage::Colonization);
        assert_eq!(GrowthStage::from_days(8), GrowthStage::PrimordiaFormation);
        assert_eq!(GrowthStage::from_days(21), GrowthStage::Fruiting);
        assert_eq!(GrowthStage::from_days(22), GrowthStage::Harvest);

        let start = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        assert_eq!(GrowthStage::since(start, today), GrowthStage::PrimordiaFormation);
    }

    #[test]
    fn countdown_splits_days_and_hours() {
        let now = Utc.with_ymd_and_hms(2025, 4, 10, 6, 0, 0).unwrap();
        let target = Utc.with_ymd_and_hms(2025, 4, 14, 0, 0, 0).unwrap();
        let c = HarvestCountdown::until(target, now);
        assert_eq!(c, HarvestCountdown { days: 3, hours: 18 });
        assert_eq!(c.to_string(), "3d 18h");
    }

    #[test]
    fn countdown_in_the_past_is_zero() {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
        let target = Utc.with_ymd_and_hms(2025, 4, 14, 0, 0, 0).unwrap();
        assert!(HarvestCountdown::until(target, now).is_due());
    }

    #[test]
    fn health_follows_readings() {
        let now = Utc.with_ymd_and_hms(2025, 4, 10, 6, 0, 0).unwrap();
        let mut m = Metrics::sample(now);
        assert_eq!(m.assess_health(), MushroomHealth::Healthy);
        m.humidity = 75.0;
        assert_eq!(m.assess_health(), MushroomHealth::Warning);
        m.humidity = 65.0;
        assert_eq!(m.assess_health(), MushroomHealth::Alert);
    }

    #[test]
    fn relative_age_buckets() {
        let now = Utc.with_ymd_and_hms(2025, 4, 10, 6, 0, 0).unwrap();
        assert_eq!(relative_age(now, now), "Just now");
        assert_eq!(relative_age(now - Duration::minutes(15), now), "15 min ago");
        assert_eq!(relative_age(now - Duration::hours(2), now), "2 h ago");
    }
}
