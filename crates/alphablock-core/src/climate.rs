use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::mock::{ActivityEntry, ActivityKind};
use crate::telemetry::Metrics;

pub const HUMIDITY_WARN_BELOW: f32 = 70.0;
pub const HUMIDITY_RESTORED_AT: f32 = 80.0;
const AMBIENT_TEMP: f32 = 27.0;
const CHARGE_START_AT: f32 = 20.0;

/// Switchable equipment in the grow unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Actuators {
    pub humidifier: bool,
    pub grow_light: bool,
}

/// Toy model of the grow chamber. Every random draw goes through the caller's
/// rng, so a seeded rng replays the same run.
#[derive(Debug, Clone)]
pub struct Climate {
    metrics: Metrics,
    humidity_alarm: bool,
}

impl Climate {
    pub fn new(metrics: Metrics) -> Self {
        let humidity_alarm = metrics.humidity < HUMIDITY_WARN_BELOW;
        Self {
            metrics,
            humidity_alarm,
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn step<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        actuators: Actuators,
        now: DateTime<Utc>,
    ) -> (Metrics, Vec<ActivityEntry>) {
        let mut events = Vec::new();
        let m = &mut self.metrics;

        let light_heat = if actuators.grow_light { 0.05 } else { 0.0 };
        m.temperature += (AMBIENT_TEMP - m.temperature) * 0.05
            + light_heat
            + rng.random_range(-0.3..0.3);

        let humidity_drift = if actuators.humidifier { 1.5 } else { -0.8 };
        m.humidity = (m.humidity + humidity_drift + rng.random_range(-0.5..0.5)).clamp(40.0, 99.0);

        let light_target = if actuators.grow_light { 85.0 } else { 10.0 };
        m.lighting_level += (light_target - m.lighting_level) * 0.2;

        if m.is_charging {
            m.battery_percentage += 0.5;
            if m.battery_percentage >= 100.0 {
                m.is_charging = false;
                events.push(ActivityEntry::new(ActivityKind::Info, "Battery fully charged", now));
            }
        } else {
            let load = 0.1
                + if actuators.humidifier { 0.1 } else { 0.0 }
                + if actuators.grow_light { 0.1 } else { 0.0 };
            m.battery_percentage -= load;
            if m.battery_percentage <= CHARGE_START_AT {
                m.is_charging = true;
                events.push(ActivityEntry::new(
                    ActivityKind::Warning,
                    "Battery low, charging started",
                    now,
                ));
            }
        }
        m.battery_percentage = m.battery_percentage.clamp(0.0, 100.0);

        if !self.humidity_alarm && m.humidity < HUMIDITY_WARN_BELOW {
            self.humidity_alarm = true;
            let msg = if actuators.humidifier {
                "Humidity dropped below 70%, humidifier running"
            } else {
                "Humidity dropped below 70%"
            };
            events.push(ActivityEntry::new(ActivityKind::Warning, msg, now));
        } else if self.humidity_alarm && m.humidity >= HUMIDITY_RESTORED_AT {
            self.humidity_alarm = false;
            events.push(ActivityEntry::new(
                ActivityKind::Success,
                "Humidity levels restored to optimal range",
                now,
            ));
        }

        m.mushroom_health = m.assess_health();
        m.last_updated = now;
        (m.clone(), events)
    }
}
