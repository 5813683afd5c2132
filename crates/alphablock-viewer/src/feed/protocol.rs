use alphablock_core::climate::Actuators;
use alphablock_core::mock::ActivityEntry;
use alphablock_core::telemetry::Metrics;

/// Messages posted from the feed thread into the Bevy world.
#[derive(Debug, Clone)]
pub enum Incoming {
    Started { interval_ms: u64 },
    Reading(Metrics),
    Activity(ActivityEntry),
    Error(String),
    Stopped,
}

/// Messages from the UI to the feed thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedCommand {
    SetActuators(Actuators),
    Shutdown,
}
