use alphablock_core::climate::{Actuators, Climate};
use alphablock_core::telemetry::Metrics;
use anyhow::{bail, Context, Result};
use chrono::Utc;
use crossbeam_channel::Sender;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::feed::{FeedCommand, Incoming};

#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub interval: Duration,
    pub seed: Option<u64>,
    pub initial: Metrics,
}

/// Owner side of the feed thread. Dropping it stops the thread.
pub struct FeedHandle {
    commands: mpsc::UnboundedSender<FeedCommand>,
    thread: Option<JoinHandle<()>>,
}

impl FeedHandle {
    pub fn send(&self, cmd: FeedCommand) {
        if self.commands.send(cmd).is_err() {
            tracing::debug!(?cmd, "feed already stopped, command dropped");
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        let _ = self.commands.send(FeedCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

pub fn spawn_feed(settings: FeedSettings, tx: Sender<Incoming>) -> Result<FeedHandle> {
    if settings.interval.is_zero() {
        bail!("feed interval must be positive");
    }
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

    let thread = std::thread::Builder::new()
        .name("telemetry-feed".into())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    let _ = tx.send(Incoming::Error(format!("feed runtime: {e}")));
                    let _ = tx.send(Incoming::Stopped);
                    return;
                }
            };
            rt.block_on(async move {
                if let Err(e) = run(settings, tx.clone(), cmd_rx).await {
                    let _ = tx.send(Incoming::Error(format!("{e:?}")));
                }
                let _ = tx.send(Incoming::Stopped);
            });
        })
        .context("failed to spawn telemetry feed thread")?;

    Ok(FeedHandle {
        commands: cmd_tx,
        thread: Some(thread),
    })
}

async fn run(
    settings: FeedSettings,
    tx: Sender<Incoming>,
    mut commands: mpsc::UnboundedReceiver<FeedCommand>,
) -> Result<()> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut climate = Climate::new(settings.initial);
    let mut actuators = Actuators::default();

    let mut ticker = tokio::time::interval(settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tx.send(Incoming::Started {
        interval_ms: settings.interval.as_millis() as u64,
    })
    .context("viewer hung up before feed start")?;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let (metrics, events) = climate.step(&mut rng, actuators, Utc::now());
                if tx.send(Incoming::Reading(metrics)).is_err() {
                    break;
                }
                for entry in events {
                    let _ = tx.send(Incoming::Activity(entry));
                }
            }
            cmd = commands.recv() => match cmd {
                Some(FeedCommand::SetActuators(next)) => {
                    tracing::debug!(humidifier = next.humidifier, grow_light = next.grow_light, "actuators updated");
                    actuators = next;
                }
                Some(FeedCommand::Shutdown) | None => break,
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(interval: Duration) -> FeedSettings {
        FeedSettings {
            interval,
            seed: Some(11),
            initial: Metrics::sample(Utc::now()),
        }
    }

    #[test]
    fn zero_interval_is_rejected() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        assert!(spawn_feed(settings(Duration::ZERO), tx).is_err());
    }

    #[test]
    fn feed_reports_readings_then_stops() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let handle = spawn_feed(settings(Duration::from_millis(10)), tx).expect("spawn feed");

        let first = rx.recv_timeout(Duration::from_secs(5)).expect("started");
        assert!(matches!(first, Incoming::Started { interval_ms: 10 }));

        let reading = rx
            .iter()
            .find(|m| matches!(m, Incoming::Reading(_)))
            .expect("reading");
        assert!(matches!(reading, Incoming::Reading(_)));

        drop(handle);
        let last = rx.iter().last();
        assert!(matches!(last, Some(Incoming::Stopped)));
    }
}
