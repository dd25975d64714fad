use crate::geometry::GeoPoint;
use crate::position::{OnError, OnFix, PositionError, PositionSource, WatchHandle};
use jiff::{SignedDuration, Timestamp};
use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Normal};
use slotmap::SlotMap;

/// One scripted outcome: a fix to deliver or a device failure to inject.
pub type ScriptedFix = Result<GeoPoint, PositionError>;

/// Tuning for a [`SimulatedPositionSource`].
#[derive(Clone, Debug)]
pub struct SimulatedSourceConfig {
    /// Walking cadence: simulated time between consecutive fixes
    pub interval: SignedDuration,
    /// Restart the script from the beginning once it runs out
    pub cycle: bool,
    /// Standard deviation of Gaussian jitter added to each fix, in degrees.
    /// Zero (or below) disables jitter.
    pub jitter_sigma_deg: f64,
    /// Seed for the jitter stream; `None` seeds from OS entropy
    pub prng_seed: Option<u64>,
    /// Simulated time the device needs to produce a single-shot fix
    pub latency: SignedDuration,
    /// Capture time of the first fix; `None` stamps from the wall clock
    pub start_time: Option<Timestamp>,
}

impl Default for SimulatedSourceConfig {
    fn default() -> Self {
        SimulatedSourceConfig {
            interval: SignedDuration::from_secs(2),
            cycle: false,
            jitter_sigma_deg: 0.0,
            prng_seed: None,
            latency: SignedDuration::ZERO,
            start_time: None,
        }
    }
}

struct Subscriber {
    on_fix: OnFix,
    on_error: OnError,
}

/// Deterministic [`PositionSource`] replaying a scripted walk.
///
/// Stands in for the device GPS in tests and in environments without location
/// hardware, and doubles as the fallback a session switches to when the real
/// device fails mid-walk. Fixes are stamped `start + n * interval` and
/// optionally jittered; for a given script, config and seed the delivered
/// sequence is reproducible.
///
/// Watch subscribers do not receive fixes spontaneously: an external
/// scheduler (timer loop, test body) calls [`advance`] to deliver the next
/// scripted entry to every active subscription.
///
/// [`advance`]: SimulatedPositionSource::advance
pub struct SimulatedPositionSource {
    script: Vec<ScriptedFix>,
    config: SimulatedSourceConfig,
    cursor: usize,
    clock: Timestamp,
    rng: SmallRng,
    jitter: Option<Normal<f64>>,
    subscribers: SlotMap<WatchHandle, Subscriber>,
}

impl SimulatedPositionSource {
    pub fn new(script: Vec<ScriptedFix>, config: SimulatedSourceConfig) -> Self {
        let rng = match config.prng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let jitter = match config.jitter_sigma_deg > 0.0 {
            true => Normal::new(0.0, config.jitter_sigma_deg).ok(),
            false => None,
        };
        let clock = config.start_time.unwrap_or_else(Timestamp::now);
        SimulatedPositionSource {
            script,
            config,
            cursor: 0,
            clock,
            rng,
            jitter,
            subscribers: SlotMap::with_key(),
        }
    }

    /// Replay of a plain coordinate walk with no injected failures.
    pub fn from_walk(walk: impl IntoIterator<Item = GeoPoint>, config: SimulatedSourceConfig) -> Self {
        Self::new(walk.into_iter().map(Ok).collect(), config)
    }

    /// `true` once every scripted entry has been delivered and the script
    /// does not cycle.
    pub fn is_exhausted(&self) -> bool {
        !self.config.cycle && self.cursor >= self.script.len()
    }

    /// Number of active watch subscriptions.
    pub fn n_subscribers(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver the next scripted entry to every active watch subscription.
    /// Returns `false` without delivering anything once the script is
    /// exhausted; scheduler loops use this as their stop condition.
    pub fn advance(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        let event = self.next_scripted();
        for sub in self.subscribers.values_mut() {
            match &event {
                Ok(fix) => (sub.on_fix)(*fix),
                Err(e) => (sub.on_error)(e.clone()),
            }
        }
        true
    }

    fn next_scripted(&mut self) -> ScriptedFix {
        if self.cursor >= self.script.len() {
            if !self.config.cycle || self.script.is_empty() {
                return Err(PositionError::Unavailable);
            }
            debug!("[GPS] script exhausted, cycling back to the first fix");
            self.cursor = 0;
        }
        let entry = self.script[self.cursor].clone();
        self.cursor += 1;

        let event = entry.map(|mut fix| {
            if let Some(dist) = self.jitter {
                fix.lat += dist.sample(&mut self.rng);
                fix.lng += dist.sample(&mut self.rng);
            }
            if fix.timestamp.is_none() {
                fix.timestamp = Some(self.clock);
            }
            fix
        });
        self.clock += self.config.interval;
        event
    }
}

impl PositionSource for SimulatedPositionSource {
    fn current_fix(&mut self, timeout: SignedDuration) -> Result<GeoPoint, PositionError> {
        if self.config.latency > timeout {
            return Err(PositionError::Timeout);
        }
        self.next_scripted()
    }

    fn watch(&mut self, on_fix: OnFix, on_error: OnError) -> WatchHandle {
        self.subscribers.insert(Subscriber { on_fix, on_error })
    }

    fn cancel_watch(&mut self, handle: WatchHandle) {
        self.subscribers.remove(handle);
    }
}
