// ticker.rs - Periodic task that drives an engine from outside
//
// The engine knows nothing about time. A ticker owns the schedule: every interval it
// locks the shared engine, steps it once, releases the lock and hands the snapshot to
// a sink (usually the presentation layer).

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use log::{info, warn};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::LifeConfig;
use crate::engine::GridEngine;
use crate::grid::GridSnapshot;
use crate::history::CycleDetector;

pub type SharedEngine = Arc<Mutex<GridEngine>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerOptions {
    pub interval: Duration,
    pub stop_on_cycle: bool,
}

impl From<&LifeConfig> for TickerOptions {
    fn from(config: &LifeConfig) -> Self {
        Self {
            interval: config.tick_interval(),
            stop_on_cycle: config.stop_on_cycle,
        }
    }
}

/// Why a ticker task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerExit {
    Stopped,
    CycleDetected { generation: u64 },
}

/// Handle to a running step loop. Dropping it stops the loop.
#[derive(Debug)]
pub struct Ticker {
    options: TickerOptions,
    stop_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<TickerExit>>,
}

impl Ticker {
    /// Spawns the loop on the current tokio runtime.
    ///
    /// # Panics
    /// Outside a tokio runtime, like `tokio::spawn`.
    pub fn start<F>(engine: SharedEngine, options: TickerOptions, sink: F) -> Self
    where
        F: FnMut(GridSnapshot) + Send + 'static,
    {
        Self::start_on(&Handle::current(), engine, options, sink)
    }

    /// Spawns the loop on `runtime`, for callers that are not inside one.
    pub fn start_on<F>(runtime: &Handle, engine: SharedEngine, options: TickerOptions, sink: F) -> Self
    where
        F: FnMut(GridSnapshot) + Send + 'static,
    {
        let (stop_tx, stop_rx) = oneshot::channel();
        info!(
            "ticker started: every {:?}, stop on cycle: {}",
            options.interval, options.stop_on_cycle
        );
        let handle = runtime.spawn(run(engine, options, sink, stop_rx));
        Self {
            options,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Options the loop was started with.
    pub fn options(&self) -> TickerOptions {
        self.options
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Signals the loop and waits for it to exit. A step already in progress completes.
    pub async fn stop(mut self) -> TickerExit {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        let Some(handle) = self.handle.take() else {
            return TickerExit::Stopped;
        };
        match handle.await {
            Ok(exit) => exit,
            Err(err) => {
                warn!("ticker task failed: {err}");
                TickerExit::Stopped
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
    }
}

async fn run<F>(
    engine: SharedEngine,
    options: TickerOptions,
    mut sink: F,
    mut stop_rx: oneshot::Receiver<()>,
) -> TickerExit
where
    F: FnMut(GridSnapshot) + Send + 'static,
{
    let period = options.interval.max(Duration::from_millis(1));
    let mut ticks = time::interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut cycles = CycleDetector::new();
    if options.stop_on_cycle {
        cycles.observe(&lock(&engine).current_state());
    }

    let exit = loop {
        tokio::select! {
            biased;
            _ = &mut stop_rx => break TickerExit::Stopped,
            _ = ticks.tick() => {}
        }

        let snapshot = lock(&engine).step();
        let generation = snapshot.generation;
        let repeated = options.stop_on_cycle && cycles.observe(&snapshot);
        sink(snapshot);

        if repeated {
            warn!("board repeats a recent state at generation {generation}, halting");
            break TickerExit::CycleDetected { generation };
        }
    };

    info!("ticker stopped: {exit:?}");
    exit
}

fn lock(engine: &SharedEngine) -> std::sync::MutexGuard<'_, GridEngine> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}
