use std::sync::{Arc, Weak};
use std::time::Duration;

use log::{debug, info};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::error::{InterviewError, Result};
use crate::interview::{InterviewEngine, TickOutcome, TickScheduler};

pub type SharedEngine = Arc<Mutex<InterviewEngine>>;

/// Drives the countdown from a tokio task, one task per countdown.
pub struct TokioTicker {
    engine: Weak<Mutex<InterviewEngine>>,
    period: Duration,
    runtime: Handle,
    task: Option<JoinHandle<()>>,
}

impl TokioTicker {
    pub fn new(engine: Weak<Mutex<InterviewEngine>>, period: Duration, runtime: Handle) -> Self {
        TokioTicker {
            engine,
            period,
            runtime,
            task: None,
        }
    }
}

impl TickScheduler for TokioTicker {
    fn schedule(&mut self, generation: u64) {
        self.cancel();

        let engine = self.engine.clone();
        let period = self.period;
        self.task = Some(self.runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let Some(shared) = engine.upgrade() else {
                    break;
                };
                let outcome = shared.lock().tick(generation);
                if !matches!(outcome, TickOutcome::Running(_)) {
                    debug!("Ticker for countdown #{} finished ({:?})", generation, outcome);
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Wraps the engine for shared use and wires a real-time ticker into it.
/// Must be called from within a tokio runtime.
pub fn spawn_engine(engine: InterviewEngine, period: Duration) -> Result<SharedEngine> {
    let runtime = Handle::try_current().map_err(|e| InterviewError::Runtime(e.to_string()))?;
    info!("⏱️ Countdown ticks every {:?}", period);

    Ok(Arc::new_cyclic(|weak| {
        let ticker = TokioTicker::new(weak.clone(), period, runtime);
        Mutex::new(engine.with_scheduler(Box::new(ticker)))
    }))
}
