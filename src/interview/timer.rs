use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TimerState {
    pub remaining_seconds: u32,
    pub limit_seconds: u32,
    pub is_running: bool,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick for a countdown that was stopped or superseded; ignored.
    Stale,
    Running(u32),
    /// Countdown hit zero and has already stopped itself.
    Expired,
}

/// The single per-question countdown.
///
/// Every `start` and every stop of a running countdown bumps the generation,
/// so ticks scheduled for an older countdown are recognised as stale.
#[derive(Debug, Default)]
pub struct CountdownTimer {
    remaining: u32,
    limit: u32,
    running: bool,
    generation: u64,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any active countdown. Returns the new generation.
    pub fn start(&mut self, limit_seconds: u32) -> u64 {
        self.stop();
        self.generation += 1;
        self.limit = limit_seconds;
        self.remaining = limit_seconds;
        self.running = true;
        debug!("⏱️ Countdown #{} started at {}s", self.generation, limit_seconds);
        self.generation
    }

    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.generation += 1;
            debug!("⏹️ Countdown stopped with {}s left", self.remaining);
        }
        self.remaining = 0;
    }

    pub fn tick(&mut self, generation: u64) -> TickOutcome {
        if !self.running || generation != self.generation {
            return TickOutcome::Stale;
        }

        let next = self.remaining.saturating_sub(1);
        if next == 0 {
            self.stop();
            TickOutcome::Expired
        } else {
            self.remaining = next;
            TickOutcome::Running(next)
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            remaining_seconds: self.remaining,
            limit_seconds: self.limit,
            is_running: self.running,
            generation: self.generation,
        }
    }
}

/// Source of one-second ticks for the active countdown.
///
/// The engine calls `schedule` each time a countdown starts and `cancel`
/// when it stops; implementations deliver `engine.tick(generation)`.
pub trait TickScheduler: Send {
    fn schedule(&mut self, generation: u64);
    fn cancel(&mut self);
}

/// Ticks are delivered by the caller, e.g. a test or an external event loop.
#[derive(Debug, Default)]
pub struct ManualTicks;

impl TickScheduler for ManualTicks {
    fn schedule(&mut self, _generation: u64) {}
    fn cancel(&mut self) {}
}
