// Platkit - core/timer.rs
//
// Accumulating wall-clock / CPU-time stopwatch.
//
// A timer is running exactly when it holds a start reading. Accumulators
// only change on `stop` and `reset`; reads while running add the in-flight
// interval without storing it.

use crate::platform::clock::{ClockSource, SystemClock};

/// Clock readings taken at `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Reading {
    real: f64,
    cpu: f64,
}

/// Stopwatch over a pair of clocks.
#[derive(Debug, Clone)]
pub struct Timer<C = SystemClock> {
    clock: C,
    start: Option<Reading>,
    elapsed_real: f64,
    elapsed_cpu: f64,
}

impl Timer<SystemClock> {
    /// Reset timer over the system clocks.
    pub fn system() -> Self {
        Self::new(SystemClock::new())
    }
}

impl<C: ClockSource> Timer<C> {
    /// Reset (zeroed, stopped) timer over `clock`.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            start: None,
            elapsed_real: 0.0,
            elapsed_cpu: 0.0,
        }
    }

    /// Zero both accumulators and stop, discarding any in-flight interval.
    pub fn reset(&mut self) {
        self.start = None;
        self.elapsed_real = 0.0;
        self.elapsed_cpu = 0.0;
    }

    /// Begin an interval. The timer must not be running.
    pub fn start(&mut self) {
        debug_assert!(self.start.is_none(), "Timer::start on a running timer");

        self.start = Some(Reading {
            real: self.clock.now_real(),
            cpu: self.clock.now_cpu(),
        });
    }

    /// End the current interval and fold it into the accumulators.
    /// The timer must be running.
    pub fn stop(&mut self) {
        debug_assert!(self.start.is_some(), "Timer::stop on a stopped timer");

        if let Some(start) = self.start.take() {
            self.elapsed_real += self.clock.now_real() - start.real;
            self.elapsed_cpu += self.clock.now_cpu() - start.cpu;
        }
    }

    pub fn is_running(&self) -> bool {
        self.start.is_some()
    }

    /// Accumulated wall-clock seconds, including the running interval.
    /// Never negative, even if the clock steps backwards.
    pub fn elapsed_real(&self) -> f64 {
        let mut elapsed = self.elapsed_real;
        if let Some(start) = self.start {
            elapsed += self.clock.now_real() - start.real;
        }
        elapsed.max(0.0)
    }

    /// Accumulated CPU seconds, including the running interval.
    pub fn elapsed_cpu(&self) -> f64 {
        let mut elapsed = self.elapsed_cpu;
        if let Some(start) = self.start {
            elapsed += self.clock.now_cpu() - start.cpu;
        }
        elapsed.max(0.0)
    }

    /// CPU time over wall time, clamped to `[0, 1]`.
    /// Zero when either duration is not positive (no usage data).
    pub fn cpu_usage(&self) -> f64 {
        let real = self.elapsed_real();
        let cpu = self.elapsed_cpu();

        if real <= 0.0 || cpu <= 0.0 {
            return 0.0;
        }
        (cpu / real).min(1.0)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
