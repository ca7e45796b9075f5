// Platkit - platform/clock.rs
//
// Clock sources consumed by `core::timer`. Readings are floating-point
// seconds; only differences between readings are meaningful.

/// A pair of clocks: wall time and CPU time consumed by this process.
pub trait ClockSource {
    /// Wall-clock reading in seconds.
    fn now_real(&self) -> f64;

    /// Process CPU-time reading in seconds.
    fn now_cpu(&self) -> f64;
}

impl<C: ClockSource + ?Sized> ClockSource for &C {
    fn now_real(&self) -> f64 {
        (**self).now_real()
    }

    fn now_cpu(&self) -> f64 {
        (**self).now_cpu()
    }
}

/// System clocks: UTC wall time and the process CPU-time clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockSource for SystemClock {
    fn now_real(&self) -> f64 {
        let now = chrono::Utc::now();
        now.timestamp() as f64 + f64::from(now.timestamp_subsec_micros()) / 1e6
    }

    fn now_cpu(&self) -> f64 {
        process_cpu_seconds()
    }
}

#[cfg(unix)]
fn process_cpu_seconds() -> f64 {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // SAFETY: `ts` is a valid, writable timespec for the duration of the call.
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_PROCESS_CPUTIME_ID, &mut ts) };
    if rc != 0 {
        tracing::warn!(
            error = %std::io::Error::last_os_error(),
            "Failed to read process CPU clock"
        );
        return 0.0;
    }
    ts.tv_sec as f64 + ts.tv_nsec as f64 / 1e9
}

/// No portable process CPU clock: report zero, which `Timer::cpu_usage`
/// treats as "no usage data".
#[cfg(not(unix))]
fn process_cpu_seconds() -> f64 {
    0.0
}

/// Hand-driven clock for deterministic timer tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ManualClock {
    real: std::cell::Cell<f64>,
    cpu: std::cell::Cell<f64>,
}

#[cfg(test)]
impl ManualClock {
    pub fn starting_at(real: f64, cpu: f64) -> Self {
        let clock = Self::default();
        clock.real.set(real);
        clock.cpu.set(cpu);
        clock
    }

    pub fn advance(&self, real: f64, cpu: f64) {
        self.real.set(self.real.get() + real);
        self.cpu.set(self.cpu.get() + cpu);
    }
}

#[cfg(test)]
impl ClockSource for ManualClock {
    fn now_real(&self) -> f64 {
        self.real.get()
    }

    fn now_cpu(&self) -> f64 {
        self.cpu.get()
    }
}
