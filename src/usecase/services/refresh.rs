use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use crate::platform::timer;

pub const DEFAULT_REFRESH: Duration = Duration::from_secs(60);

/// User-controlled periodic refresh of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSchedule {
    pub period: Duration,
    pub enabled: bool,
}

impl Default for RefreshSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH)
    }
}

impl RefreshSchedule {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            enabled: true,
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// A zero period never schedules anything.
    pub fn is_running(&self) -> bool {
        self.enabled && !self.period.is_zero()
    }

    pub fn label(&self) -> String {
        let secs = self.period.as_secs();
        if secs == 60 {
            "Auto-actualizar cada minuto".to_string()
        } else if secs % 60 == 0 {
            format!("Auto-actualizar cada {} minutos", secs / 60)
        } else {
            format!("Auto-actualizar cada {secs} segundos")
        }
    }
}

/// Start/stop control for the refresh loop of one page. Each `apply` stops
/// whatever loop was running before; a stopped loop never ticks again, even
/// if its sleep was already pending.
#[derive(Debug, Clone, Default)]
pub struct RefreshSwitch {
    generation: Rc<Cell<u64>>,
}

impl RefreshSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the loop to drive for `schedule`, or `None` when paused.
    pub fn apply<F, Fut>(&self, schedule: RefreshSchedule, mut tick: F) -> Option<impl Future<Output = ()>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        self.stop();
        if !schedule.is_running() {
            tracing::debug!("auto-refresh paused");
            return None;
        }
        let generation = self.generation.clone();
        let mine = generation.get();
        Some(async move {
            loop {
                timer::sleep(schedule.period).await;
                if generation.get() != mine {
                    return;
                }
                tracing::debug!(period_secs = schedule.period.as_secs(), "periodic refresh");
                tick().await;
            }
        })
    }

    pub fn stop(&self) {
        self.generation.set(self.generation.get() + 1);
    }
}
