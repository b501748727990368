//! Session clock: work timer plus the two alarms, advanced one tick at a
//! time by the ticker thread.

use chrono::{DateTime, Local};

/// Something the foreground has to announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    AlarmAfterFired,
    AlarmAtFired,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkClock {
    pub running: bool,
    pub start: Option<DateTime<Local>>,
    pub last: Option<DateTime<Local>>,
}

impl WorkClock {
    /// Whole seconds between start and the last tick.
    pub fn elapsed_secs(&self) -> u64 {
        match (self.start, self.last) {
            (Some(s), Some(l)) => (l - s).num_seconds().max(0) as u64,
            _ => 0,
        }
    }
}

/// Countdown alarm.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmAfter {
    pub running: bool,
    pub remaining: u64,
    pub original: u64,
}

/// Wall-clock alarm.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmAt {
    pub running: bool,
    pub target: Option<DateTime<Local>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClockState {
    pub work: WorkClock,
    pub alarm_after: AlarmAfter,
    pub alarm_at: AlarmAt,
}

impl ClockState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_work(&mut self, now: DateTime<Local>) {
        self.work = WorkClock {
            running: true,
            start: Some(now),
            last: Some(now),
        };
    }

    /// Stop the work timer at `now`; returns the elapsed seconds.
    pub fn stop_work(&mut self, now: DateTime<Local>) -> u64 {
        if self.work.running {
            self.work.last = Some(now);
            self.work.running = false;
        }
        self.work.elapsed_secs()
    }

    pub fn set_alarm_after(&mut self, secs: u64) {
        self.alarm_after = AlarmAfter {
            running: secs > 0,
            remaining: secs,
            original: secs,
        };
    }

    pub fn set_alarm_at(&mut self, target: DateTime<Local>) {
        self.alarm_at = AlarmAt {
            running: true,
            target: Some(target),
        };
    }

    /// True when neither the work timer nor an alarm is running.
    pub fn is_idle(&self) -> bool {
        !self.work.running && !self.alarm_after.running && !self.alarm_at.running
    }

    /// Advance every running clock by one tick.
    pub fn tick(&mut self, now: DateTime<Local>) -> Vec<ClockEvent> {
        let mut events = Vec::new();

        if self.work.running {
            self.work.last = Some(now);
        }

        if self.alarm_after.running {
            self.alarm_after.remaining = self.alarm_after.remaining.saturating_sub(1);
            if self.alarm_after.remaining == 0 {
                self.alarm_after.running = false;
                self.alarm_after.remaining = self.alarm_after.original;
                events.push(ClockEvent::AlarmAfterFired);
            }
        }

        if self.alarm_at.running
            && let Some(target) = self.alarm_at.target
            && now >= target
        {
            self.alarm_at.running = false;
            events.push(ClockEvent::AlarmAtFired);
        }

        events
    }

    pub fn snapshot(&self, now: DateTime<Local>, events: Vec<ClockEvent>) -> Snapshot {
        Snapshot {
            now,
            elapsed: self.work.running.then(|| self.work.elapsed_secs()),
            alarm_after: self.alarm_after.running.then_some(self.alarm_after.remaining),
            alarm_at: if self.alarm_at.running {
                self.alarm_at.target
            } else {
                None
            },
            events,
            idle: self.is_idle(),
        }
    }
}

/// What the foreground renders after each tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub now: DateTime<Local>,
    pub elapsed: Option<u64>,
    pub alarm_after: Option<u64>,
    pub alarm_at: Option<DateTime<Local>>,
    pub events: Vec<ClockEvent>,
    pub idle: bool,
}
