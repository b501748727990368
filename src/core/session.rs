//! Interactive work session and standalone alarms.
//!
//! The foreground thread owns the terminal and the database. The ticker
//! thread advances the clock; a stdin reader and the Ctrl-C handler only
//! forward messages.

use crate::config::Config;
use crate::core::clock::{ClockEvent, ClockState, Snapshot};
use crate::core::ticker::{TICK, Ticker};
use crate::errors::{AppError, AppResult};
use crate::models::{Company, Timer};
use crate::sqlite::Database;
use crate::ui::messages;
use crate::utils::colors::{CYAN, YELLOW, clock_color, paint};
use crate::utils::time::{now_secs, parse_clock_time, parse_duration, today_at};
use crate::utils::{format_hms, format_worked};
use chrono::{DateTime, Local};
use crossbeam_channel::{Receiver, bounded, never, select, unbounded};
use std::io::{self, BufRead, Write};
use std::thread;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Enter or `q`.
    User,
    Interrupted,
    /// Every clock has finished.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alarm {
    After(u64),
    At(DateTime<Local>),
}

impl Alarm {
    pub fn after(input: &str) -> AppResult<Self> {
        Ok(Alarm::After(parse_duration(input)?))
    }

    /// `HH:MM[:SS]` today; a time already past fires on the first tick.
    pub fn at(input: &str) -> AppResult<Self> {
        Ok(Alarm::At(today_at(parse_clock_time(input)?)?))
    }

    fn arm(self, state: &mut ClockState) {
        match self {
            Alarm::After(secs) => state.set_alarm_after(secs),
            Alarm::At(target) => state.set_alarm_at(target),
        }
    }
}

/// Receivers the foreground loop waits on.
pub struct Inputs {
    pub lines: Receiver<String>,
    pub interrupt: Receiver<()>,
}

impl Inputs {
    /// Start the stdin reader and install the Ctrl-C handler.
    pub fn terminal() -> AppResult<Self> {
        let (line_tx, lines) = unbounded();
        thread::Builder::new().name("stdin".into()).spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line_tx.send(line).is_err() {
                    break;
                }
            }
        })?;

        let (int_tx, interrupt) = bounded(1);
        ctrlc::set_handler(move || {
            let _ = int_tx.try_send(());
        })
        .map_err(|e| AppError::Other(format!("cannot install Ctrl-C handler: {e}")))?;

        Ok(Self { lines, interrupt })
    }

    /// Next answer line; a closed input counts as "no".
    fn answer(&self) -> bool {
        self.lines.recv().map(|l| messages::is_yes(&l)).unwrap_or(false)
    }
}

/// Wait for snapshots and input until something ends the session.
/// Closed stdin is ignored, so only Ctrl-C or the clocks end a detached run.
pub fn drive<F>(
    snapshots: &Receiver<Snapshot>,
    inputs: &Inputs,
    stop_when_idle: bool,
    mut render: F,
) -> StopReason
where
    F: FnMut(&Snapshot),
{
    let closed = never::<String>();
    let mut stdin_open = true;
    loop {
        let lines = if stdin_open { &inputs.lines } else { &closed };
        select! {
            recv(snapshots) -> msg => match msg {
                Ok(snap) => {
                    render(&snap);
                    if stop_when_idle && snap.idle {
                        return StopReason::Finished;
                    }
                }
                Err(_) => return StopReason::Finished,
            },
            recv(lines) -> msg => match msg {
                Ok(_) => return StopReason::User,
                Err(_) => stdin_open = false,
            },
            recv(inputs.interrupt) -> _ => return StopReason::Interrupted,
        }
    }
}

/// Only sessions longer than the configured minimum are offered for saving.
pub fn worth_saving(elapsed: u64, min_session_secs: u64) -> bool {
    elapsed > min_session_secs
}

fn status_line(snap: &Snapshot) -> String {
    let mut line = paint(CYAN, &snap.now.format("%H:%M:%S").to_string());
    if let Some(e) = snap.elapsed {
        line.push_str(&format!("  work {}", paint(clock_color(true), &format_hms(e))));
    }
    if let Some(r) = snap.alarm_after {
        line.push_str(&format!("  alarm in {}", paint(YELLOW, &format_hms(r))));
    }
    if let Some(t) = snap.alarm_at {
        line.push_str(&format!("  alarm at {}", paint(YELLOW, &t.format("%H:%M:%S").to_string())));
    }
    line
}

fn render(snap: &Snapshot) {
    for ev in &snap.events {
        println!();
        match ev {
            ClockEvent::AlarmAfterFired => messages::alarm("Time is up!"),
            ClockEvent::AlarmAtFired => messages::alarm("It's time!"),
        }
    }
    print!("\r{}  ", status_line(snap));
    let _ = io::stdout().flush();
}

/// Run a work session for `company` and offer to save it as a timer record.
pub fn run_work(
    db: &Database,
    cfg: &Config,
    company: &Company,
    alarms: &[Alarm],
    inputs: &Inputs,
) -> AppResult<Option<Timer>> {
    if !company.used {
        return Err(AppError::CompanyInactive(company.name.clone()));
    }

    let start = now_secs();
    let mut state = ClockState::new();
    state.start_work(start);
    for alarm in alarms {
        alarm.arm(&mut state);
    }

    messages::header(format!("Working for {} ({})", company.name, company.shortcut));
    messages::info("Press Enter or q to stop, Ctrl-C to interrupt");

    let (snap_tx, snap_rx) = unbounded();
    let ticker = Ticker::spawn(state, TICK, snap_tx)?;
    let reason = drive(&snap_rx, inputs, false, render);
    let mut state = ticker.stop()?;
    println!();

    let finish = now_secs();
    let elapsed = state.stop_work(finish);
    debug!(?reason, elapsed, "work session stopped");

    finish_session(db, cfg, company, start, finish, inputs)
}

/// Offer a stopped session for saving and store it as a timer record on "yes".
pub fn finish_session(
    db: &Database,
    cfg: &Config,
    company: &Company,
    start: DateTime<Local>,
    finish: DateTime<Local>,
    inputs: &Inputs,
) -> AppResult<Option<Timer>> {
    let elapsed = u64::try_from((finish - start).num_seconds()).unwrap_or(0);
    if !worth_saving(elapsed, cfg.min_session_secs) {
        messages::info(format!("Session too short ({elapsed}s), nothing saved"));
        return Ok(None);
    }

    messages::confirmation_prompt(&format!(
        "Save {} for {}?",
        format_worked(elapsed),
        company.name
    ));
    if !inputs.answer() {
        messages::info("Session discarded");
        return Ok(None);
    }

    let mut timer = Timer::with_data(company.id, start.timestamp(), finish.timestamp());
    timer.save(db)?;
    info!(id = timer.id, company = %company.shortcut, "work session saved");
    messages::success(format!(
        "Saved {} for {} (timer #{})",
        format_worked(elapsed),
        company.name,
        timer.id
    ));
    Ok(Some(timer))
}

/// Run one alarm without a work timer; returns when it fires or the user stops.
pub fn run_alarm(alarm: Alarm, inputs: &Inputs) -> AppResult<StopReason> {
    let mut state = ClockState::new();
    alarm.arm(&mut state);

    match alarm {
        Alarm::After(secs) => messages::info(format!("Alarm in {}", format_hms(secs))),
        Alarm::At(t) => messages::info(format!("Alarm at {}", t.format("%H:%M:%S"))),
    }

    let (snap_tx, snap_rx) = unbounded();
    let ticker = Ticker::spawn(state, TICK, snap_tx)?;
    let reason = drive(&snap_rx, inputs, true, render);
    ticker.stop()?;
    println!();

    if reason != StopReason::Finished {
        messages::info("Alarm cancelled");
    }
    Ok(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn snap(idle: bool) -> Snapshot {
        Snapshot {
            now: Local.timestamp_opt(1_700_000_000, 0).unwrap(),
            elapsed: Some(12),
            alarm_after: None,
            alarm_at: None,
            events: vec![],
            idle,
        }
    }

    type Senders = (crossbeam_channel::Sender<String>, crossbeam_channel::Sender<()>);

    fn inputs() -> (Senders, Inputs) {
        let (ltx, lines) = unbounded();
        let (itx, interrupt) = bounded(1);
        ((ltx, itx), Inputs { lines, interrupt })
    }

    #[test]
    fn a_line_of_input_stops_the_session() {
        let (stx, srx) = unbounded();
        let ((ltx, _itx), inp) = inputs();
        stx.send(snap(false)).unwrap();
        ltx.send("q".into()).unwrap();

        assert_eq!(drive(&srx, &inp, false, |_| {}), StopReason::User);
    }

    #[test]
    fn interrupt_stops_the_session() {
        let (_stx, srx) = unbounded::<Snapshot>();
        let ((_ltx, itx), inp) = inputs();
        itx.send(()).unwrap();
        assert_eq!(drive(&srx, &inp, false, |_| {}), StopReason::Interrupted);
    }

    #[test]
    fn closed_stdin_is_ignored() {
        let (stx, srx) = unbounded();
        let ((ltx, _itx), inp) = inputs();
        drop(ltx);
        stx.send(snap(false)).unwrap();
        stx.send(snap(true)).unwrap();
        assert_eq!(drive(&srx, &inp, true, |_| {}), StopReason::Finished);
    }

    #[test]
    fn short_sessions_are_not_offered() {
        assert!(!worth_saving(5, 5));
        assert!(worth_saving(6, 5));
    }

    #[test]
    fn status_line_shows_running_clocks() {
        let line = status_line(&snap(false));
        assert!(line.contains("00:00:12"));
        assert!(!line.contains("alarm"));
    }

    #[test]
    fn alarm_parsing_validates_input() {
        assert_eq!(Alarm::after("01:30").unwrap(), Alarm::After(90));
        assert!(matches!(Alarm::after("x"), Err(AppError::InvalidDuration(_))));
        assert!(matches!(Alarm::at("25:00"), Err(AppError::InvalidTime(_))));
    }

    #[test]
    fn inactive_company_cannot_start_a_session() {
        let db = crate::db::initialize::memory_db().unwrap();
        let mut c = Company::with_data("old", "Old Corp");
        c.save(&db).unwrap();
        c.toggle_used(&db).unwrap();
        let (_senders, inp) = inputs();
        let err = run_work(&db, &Config::default(), &c, &[], &inp).unwrap_err();
        assert!(matches!(err, AppError::CompanyInactive(_)));
    }

    fn session(db: &Database) -> (Company, DateTime<Local>) {
        let mut c = Company::with_data("bee", "Beesoft");
        c.save(db).unwrap();
        (c, Local.timestamp_opt(1_704_103_200, 0).unwrap())
    }

    #[test]
    fn confirmed_session_is_saved_as_timer() {
        let db = crate::db::initialize::memory_db().unwrap();
        let (c, start) = session(&db);
        let finish = start + chrono::Duration::seconds(1_830);
        let ((ltx, _itx), inp) = inputs();
        ltx.send("y".into()).unwrap();

        let timer = finish_session(&db, &Config::default(), &c, start, finish, &inp)
            .unwrap()
            .unwrap();
        assert_eq!(timer.company_id, c.id);
        assert_eq!(timer.duration_secs(), 1_830);

        let stored = Timer::find(&db, timer.id).unwrap().unwrap();
        assert_eq!(stored.start, start.timestamp());
        assert_eq!(stored.finish, finish.timestamp());
    }

    #[test]
    fn declined_session_is_discarded() {
        let db = crate::db::initialize::memory_db().unwrap();
        let (c, start) = session(&db);
        let finish = start + chrono::Duration::seconds(600);
        let ((ltx, _itx), inp) = inputs();
        ltx.send("n".into()).unwrap();

        let saved = finish_session(&db, &Config::default(), &c, start, finish, &inp).unwrap();
        assert!(saved.is_none());
        assert_eq!(Timer::count_for_company(&db, c.id).unwrap(), 0);
    }

    #[test]
    fn closed_stdin_discards_the_session() {
        let db = crate::db::initialize::memory_db().unwrap();
        let (c, start) = session(&db);
        let finish = start + chrono::Duration::seconds(600);
        let ((ltx, _itx), inp) = inputs();
        drop(ltx);

        let saved = finish_session(&db, &Config::default(), &c, start, finish, &inp).unwrap();
        assert!(saved.is_none());
        assert_eq!(Timer::count_for_company(&db, c.id).unwrap(), 0);
    }

    #[test]
    fn session_of_exactly_the_minimum_is_not_offered() {
        let db = crate::db::initialize::memory_db().unwrap();
        let (c, start) = session(&db);
        let cfg = Config::default();
        let finish = start + chrono::Duration::seconds(cfg.min_session_secs as i64);
        let ((ltx, _itx), inp) = inputs();
        ltx.send("y".into()).unwrap();

        let saved = finish_session(&db, &cfg, &c, start, finish, &inp).unwrap();
        assert!(saved.is_none());
        assert_eq!(Timer::count_for_company(&db, c.id).unwrap(), 0);
        // the answer was never read
        assert_eq!(inp.lines.try_recv().unwrap(), "y");
    }
}
