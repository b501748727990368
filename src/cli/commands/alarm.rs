use crate::cli::parser::AlarmAction;
use crate::core::session::{self, Alarm, Inputs};
use crate::errors::AppResult;

pub fn handle(action: &AlarmAction) -> AppResult<()> {
    let alarm = match action {
        AlarmAction::After { duration } => Alarm::after(duration)?,
        AlarmAction::At { time } => Alarm::at(time)?,
    };
    session::run_alarm(alarm, &Inputs::terminal()?)?;
    Ok(())
}
