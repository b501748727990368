//! timelancer main entrypoint.

use timelancer::run;
use timelancer::ui::messages;

fn main() {
    if let Err(e) = run() {
        tracing::error!("{e}");
        messages::error(e.user_message());
        std::process::exit(1);
    }
}
