//! sitegrid main entrypoint.

use sitegrid::run;
use sitegrid::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
