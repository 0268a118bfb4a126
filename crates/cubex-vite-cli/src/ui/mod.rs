//! Terminal output: status messages and the dev server banner.
//!
//! ```no_run
//! use cubex_vite_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Removed hot file");
//! ui::warning("No manifest found");
//! ```

mod banner;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use banner::Banner;
pub use messages::{error, info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(false);

/// Decide once whether status output is colored.
///
/// `--no-color` always disables colors; otherwise `NO_COLOR`, `FORCE_COLOR` and
/// the terminal decide.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && crate::logger::should_use_colors(), Ordering::Relaxed);
}

pub fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
