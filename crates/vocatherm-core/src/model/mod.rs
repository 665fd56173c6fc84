// ── Domain model ──

mod states;

pub use states::{Control, Mode, StateArg, SwitchState};
