//! Phase-entry hooks the session installs on its input queue.
//!
//! The queue only reports phase entries; hooks here translate them into calls
//! on external collaborators and buffer whatever inputs those produce. The
//! session drains the buffer and feeds it back through normal admission.

mod referee;

pub use referee::{Referee, RefereeHook};
