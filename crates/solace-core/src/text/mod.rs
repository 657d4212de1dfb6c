//! Text post-processing utilities.

mod distress;
mod markdown;
mod question;

pub use distress::{DISTRESS_NOTICE, contains_distress_signal};
pub use markdown::strip_markdown;
pub use question::is_question;
