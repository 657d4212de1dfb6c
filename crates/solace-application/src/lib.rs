//! Application layer for Solace.
//!
//! Hosts the response assembler: prompt construction, tone resolution,
//! and the use case orchestrating one interaction end to end.

pub mod context;
pub mod prompt;
pub mod tone;
pub mod usecase;

pub use usecase::{RespondRequest, WellnessReply, WellnessUseCase};
