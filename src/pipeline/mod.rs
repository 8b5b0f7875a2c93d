//! Orchestrator stages, one per step of a conversion.
//!
//! Every stage is a small function over plain values so it can be tested on
//! its own. Only [`renderer`] and [`execute`] reach the outside world, and
//! both do it through an [`crate::engine::EngineRunner`].
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ target ──▶ validate ──▶ renderer ──▶ command ──▶ execute
//! (exists,   (output    (static      (LaTeX       (argv)      (spawn,
//!  format)    path/fmt)  rules)       probe)                   verify)
//! ```
//!
//! 1. [`input`]    — the input must exist and have a known (or explicit) format
//! 2. [`target`]   — resolve or synthesise the output path and format
//! 3. [`validate`] — reject pairings the engine cannot sensibly produce
//! 4. [`renderer`] — PDF targets need a LaTeX engine on the search path
//! 5. [`command`]  — deterministic argument list for the engine
//! 6. [`execute`]  — run the engine, then check the output really exists

pub mod command;
pub mod execute;
pub mod input;
pub mod renderer;
pub mod target;
pub mod validate;
