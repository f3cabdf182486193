//! Core types for Gamesight.

pub mod answer;
pub mod chart;
pub mod trace;
pub mod usage;

pub use answer::*;
pub use chart::*;
pub use trace::*;
pub use usage::*;
