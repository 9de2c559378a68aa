//! Interest, penalty and maturity computations

pub mod calculator;

pub use calculator::*;
