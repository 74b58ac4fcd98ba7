//! Tip Calculator
//!
//! Calculates a tip from a bill price and a service quality rating, adds a
//! surcharge for every customer beyond the first, and rounds the final price
//! up to a multiple of ten.

pub mod config;
pub mod engine;
pub mod form;
pub mod logging;
pub mod quality;
pub mod quote;
pub mod rounding;
pub mod tariff;
