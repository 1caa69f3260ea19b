//! Core data types for the pair ratio bot.

pub mod chain;
pub mod pair;
pub mod price;
pub mod ratio;

pub use chain::*;
pub use pair::*;
pub use price::*;
pub use ratio::*;
