//! DEX price feeds.
//!
//! - `source` - the `PriceSource` trait the poll loop depends on
//! - `dexscreener` - REST client for DexScreener pair endpoints

pub mod dexscreener;
pub mod error;
pub mod source;

pub use dexscreener::*;
pub use error::*;
pub use source::*;
