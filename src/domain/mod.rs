// src/domain/mod.rs
pub mod bids;
pub mod clock;
pub mod core;
pub mod ledger;
pub mod players;
pub mod queue;
pub mod repositories;
pub mod session;
pub mod teams;

pub use self::bids::*;
pub use self::clock::*;
pub use self::core::*;
pub use self::ledger::*;
pub use self::players::*;
pub use self::queue::*;
pub use self::repositories::*;
pub use self::session::*;
pub use self::teams::*;
