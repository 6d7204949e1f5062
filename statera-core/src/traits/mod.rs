//! Hardware-facing trait definitions
//!
//! The registry and the console glue talk to acquisition channels through
//! these traits, so the core never depends on a specific chip driver.

mod channel;

pub use channel::BridgeChannel;
