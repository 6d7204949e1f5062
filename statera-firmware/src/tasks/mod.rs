//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod console_rx;
pub mod console_tx;
pub mod heartbeat;
pub mod scale;

pub use console_rx::console_rx_task;
pub use console_tx::console_tx_task;
pub use heartbeat::heartbeat_task;
pub use scale::{scale_task, ScaleChannel, ScaleRegistry};
