//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use statera_core::console::{Command, ReportLine};

/// Channel capacity for parsed console commands
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Channel capacity for outgoing console lines
const REPORT_CHANNEL_SIZE: usize = 4;

/// Parsed commands from the console RX task to the scale task
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Formatted lines from the scale task to the console TX task
pub static REPORT_CHANNEL: Channel<CriticalSectionRawMutex, ReportLine, REPORT_CHANNEL_SIZE> =
    Channel::new();
