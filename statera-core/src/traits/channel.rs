//! Acquisition channel trait

use crate::status::Status;

/// One calibrated bridge-ADC acquisition channel
///
/// Implemented by chip drivers. `read` runs a full conversion-retrieval
/// cycle and is called once per scheduler tick; consumers observe the
/// outcome through `value` and `status` at any time.
pub trait BridgeChannel {
    /// Run one protocol read cycle and return the committed value
    ///
    /// Transient hardware conditions never fail the call; they are recorded
    /// in the status flags and the previous committed value is returned.
    fn read(&mut self) -> f32;

    /// Last committed measurement
    fn value(&self) -> f32;

    /// Current status flags
    fn status(&self) -> Status;

    /// Identity label for reports and deregistration
    fn label(&self) -> &str;

    /// Begin a fresh zero-offset averaging cycle
    fn zero_now(&mut self);

    /// Replace the scale multiplier applied to offset-corrected counts
    fn set_scale(&mut self, scale: f32);

    /// Power the chip down and cancel any pending timed windows
    ///
    /// Called by the registry when the channel is deregistered.
    fn shutdown(&mut self);
}
