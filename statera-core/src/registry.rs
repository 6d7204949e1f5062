//! Channel registry and tick scheduling
//!
//! An insertion-ordered collection of live acquisition channels. The
//! periodic tick walks the registry in registration order and performs one
//! read per channel; the whole traversal must fit inside one tick period,
//! which bounds how many channels a given tick rate can service.

use crate::traits::BridgeChannel;

/// Default registry capacity
pub const MAX_CHANNELS: usize = 4;

/// Insertion-ordered collection of acquisition channels
///
/// Registration and deregistration are explicit operations matching the
/// channel lifecycle: a channel is registered right after construction and
/// deregistered (which powers its chip down) at controller shutdown.
#[derive(Debug)]
pub struct Registry<C, const N: usize = MAX_CHANNELS> {
    channels: heapless::Vec<C, N>,
}

impl<C, const N: usize> Default for Registry<C, N> {
    fn default() -> Self {
        Self {
            channels: heapless::Vec::new(),
        }
    }
}

impl<C: BridgeChannel, const N: usize> Registry<C, N> {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            channels: heapless::Vec::new(),
        }
    }

    /// Append a channel; reads happen in registration order
    ///
    /// Returns the channel back if the registry is full.
    pub fn register(&mut self, channel: C) -> Result<(), C> {
        self.channels.push(channel)
    }

    /// Remove the channel with the given label
    ///
    /// The channel is shut down (chip powered down, timed windows cancelled)
    /// before removal, so a subsequent tick never reads it.
    pub fn deregister(&mut self, label: &str) -> Option<C> {
        let index = self.channels.iter().position(|c| c.label() == label)?;
        let mut channel = self.channels.remove(index);
        channel.shutdown();
        Some(channel)
    }

    /// Shut down and remove every channel, in reverse registration order
    pub fn shutdown_all(&mut self) {
        while let Some(mut channel) = self.channels.pop() {
            channel.shutdown();
        }
    }

    /// Perform one read per channel, in registration order
    pub fn tick(&mut self) {
        for channel in self.channels.iter_mut() {
            channel.read();
        }
    }

    /// Begin a fresh zero-averaging cycle on every channel
    pub fn zero_all(&mut self) {
        for channel in self.channels.iter_mut() {
            channel.zero_now();
        }
    }

    /// Replace channel scale multipliers
    ///
    /// A single value applies to every channel; multiple values are paired
    /// with channels in registration order, extras ignored.
    pub fn set_scales(&mut self, scales: &[f32]) {
        match scales {
            [] => {}
            [scale] => {
                for channel in self.channels.iter_mut() {
                    channel.set_scale(*scale);
                }
            }
            scales => {
                for (channel, scale) in self.channels.iter_mut().zip(scales) {
                    channel.set_scale(*scale);
                }
            }
        }
    }

    /// Sum of every channel's last committed value
    pub fn sum(&self) -> f32 {
        // Fold from +0.0; an empty float sum is -0.0
        self.channels.iter().map(|c| c.value()).fold(0.0, |acc, v| acc + v)
    }

    /// Number of registered channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// True when no channels are registered
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Iterate over channels in registration order
    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.channels.iter()
    }

    /// Iterate mutably over channels in registration order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut C> {
        self.channels.iter_mut()
    }

    /// Look up a channel by label
    pub fn get(&self, label: &str) -> Option<&C> {
        self.channels.iter().find(|c| c.label() == label)
    }

    /// Look up a channel mutably by label
    pub fn get_mut(&mut self, label: &str) -> Option<&mut C> {
        self.channels.iter_mut().find(|c| c.label() == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Status;
    use heapless::String;

    /// Mock channel recording the operations applied to it
    struct MockChannel {
        label: String<8>,
        reads: u32,
        zeroed: u32,
        scale: f32,
        value: f32,
        shut_down: bool,
    }

    impl MockChannel {
        fn new(label: &str, value: f32) -> Self {
            let mut l = String::new();
            let _ = l.push_str(label);
            Self {
                label: l,
                reads: 0,
                zeroed: 0,
                scale: 1.0,
                value,
                shut_down: false,
            }
        }
    }

    impl BridgeChannel for MockChannel {
        fn read(&mut self) -> f32 {
            self.reads += 1;
            self.value
        }

        fn value(&self) -> f32 {
            self.value
        }

        fn status(&self) -> Status {
            Status::NOMINAL
        }

        fn label(&self) -> &str {
            self.label.as_str()
        }

        fn zero_now(&mut self) {
            self.zeroed += 1;
        }

        fn set_scale(&mut self, scale: f32) {
            self.scale = scale;
        }

        fn shutdown(&mut self) {
            self.shut_down = true;
        }
    }

    fn two_channel_registry() -> Registry<MockChannel, 4> {
        let mut reg = Registry::new();
        assert!(reg.register(MockChannel::new("hx1", 1.5)).is_ok());
        assert!(reg.register(MockChannel::new("hx2", 2.25)).is_ok());
        reg
    }

    #[test]
    fn test_tick_reads_every_channel_once() {
        let mut reg = two_channel_registry();
        reg.tick();
        reg.tick();
        for ch in reg.iter() {
            assert_eq!(ch.reads, 2);
        }
    }

    #[test]
    fn test_registration_order_preserved() {
        let reg = two_channel_registry();
        let labels: heapless::Vec<&str, 4> = reg.iter().map(|c| c.label()).collect();
        assert_eq!(&labels[..], &["hx1", "hx2"]);
    }

    #[test]
    fn test_deregister_shuts_down_and_removes() {
        let mut reg = two_channel_registry();
        let removed = reg.deregister("hx1").unwrap();
        assert!(removed.shut_down);
        assert_eq!(reg.len(), 1);

        // A subsequent tick never reads the removed channel
        reg.tick();
        assert_eq!(removed.reads, 0);
        assert_eq!(reg.get("hx2").unwrap().reads, 1);
    }

    #[test]
    fn test_deregister_unknown_label() {
        let mut reg = two_channel_registry();
        assert!(reg.deregister("nope").is_none());
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_register_when_full() {
        let mut reg: Registry<MockChannel, 1> = Registry::new();
        assert!(reg.register(MockChannel::new("a", 0.0)).is_ok());
        let rejected = reg.register(MockChannel::new("b", 0.0));
        assert!(rejected.is_err());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_zero_all() {
        let mut reg = two_channel_registry();
        reg.zero_all();
        for ch in reg.iter() {
            assert_eq!(ch.zeroed, 1);
        }
    }

    #[test]
    fn test_single_scale_applies_to_all() {
        let mut reg = two_channel_registry();
        reg.set_scales(&[2.5]);
        for ch in reg.iter() {
            assert_eq!(ch.scale, 2.5);
        }
    }

    #[test]
    fn test_multiple_scales_pair_in_order() {
        let mut reg = two_channel_registry();
        reg.set_scales(&[2.0, 3.0, 4.0]);
        assert_eq!(reg.get("hx1").unwrap().scale, 2.0);
        assert_eq!(reg.get("hx2").unwrap().scale, 3.0);
    }

    #[test]
    fn test_sum() {
        let reg = two_channel_registry();
        assert_eq!(reg.sum(), 3.75);
    }

    #[test]
    fn test_empty_registry_sums_to_positive_zero() {
        let reg: Registry<MockChannel, 4> = Registry::new();
        let sum = reg.sum();
        assert_eq!(sum, 0.0);
        assert!(sum.is_sign_positive());
    }

    #[test]
    fn test_shutdown_all_empties_registry() {
        let mut reg = two_channel_registry();
        reg.shutdown_all();
        assert!(reg.is_empty());
    }
}
