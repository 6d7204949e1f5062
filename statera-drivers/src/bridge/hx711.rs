//! HX711 bridge-amplifier ADC driver
//!
//! Bit-bangs the chip's clock-synchronous two-wire protocol directly on a
//! GPIO pair: a clock output (PD_SCK) and a data input (DOUT). Each read
//! shifts in 24 data bits, checks the mandatory 25th pulse, and appends the
//! trailing pulses that select the gain/channel for the next conversion.
//! Raw counts are zero-corrected, scaled, and optionally smoothed into the
//! channel's committed value.
//!
//! Transient hardware conditions (data not ready, stuck data line, count at
//! full scale) are recorded as status flags and suppress the value commit
//! for that cycle; they never abort the channel.

use heapless::String;

use statera_core::config::{self, ChannelConfig, ConfigError, Gain};
use statera_core::status::Status;
use statera_core::traits::BridgeChannel;
use statera_hal::gpio::{InputPin, OutputPin};
use statera_hal::lock::ScopedLock;
use statera_hal::time::{Deadline, Timebase};

/// Maximum channel label length
pub const MAX_LABEL_LEN: usize = 24;

/// One HX711 acquisition channel
///
/// Owns the chip's pin pair, configuration, calibration state, and status.
/// Methods take `&mut self`, so two callers can never interleave pulses on
/// the same pins; the scoped lock additionally keeps the pulse train
/// non-preemptible on target, where the chip's timing tolerance is in
/// single-digit microseconds.
pub struct Hx711<O, I, T, L> {
    label: String<MAX_LABEL_LEN>,
    clock: O,
    data: I,
    timebase: T,
    lock: L,
    gain: Gain,
    status: Status,
    /// Raw count corresponding to a physical zero reading
    offset: i32,
    /// Multiplier converting offset-corrected counts to meaningful units
    scale: f32,
    /// Exponential smoothing coefficient; in (0, 1) enables filtering
    filter: f32,
    zeros_to_average: u32,
    /// Settled readings seen so far; never passes `zeros_to_average`
    samples: u32,
    zero_sum: i64,
    /// Last committed measurement
    value: f32,
    settle_deadline: Option<Deadline>,
    ready_deadline: Option<Deadline>,
}

impl<O, I, T, L> Hx711<O, I, T, L>
where
    O: OutputPin,
    I: InputPin,
    T: Timebase,
    L: ScopedLock,
{
    /// Construct a channel and reset its chip
    ///
    /// Validates the configured gain code and performs a full power-down /
    /// power-up cycle, leaving the chip converting with the configured
    /// gain. The caller registers the channel afterwards.
    pub fn new(
        label: &str,
        clock: O,
        data: I,
        timebase: T,
        lock: L,
        cfg: ChannelConfig,
    ) -> Result<Self, ConfigError> {
        let gain = Gain::from_code(cfg.gain_code)?;

        let mut name = String::new();
        let _ = name.push_str(label);

        let mut channel = Self {
            label: name,
            clock,
            data,
            timebase,
            lock,
            gain,
            status: Status::INITIALIZING,
            offset: 0,
            scale: cfg.scale,
            filter: cfg.filter,
            zeros_to_average: cfg.zeros_to_average,
            samples: 0,
            zero_sum: 0,
            value: 0.0,
            settle_deadline: None,
            ready_deadline: None,
        };

        channel.reset();
        channel.status.clear(Status::INITIALIZING);
        Ok(channel)
    }

    /// Power the chip down
    ///
    /// The chip powers off once the clock line stays high for more than
    /// 60 µs, stays off while it remains high, and powers back on when the
    /// clock goes low. Normal 1 µs read pulses never trip this threshold.
    pub fn power_down(&mut self) {
        // Slightly premature, but the right answer for anyone checking
        // status mid-sequence.
        self.status.set(Status::POWERED_DOWN | Status::NOT_SETTLED);
        self.clock.set_high();
        self.timebase.delay_us(config::POWER_DOWN_HOLD_US);
    }

    /// Power the chip up and start a fresh zero-averaging cycle
    pub fn power_up(&mut self) {
        self.status.set(Status::POWERING_UP | Status::NOT_SETTLED);
        self.zero_now();
        self.clock.set_low();
        self.status.clear(Status::POWERED_DOWN);
        self.arm_settle();
        // Push the configured gain into the chip; it only commits a
        // selection after a full read cycle with the new pulse count.
        self.apply_gain();
        self.status.clear(Status::POWERING_UP);
    }

    /// Reset the chip: power down and back up
    pub fn reset(&mut self) {
        self.power_down();
        self.power_up();
    }

    /// True unless the channel is initializing, powered down, or powering up
    pub fn powered_up(&self) -> bool {
        !self
            .status
            .contains(Status::INITIALIZING | Status::POWERED_DOWN | Status::POWERING_UP)
    }

    /// True when powered up and past the settling window
    pub fn settled(&mut self) -> bool {
        self.service_settle();
        self.powered_up() && !self.status.contains(Status::NOT_SETTLED)
    }

    /// Block until settled, polling at 1 ms; returns at once if powered down
    pub fn wait_settled(&mut self) {
        while self.powered_up() && !self.settled() {
            self.timebase.delay_ms(1);
        }
    }

    /// Ensure the given gain/channel selection is configured
    ///
    /// Returns false without touching anything when the selection is
    /// already current. Otherwise performs one throwaway read with the new
    /// pulse count (the chip only commits the selection after a full read
    /// cycle) and restarts the settling window.
    pub fn set_gain(&mut self, gain: Gain) -> bool {
        if gain == self.gain {
            return false;
        }

        self.gain = gain;
        self.apply_gain();
        self.status.set(Status::NOT_SETTLED);
        self.arm_settle();
        true
    }

    /// [`set_gain`](Self::set_gain) from a raw configuration code
    pub fn set_gain_code(&mut self, code: u8) -> Result<bool, ConfigError> {
        Ok(self.set_gain(Gain::from_code(code)?))
    }

    /// Check whether the chip has a conversion ready (data line low)
    ///
    /// While settled and not ready, a timeout window runs; if readiness
    /// takes longer than the window the data-ready-timeout flag is raised.
    /// Any ready observation cancels the window and clears both flags.
    pub fn data_ready(&mut self) -> bool {
        let ready = self.data.is_low();
        if ready {
            self.ready_deadline = None;
            self.status
                .clear(Status::DATA_NOT_READY | Status::DATA_READY_TIMEOUT);
        } else {
            self.status.set(Status::DATA_NOT_READY);
            match self.ready_deadline {
                None => {
                    if self.settled() {
                        self.ready_deadline = Some(Deadline::after(
                            self.timebase.now_ms(),
                            config::DATA_READY_TIMEOUT_MS,
                        ));
                    }
                }
                Some(deadline) => {
                    if deadline.expired(self.timebase.now_ms()) {
                        self.status.set(Status::DATA_READY_TIMEOUT);
                        self.ready_deadline = None;
                    }
                }
            }
        }
        ready
    }

    /// Block up to `timeout_ms` for a ready conversion, polling at 1 ms
    pub fn wait_data_ready(&mut self, timeout_ms: u32) -> bool {
        for _ in 0..timeout_ms {
            if self.data_ready() {
                return true;
            }
            self.timebase.delay_ms(1);
        }
        false
    }

    /// Send one clock pulse and sample the data line
    ///
    /// The pulse must stay within the chip's 0.2-50 µs window; data is
    /// valid within 0.1 µs of the rising edge, so no wait is needed before
    /// sampling.
    pub fn clock_a_data_bit(&mut self) -> bool {
        clock_bit(&mut self.clock, &self.data, &mut self.timebase)
    }

    /// Acquire one conversion and update the committed value
    ///
    /// If no data is ready, no pins are touched and the previous value is
    /// returned with the no-data flag set. Otherwise the full pulse train
    /// runs under the scoped lock, the raw count is sign-extended and
    /// range-checked, the zero-averaging window advances while settled, and
    /// a new value is committed only if the status is exactly nominal.
    pub fn read(&mut self) -> f32 {
        if self.data_ready() {
            self.status.clear(Status::NO_DATA);
        } else {
            self.status.set(Status::NO_DATA);
            return self.value;
        }

        let trailing = self.gain.code();
        let (raw, stuck_low) = {
            let clock = &mut self.clock;
            let data = &self.data;
            let timebase = &mut self.timebase;
            self.lock.with(|| {
                let mut raw: u32 = 0;
                for _ in 0..24 {
                    raw <<= 1;
                    raw |= clock_bit(clock, data, timebase) as u32;
                }

                // The total clock count selects the configuration for the
                // next conversion: 25 pulses = A/128, 26 = B/32, 27 = A/64.
                // The chip must drive the data line high on the 25th pulse.
                if !clock_bit(clock, data, timebase) {
                    (raw, true)
                } else {
                    for _ in 0..trailing {
                        clock_bit(clock, data, timebase);
                    }
                    (raw, false)
                }
            })
        };

        if stuck_low {
            self.status.set(Status::STUCK_LOW);
            return self.value;
        }
        self.status.clear(Status::STUCK_LOW);

        let raw = config::sign_extend_24(raw);
        if raw == config::MAX_RAW || raw == config::MIN_RAW {
            self.status.set(Status::OUT_OF_RANGE);
        } else {
            self.status.clear(Status::OUT_OF_RANGE);
        }

        if self.settled() {
            // The sample counter stops at the target, so a long-running
            // channel can never wrap it back into the averaging window.
            if self.samples < self.zeros_to_average {
                self.zero_sum += i64::from(raw);
                self.samples += 1;
            }

            let mut rebaselined = false;
            if self.status.contains(Status::ZEROING) && self.samples >= self.zeros_to_average {
                if self.zeros_to_average > 0 {
                    self.offset =
                        config::round_div(self.zero_sum, i64::from(self.zeros_to_average)) as i32;
                }
                self.status.clear(Status::ZEROING);
                rebaselined = true;
            }

            if self.status.is_nominal() {
                let candidate = self.scale * (raw - self.offset) as f32;
                let smoothing = self.filter > 0.0 && self.filter < 1.0;
                self.value = if smoothing && !rebaselined && self.samples >= self.zeros_to_average
                {
                    self.value * self.filter + candidate * (1.0 - self.filter)
                } else {
                    // The first value after a zero cycle is a fresh
                    // baseline; blending it with a stale pre-zero value
                    // would be wrong.
                    candidate
                };
            }
        }

        self.value
    }

    /// Begin averaging readings to find the chip's zero offset
    pub fn zero_now(&mut self) {
        self.zero_sum = 0;
        self.samples = 0;
        self.status.set(Status::ZEROING);
    }

    /// Power down and cancel both pending timed windows
    pub fn shutdown(&mut self) {
        self.power_down();
        self.settle_deadline = None;
        self.ready_deadline = None;
    }

    /// Channel label
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Last committed measurement
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Current status flags
    pub fn status(&self) -> Status {
        self.status
    }

    /// Current gain/channel selection
    pub fn gain(&self) -> Gain {
        self.gain
    }

    /// Current zero offset in raw counts
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Current scale multiplier
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Replace the scale multiplier
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Current smoothing coefficient
    pub fn filter(&self) -> f32 {
        self.filter
    }

    /// Replace the smoothing coefficient; values outside (0, 1) disable
    /// filtering
    pub fn set_filter(&mut self, filter: f32) {
        self.filter = filter;
    }

    /// Target sample count for zero averaging
    pub fn zeros_to_average(&self) -> u32 {
        self.zeros_to_average
    }

    /// Replace the zero-averaging target; takes effect at the next
    /// [`zero_now`](Self::zero_now)
    pub fn set_zeros_to_average(&mut self, count: u32) {
        self.zeros_to_average = count;
    }

    fn arm_settle(&mut self) {
        // Replacing the deadline cancels any window still pending.
        self.settle_deadline = Some(Deadline::after(
            self.timebase.now_ms(),
            config::SETTLING_TIME_MS,
        ));
    }

    fn service_settle(&mut self) {
        if let Some(deadline) = self.settle_deadline {
            if deadline.expired(self.timebase.now_ms()) {
                self.status.clear(Status::NOT_SETTLED);
                self.settle_deadline = None;
            }
        }
    }

    /// Run one read cycle so the chip latches the current gain selection
    fn apply_gain(&mut self) {
        self.wait_data_ready(config::DATA_READY_TIMEOUT_MS);
        let _ = self.read();
    }
}

/// The unit of the bit-banged protocol; must never be interrupted mid-pulse
fn clock_bit<O, I, T>(clock: &mut O, data: &I, timebase: &mut T) -> bool
where
    O: OutputPin,
    I: InputPin,
    T: Timebase,
{
    clock.set_high();
    timebase.delay_us(config::CLOCK_PULSE_US);
    clock.set_low();
    data.is_high()
}

impl<O, I, T, L> BridgeChannel for Hx711<O, I, T, L>
where
    O: OutputPin,
    I: InputPin,
    T: Timebase,
    L: ScopedLock,
{
    fn read(&mut self) -> f32 {
        Hx711::read(self)
    }

    fn value(&self) -> f32 {
        Hx711::value(self)
    }

    fn status(&self) -> Status {
        Hx711::status(self)
    }

    fn label(&self) -> &str {
        Hx711::label(self)
    }

    fn zero_now(&mut self) {
        Hx711::zero_now(self)
    }

    fn set_scale(&mut self, scale: f32) {
        Hx711::set_scale(self, scale)
    }

    fn shutdown(&mut self) {
        Hx711::shutdown(self)
    }
}
