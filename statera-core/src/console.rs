//! Console command parsing and report formatting
//!
//! The controller accepts whitespace-separated text commands: the first
//! token names the command, the rest are numeric arguments. Argument
//! parsing is tolerant; a malformed number reads as zero, matching how the
//! deployed instrument software behaves.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::registry::MAX_CHANNELS;

/// Longest report interval accepted by `r` (seconds)
pub const MAX_REPORT_INTERVAL_S: u16 = 300;

/// Capacity of a formatted report line
pub const REPORT_LINE_LEN: usize = 96;

/// A formatted report line
pub type ReportLine = String<REPORT_LINE_LEN>;

/// A parsed console command
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `r` - print one report immediately
    ReportOnce,
    /// `r <seconds>` - set/replace the periodic report interval; 0 cancels
    ReportEvery(u16),
    /// `0` - begin zero averaging on every channel
    ZeroAll,
    /// `g <m1> [m2 ...]` - set channel scale multipliers
    SetScales(Vec<f32, MAX_CHANNELS>),
    /// `z` - print identification/version/diagnostic text
    Identify,
    /// `shutdown` - stop the controller main loop
    Shutdown,
}

/// Parse one command line
///
/// Returns `None` for empty input, unknown command names, and `g` without
/// arguments (which the instrument ignores).
pub fn parse(line: &str) -> Option<Command> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?;

    match name {
        "r" => match tokens.next() {
            None => Some(Command::ReportOnce),
            Some(token) => Some(Command::ReportEvery(clamp_interval(tolerant_float(
                token,
            )))),
        },
        "0" => Some(Command::ZeroAll),
        "g" => {
            let mut scales: Vec<f32, MAX_CHANNELS> = Vec::new();
            for token in tokens {
                if scales.push(tolerant_float(token)).is_err() {
                    break;
                }
            }
            if scales.is_empty() {
                None
            } else {
                Some(Command::SetScales(scales))
            }
        }
        "z" => Some(Command::Identify),
        "shutdown" => Some(Command::Shutdown),
        _ => None,
    }
}

/// Parse a number, reading anything malformed as zero
fn tolerant_float(token: &str) -> f32 {
    token.parse::<f32>().unwrap_or(0.0)
}

/// Round a requested report interval to the nearest whole second, halves to
/// even, and clamp it to 0-300 seconds
fn clamp_interval(seconds: f32) -> u16 {
    if seconds <= 0.0 {
        0
    } else if seconds >= MAX_REPORT_INTERVAL_S as f32 {
        MAX_REPORT_INTERVAL_S
    } else {
        let whole = seconds as u16;
        let frac = seconds - whole as f32;
        if frac > 0.5 || (frac == 0.5 && whole % 2 == 1) {
            whole + 1
        } else {
            whole
        }
    }
}

/// Format a report line: the sum of all channel values, then each value,
/// each right-justified to 8 characters with 2 decimal digits
pub fn format_report(values: &[f32]) -> ReportLine {
    let mut line = ReportLine::new();
    // Fold from +0.0; an empty float sum is -0.0, which would print "-0.00"
    let sum = values.iter().fold(0.0f32, |acc, v| acc + v);
    let _ = write!(line, "{sum:8.2}");
    for value in values {
        let _ = write!(line, " {value:8.2}");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_once() {
        assert_eq!(parse("r"), Some(Command::ReportOnce));
        assert_eq!(parse("  r  "), Some(Command::ReportOnce));
    }

    #[test]
    fn test_parse_report_interval() {
        assert_eq!(parse("r 10"), Some(Command::ReportEvery(10)));
        assert_eq!(parse("r 2.6"), Some(Command::ReportEvery(3)));
        assert_eq!(parse("r 0"), Some(Command::ReportEvery(0)));
    }

    #[test]
    fn test_report_interval_rounds_halves_to_even() {
        assert_eq!(parse("r 2.5"), Some(Command::ReportEvery(2)));
        assert_eq!(parse("r 3.5"), Some(Command::ReportEvery(4)));
        assert_eq!(parse("r 4.5"), Some(Command::ReportEvery(4)));
    }

    #[test]
    fn test_report_interval_clamped() {
        assert_eq!(parse("r 500"), Some(Command::ReportEvery(300)));
        assert_eq!(parse("r -5"), Some(Command::ReportEvery(0)));
    }

    #[test]
    fn test_malformed_number_reads_as_zero() {
        assert_eq!(parse("r abc"), Some(Command::ReportEvery(0)));
        let cmd = parse("g 2.5 xyz").unwrap();
        match cmd {
            Command::SetScales(scales) => assert_eq!(&scales[..], &[2.5, 0.0]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_zero_all() {
        assert_eq!(parse("0"), Some(Command::ZeroAll));
    }

    #[test]
    fn test_parse_scales() {
        match parse("g 450.1").unwrap() {
            Command::SetScales(scales) => assert_eq!(&scales[..], &[450.1]),
            other => panic!("unexpected command {other:?}"),
        }
        match parse("g 1 2").unwrap() {
            Command::SetScales(scales) => assert_eq!(&scales[..], &[1.0, 2.0]),
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(parse("g"), None);
    }

    #[test]
    fn test_parse_identify_and_shutdown() {
        assert_eq!(parse("z"), Some(Command::Identify));
        assert_eq!(parse("shutdown"), Some(Command::Shutdown));
    }

    #[test]
    fn test_unknown_and_empty_input() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("frobnicate 1 2"), None);
    }

    #[test]
    fn test_report_format() {
        let line = format_report(&[1.0, 2.5]);
        assert_eq!(line.as_str(), "    3.50     1.00     2.50");
    }

    #[test]
    fn test_report_format_negative_values() {
        let line = format_report(&[-1.25, 0.0]);
        assert_eq!(line.as_str(), "   -1.25    -1.25     0.00");
    }

    #[test]
    fn test_report_format_no_channels() {
        let line = format_report(&[]);
        assert_eq!(line.as_str(), "    0.00");
    }
}
