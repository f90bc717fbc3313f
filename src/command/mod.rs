use std::ffi::OsString;

use clap::{CommandFactory, Parser, error::ErrorKind};
use tracing::debug;

use crate::{device::VolumeControl, property::HardwareService};

pub const EXIT_OK: u8 = 0;
pub const EXIT_INVALID: u8 = 1;

/// Set the output volume of the default audio device.
///
/// `setvol 0` mutes, `setvol 0.5` sets half volume, `setvol 1` full volume.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Volume between 0 and 1. Anything below 0.001 mutes the device
    #[arg(value_name = "LEVEL", allow_hyphen_values = true)]
    pub level: OsString,
}

impl Args {
    /// Parses the command line, which must hold exactly one argument besides
    /// the program name. A lone `--` is taken as the level rather than as the
    /// end-of-options marker.
    pub fn try_parse_args(args: Vec<OsString>) -> Result<Args, clap::Error> {
        match args.as_slice() {
            [_, level] if level == "--" => Ok(Args { level: level.clone() }),
            [_, _] => Args::try_parse_from(args),
            _ => Args::try_parse_from(args).and_then(|_| {
                Err(Args::command().error(ErrorKind::WrongNumberOfValues, "expected exactly one LEVEL"))
            }),
        }
    }

    /// The requested level. Text that is not valid UTF-8 reads as `0.0`.
    pub fn level(&self) -> f32 {
        self.level.to_str().map_or(0.0, parse_level)
    }
}

/// Runs one invocation against `hal` and returns the process exit status.
///
/// Only the argument decides the status: once a level in `0.0..=1.0` is
/// accepted the result is [`EXIT_OK`], whatever the device did with it.
pub fn run<I, T, H>(args: I, hal: H) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    H: HardwareService,
{
    let args = match Args::try_parse_args(args.into_iter().map(Into::into).collect()) {
        Ok(args) => args,
        Err(error) => {
            let _ = error.print();
            return match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_OK,
                _ => EXIT_INVALID,
            };
        }
    };

    let level = args.level();
    if !(0.0..=1.0).contains(&level) {
        debug!(input = ?args.level, level, "level outside 0.0..=1.0");
        return EXIT_INVALID;
    }

    if let Err(error) = VolumeControl::new(hal).set_volume(level) {
        debug!(%error, "volume request not fully applied");
    }
    EXIT_OK
}

/// Reads the longest leading decimal number of `input`, like C's `atof`.
///
/// Leading whitespace is skipped and trailing garbage ignored. Input with no
/// number in front reads as `0.0`.
pub fn parse_level(input: &str) -> f32 {
    let text = input.trim_start();
    let bytes = text.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let whole = digits(&bytes[end..]);
    end += whole;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits(&bytes[end + 1..]);
        if whole + fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole + fraction == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let count = digits(&bytes[exponent..]);
        if count > 0 {
            end = exponent + count;
        }
    }

    text[..end].parse().unwrap_or(0.0)
}

fn digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
