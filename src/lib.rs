//! Set the system output volume of the default audio device.
//!
//! The volume logic in [`VolumeControl`] runs against any [`HardwareService`];
//! [`CoreAudio`] is the one that talks to the OS.

use tracing_subscriber::EnvFilter;

pub mod command;
pub mod coreaudio;
pub mod device;
pub mod error;
pub mod property;

#[cfg(test)]
mod mock;

pub use coreaudio::CoreAudio;
pub use device::{MUTE_THRESHOLD, VolumeControl};
pub use error::Error;
pub use property::{HardwareService, ObjectId, OsStatus, PropertyAddress, PropertyValue};

#[cfg(feature = "debug")]
const DEFAULT_FILTER: &str = "debug";

#[cfg(not(feature = "debug"))]
const DEFAULT_FILTER: &str = "info";

/// Sends diagnostics to stderr. `RUST_LOG` overrides the default level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
