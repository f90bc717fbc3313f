use tracing::{debug, info, warn};

use crate::{
    coreaudio::CoreAudio,
    error::Error,
    property::{HardwareService, ObjectId, PropertyAddress, PropertyValue},
};

/// Requested levels below this mute the device instead of writing a volume.
pub const MUTE_THRESHOLD: f32 = 0.001;

/// Volume and mute control of whatever device is currently the default output.
///
/// Holds no device state: every call resolves the default output device again
/// and goes straight to the hardware service.
#[derive(Debug, Default, Clone)]
pub struct VolumeControl<H = CoreAudio> {
    hal: H,
}

impl<H: HardwareService> VolumeControl<H> {
    pub fn new(hal: H) -> Self {
        VolumeControl { hal }
    }

    /// Current default output device, or [`ObjectId::UNKNOWN`] if it can't be
    /// determined. Failures are logged.
    pub fn default_output_device(&self) -> ObjectId {
        self.try_default_output_device().unwrap_or(ObjectId::UNKNOWN)
    }

    pub fn try_default_output_device(&self) -> Result<ObjectId, Error> {
        let address = PropertyAddress::DEFAULT_OUTPUT_DEVICE;
        let device = self.read(ObjectId::SYSTEM, address).and_then(|value| match value {
            PropertyValue::Device(id) if id.is_unknown() => Err(Error::UnknownDevice),
            PropertyValue::Device(id) => Ok(id),
            _ => Err(Error::UnexpectedPayload { selector: address.selector }),
        });
        match &device {
            // callers report a resolved id of zero as an unknown device
            Err(Error::UnknownDevice) | Ok(_) => {}
            Err(error) => warn!(%error, "cannot find default output device"),
        }
        device
    }

    /// Virtual main volume of the default output device in `0.0..=1.0`.
    ///
    /// Every failure reads as `0.0`, so a silent device and a failed read look
    /// the same. Use [`VolumeControl::try_volume`] to tell them apart.
    pub fn volume(&self) -> f32 {
        self.try_volume().unwrap_or(0.0)
    }

    pub fn try_volume(&self) -> Result<f32, Error> {
        let device = self.resolve()?;
        let address = PropertyAddress::VIRTUAL_MAIN_VOLUME;
        let level = self.read(device, address).and_then(|value| match value {
            PropertyValue::Scalar(level) => Ok(level),
            _ => Err(Error::UnexpectedPayload { selector: address.selector }),
        });
        let level = level.inspect_err(|error| {
            warn!(%device, %error, "no volume returned for device");
        })?;

        // stored value outside the range is an error, but not a logged one
        if !(0.0..=1.0).contains(&level) {
            return Err(Error::OutOfRange(level));
        }
        Ok(level)
    }

    /// Sets the default output device to `level`, or mutes it when `level` is
    /// below [`MUTE_THRESHOLD`]. A non-muting level also clears the mute flag.
    ///
    /// Each failure is logged where it happens and the first one is returned.
    /// A failed volume write does not stop the un-mute that follows it.
    pub fn set_volume(&self, level: f32) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&level) {
            warn!("requested volume out of range ({level:.2})");
            return Err(Error::OutOfRange(level));
        }

        let mute = level < MUTE_THRESHOLD;
        if mute {
            info!("requested mute");
        } else {
            info!("requested volume {level:.2}");
        }

        let device = self.resolve()?;

        if mute {
            let address = PropertyAddress::MUTE;
            self.ensure_settable(device, address).inspect_err(|error| {
                warn!(%device, %error, "device does not support muting");
            })?;
            return self.write(device, address, PropertyValue::Flag(1)).inspect_err(|error| {
                warn!(%device, %error, "unable to mute device");
            });
        }

        let address = PropertyAddress::VIRTUAL_MAIN_VOLUME;
        self.ensure_settable(device, address).inspect_err(|error| {
            warn!(%device, %error, "device does not support volume control");
        })?;
        let volume_set = self
            .write(device, address, PropertyValue::Scalar(level))
            .inspect_err(|error| warn!(%device, %error, "unable to set volume for device"));

        // make sure we're not muted
        let address = PropertyAddress::MUTE;
        let unmuted = match self.ensure_settable(device, address) {
            Ok(()) => self
                .write(device, address, PropertyValue::Flag(0))
                .inspect_err(|error| warn!(%device, %error, "unable to un-mute device")),
            Err(error) => {
                warn!(%device, %error, "device does not support muting");
                Err(error)
            }
        };
        volume_set.and(unmuted)
    }

    pub fn is_muted(&self) -> Result<bool, Error> {
        let device = self.resolve()?;
        let address = PropertyAddress::MUTE;
        match self.read(device, address)? {
            PropertyValue::Flag(flag) => Ok(flag != 0),
            _ => Err(Error::UnexpectedPayload { selector: address.selector }),
        }
    }

    fn resolve(&self) -> Result<ObjectId, Error> {
        self.try_default_output_device().map_err(|_| {
            warn!("unknown device");
            Error::UnknownDevice
        })
    }

    fn read(&self, object: ObjectId, address: PropertyAddress) -> Result<PropertyValue, Error> {
        let selector = address.selector;
        if !self.hal.has_property(object, address) {
            return Err(Error::PropertyUnsupported { object, selector });
        }
        self.hal
            .get_property_data(object, address)
            .map_err(|status| Error::Os { object, selector, status })
    }

    fn ensure_settable(&self, object: ObjectId, address: PropertyAddress) -> Result<(), Error> {
        let selector = address.selector;
        if !self.hal.has_property(object, address) {
            return Err(Error::PropertyUnsupported { object, selector });
        }
        match self.hal.is_property_settable(object, address) {
            Ok(true) => Ok(()),
            Ok(false) => Err(Error::NotSettable { object, selector }),
            Err(status) => Err(Error::Os { object, selector, status }),
        }
    }

    fn write(
        &self,
        object: ObjectId,
        address: PropertyAddress,
        value: PropertyValue,
    ) -> Result<(), Error> {
        debug!(%object, selector = %address.selector, ?value, "writing property");
        self.hal
            .set_property_data(object, address, value)
            .map_err(|status| Error::Os { object, selector: address.selector, status })
    }
}
