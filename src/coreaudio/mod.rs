//! [`HardwareService`] backed by the CoreAudio HAL.
//!
//! Every property goes through the `AudioObject*` family with the main element.
//! The virtual main volume selector is the same one `AudioHardwareService`
//! exposes; the HAL answers it directly on current macOS releases.

/// Zero-sized handle on the system audio service.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoreAudio;

#[cfg(target_os = "macos")]
mod hal {
    use std::mem::size_of;
    use std::ptr::{NonNull, null};

    use objc2_core_audio::{
        AudioObjectGetPropertyData, AudioObjectHasProperty, AudioObjectIsPropertySettable,
        AudioObjectPropertyAddress, AudioObjectSetPropertyData, kAudioObjectPropertyElementMain,
    };
    use tracing::trace;

    use super::CoreAudio;
    use crate::property::{
        HardwareService, ObjectId, OsStatus, Payload, PropertyAddress, PropertyValue,
    };

    fn raw_address(address: PropertyAddress) -> AudioObjectPropertyAddress {
        AudioObjectPropertyAddress {
            mSelector: address.selector.code(),
            mScope: address.scope.code(),
            mElement: kAudioObjectPropertyElementMain,
        }
    }

    // Boolean is a plain byte in the C headers
    fn truthy<T: Default + PartialEq>(value: T) -> bool {
        value != T::default()
    }

    fn get_raw<T: Copy + Default>(
        object: ObjectId,
        address: &AudioObjectPropertyAddress,
    ) -> Result<T, OsStatus> {
        let mut data = T::default();
        let mut data_size = size_of::<T>() as u32;
        let status = unsafe {
            AudioObjectGetPropertyData(
                object.0,
                NonNull::from(address),
                0,
                null(),
                NonNull::from(&mut data_size),
                NonNull::from(&mut data).cast(),
            )
        };
        OsStatus::check(status)?;
        if data_size as usize != size_of::<T>() {
            return Err(OsStatus::BAD_SIZE);
        }
        Ok(data)
    }

    fn set_raw<T: Copy>(
        object: ObjectId,
        address: &AudioObjectPropertyAddress,
        data: &T,
    ) -> Result<(), OsStatus> {
        let status = unsafe {
            AudioObjectSetPropertyData(
                object.0,
                NonNull::from(address),
                0,
                null(),
                size_of::<T>() as u32,
                NonNull::from(data).cast(),
            )
        };
        OsStatus::check(status)
    }

    impl HardwareService for CoreAudio {
        fn has_property(&self, object: ObjectId, address: PropertyAddress) -> bool {
            let raw = raw_address(address);
            let found = truthy(unsafe { AudioObjectHasProperty(object.0, NonNull::from(&raw)) });
            trace!(%object, selector = %address.selector, found, "AudioObjectHasProperty");
            found
        }

        fn get_property_data(
            &self,
            object: ObjectId,
            address: PropertyAddress,
        ) -> Result<PropertyValue, OsStatus> {
            let raw = raw_address(address);
            let value = match address.selector.payload() {
                Payload::Device => get_raw::<u32>(object, &raw).map(|id| PropertyValue::Device(ObjectId(id))),
                Payload::Scalar => get_raw::<f32>(object, &raw).map(PropertyValue::Scalar),
                Payload::Flag => get_raw::<u32>(object, &raw).map(PropertyValue::Flag),
            };
            trace!(%object, selector = %address.selector, ?value, "AudioObjectGetPropertyData");
            value
        }

        fn is_property_settable(
            &self,
            object: ObjectId,
            address: PropertyAddress,
        ) -> Result<bool, OsStatus> {
            let raw = raw_address(address);
            let mut settable = Default::default();
            let status = unsafe {
                AudioObjectIsPropertySettable(
                    object.0,
                    NonNull::from(&raw),
                    NonNull::new_unchecked(&mut settable as *mut _),
                )
            };
            trace!(%object, selector = %address.selector, status, "AudioObjectIsPropertySettable");
            OsStatus::check(status)?;
            Ok(truthy(settable))
        }

        fn set_property_data(
            &self,
            object: ObjectId,
            address: PropertyAddress,
            value: PropertyValue,
        ) -> Result<(), OsStatus> {
            let raw = raw_address(address);
            trace!(%object, selector = %address.selector, ?value, "AudioObjectSetPropertyData");
            match value {
                PropertyValue::Device(id) => set_raw(object, &raw, &id.0),
                PropertyValue::Scalar(level) => set_raw(object, &raw, &level),
                PropertyValue::Flag(flag) => set_raw(object, &raw, &flag),
            }
        }
    }
}

// Stubs for cross platform compile
#[cfg(not(target_os = "macos"))]
mod hal {
    use tracing::trace;

    use super::CoreAudio;
    use crate::property::{HardwareService, ObjectId, OsStatus, PropertyAddress, PropertyValue};

    impl HardwareService for CoreAudio {
        fn has_property(&self, object: ObjectId, address: PropertyAddress) -> bool {
            trace!(%object, selector = %address.selector, "no CoreAudio on this platform");
            false
        }

        fn get_property_data(
            &self,
            _object: ObjectId,
            _address: PropertyAddress,
        ) -> Result<PropertyValue, OsStatus> {
            Err(OsStatus::UNSUPPORTED)
        }

        fn is_property_settable(
            &self,
            _object: ObjectId,
            _address: PropertyAddress,
        ) -> Result<bool, OsStatus> {
            Err(OsStatus::UNSUPPORTED)
        }

        fn set_property_data(
            &self,
            _object: ObjectId,
            _address: PropertyAddress,
            _value: PropertyValue,
        ) -> Result<(), OsStatus> {
            Err(OsStatus::UNSUPPORTED)
        }
    }
}
