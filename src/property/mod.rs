use std::fmt;

/// Identifier of an audio object owned by the OS audio subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// "No such device" sentinel (`kAudioObjectUnknown`).
    pub const UNKNOWN: ObjectId = ObjectId(0);
    /// The system-wide audio object (`kAudioObjectSystemObject`).
    pub const SYSTEM: ObjectId = ObjectId(1);

    pub fn is_unknown(self) -> bool {
        self == ObjectId::UNKNOWN
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    Output,
}

impl Scope {
    pub fn code(self) -> u32 {
        match self {
            Scope::Global => fourcc(b"glob"),
            Scope::Output => fourcc(b"outp"),
        }
    }
}

/// The properties this crate reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Default output device of the system object. Device id payload.
    DefaultOutputDevice,
    /// Software-perceived overall output level of a device. `f32` payload.
    VirtualMainVolume,
    /// Device mute switch. `u32` 0/1 payload.
    Mute,
}

impl Selector {
    pub fn code(self) -> u32 {
        match self {
            Selector::DefaultOutputDevice => fourcc(b"dOut"),
            Selector::VirtualMainVolume => fourcc(b"vmvc"),
            Selector::Mute => fourcc(b"mute"),
        }
    }

    pub fn payload(self) -> Payload {
        match self {
            Selector::DefaultOutputDevice => Payload::Device,
            Selector::VirtualMainVolume => Payload::Scalar,
            Selector::Mute => Payload::Flag,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Selector::DefaultOutputDevice => "default output device",
            Selector::VirtualMainVolume => "virtual main volume",
            Selector::Mute => "mute",
        };
        f.write_str(name)
    }
}

/// Shape of the data stored behind a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    Device,
    Scalar,
    Flag,
}

/// Selector and scope of a property. The element is always the main element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyAddress {
    pub selector: Selector,
    pub scope: Scope,
}

impl PropertyAddress {
    pub const DEFAULT_OUTPUT_DEVICE: PropertyAddress = PropertyAddress {
        selector: Selector::DefaultOutputDevice,
        scope: Scope::Global,
    };
    pub const VIRTUAL_MAIN_VOLUME: PropertyAddress = PropertyAddress {
        selector: Selector::VirtualMainVolume,
        scope: Scope::Output,
    };
    pub const MUTE: PropertyAddress = PropertyAddress {
        selector: Selector::Mute,
        scope: Scope::Output,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    Device(ObjectId),
    Scalar(f32),
    Flag(u32),
}

/// Status code returned by a failed hardware call. Zero never appears here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OsStatus(pub i32);

impl OsStatus {
    /// `kAudioHardwareUnknownPropertyError` ('who?')
    pub const UNKNOWN_PROPERTY: OsStatus = OsStatus(fourcc(b"who?") as i32);
    /// `kAudioHardwareUnsupportedOperationError` ('unop')
    pub const UNSUPPORTED: OsStatus = OsStatus(fourcc(b"unop") as i32);
    /// `kAudioHardwareBadPropertySizeError` ('!siz')
    pub const BAD_SIZE: OsStatus = OsStatus(fourcc(b"!siz") as i32);

    /// Turns a raw status into a `Result`, treating zero as success.
    pub fn check(raw: i32) -> Result<(), OsStatus> {
        if raw == 0 { Ok(()) } else { Err(OsStatus(raw)) }
    }
}

impl fmt::Display for OsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0.to_be_bytes();
        if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            let code: String = bytes.iter().map(|b| *b as char).collect();
            write!(f, "{} ('{}')", self.0, code)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

pub const fn fourcc(code: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*code)
}

/// The four property calls the volume logic needs from the OS audio service.
///
/// Every call is synchronous and goes straight to the OS; implementations hold
/// no device state of their own.
pub trait HardwareService {
    fn has_property(&self, object: ObjectId, address: PropertyAddress) -> bool;

    fn get_property_data(
        &self,
        object: ObjectId,
        address: PropertyAddress,
    ) -> Result<PropertyValue, OsStatus>;

    fn is_property_settable(
        &self,
        object: ObjectId,
        address: PropertyAddress,
    ) -> Result<bool, OsStatus>;

    fn set_property_data(
        &self,
        object: ObjectId,
        address: PropertyAddress,
        value: PropertyValue,
    ) -> Result<(), OsStatus>;
}

impl<H: HardwareService + ?Sized> HardwareService for &H {
    fn has_property(&self, object: ObjectId, address: PropertyAddress) -> bool {
        (**self).has_property(object, address)
    }

    fn get_property_data(
        &self,
        object: ObjectId,
        address: PropertyAddress,
    ) -> Result<PropertyValue, OsStatus> {
        (**self).get_property_data(object, address)
    }

    fn is_property_settable(
        &self,
        object: ObjectId,
        address: PropertyAddress,
    ) -> Result<bool, OsStatus> {
        (**self).is_property_settable(object, address)
    }

    fn set_property_data(
        &self,
        object: ObjectId,
        address: PropertyAddress,
        value: PropertyValue,
    ) -> Result<(), OsStatus> {
        (**self).set_property_data(object, address, value)
    }
}
