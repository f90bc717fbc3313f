//! In-memory [`HardwareService`] that records every call.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::property::{
    HardwareService, ObjectId, OsStatus, PropertyAddress, PropertyValue, Selector,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Has(ObjectId, Selector),
    Get(ObjectId, Selector),
    Settable(ObjectId, Selector),
    Set(ObjectId, Selector, PropertyValue),
}

#[derive(Debug, Clone)]
pub struct Property {
    pub value: PropertyValue,
    pub settable: Result<bool, OsStatus>,
    pub read_status: Option<OsStatus>,
    pub write_status: Option<OsStatus>,
}

impl Property {
    pub fn new(value: PropertyValue) -> Self {
        Property {
            value,
            settable: Ok(true),
            read_status: None,
            write_status: None,
        }
    }
}

/// A system object plus one device, each with a configurable property table.
#[derive(Debug, Default)]
pub struct MockHardware {
    properties: RefCell<HashMap<(ObjectId, Selector), Property>>,
    calls: RefCell<Vec<Call>>,
}

pub const DEVICE: ObjectId = ObjectId(0x49);

impl MockHardware {
    /// A device that supports volume and mute, currently at half volume.
    pub fn with_device() -> Self {
        let hal = MockHardware::default();
        hal.insert(
            ObjectId::SYSTEM,
            Selector::DefaultOutputDevice,
            Property::new(PropertyValue::Device(DEVICE)),
        );
        hal.insert(DEVICE, Selector::VirtualMainVolume, Property::new(PropertyValue::Scalar(0.5)));
        hal.insert(DEVICE, Selector::Mute, Property::new(PropertyValue::Flag(0)));
        hal
    }

    pub fn insert(&self, object: ObjectId, selector: Selector, property: Property) {
        self.properties.borrow_mut().insert((object, selector), property);
    }

    pub fn remove(&self, object: ObjectId, selector: Selector) {
        self.properties.borrow_mut().remove(&(object, selector));
    }

    pub fn update(&self, object: ObjectId, selector: Selector, f: impl FnOnce(&mut Property)) {
        if let Some(property) = self.properties.borrow_mut().get_mut(&(object, selector)) {
            f(property);
        }
    }

    pub fn value(&self, object: ObjectId, selector: Selector) -> Option<PropertyValue> {
        self.properties.borrow().get(&(object, selector)).map(|p| p.value)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn writes(&self) -> Vec<(Selector, PropertyValue)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Set(_, selector, value) => Some((*selector, *value)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl HardwareService for MockHardware {
    fn has_property(&self, object: ObjectId, address: PropertyAddress) -> bool {
        self.record(Call::Has(object, address.selector));
        self.properties.borrow().contains_key(&(object, address.selector))
    }

    fn get_property_data(
        &self,
        object: ObjectId,
        address: PropertyAddress,
    ) -> Result<PropertyValue, OsStatus> {
        self.record(Call::Get(object, address.selector));
        let properties = self.properties.borrow();
        let property = properties
            .get(&(object, address.selector))
            .ok_or(OsStatus::UNKNOWN_PROPERTY)?;
        match property.read_status {
            Some(status) => Err(status),
            None => Ok(property.value),
        }
    }

    fn is_property_settable(
        &self,
        object: ObjectId,
        address: PropertyAddress,
    ) -> Result<bool, OsStatus> {
        self.record(Call::Settable(object, address.selector));
        self.properties
            .borrow()
            .get(&(object, address.selector))
            .ok_or(OsStatus::UNKNOWN_PROPERTY)?
            .settable
    }

    fn set_property_data(
        &self,
        object: ObjectId,
        address: PropertyAddress,
        value: PropertyValue,
    ) -> Result<(), OsStatus> {
        self.record(Call::Set(object, address.selector, value));
        let mut properties = self.properties.borrow_mut();
        let property = properties
            .get_mut(&(object, address.selector))
            .ok_or(OsStatus::UNKNOWN_PROPERTY)?;
        if let Some(status) = property.write_status {
            return Err(status);
        }
        property.value = value;
        Ok(())
    }
}
