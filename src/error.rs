use thiserror::Error;

use crate::property::{ObjectId, OsStatus, Selector};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("no default output device")]
    UnknownDevice,

    #[error("object {object} has no {selector} property")]
    PropertyUnsupported { object: ObjectId, selector: Selector },

    #[error("{selector} property of object {object} is not settable")]
    NotSettable { object: ObjectId, selector: Selector },

    #[error("{selector} call on object {object} failed with status {status}")]
    Os {
        object: ObjectId,
        selector: Selector,
        status: OsStatus,
    },

    #[error("volume {0:.2} is outside 0.0..=1.0")]
    OutOfRange(f32),

    #[error("{selector} property returned an unexpected payload")]
    UnexpectedPayload { selector: Selector },
}
