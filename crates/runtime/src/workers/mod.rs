//! Background tasks owned by the runtime.

mod zone;

pub(crate) use zone::{Command, ZoneWorker};
