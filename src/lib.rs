pub mod diagnostics;
pub mod network;
pub mod parsers;
pub mod topology;

pub use diagnostics::{Diagnostics, RecordingDiagnostics, TracingDiagnostics};
pub use network::{
    Decommission, Network,
    device::{Device, DeviceConfiguration, DeviceId},
    registry::DeviceRegistry,
};
pub use topology::{ConnectionOutcome, NoRoute, Route, Router};
