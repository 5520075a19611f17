mod device;
mod installation;

pub use device::{Device, DeviceFilter, DeviceStatus};
pub use installation::{Installation, InstallationDraft, OrderKind};
