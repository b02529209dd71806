pub mod device_id;
pub mod setup;

pub use device_id::{ResolveDeviceId, DEVICE_ID_KEY};
pub use setup::{SetupFlowError, SetupOptions, SetupOrchestrator};
