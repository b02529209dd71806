pub mod event;
pub mod fs;
pub mod time;

pub use event::WatchSetupEventPort;
pub use fs::{FileCredentialStore, FileKeyValueStore};
pub use time::SystemClock;
