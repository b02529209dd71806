mod watch_port;

pub use watch_port::WatchSetupEventPort;
