pub mod configuration;
pub mod model;
pub mod notifier;
pub mod sms;
pub mod telemetry;
pub mod util;
