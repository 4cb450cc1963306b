pub mod alarm;
pub mod global_error;
pub mod message;

pub use alarm::{AlarmEvent, AlarmState, SnsEnvelope, Trigger};
pub use message::{Attachment, ChatMessage, Field};
