pub mod session;
pub mod slot;
pub mod status;

pub use session::SketchSession;
pub use slot::ModelSlot;
pub use status::{ChannelSink, LogSink, StatusSink};
