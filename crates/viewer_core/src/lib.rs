//! Snapshot viewer core: pure state machine, quote-navigation history and
//! viewport membership tracking.
mod effect;
mod history;
mod message;
mod msg;
mod state;
mod update;
mod view_model;
mod viewport;

pub use effect::Effect;
pub use history::{JumpStack, ReturnProbe};
pub use message::{Gender, ImageHandle, Message, MessageId, QuoteRef, User, MAX_VISIBLE_STATUS};
pub use msg::Msg;
pub use state::{AppState, LoadId, LoadStatus};
pub use update::update;
pub use view_model::{window_title, AppViewModel, APP_NAME};
pub use viewport::{ViewportTracker, VisibilityTransition};
