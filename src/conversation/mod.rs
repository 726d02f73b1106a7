//! Report conversation: the chat log a manager keeps with a reporter, plus the
//! report's status and reward decision.

mod clock;
mod controller;
mod state;
mod transition;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{ConversationContext, ReportConversation};
pub use state::{ConversationObserver, ConversationState};
pub use transition::TransitionTable;
