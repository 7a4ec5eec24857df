//! Structural editing operations on an [`EditSession`].
//!
//! Each concern adds its operations to the session in its own module:
//! - [`relocate`]: resolving the movable unit and moving lines up/down
//! - [`wrap`]: surrounding a selection with a delimiter pair
//!
//! Successful mutations report to the host through a [`ChangeNotifier`].

mod notify;
pub mod relocate;
mod session;
pub mod wrap;

pub use notify::{ChangeNotifier, NoopNotifier, Notification, RecordingNotifier, RenderScope};
pub use relocate::{Direction, movable_block_at};
pub use session::EditSession;
pub use wrap::{DelimiterClass, WRAP_PAIRS, WrapPair, wrap_pair};
