//! One live meeting session.
//!
//! [`MeetingSession`] owns a timer and a speech recognizer for the
//! duration of a meeting and folds their event streams into a shared
//! [`SessionState`] readable by whoever is presenting the meeting.

mod meeting_session;
mod status;

pub use meeting_session::MeetingSession;
pub use status::{SessionState, SessionStatusHandle};
