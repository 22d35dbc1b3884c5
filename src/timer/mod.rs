//! Meeting timer engine.
//!
//! [`ScrumTimer`] keeps time for one meeting: it divides the meeting
//! length evenly across the speakers, ticks on a wall-clock sampled
//! schedule, and publishes [`TimerEvent`]s that drive whatever is
//! watching the meeting.

mod scrum_timer;
mod speaker;

pub use scrum_timer::{ScrumTimer, TimerEvent, TimerEvents};
pub use speaker::Speaker;
