use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;

use super::speaker::Speaker;

/// Events published by a running [`ScrumTimer`], in the order they occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// The active speaker changed. Carries the display text
    /// ("Speaker 2: Kim").
    ActiveSpeakerChanged(String),
    /// Seconds since the beginning of the meeting.
    ElapsedChanged(u64),
    /// Seconds until all attendees have had their turn, floored at 0.
    RemainingChanged(u64),
    /// A speaker's slot ran out and the next one took over automatically.
    /// Never emitted for a manual skip or the initial activation.
    SpeakerAdvanced,
}

/// Receiving side of a timer's event stream. The stream closes when the
/// timer is stopped or dropped.
pub type TimerEvents = mpsc::UnboundedReceiver<TimerEvent>;

/// How often the engine samples the clock.
fn frequency() -> Duration {
    Duration::from_secs_f64(1.0 / 60.0)
}

/// Keeps time for a daily scrum meeting: the total meeting time, the time
/// for each speaker, and who is currently speaking.
///
/// The meeting length is divided evenly across the speakers with integer
/// division; leftover seconds are absorbed by the final slot. All
/// operations are safe to call in any state. `start_scrum` while already
/// running simply restarts from the first speaker.
pub struct ScrumTimer {
    state: Arc<Mutex<TimerState>>,
    tick: Mutex<Option<JoinHandle<()>>>,
}

impl ScrumTimer {
    /// A timer for a meeting of `length_in_minutes` shared between
    /// `attendees`. Use [`ScrumTimer::start_scrum`] to start it.
    pub fn new(length_in_minutes: u64, attendees: &[String]) -> Self {
        Self {
            state: Arc::new(Mutex::new(TimerState::new(length_in_minutes, attendees))),
            tick: Mutex::new(None),
        }
    }

    /// Start the timer from the first speaker and return its event stream.
    ///
    /// Any previous run's stream is closed and its tick cancelled first.
    pub async fn start_scrum(&self) -> TimerEvents {
        self.cancel_tick().await;

        let (tx, rx) = mpsc::unbounded_channel();
        {
            let mut state = self.state.lock().await;
            state.events = Some(tx);
            state.stopped = false;
            state.finished = false;
            state.change_to_speaker(0, Instant::now());
        }

        let task = Self::spawn_tick(&self.state);
        *self.tick.lock().await = Some(task);
        rx
    }

    /// Stop the timer and close its event stream. Safe to call repeatedly
    /// and in any state; a tick in flight at the moment of the call has no
    /// observable effect afterwards.
    pub async fn stop_scrum(&self) {
        self.cancel_tick().await;

        let mut state = self.state.lock().await;
        state.stopped = true;
        state.events = None;
    }

    /// Advance to the next speaker without waiting for their time to run
    /// out. Ignored unless the timer is running.
    pub async fn skip_speaker(&self) {
        let mut state = self.state.lock().await;
        if !state.is_running() {
            debug!("skip_speaker ignored, timer not running");
            return;
        }
        let next = state.speaker_index + 1;
        state.change_to_speaker(next, Instant::now());
    }

    /// Replace the meeting length and attendees and rewind to the first
    /// speaker. The timer does not tick again until `start_scrum`.
    pub async fn reset(&self, length_in_minutes: u64, attendees: &[String]) {
        self.cancel_tick().await;

        let mut state = self.state.lock().await;
        state.reset(length_in_minutes, attendees);
    }

    /// Snapshot of the speaking order with completion flags.
    pub async fn speakers(&self) -> Vec<Speaker> {
        self.state.lock().await.speakers.clone()
    }

    pub async fn seconds_elapsed(&self) -> u64 {
        self.state.lock().await.seconds_elapsed
    }

    pub async fn seconds_remaining(&self) -> u64 {
        self.state.lock().await.seconds_remaining
    }

    /// Seconds each speaker gets before the rotation moves on.
    pub async fn seconds_per_speaker(&self) -> u64 {
        self.state.lock().await.seconds_per_speaker()
    }

    /// True once every speaker has had their turn.
    pub async fn is_finished(&self) -> bool {
        self.state.lock().await.finished
    }

    pub async fn is_running(&self) -> bool {
        self.state.lock().await.is_running()
    }

    async fn cancel_tick(&self) {
        if let Some(task) = self.tick.lock().await.take() {
            task.abort();
        }
    }

    /// Run the recurring tick until the timer stops, finishes, or is
    /// dropped. The task holds only a weak reference so dropping the
    /// timer ends the tick on its next firing.
    fn spawn_tick(state: &Arc<Mutex<TimerState>>) -> JoinHandle<()> {
        let state = Arc::downgrade(state);
        tokio::spawn(async move {
            let mut ticks = time::interval(frequency());
            loop {
                ticks.tick().await;
                let Some(state) = state.upgrade() else { break };
                let mut state = state.lock().await;
                if state.stopped {
                    break;
                }
                state.tick(Instant::now());
                if state.finished {
                    break;
                }
            }
        })
    }
}

struct TimerState {
    length_in_minutes: u64,
    speakers: Vec<Speaker>,
    speaker_index: usize,
    seconds_elapsed: u64,
    seconds_elapsed_for_speaker: u64,
    seconds_remaining: u64,
    /// When the active speaker started; elapsed time is re-derived from
    /// this each tick rather than counted, so tick jitter cannot drift.
    speaker_started_at: Option<Instant>,
    stopped: bool,
    finished: bool,
    events: Option<mpsc::UnboundedSender<TimerEvent>>,
}

impl TimerState {
    fn new(length_in_minutes: u64, attendees: &[String]) -> Self {
        Self {
            length_in_minutes,
            speakers: Speaker::roster(attendees),
            speaker_index: 0,
            seconds_elapsed: 0,
            seconds_elapsed_for_speaker: 0,
            seconds_remaining: length_in_minutes * 60,
            speaker_started_at: None,
            stopped: false,
            finished: false,
            events: None,
        }
    }

    fn length_in_seconds(&self) -> u64 {
        self.length_in_minutes * 60
    }

    fn seconds_per_speaker(&self) -> u64 {
        // The roster is never empty; see Speaker::roster.
        self.length_in_seconds() / self.speakers.len() as u64
    }

    fn speaker_text(&self) -> String {
        format!(
            "Speaker {}: {}",
            self.speaker_index + 1,
            self.speakers[self.speaker_index].name
        )
    }

    fn is_running(&self) -> bool {
        !self.stopped && !self.finished && self.speaker_started_at.is_some()
    }

    fn emit(&self, event: TimerEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }

    /// Activate the speaker at `index`, marking the previous one
    /// completed. An index past the end of the roster finishes the
    /// meeting instead.
    fn change_to_speaker(&mut self, index: usize, now: Instant) {
        if index > 0 {
            self.speakers[index - 1].is_completed = true;
        }
        self.seconds_elapsed_for_speaker = 0;
        if index >= self.speakers.len() {
            self.finished = true;
            return;
        }
        self.speaker_index = index;
        self.emit(TimerEvent::ActiveSpeakerChanged(self.speaker_text()));

        self.seconds_elapsed = self.seconds_per_speaker() * index as u64;
        self.seconds_remaining = self.length_in_seconds().saturating_sub(self.seconds_elapsed);
        self.emit(TimerEvent::ElapsedChanged(self.seconds_elapsed));
        self.emit(TimerEvent::RemainingChanged(self.seconds_remaining));
        self.speaker_started_at = Some(now);
    }

    fn tick(&mut self, now: Instant) {
        if self.stopped || self.finished {
            return;
        }
        let Some(started_at) = self.speaker_started_at else {
            return;
        };

        let for_speaker = now.duration_since(started_at).as_secs();
        self.seconds_elapsed_for_speaker = for_speaker;
        self.seconds_elapsed =
            self.seconds_per_speaker() * self.speaker_index as u64 + for_speaker;
        self.emit(TimerEvent::ElapsedChanged(self.seconds_elapsed));

        // Past the nominal slot the clock keeps counting up but remaining
        // holds; the final slot absorbs the division remainder this way.
        if for_speaker > self.seconds_per_speaker() {
            return;
        }

        self.seconds_remaining = self.length_in_seconds().saturating_sub(self.seconds_elapsed);
        self.emit(TimerEvent::RemainingChanged(self.seconds_remaining));

        if for_speaker >= self.seconds_per_speaker() {
            self.change_to_speaker(self.speaker_index + 1, now);
            self.emit(TimerEvent::SpeakerAdvanced);
        }
    }

    fn reset(&mut self, length_in_minutes: u64, attendees: &[String]) {
        self.length_in_minutes = length_in_minutes;
        self.speakers = Speaker::roster(attendees);
        self.speaker_index = 0;
        self.seconds_elapsed = 0;
        self.seconds_elapsed_for_speaker = 0;
        self.seconds_remaining = self.length_in_seconds();
        self.speaker_started_at = None;
        self.finished = false;
        self.emit(TimerEvent::RemainingChanged(self.seconds_remaining));
        self.emit(TimerEvent::ActiveSpeakerChanged(self.speaker_text()));
    }
}
