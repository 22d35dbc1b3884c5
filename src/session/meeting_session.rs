//! Meeting session orchestrator.
//!
//! Wires a [`ScrumTimer`] and a [`SpeechRecognizer`] together for one
//! meeting: start → (tick / skip / transcribe) → end → History record.
//! The two collaborators are independent; losing transcription never
//! affects timing.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::chime::Chime;
use crate::scrum::{DailyScrum, History};
use crate::speech::{RecognizerUpdate, RecognizerUpdates, SpeechRecognizer};
use crate::timer::{ScrumTimer, TimerEvent, TimerEvents};

use super::status::SessionStatusHandle;

pub struct MeetingSession {
    attendees: Vec<String>,
    timer: Arc<ScrumTimer>,
    recognizer: Arc<dyn SpeechRecognizer>,
    chime: Arc<dyn Chime>,
    status: SessionStatusHandle,
    folders: Vec<JoinHandle<()>>,
}

impl MeetingSession {
    pub fn new(
        scrum: &DailyScrum,
        recognizer: Arc<dyn SpeechRecognizer>,
        chime: Arc<dyn Chime>,
        status: SessionStatusHandle,
    ) -> Self {
        Self {
            attendees: scrum.attendees.clone(),
            timer: Arc::new(scrum.timer()),
            recognizer,
            chime,
            status,
            folders: Vec::new(),
        }
    }

    /// Start the meeting: the timer begins rotating through speakers and
    /// the recognizer begins producing transcript updates. A recognizer
    /// that fails to start clears the transcript; the timer runs anyway.
    pub async fn start(&mut self) {
        let events = self.timer.start_scrum().await;
        self.folders.push(Self::fold_timer_events(
            events,
            Arc::clone(&self.timer),
            Arc::clone(&self.chime),
            self.status.clone(),
        ));

        match self.recognizer.start().await {
            Ok(updates) => {
                self.status.set_recording(true).await;
                self.folders
                    .push(Self::fold_transcript(updates, self.status.clone()));
            }
            Err(e) => {
                warn!("Speech recognition unavailable: {}", e);
                self.status.clear_transcript().await;
            }
        }

        info!("Meeting started with {} attendee(s)", self.attendees.len());
    }

    /// Hand the floor to the next speaker.
    pub async fn skip_speaker(&self) {
        self.timer.skip_speaker().await;
    }

    /// True once every speaker has had their turn.
    pub async fn is_finished(&self) -> bool {
        self.timer.is_finished().await
    }

    /// End the meeting: stop timer and recognizer, drain their streams,
    /// and summarize the session. Ending a session that never started
    /// yields a zero-length record.
    pub async fn end(&mut self) -> History {
        self.timer.stop_scrum().await;
        self.recognizer.stop().await;
        self.status.set_recording(false).await;

        for folder in self.folders.drain(..) {
            let _ = folder.await;
        }

        let state = self.status.get().await;
        let minutes = state.seconds_elapsed / 60;
        info!("Meeting ended after {} minute(s)", minutes);
        History::new(self.attendees.clone(), minutes, state.transcript)
    }

    fn fold_timer_events(
        mut events: TimerEvents,
        timer: Arc<ScrumTimer>,
        chime: Arc<dyn Chime>,
        status: SessionStatusHandle,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                match event {
                    TimerEvent::ActiveSpeakerChanged(text) => {
                        let roster = timer.speakers().await;
                        status.speaker_changed(text, roster).await;
                    }
                    TimerEvent::ElapsedChanged(seconds) => {
                        status.record_elapsed(seconds).await;
                    }
                    TimerEvent::RemainingChanged(seconds) => {
                        status.record_remaining(seconds).await;
                    }
                    TimerEvent::SpeakerAdvanced => chime.play().await,
                }
            }
        })
    }

    fn fold_transcript(
        mut updates: RecognizerUpdates,
        status: SessionStatusHandle,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(update) = updates.recv().await {
                match update {
                    RecognizerUpdate::Transcript(text) => {
                        status.set_transcript(text).await;
                    }
                    RecognizerUpdate::Failed(error) => {
                        warn!("Transcription failed: {}", error);
                        status.clear_transcript().await;
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrum::ScrumColor;
    use crate::speech::{NullRecognizer, RecognizerError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time;

    struct CountingChime {
        plays: AtomicUsize,
    }

    impl CountingChime {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                plays: AtomicUsize::new(0),
            })
        }

        fn count(&self) -> usize {
            self.plays.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Chime for CountingChime {
        async fn play(&self) {
            self.plays.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Recognizer that emits a fixed script of updates, then closes.
    struct ScriptedRecognizer {
        script: Vec<RecognizerUpdate>,
    }

    #[async_trait]
    impl SpeechRecognizer for ScriptedRecognizer {
        async fn start(&self) -> Result<RecognizerUpdates, RecognizerError> {
            let (tx, rx) = mpsc::unbounded_channel();
            for update in &self.script {
                let _ = tx.send(update.clone());
            }
            Ok(rx)
        }

        async fn stop(&self) {}
    }

    struct FailingRecognizer;

    #[async_trait]
    impl SpeechRecognizer for FailingRecognizer {
        async fn start(&self) -> Result<RecognizerUpdates, RecognizerError> {
            Err(RecognizerError::AccessDenied)
        }

        async fn stop(&self) {}
    }

    fn scrum(length_in_minutes: u64, attendees: &[&str]) -> DailyScrum {
        DailyScrum::new(
            "Standup",
            attendees.iter().map(|n| n.to_string()).collect(),
            length_in_minutes,
            ScrumColor::default(),
        )
    }

    async fn run_ticks(seconds: u64) {
        for _ in 0..seconds {
            time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }
        // One extra turn so the fold task catches the final events.
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_history_truncates_to_whole_minutes() {
        let status = SessionStatusHandle::default();
        let mut session = MeetingSession::new(
            &scrum(4, &["A", "B"]),
            Arc::new(NullRecognizer),
            CountingChime::new(),
            status.clone(),
        );

        session.start().await;
        run_ticks(125).await;

        let history = session.end().await;
        assert_eq!(history.length_in_minutes, 2);
        assert_eq!(history.attendees, vec!["A", "B"]);
        assert_eq!(history.transcript, "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_chime_rings_on_natural_advance_only() {
        let status = SessionStatusHandle::default();
        let chime = CountingChime::new();
        let mut session = MeetingSession::new(
            &scrum(2, &["A", "B"]),
            Arc::new(NullRecognizer),
            chime.clone(),
            status.clone(),
        );

        session.start().await;
        run_ticks(60).await;
        assert_eq!(chime.count(), 1);

        session.skip_speaker().await;
        run_ticks(2).await;

        session.end().await;
        assert_eq!(chime.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_state_mirrors_timer() {
        let status = SessionStatusHandle::default();
        let mut session = MeetingSession::new(
            &scrum(2, &["A", "B"]),
            Arc::new(NullRecognizer),
            CountingChime::new(),
            status.clone(),
        );

        session.start().await;
        run_ticks(61).await;

        let state = status.get().await;
        assert_eq!(state.active_speaker, "Speaker 2: B");
        assert_eq!(state.seconds_elapsed, 61);
        assert_eq!(state.seconds_remaining, 59);
        assert!(state.speakers[0].is_completed);
        assert_eq!(state.progress_line(), "Last Speaker");

        session.end().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_transcript_follows_recognizer_updates() {
        let status = SessionStatusHandle::default();
        let mut session = MeetingSession::new(
            &scrum(2, &["A"]),
            Arc::new(ScriptedRecognizer {
                script: vec![
                    RecognizerUpdate::Transcript("hello".to_string()),
                    RecognizerUpdate::Transcript("hello world".to_string()),
                ],
            }),
            CountingChime::new(),
            status.clone(),
        );

        session.start().await;
        run_ticks(1).await;
        assert!(status.get().await.is_recording);

        let history = session.end().await;
        assert_eq!(history.transcript, "hello world");
        assert!(!status.get().await.is_recording);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recognizer_failure_clears_transcript_and_keeps_timing() {
        let status = SessionStatusHandle::default();
        let mut session = MeetingSession::new(
            &scrum(2, &["A"]),
            Arc::new(ScriptedRecognizer {
                script: vec![
                    RecognizerUpdate::Transcript("so far so good".to_string()),
                    RecognizerUpdate::Failed(RecognizerError::TranscriptionFailed(
                        "mic unplugged".to_string(),
                    )),
                ],
            }),
            CountingChime::new(),
            status.clone(),
        );

        session.start().await;
        run_ticks(10).await;

        let state = status.get().await;
        assert_eq!(state.transcript, "");
        assert_eq!(state.seconds_elapsed, 10);

        let history = session.end().await;
        assert_eq!(history.transcript, "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_start_leaves_timer_running() {
        let status = SessionStatusHandle::default();
        let mut session = MeetingSession::new(
            &scrum(2, &["A"]),
            Arc::new(FailingRecognizer),
            CountingChime::new(),
            status.clone(),
        );

        session.start().await;
        run_ticks(5).await;

        let state = status.get().await;
        assert!(!state.is_recording);
        assert_eq!(state.transcript, "");
        assert_eq!(state.seconds_elapsed, 5);

        session.end().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_ending_before_start_yields_zero_length_record() {
        let status = SessionStatusHandle::default();
        let mut session = MeetingSession::new(
            &scrum(5, &["A", "B"]),
            Arc::new(NullRecognizer),
            CountingChime::new(),
            status.clone(),
        );

        let history = session.end().await;
        assert_eq!(history.length_in_minutes, 0);
        assert_eq!(history.attendees, vec!["A", "B"]);
        assert_eq!(history.transcript, "");
    }
}
