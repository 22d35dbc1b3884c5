//! Session state types and shared state handle.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::timer::Speaker;

/// Everything observable about a meeting in progress.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Display text for whoever is speaking ("Speaker 2: Kim").
    pub active_speaker: String,
    /// Speaking order with completion flags, mirrored from the timer.
    pub speakers: Vec<Speaker>,
    /// Latest transcript, empty when transcription is off or failed.
    pub transcript: String,
    pub is_recording: bool,
    pub seconds_elapsed: u64,
    pub seconds_remaining: u64,
}

impl SessionState {
    /// Footer line for the meeting: which speaker is up out of how many.
    pub fn progress_line(&self) -> String {
        let up_next = self
            .speakers
            .iter()
            .position(|s| !s.is_completed)
            .map(|i| i + 1);

        let is_last_speaker = self
            .speakers
            .iter()
            .rev()
            .skip(1)
            .all(|s| s.is_completed);

        if is_last_speaker && up_next.is_some() {
            return "Last Speaker".to_string();
        }
        match up_next {
            Some(number) => format!("Speaker {} of {}", number, self.speakers.len()),
            None => "No more speakers".to_string(),
        }
    }
}

/// Thread-safe handle sharing session state between the meeting machine
/// and its observers.
#[derive(Clone, Default)]
pub struct SessionStatusHandle {
    inner: Arc<Mutex<SessionState>>,
}

impl SessionStatusHandle {
    pub async fn get(&self) -> SessionState {
        self.inner.lock().await.clone()
    }

    pub async fn speaker_changed(&self, active_speaker: String, speakers: Vec<Speaker>) {
        let mut state = self.inner.lock().await;
        state.active_speaker = active_speaker;
        state.speakers = speakers;
    }

    pub async fn record_elapsed(&self, seconds: u64) {
        let mut state = self.inner.lock().await;
        state.seconds_elapsed = seconds;
    }

    pub async fn record_remaining(&self, seconds: u64) {
        let mut state = self.inner.lock().await;
        state.seconds_remaining = seconds;
    }

    pub async fn set_transcript(&self, transcript: String) {
        let mut state = self.inner.lock().await;
        state.transcript = transcript;
    }

    pub async fn clear_transcript(&self) {
        let mut state = self.inner.lock().await;
        state.transcript.clear();
    }

    pub async fn set_recording(&self, is_recording: bool) {
        let mut state = self.inner.lock().await;
        state.is_recording = is_recording;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(completed: &[bool]) -> Vec<Speaker> {
        completed
            .iter()
            .enumerate()
            .map(|(i, done)| {
                let mut speaker = Speaker::new(format!("S{i}"));
                speaker.is_completed = *done;
                speaker
            })
            .collect()
    }

    #[test]
    fn test_progress_line_counts_speakers() {
        let state = SessionState {
            speakers: roster(&[true, false, false]),
            ..Default::default()
        };
        assert_eq!(state.progress_line(), "Speaker 2 of 3");
    }

    #[test]
    fn test_progress_line_last_speaker() {
        let state = SessionState {
            speakers: roster(&[true, true, false]),
            ..Default::default()
        };
        assert_eq!(state.progress_line(), "Last Speaker");
    }

    #[test]
    fn test_progress_line_all_done() {
        let state = SessionState {
            speakers: roster(&[true, true]),
            ..Default::default()
        };
        assert_eq!(state.progress_line(), "No more speakers");
    }

    #[tokio::test]
    async fn test_handle_folds_updates() {
        let handle = SessionStatusHandle::default();
        handle
            .speaker_changed("Speaker 1: Kim".to_string(), roster(&[false, false]))
            .await;
        handle.record_elapsed(30).await;
        handle.record_remaining(90).await;
        handle.set_transcript("hello".to_string()).await;
        handle.set_recording(true).await;

        let state = handle.get().await;
        assert_eq!(state.active_speaker, "Speaker 1: Kim");
        assert_eq!(state.speakers.len(), 2);
        assert_eq!(state.seconds_elapsed, 30);
        assert_eq!(state.seconds_remaining, 90);
        assert_eq!(state.transcript, "hello");
        assert!(state.is_recording);

        handle.clear_transcript().await;
        assert_eq!(handle.get().await.transcript, "");
    }
}
