pub mod command;

pub use command::CommandSpeaker;

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("could not start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("lost track of speech process: {0}")]
    Wait(#[from] io::Error),
    #[error("`{program}` exited with status {code:?}")]
    Exit { program: String, code: Option<i32> },
}

/// Shared flag a playback worker checks to stop early.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Text-to-speech engine. Implementations block until playback ends or the
/// token is cancelled.
pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str, cancel: &CancelToken) -> Result<(), SpeechError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&self, _text: &str, _cancel: &CancelToken) -> Result<(), SpeechError> {
        Ok(())
    }
}

struct Playback {
    token: CancelToken,
    handle: JoinHandle<()>,
}

/// Runs speech off the UI thread. At most one playback is active; starting a
/// new one or dropping the dispatcher cancels and joins the previous worker.
pub struct Dictation {
    speaker: Arc<dyn Speaker>,
    active: Option<Playback>,
}

impl Dictation {
    pub fn new(speaker: Arc<dyn Speaker>) -> Self {
        Self {
            speaker,
            active: None,
        }
    }

    pub fn dictate(&mut self, text: &str) -> Option<CancelToken> {
        self.stop();

        let token = CancelToken::new();
        let worker_token = token.clone();
        let speaker = Arc::clone(&self.speaker);
        let text = text.to_string();

        let spawned = thread::Builder::new()
            .name("dictation".to_string())
            .spawn(move || {
                if let Err(err) = speaker.speak(&text, &worker_token) {
                    tracing::warn!(error = %err, "dictation failed");
                }
            });

        match spawned {
            Ok(handle) => {
                tracing::debug!("dictation started");
                self.active = Some(Playback {
                    token: token.clone(),
                    handle,
                });
                Some(token)
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not spawn dictation worker");
                None
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|p| !p.handle.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(playback) = self.active.take() {
            playback.token.cancel();
            if playback.handle.join().is_err() {
                tracing::warn!("dictation worker panicked");
            }
        }
    }
}

impl Drop for Dictation {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    /// Records requests and plays until cancelled.
    #[derive(Default)]
    struct HoldingSpeaker {
        spoken: Mutex<Vec<String>>,
        cancelled: Mutex<Vec<String>>,
    }

    impl Speaker for HoldingSpeaker {
        fn speak(&self, text: &str, cancel: &CancelToken) -> Result<(), SpeechError> {
            self.spoken.lock().unwrap().push(text.to_string());
            let deadline = Instant::now() + Duration::from_secs(5);
            while !cancel.is_cancelled() && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(2));
            }
            if cancel.is_cancelled() {
                self.cancelled.lock().unwrap().push(text.to_string());
            }
            Ok(())
        }
    }

    fn wait_for<F: Fn() -> bool>(cond: F) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while !cond() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn token_starts_uncancelled() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn dictate_runs_off_thread() {
        let speaker = Arc::new(HoldingSpeaker::default());
        let mut dictation = Dictation::new(speaker.clone());
        let token = dictation.dictate("The sun is bright today.").unwrap();
        wait_for(|| !speaker.spoken.lock().unwrap().is_empty());
        assert!(dictation.is_playing());
        assert!(!token.is_cancelled());
        dictation.stop();
        assert!(token.is_cancelled());
        assert!(!dictation.is_playing());
    }

    #[test]
    fn new_dictation_cancels_previous() {
        let speaker = Arc::new(HoldingSpeaker::default());
        let mut dictation = Dictation::new(speaker.clone());
        let first = dictation.dictate("first").unwrap();
        wait_for(|| speaker.spoken.lock().unwrap().len() == 1);
        dictation.dictate("second");
        assert!(first.is_cancelled());
        assert_eq!(*speaker.cancelled.lock().unwrap(), vec!["first".to_string()]);
    }

    #[test]
    fn drop_cancels_and_joins_worker() {
        let speaker = Arc::new(HoldingSpeaker::default());
        let token = {
            let mut dictation = Dictation::new(speaker.clone());
            let token = dictation.dictate("goodbye").unwrap();
            wait_for(|| !speaker.spoken.lock().unwrap().is_empty());
            token
        };
        assert!(token.is_cancelled());
        assert_eq!(*speaker.cancelled.lock().unwrap(), vec!["goodbye".to_string()]);
    }

    #[test]
    fn silent_speaker_finishes_immediately() {
        let mut dictation = Dictation::new(Arc::new(SilentSpeaker));
        dictation.dictate("anything");
        wait_for(|| !dictation.is_playing());
        assert!(!dictation.is_playing());
    }
}
