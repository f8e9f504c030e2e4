use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use crate::speech::{CancelToken, SpeechError, Speaker};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Speaks by running an external TTS program. `{rate}` and `{text}` in the
/// argument template are substituted per call.
#[derive(Clone, Debug)]
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
    rate: u32,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>, args: Vec<String>, rate: u32) -> Self {
        Self {
            program: program.into(),
            args,
            rate,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn command_args(&self, text: &str) -> Vec<String> {
        let rate = self.rate.to_string();
        self.args
            .iter()
            .map(|arg| arg.replace("{rate}", &rate).replace("{text}", text))
            .collect()
    }
}

/// `say` on macOS, `espeak` elsewhere.
pub fn default_program_and_args() -> (String, Vec<String>) {
    let (program, rate_flag) = if cfg!(target_os = "macos") {
        ("say", "-r")
    } else {
        ("espeak", "-s")
    };
    (
        program.to_string(),
        vec![rate_flag.to_string(), "{rate}".to_string(), "{text}".to_string()],
    )
}

impl Speaker for CommandSpeaker {
    fn speak(&self, text: &str, cancel: &CancelToken) -> Result<(), SpeechError> {
        let mut child = Command::new(&self.program)
            .args(self.command_args(text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        loop {
            if cancel.is_cancelled() {
                let _ = child.kill();
                child.wait()?;
                return Ok(());
            }
            match child.try_wait()? {
                Some(status) if status.success() => return Ok(()),
                Some(status) => {
                    return Err(SpeechError::Exit {
                        program: self.program.clone(),
                        code: status.code(),
                    });
                }
                None => thread::sleep(POLL_INTERVAL),
            }
        }
    }
}
