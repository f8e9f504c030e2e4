use std::io::{self, Write};

const BEL: &[u8] = b"\x07";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    TimerStarted,
    Completed,
}

/// Rings the terminal bell for session transitions. Writes go to whatever
/// sink the host provides, normally stdout.
pub struct CuePlayer<W: Write> {
    out: W,
    enabled: bool,
}

impl<W: Write> CuePlayer<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self { out, enabled }
    }

    pub fn play(&mut self, cue: Cue) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        tracing::trace!(?cue, "bell");
        self.out.write_all(BEL)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_player_writes_bell() {
        let mut player = CuePlayer::new(Vec::new(), true);
        player.play(Cue::TimerStarted).unwrap();
        player.play(Cue::Completed).unwrap();
        assert_eq!(player.into_inner(), b"\x07\x07");
    }

    #[test]
    fn disabled_player_is_silent() {
        let mut player = CuePlayer::new(Vec::new(), false);
        player.play(Cue::Completed).unwrap();
        assert!(player.into_inner().is_empty());
    }
}
