use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Terminal input multiplexed with the UI tick.
#[derive(Debug)]
pub enum TermEvent {
    Key(KeyEvent),
    Tick,
    Resize,
}

/// Polls crossterm on a background thread. A tick is emitted whenever the poll
/// window elapses without input, which drives the live timer redraw.
pub struct EventPump {
    rx: mpsc::Receiver<TermEvent>,
}

impl EventPump {
    pub fn spawn(tick_rate: Duration) -> anyhow::Result<Self> {
        let (tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name("term-events".to_string())
            .spawn(move || {
                loop {
                    let event = match event::poll(tick_rate) {
                        Ok(true) => match event::read() {
                            // release/repeat events would double-type on some platforms
                            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                                TermEvent::Key(key)
                            }
                            Ok(Event::Resize(..)) => TermEvent::Resize,
                            Ok(_) => continue,
                            Err(err) => {
                                tracing::error!(error = %err, "terminal read failed");
                                return;
                            }
                        },
                        Ok(false) => TermEvent::Tick,
                        Err(err) => {
                            tracing::error!(error = %err, "terminal poll failed");
                            return;
                        }
                    };
                    if tx.send(event).is_err() {
                        return;
                    }
                }
            })?;

        Ok(Self { rx })
    }

    /// Blocks for the next event. Errors once the input thread has exited.
    pub fn next(&self) -> anyhow::Result<TermEvent> {
        Ok(self.rx.recv()?)
    }
}
