//! Clock and keyboard capability layer
//!
//! The session loop only needs three things from the outside world: the
//! current time, a pacing sleep, and a non-blocking look at the keyboard.
//! Bundling them behind [`Platform`] keeps the loop free of terminal
//! details and lets tests drive it with a scripted clock.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// A keypress the descent loop cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Raise the burn rate one unit
    IncreaseBurn,
    /// Lower the burn rate one unit
    DecreaseBurn,
    /// Abandon the descent and return to the menu
    Abort,
}

/// Wall-clock and input capabilities of the host.
pub trait Platform {
    /// Current instant; monotonic.
    fn now(&mut self) -> Instant;

    /// Block the whole process for `dur` (pacing only, no other work).
    fn sleep(&mut self, dur: Duration);

    /// Return one pending recognized keypress without waiting, if any.
    fn poll_key(&mut self) -> io::Result<Option<Key>>;
}

/// The real terminal: `Instant`/`thread::sleep` plus crossterm's
/// non-blocking event queue. Expects raw mode to already be enabled.
pub struct TerminalPlatform;

impl Platform for TerminalPlatform {
    fn now(&mut self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, dur: Duration) {
        std::thread::sleep(dur);
    }

    fn poll_key(&mut self) -> io::Result<Option<Key>> {
        // Drain the queue until a key we recognize; resize and release
        // events are noise here.
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Raw mode swallows SIGINT, so Ctrl+C must be handled
                // as a key.
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(Some(Key::Abort));
                }
                match key.code {
                    KeyCode::Char('w') | KeyCode::Char('W') => {
                        return Ok(Some(Key::IncreaseBurn));
                    }
                    KeyCode::Char('e') | KeyCode::Char('E') => {
                        return Ok(Some(Key::DecreaseBurn));
                    }
                    KeyCode::Esc => return Ok(Some(Key::Abort)),
                    _ => {}
                }
            }
        }
        Ok(None)
    }
}

/// Scripted platform for tests: `sleep` advances the clock by exactly the
/// requested amount and keys are served from a queue (one per poll, as
/// the real adapter reports at most one per tick).
#[cfg(test)]
pub mod fake {
    use super::*;
    use std::collections::VecDeque;

    pub struct FakePlatform {
        base: Instant,
        offset: Duration,
        keys: VecDeque<Key>,
    }

    impl FakePlatform {
        pub fn new() -> Self {
            Self {
                base: Instant::now(),
                offset: Duration::ZERO,
                keys: VecDeque::new(),
            }
        }

        /// Queue a keypress to be returned by a future poll.
        pub fn press(&mut self, key: Key) {
            self.keys.push_back(key);
        }

        /// Total scripted time that has passed.
        pub fn elapsed(&self) -> Duration {
            self.offset
        }
    }

    impl Platform for FakePlatform {
        fn now(&mut self) -> Instant {
            self.base + self.offset
        }

        fn sleep(&mut self, dur: Duration) {
            self.offset += dur;
        }

        fn poll_key(&mut self) -> io::Result<Option<Key>> {
            Ok(self.keys.pop_front())
        }
    }
}
