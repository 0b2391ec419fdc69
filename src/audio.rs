use std::io::{self, Write};

use crate::game::TickOutcome;

/// Sound feedback a tick can trigger.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Cue {
    Eat,
    GameOver,
}

impl Cue {
    /// Cue for `outcome`, if it has one.
    #[must_use]
    pub fn for_outcome(outcome: TickOutcome) -> Option<Self> {
        match outcome {
            TickOutcome::Continue => None,
            TickOutcome::Grew => Some(Self::Eat),
            TickOutcome::GameOver | TickOutcome::BoardFilled => Some(Self::GameOver),
        }
    }

    /// Terminal bells emitted for the cue.
    #[must_use]
    pub fn bells(self) -> usize {
        match self {
            Self::Eat => 1,
            Self::GameOver => 2,
        }
    }
}

/// Turns tick outcomes into terminal bells, or nothing when muted.
#[derive(Debug)]
pub struct AudioNotifier<W> {
    out: W,
    enabled: bool,
}

impl AudioNotifier<io::Stdout> {
    #[must_use]
    pub fn stdout(enabled: bool) -> Self {
        Self::new(io::stdout(), enabled)
    }
}

impl<W: Write> AudioNotifier<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self { out, enabled }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Plays the cue for `outcome`. Returns the cue that was played.
    pub fn notify(&mut self, outcome: TickOutcome) -> io::Result<Option<Cue>> {
        if !self.enabled {
            return Ok(None);
        }

        let Some(cue) = Cue::for_outcome(outcome) else {
            return Ok(None);
        };

        for _ in 0..cue.bells() {
            self.out.write_all(b"\x07")?;
        }
        self.out.flush()?;
        Ok(Some(cue))
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}
