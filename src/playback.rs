//! Stepping through a recorded solve.
//!
//! [`Playback`] owns the state a renderer needs to walk a step log: where it
//! is and whether it is advancing on its own. Timing stays with the caller,
//! which calls [`Playback::step`] on each tick while the state is
//! [`PlaybackState::Running`].

use std::fmt;

use crate::cost::Cost;
use crate::steps::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing shown yet.
    Idle,
    /// Advancing on every tick.
    Running,
    /// Stopped part-way; advances only on explicit steps.
    Paused,
    /// The last step is shown.
    Complete,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Running => "running",
            PlaybackState::Paused => "paused",
            PlaybackState::Complete => "complete",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    #[error("cannot {action} playback while it is {state}")]
    InvalidTransition {
        action: &'static str,
        state: PlaybackState,
    },
}

/// Cursor and run state over a borrowed step log.
#[derive(Debug, Clone)]
pub struct Playback<'a, T: Cost> {
    steps: &'a [Step<T>],
    position: Option<usize>,
    state: PlaybackState,
}

impl<'a, T: Cost> Playback<'a, T> {
    /// An empty log starts out complete.
    pub fn new(steps: &'a [Step<T>]) -> Self {
        Self {
            steps,
            position: None,
            state: Self::initial_state(steps),
        }
    }

    fn initial_state(steps: &[Step<T>]) -> PlaybackState {
        if steps.is_empty() {
            PlaybackState::Complete
        } else {
            PlaybackState::Idle
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Index of the step on display.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn current(&self) -> Option<&'a Step<T>> {
        let steps = self.steps;
        self.position.map(|i| &steps[i])
    }

    /// Idle or Paused to Running.
    pub fn start(&mut self) -> Result<(), PlaybackError> {
        match self.state {
            PlaybackState::Idle | PlaybackState::Paused => {
                self.state = PlaybackState::Running;
                Ok(())
            }
            state => Err(PlaybackError::InvalidTransition {
                action: "start",
                state,
            }),
        }
    }

    /// Running to Paused.
    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        match self.state {
            PlaybackState::Running => {
                self.state = PlaybackState::Paused;
                Ok(())
            }
            state => Err(PlaybackError::InvalidTransition {
                action: "pause",
                state,
            }),
        }
    }

    /// Shows the next step.
    ///
    /// Stepping out of Idle pauses; stepping while Running keeps running.
    /// Reaching the last step completes the playback.
    pub fn step(&mut self) -> Result<&'a Step<T>, PlaybackError> {
        if self.state == PlaybackState::Complete {
            return Err(PlaybackError::InvalidTransition {
                action: "step",
                state: self.state,
            });
        }

        let next = self.position.map_or(0, |i| i + 1);
        self.position = Some(next);
        self.state = if next + 1 == self.steps.len() {
            PlaybackState::Complete
        } else if self.state == PlaybackState::Idle {
            PlaybackState::Paused
        } else {
            self.state
        };
        let steps = self.steps;
        Ok(&steps[next])
    }

    /// Back to Idle with nothing shown. Always allowed.
    pub fn reset(&mut self) {
        self.position = None;
        self.state = Self::initial_state(self.steps);
    }
}
