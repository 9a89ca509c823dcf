//! Password session state machine
//!
//! One decimal digit arrives at a time over the serial line. A full
//! candidate is compared against the fixed secret; a mismatch costs one
//! attempt, exhausting the attempt budget enters a timed lockout, and a
//! match is terminal. Screen updates and the penalty/lockout waits are the
//! caller's job, driven by the [`Effect`] returned for each byte.

/// Digits in the secret and in a candidate.
pub const PASSWORD_LEN: usize = 4;

/// Wrong submissions tolerated before lockout.
pub const MAX_ATTEMPTS: u8 = 3;

/// Session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Waiting for the first digit.
    Prompting,
    /// Partial candidate entered.
    Accumulating,
    /// Attempt budget exhausted; waiting out the lockout.
    LockedOut,
    /// Secret matched. Terminal: no transition leaves this state and all
    /// further input is ignored.
    Granted,
}

/// What the caller must do in response to one input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Non-digit, mid-lockout, or post-grant input. Nothing to do.
    Ignored,
    /// Digit accepted; echo a mask glyph at this candidate column.
    Accepted { column: usize },
    /// Final digit accepted and the candidate matched. Show the success
    /// screen; the session is now terminal.
    Granted,
    /// Final digit accepted, candidate mismatched. Show the failure screen
    /// and serve the penalty delay; if `lockout` is set the budget is
    /// exhausted and the lockout wait follows (caller reports its end via
    /// [`Session::lockout_elapsed`]).
    Denied { attempts: u8, lockout: bool },
}

/// Candidate accumulation and attempt tracking for one password session.
pub struct Session {
    secret: [u8; PASSWORD_LEN],
    candidate: [u8; PASSWORD_LEN],
    cursor: usize,
    attempts: u8,
    state: State,
}

impl Session {
    pub const fn new(secret: [u8; PASSWORD_LEN]) -> Self {
        Self {
            secret,
            candidate: [0; PASSWORD_LEN],
            cursor: 0,
            attempts: 0,
            state: State::Prompting,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    /// Digits entered towards the current candidate.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Feed one raw input byte and advance the session.
    ///
    /// The candidate and cursor are cleared on every full evaluation,
    /// match or mismatch. The attempt counter clears on a match; after a
    /// lockout it clears in [`lockout_elapsed`](Self::lockout_elapsed).
    pub fn push_byte(&mut self, byte: u8) -> Effect {
        if self.state == State::Granted || self.state == State::LockedOut {
            return Effect::Ignored;
        }
        if !byte.is_ascii_digit() {
            return Effect::Ignored;
        }

        let column = self.cursor;
        self.candidate[column] = byte;
        self.cursor += 1;

        if self.cursor < PASSWORD_LEN {
            self.state = State::Accumulating;
            return Effect::Accepted { column };
        }
        self.evaluate()
    }

    /// The caller finished serving the lockout wait: the budget resets and
    /// a fresh attempt sequence begins.
    pub fn lockout_elapsed(&mut self) {
        if self.state == State::LockedOut {
            self.attempts = 0;
            self.state = State::Prompting;
        }
    }

    fn evaluate(&mut self) -> Effect {
        let matched = self.candidate == self.secret;
        self.candidate = [0; PASSWORD_LEN];
        self.cursor = 0;

        if matched {
            self.attempts = 0;
            self.state = State::Granted;
            return Effect::Granted;
        }

        self.attempts += 1;
        if self.attempts >= MAX_ATTEMPTS {
            self.state = State::LockedOut;
            Effect::Denied {
                attempts: self.attempts,
                lockout: true,
            }
        } else {
            self.state = State::Prompting;
            Effect::Denied {
                attempts: self.attempts,
                lockout: false,
            }
        }
    }
}
