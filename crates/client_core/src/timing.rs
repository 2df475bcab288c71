//! Deadline-driven input filters. Nothing here sleeps: the owner asks for the
//! next deadline, waits for it, and then polls with the current instant.

use std::{collections::VecDeque, time::Duration};

use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ThrottleState<T> {
    Idle,
    Window { deadline: Instant, pending: Option<T> },
}

/// Leading and trailing throttle. An input arriving while idle is released
/// at once and opens a window; inputs inside the window replace the pending
/// value, and the latest one is released when the window closes, which opens
/// the next window. At most one value is released per window.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    window: Duration,
    state: ThrottleState<T>,
}

impl<T> Throttle<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: ThrottleState::Idle,
        }
    }

    /// Returns the value when it can be released immediately.
    pub fn offer(&mut self, value: T, now: Instant) -> Option<T> {
        match &mut self.state {
            ThrottleState::Idle => {
                self.state = ThrottleState::Window {
                    deadline: now + self.window,
                    pending: None,
                };
                Some(value)
            }
            ThrottleState::Window { pending, .. } => {
                *pending = Some(value);
                None
            }
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            ThrottleState::Idle => None,
            ThrottleState::Window { deadline, .. } => Some(*deadline),
        }
    }

    /// Closes the window if it is due and releases its pending value.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(deadline) if deadline <= now => {}
            _ => return None,
        }
        match std::mem::replace(&mut self.state, ThrottleState::Idle) {
            ThrottleState::Window {
                pending: Some(value),
                ..
            } => {
                self.state = ThrottleState::Window {
                    deadline: now + self.window,
                    pending: None,
                };
                Some(value)
            }
            _ => None,
        }
    }
}

/// Suppresses a value equal to the last one admitted.
#[derive(Debug, Clone, Default)]
pub struct Dedupe<T> {
    last: Option<T>,
}

impl<T: PartialEq + Clone> Dedupe<T> {
    pub fn admit(&mut self, value: &T) -> bool {
        if self.last.as_ref() == Some(value) {
            return false;
        }
        self.last = Some(value.clone());
        true
    }
}

/// Delays every input by a fixed amount. Inputs are neither merged nor
/// deduplicated: each one fires on its own deadline, in arrival order.
#[derive(Debug, Clone)]
pub struct SettleDelay<T> {
    delay: Duration,
    queue: VecDeque<(Instant, T)>,
}

impl<T> SettleDelay<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            queue: VecDeque::new(),
        }
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.queue.push_back((now + self.delay, value));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.queue.front().map(|(deadline, _)| *deadline)
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.deadline()? > now {
            return None;
        }
        self.queue.pop_front().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
