//! Request tokens for switch-to-latest dispatch.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tracks the single request on a line whose outcome may still be applied.
///
/// Issuing a new token supersedes the previous one; `accept` succeeds at most
/// once, and only for the most recently issued token.
#[derive(Debug, Default)]
pub struct LatestGate {
    issued: u64,
    in_flight: Option<RequestToken>,
}

impl LatestGate {
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.in_flight = Some(token);
        token
    }

    pub fn accept(&mut self, token: RequestToken) -> bool {
        if self.in_flight == Some(token) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    pub fn in_flight(&self) -> Option<RequestToken> {
        self.in_flight
    }
}
