//! Tagged signal lines connecting the controller to the coordinators.

use std::{collections::VecDeque, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalLine {
    Page,
    Category,
    Title,
}

impl SignalLine {
    pub fn as_str(self) -> &'static str {
        match self {
            SignalLine::Page => "page",
            SignalLine::Category => "category",
            SignalLine::Title => "title",
        }
    }
}

impl fmt::Display for SignalLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Carries the page cursor at the moment of emission.
    PageRequest { page: u32 },
    CategoryRequest,
    TitleRefresh,
}

impl Signal {
    pub fn line(self) -> SignalLine {
        match self {
            Signal::PageRequest { .. } => SignalLine::Page,
            Signal::CategoryRequest => SignalLine::Category,
            Signal::TitleRefresh => SignalLine::Title,
        }
    }
}

/// FIFO of pending signals. Any producer may emit on any line; the owner
/// drains them in emission order.
#[derive(Debug, Default)]
pub struct EventBus {
    queue: VecDeque<Signal>,
}

impl EventBus {
    pub fn emit(&mut self, signal: Signal) {
        tracing::trace!(line = %signal.line(), ?signal, "signal emitted");
        self.queue.push_back(signal);
    }

    pub fn request_page(&mut self, page: u32) {
        self.emit(Signal::PageRequest { page });
    }

    pub fn request_categories(&mut self) {
        self.emit(Signal::CategoryRequest);
    }

    pub fn refresh_title(&mut self) {
        self.emit(Signal::TitleRefresh);
    }

    pub fn pop(&mut self) -> Option<Signal> {
        self.queue.pop_front()
    }

    pub fn pending(&self, line: SignalLine) -> usize {
        self.queue
            .iter()
            .filter(|signal| signal.line() == line)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
