//! Typed request channel between the dispatcher, the palette host and any
//! UI code that wants to open the palette or the help overlay.
//!
//! Requests are fire-and-forget: raising one needs only a cloned
//! [`SignalSender`], never a reference to the dispatcher or the palette. The
//! host drains the receiver in its event loop.
use tokio::sync::mpsc;

/// A request addressed to the UI shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Open the command palette with a fresh session.
    OpenPalette,
    /// Close the command palette, discarding its session.
    ClosePalette,
    /// Show the keyboard-shortcut help overlay.
    OpenHelp,
}

/// Cloneable sending half of the signal channel.
#[derive(Debug, Clone)]
pub struct SignalSender {
    tx: mpsc::UnboundedSender<Signal>,
}

impl SignalSender {
    /// Queue a signal. Sending never blocks and never fails from the
    /// caller's point of view; a dropped receiver discards the request.
    pub fn send(&self, signal: Signal) {
        if self.tx.send(signal).is_err() {
            tracing::debug!(?signal, "Signal receiver dropped, request discarded");
        }
    }

    pub fn request_open_palette(&self) {
        self.send(Signal::OpenPalette);
    }

    pub fn request_close_palette(&self) {
        self.send(Signal::ClosePalette);
    }

    pub fn request_open_help(&self) {
        self.send(Signal::OpenHelp);
    }
}

/// Create a signal channel.
pub fn signal_channel() -> (SignalSender, mpsc::UnboundedReceiver<Signal>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SignalSender { tx }, rx)
}
