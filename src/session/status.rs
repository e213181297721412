use std::sync::mpsc;

use log::info;

/// Receives the human-readable status line every session operation emits.
/// One sink, one line per operation, success or failure — no silent
/// failures.
pub trait StatusSink {
    fn status(&self, line: &str);
}

/// Forwards status lines over a channel, e.g. to a UI thread. A dropped
/// receiver is ignored; status is best-effort.
pub struct ChannelSink {
    tx: mpsc::Sender<String>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<String>) -> ChannelSink {
        ChannelSink { tx }
    }
}

impl StatusSink for ChannelSink {
    fn status(&self, line: &str) {
        let _ = self.tx.send(line.to_string());
    }
}

/// Routes status lines to the `log` facade.
#[derive(Default)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn status(&self, line: &str) {
        info!("{}", line);
    }
}
