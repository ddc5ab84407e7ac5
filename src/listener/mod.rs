mod event_printer;
mod event_writer;

use std::fmt;

use crate::model::*;

pub use event_printer::EventPrinter;
pub use event_writer::EventWriter;

// 状態遷移で発生したイベントの通知先
// stgはイベント適用後の状態
pub trait Listener: Send {
    fn notify_event(&mut self, _stg: &RoundState, _event: &Event) {}
}

impl fmt::Debug for dyn Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener")
    }
}
