use super::Listener;
use crate::model::*;
use crate::util::misc::vec_to_string;

// [EventPrinter]
// イベントと局の状態をinfoレベルのログとして出力
#[derive(Debug, Default)]
pub struct EventPrinter {}

impl EventPrinter {
    pub fn new() -> Self {
        Self {}
    }
}

impl Listener for EventPrinter {
    fn notify_event(&mut self, stg: &RoundState, event: &Event) {
        use Event::*;
        match event {
            Deal(e) => {
                info!(
                    "(step:{}) Deal {}{}\n{}",
                    stg.step,
                    e.tile,
                    if e.is_replacement { " (replacement)" } else { "" },
                    stg.players[e.seat]
                );
            }
            Discard(e) => {
                info!(
                    "(step:{}) Discard {} {}\n{}",
                    stg.step,
                    e.tile,
                    if e.is_riichi { "riichi" } else { "" },
                    stg.players[e.seat]
                );
            }
            Meld(e) => {
                info!(
                    "(step:{}) {:?} {}\n{}",
                    stg.step,
                    e.meld_type,
                    vec_to_string(&e.consumed),
                    stg.players[e.seat]
                );
            }
            Dora(e) => {
                info!("(step:{}) Dora {}", stg.step, e.tile);
            }
            Win(e) => {
                info!(
                    "(step:{}) Win seat: {}, from: {}, ura_dora: {}\n{:?}\n{}",
                    stg.step,
                    e.seat,
                    e.from,
                    vec_to_string(&e.ura_doras),
                    e.context,
                    stg
                );
            }
            Draw(e) => {
                info!(
                    "(step:{}) Draw {:?} tenpai: {:?} nagashi: {:?}\n{}",
                    stg.step, e.draw_type, e.tenpais, e.nagashis, stg
                );
            }
        }
    }
}
