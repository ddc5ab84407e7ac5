use serde_json::{json, Value};

use super::Listener;
use crate::model::*;

// [EventWriter]
// 局のイベントをJSONとして記録
#[derive(Debug, Default)]
pub struct EventWriter {
    record: Vec<Value>,      // 進行中の局のイベント
    rounds: Vec<Vec<Value>>, // 終了した局
}

impl EventWriter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record(&self) -> &[Value] {
        &self.record
    }

    #[inline]
    pub fn rounds(&self) -> &[Vec<Value>] {
        &self.rounds
    }

    // 終了した局のイベントを整形済みのJSON文字列に変換
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&json!(self.rounds)).unwrap_or_default()
    }
}

impl Listener for EventWriter {
    fn notify_event(&mut self, _stg: &RoundState, event: &Event) {
        self.record.push(json!(event));
        if matches!(event, Event::Win(_) | Event::Draw(_)) {
            self.rounds.push(std::mem::take(&mut self.record));
        }
    }
}

#[test]
fn test_event_writer() {
    use crate::control::deal;

    let mut stg = deal(5, [3, 3]).unwrap();
    let mut listeners: Vec<Box<dyn Listener>> = vec![Box::new(EventWriter::new())];
    let mut writer = EventWriter::new();
    while !stg.is_ended() {
        let events = match stg.phase {
            Phase::AwaitingDraw(s) => stg.apply_with(s, Action::Draw, &mut listeners),
            Phase::AwaitingDiscard(s) => {
                let d = stg.players[s].drawn.unwrap();
                stg.apply_with(s, Action::Discard(d), &mut listeners)
            }
            _ => stg.resolve_calls(),
        }
        .unwrap();
        for e in &events {
            writer.notify_event(&stg, e);
        }
    }

    // 流局で1局分の記録が確定
    assert!(writer.record().is_empty());
    assert_eq!(writer.rounds().len(), 1);
    let round = &writer.rounds()[0];
    assert_eq!(round[0]["type"], "Deal");
    assert_eq!(round.last().unwrap()["type"], "Draw");
    assert!(writer.to_json_string().contains("Kouhaiheikyoku"));
}
