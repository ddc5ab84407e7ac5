use std::collections::VecDeque;

use super::*;
use crate::util::misc::vec_to_string;

// 鳴きの受付の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallWindow {
    Discard, // 打牌に対するチー, ポン, 大明槓, ロン
    Kakan,   // 加槓に対する槍槓 (ロンのみ)
}

// 局の終了理由
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Tsumo {
        seat: Seat,
        context: WinContext,
    },
    Ron {
        seat: Seat,
        from: Seat,
        context: WinContext,
    },
    ExhaustiveDraw {
        tenpai: [bool; SEAT],
        nagashi: [bool; SEAT], // 流し満貫
    },
    Abortive(DrawType),
}

// [Phase]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingDraw(Seat),
    AwaitingDiscard(Seat),
    AwaitingCalls {
        tile: TileId,      // 打牌 (加槓の場合は加えた牌)
        discarder: Seat,   // 打牌者 (加槓者)
        window: CallWindow,
    },
    RoundEnded(EndReason),
}

impl Default for Phase {
    fn default() -> Self {
        Self::AwaitingDraw(0)
    }
}

// [RoundState]
// 1局分の状態 操作はすべてcontrol::turnの遷移関数を経由する
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub rule: Rule,
    pub round_wind: Tnum,               // 場風 (WE~WN)
    pub dice: [usize; 2],               // サイコロの目
    pub wall_break: usize,              // 開門位置 (シャッフル後の配列上のindex)
    pub draw_pile: VecDeque<TileId>,    // ツモ山 (先頭が次のツモ)
    pub dead_wall: DeadWall,            // 王牌
    pub players: [Player; SEAT],        // 各プレイヤー情報
    pub phase: Phase,                   // 現在の状態
    pub responses: [Option<Response>; SEAT], // AwaitingCallsで受け付けた応答
    pub n_dora: usize,                  // 表示済みのドラ表示牌の数
    pub kan_count: usize,               // 局全体の槓の数
    pub step: usize,                    // 遷移が成功する毎に+1
    pub is_first_go_around: bool,       // 一巡目かつ鳴きなし (天和, 地和, ダブルリーチ, 九種九牌)
}

impl RoundState {
    // 表示用の不変なコピー
    #[inline]
    pub fn snapshot(&self) -> RoundState {
        self.clone()
    }

    // 手番のプレイヤー (AwaitingCallsの場合は打牌者)
    pub fn turn(&self) -> Option<Seat> {
        match &self.phase {
            Phase::AwaitingDraw(s) | Phase::AwaitingDiscard(s) => Some(*s),
            Phase::AwaitingCalls { discarder, .. } => Some(*discarder),
            Phase::RoundEnded(_) => None,
        }
    }

    #[inline]
    pub fn is_ended(&self) -> bool {
        matches!(self.phase, Phase::RoundEnded(_))
    }

    #[inline]
    pub fn wall_count(&self) -> usize {
        self.draw_pile.len()
    }

    #[inline]
    pub fn dora_indicators(&self) -> Vec<TileId> {
        self.dead_wall.dora_indicators(self.n_dora)
    }

    #[inline]
    pub fn ura_dora_indicators(&self) -> Vec<TileId> {
        self.dead_wall.ura_dora_indicators(self.n_dora)
    }

    // 現在の局に存在する牌の総数 (常に136)
    // 鳴かれた捨て牌は鳴いたプレイヤーの面子として数える
    pub fn tile_count(&self) -> usize {
        let mut n = self.draw_pile.len() + self.dead_wall.len();
        for pl in &self.players {
            n += pl.hand.tile_count();
            n += pl.discards.iter().filter(|d| !d.claimed).count();
        }
        n
    }

    // 局に存在するすべての牌ID
    pub fn all_tiles(&self) -> Vec<TileId> {
        let mut v: Vec<TileId> = self.draw_pile.iter().copied().collect();
        v.extend(self.dead_wall.tiles());
        for pl in &self.players {
            v.extend(&pl.hand.concealed);
            for m in &pl.hand.melds {
                v.extend(&m.tiles);
            }
            v.extend(pl.discards.iter().filter(|d| !d.claimed).map(|d| d.tile));
        }
        v
    }
}

impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "round_wind: {}, dice: {:?}, wall_break: {}, step: {}",
            Tile(TZ, self.round_wind),
            self.dice,
            self.wall_break,
            self.step,
        )?;
        writeln!(
            f,
            "phase: {:?}, wall_count: {}, doras: {}, kan_count: {}",
            self.phase,
            self.wall_count(),
            vec_to_string(&self.dora_indicators()),
            self.kan_count,
        )?;

        let boader = "-".to_string().repeat(80);
        write!(f, "{}", boader)?;
        for p in &self.players {
            writeln!(f)?;
            writeln!(f, "{}", p)?;
            write!(f, "{}", boader)?;
        }
        writeln!(f)
    }
}
