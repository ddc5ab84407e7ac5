use super::*;

// 局の状態遷移で発生する差分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Deal(EventDeal),       // ツモ (嶺上牌を含む)
    Discard(EventDiscard), // 打牌
    Meld(EventMeld),       // 鳴き, 暗槓, 加槓
    Dora(EventDora),       // 新ドラ
    Win(EventWin),         // 局終了 (和了)
    Draw(EventDraw),       // 局終了 (流局)
}

impl Event {
    #[inline]
    pub fn deal(seat: Seat, tile: TileId, is_replacement: bool) -> Self {
        Self::Deal(EventDeal {
            seat,
            tile,
            is_replacement,
        })
    }

    #[inline]
    pub fn discard(seat: Seat, tile: TileId, is_drawn: bool, is_riichi: bool) -> Self {
        Self::Discard(EventDiscard {
            seat,
            tile,
            is_drawn,
            is_riichi,
        })
    }

    #[inline]
    pub fn meld(seat: Seat, meld_type: MeldType, consumed: Vec<TileId>, from: Option<Seat>) -> Self {
        Self::Meld(EventMeld {
            seat,
            meld_type,
            consumed,
            from,
        })
    }

    #[inline]
    pub fn dora(tile: TileId) -> Self {
        Self::Dora(EventDora { tile })
    }

    #[inline]
    pub fn win(seat: Seat, from: Seat, context: WinContext, ura_doras: Vec<TileId>) -> Self {
        Self::Win(EventWin {
            seat,
            from,
            context,
            ura_doras,
        })
    }

    #[inline]
    pub fn draw(draw_type: DrawType, tenpais: [bool; SEAT], nagashis: [bool; SEAT]) -> Self {
        Self::Draw(EventDraw {
            draw_type,
            tenpais,
            nagashis,
        })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Deal(e) => write!(f, "Deal(seat: {}, tile: {})", e.seat, e.tile),
            Event::Discard(e) => write!(
                f,
                "Discard(seat: {}, tile: {}{})",
                e.seat,
                e.tile,
                if e.is_riichi { ", riichi" } else { "" }
            ),
            Event::Meld(e) => write!(f, "{:?}(seat: {}, {:?})", e.meld_type, e.seat, e.consumed),
            Event::Dora(e) => write!(f, "Dora({})", e.tile),
            Event::Win(e) => write!(f, "Win(seat: {}, from: {})", e.seat, e.from),
            Event::Draw(e) => write!(
                f,
                "Draw({:?}, tenpai: {:?}, nagashi: {:?})",
                e.draw_type, e.tenpais, e.nagashis
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDeal {
    pub seat: Seat,
    pub tile: TileId,         // ツモ牌
    pub is_replacement: bool, // 嶺上牌
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDiscard {
    pub seat: Seat,
    pub tile: TileId,
    pub is_drawn: bool,  // ツモ切り
    pub is_riichi: bool, // リーチ宣言
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMeld {
    pub seat: Seat,
    pub meld_type: MeldType,
    pub consumed: Vec<TileId>, // 手牌から消費した牌
    pub from: Option<Seat>,    // 鳴いた牌の出所 (暗槓, 加槓はNone)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDora {
    pub tile: TileId, // 新しいドラ表示牌
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWin {
    pub seat: Seat,              // 和了者
    pub from: Seat,              // 放銃者 (ツモ和了の場合は和了者)
    pub context: WinContext,     // 和了情報
    pub ura_doras: Vec<TileId>, // 裏ドラ表示牌 (リーチしていない場合は空)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawType {
    Kouhaiheikyoku, // 荒牌平局 (ツモ山の枯渇)
    Kyushukyuhai,   // 九種九牌
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraw {
    pub draw_type: DrawType,
    pub tenpais: [bool; SEAT],  // 聴牌者 (流局時)
    pub nagashis: [bool; SEAT], // 流し満貫の成立者 (流局時)
}
