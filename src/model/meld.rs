use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldType {
    Chi,
    Pon,
    Minkan, // 大明槓
    Kakan,  // 加槓
    Ankan,  // 暗槓
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    pub meld_type: MeldType,
    pub tiles: Vec<TileId>,      // 面子を構成する牌 (昇順)
    pub claimed: Option<TileId>, // 他家から鳴いた牌 (暗槓はNone)
    pub from: Option<Seat>,      // 鳴いた牌の出所 (暗槓はNone)
}

impl Meld {
    pub fn new(
        meld_type: MeldType,
        mut tiles: Vec<TileId>,
        claimed: Option<TileId>,
        from: Option<Seat>,
    ) -> Self {
        tiles.sort();
        Self {
            meld_type,
            tiles,
            claimed,
            from,
        }
    }

    // 暗槓以外はすべて副露
    #[inline]
    pub fn is_open(&self) -> bool {
        self.meld_type != MeldType::Ankan
    }

    #[inline]
    pub fn is_kan(&self) -> bool {
        matches!(
            self.meld_type,
            MeldType::Minkan | MeldType::Kakan | MeldType::Ankan
        )
    }

    // 順子の場合は先頭の牌
    #[inline]
    pub fn kind(&self) -> Tile {
        self.tiles[0].kind()
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: Vec<String> = self
            .tiles
            .iter()
            .map(|t| {
                if Some(*t) == self.claimed {
                    format!("{}+", t)
                } else {
                    t.to_string()
                }
            })
            .collect();
        write!(f, "{}", s.join("|"))
    }
}
