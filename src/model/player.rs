use super::*;
use crate::util::misc::vec_to_string;

// [Hand]
// 手牌 = 門前の牌(IDの多重集合) + 鳴きの一覧
// 副露かどうかは手牌単位ではなく面子単位で管理する (暗槓を含む副露手など)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub concealed: Vec<TileId>, // 昇順
    pub melds: Vec<Meld>,
}

impl Hand {
    pub fn new(mut concealed: Vec<TileId>) -> Self {
        concealed.sort();
        Self {
            concealed,
            melds: vec![],
        }
    }

    #[inline]
    pub fn contains(&self, t: TileId) -> bool {
        self.concealed.contains(&t)
    }

    pub fn insert(&mut self, t: TileId) {
        let pos = self.concealed.partition_point(|&x| x < t);
        self.concealed.insert(pos, t);
    }

    pub fn remove(&mut self, t: TileId) -> bool {
        if let Some(pos) = self.concealed.iter().position(|&x| x == t) {
            self.concealed.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn count_kind(&self, t: Tile) -> usize {
        self.concealed.iter().filter(|x| x.kind() == t).count()
    }

    // 指定した種類の牌のIDを最大n枚返却 (赤5は後回し)
    pub fn find_kind(&self, t: Tile, n: usize) -> Vec<TileId> {
        let mut v: Vec<TileId> = self
            .concealed
            .iter()
            .filter(|x| x.kind() == t)
            .copied()
            .collect();
        v.sort_by_key(|x| x.is_red5());
        v.truncate(n);
        v
    }

    // 門前の牌の種類ごとの枚数
    pub fn table(&self) -> TileTable {
        let mut tt = TileTable::default();
        for t in &self.concealed {
            let k = t.kind();
            tt[k.0][k.1] += 1;
        }
        tt
    }

    // 槓子を3枚として数えた手牌の枚数 (通常13, ツモ・鳴き直後は14)
    #[inline]
    pub fn size(&self) -> usize {
        self.concealed.len() + self.melds.len() * 3
    }

    // 物理的な枚数 (槓子は4枚)
    pub fn tile_count(&self) -> usize {
        self.concealed.len() + self.melds.iter().map(|m| m.tiles.len()).sum::<usize>()
    }

    // 門前 (暗槓のみ許可)
    #[inline]
    pub fn is_menzen(&self) -> bool {
        self.melds.iter().all(|m| !m.is_open())
    }

    pub fn n_red5(&self) -> usize {
        let mut n = self.concealed.iter().filter(|t| t.is_red5()).count();
        for m in &self.melds {
            n += m.tiles.iter().filter(|t| t.is_red5()).count();
        }
        n
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            vec_to_string(&self.concealed),
            vec_to_string(&self.melds)
        )
    }
}

// [Discard]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discard {
    pub tile: TileId,
    pub is_drawn: bool,  // ツモ切りフラグ
    pub is_riichi: bool, // リーチ宣言牌
    pub claimed: bool,   // 他家に鳴かれた場合にセット (フリテン判定には含める)
}

impl fmt::Display for Discard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tile)?;
        if self.claimed {
            write!(f, "*")?;
        }
        Ok(())
    }
}

// [Player]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub seat: Seat,             // 座席 (自風もこれで決まる)
    pub hand: Hand,             // 手牌
    pub drawn: Option<TileId>,  // ツモ牌
    pub discards: Vec<Discard>, // 捨て牌一覧

    // 条件役用のフラグ
    pub is_riichi: bool,  // リーチ (ダブルリーチを含む)
    pub is_daburii: bool, // ダブルリーチ
    pub is_ippatsu: bool, // 一発 リーチ後にセットして次の打牌または誰かの鳴きでfalseをセット
    pub is_rinshan: bool, // 槓の操作中にtrueをセット 打牌でfalseをセット

    // フリテン (自分の捨て牌によるフリテンは都度判定)
    pub is_furiten_other: bool,  // 他家の和了牌の見逃し 次の自分の打牌で解除
    pub is_furiten_riichi: bool, // リーチ後の見逃し 局が終わるまで解除されない

    pub restricted: Vec<Tile>, // 鳴き直後に捨てられない牌 (食い替え)
}

impl Player {
    pub fn new(seat: Seat, tiles: Vec<TileId>) -> Self {
        Self {
            seat,
            hand: Hand::new(tiles),
            ..Default::default()
        }
    }

    #[inline]
    pub fn wind(&self) -> Tnum {
        seat_wind(self.seat)
    }

    // 自分の捨て牌に含まれる種類か (鳴かれた牌も含む)
    pub fn has_discarded(&self, t: Tile) -> bool {
        self.discards.iter().any(|d| d.tile.kind() == t)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let drawn = if let Some(d) = self.drawn {
            d.to_string()
        } else {
            "None".to_string()
        };
        writeln!(
            f,
            "seat: {}, riichi: {}, ippatsu: {}, rinshan: {}, drawn: {}",
            self.seat, self.is_riichi, self.is_ippatsu, self.is_rinshan, drawn,
        )?;
        writeln!(f, "hand: {}", self.hand)?;
        write!(f, "discards: {}", vec_to_string(&self.discards))
    }
}

#[test]
fn test_hand_insert_remove() {
    let ids: Vec<TileId> = [40, 28, 44].iter().map(|&i| TileId::new(i).unwrap()).collect();
    let mut h = Hand::new(ids);
    assert_eq!(h.concealed[0].id(), 28);
    h.insert(TileId::new(30).unwrap());
    assert_eq!(h.concealed[1].id(), 30);
    assert!(h.remove(TileId::new(44).unwrap()));
    assert!(!h.remove(TileId::new(44).unwrap()));
    assert_eq!(h.size(), 3);
}

#[test]
fn test_find_kind_prefers_plain_five() {
    // 44 = 赤5萬, 45 = 5萬
    let ids: Vec<TileId> = [44, 45].iter().map(|&i| TileId::new(i).unwrap()).collect();
    let h = Hand::new(ids);
    let v = h.find_kind(Tile(TM, 5), 1);
    assert_eq!(v, vec![TileId::new(45).unwrap()]);
    assert_eq!(h.count_kind(Tile(TM, 5)), 2);
    assert_eq!(h.n_red5(), 1);
}
