use serde::{de, ser};

use super::*;
use crate::error::{Error, Res};

// [Tile]
// 牌の種類 (同種の4枚を区別しない, 赤5も通常の5と同じ種類)
// 面子・雀頭の判定や役の判定はすべてTileで行う
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile(pub Type, pub Tnum); // (type index, number index)

impl Tile {
    // 数牌
    #[inline]
    pub fn is_suit(&self) -> bool {
        self.0 != TZ
    }

    // 字牌
    #[inline]
    pub fn is_honor(&self) -> bool {
        self.0 == TZ
    }

    // 1,9牌
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.0 != TZ && (self.1 == 1 || self.1 == 9)
    }

    // 么九牌
    #[inline]
    pub fn is_end(&self) -> bool {
        self.0 == TZ || self.1 == 1 || self.1 == 9
    }

    // 中張牌
    #[inline]
    pub fn is_simple(&self) -> bool {
        !self.is_end()
    }

    // 風牌
    #[inline]
    pub fn is_wind(&self) -> bool {
        self.0 == TZ && self.1 <= WN
    }

    // 三元牌
    #[inline]
    pub fn is_doragon(&self) -> bool {
        self.0 == TZ && DW <= self.1 && self.1 <= DR
    }

    // ドラ表示牌に対するドラ
    pub fn next(&self) -> Self {
        let ni = if self.is_honor() {
            match self.1 {
                WN => WE,
                DR => DW,
                i => i + 1,
            }
        } else {
            match self.1 {
                9 => 1,
                i => i + 1,
            }
        };
        Self(self.0, ni)
    }

    // 34種の牌の並び (風牌, 三元牌, 萬子, 索子, 筒子) におけるindex
    pub fn block(&self) -> usize {
        match self.0 {
            TZ if self.1 <= WN => self.1 - 1,
            TZ => 4 + (DR - self.1), // 中, 發, 白
            TM => 6 + self.1,
            TS => 15 + self.1,
            TP => 24 + self.1,
            _ => panic!("invalid tile type index: {}", self.0),
        }
    }

    pub fn from_block(b: usize) -> Self {
        match b {
            0..=3 => Self(TZ, b + 1),
            4..=6 => Self(TZ, DR - (b - 4)),
            7..=15 => Self(TM, b - 6),
            16..=24 => Self(TS, b - 15),
            25..=33 => Self(TP, b - 24),
            _ => panic!("invalid tile block: {}", b),
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ['m', 'p', 's', 'z'][self.0], self.1)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match crate::control::tiles_from_string(v) {
            Ok(ts) if ts.len() == 1 => Ok(ts[0]),
            _ => Err(E::custom(format!("invalid tile symbol: {}", v))),
        }
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as de::Deserializer<'de>>::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

// [Suit]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Wind,
    Dragon,
    Man,
    Sou,
    Pin,
}

// 牌IDの並び: 4枚ずつ 東南西北, 中發白, 萬子1-9, 索子1-9, 筒子1-9
const GLYPHS: [char; 34] = [
    '🀀', '🀁', '🀂', '🀃', // 風牌
    '🀄', '🀅', '🀆', // 三元牌
    '🀇', '🀈', '🀉', '🀊', '🀋', '🀌', '🀍', '🀎', '🀏', // 萬子
    '🀐', '🀑', '🀒', '🀓', '🀔', '🀕', '🀖', '🀗', '🀘', // 索子
    '🀙', '🀚', '🀛', '🀜', '🀝', '🀞', '🀟', '🀠', '🀡', // 筒子
];

// [TileId]
// 物理的な牌 (136枚それぞれが固有のID)
// 所有や移動の判定はIDで, 面子の判定は種類(Tile)で行う
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(u8);

impl TileId {
    pub fn new(id: usize) -> Res<Self> {
        if id < TILE_COUNT {
            Ok(Self(id as u8))
        } else {
            Err(Error::OutOfRange(id))
        }
    }

    #[inline]
    pub fn id(&self) -> usize {
        self.0 as usize
    }

    #[inline]
    fn block(&self) -> usize {
        self.id() / TILE
    }

    pub fn suit(&self) -> Suit {
        match self.block() {
            0..=3 => Suit::Wind,
            4..=6 => Suit::Dragon,
            7..=15 => Suit::Man,
            16..=24 => Suit::Sou,
            _ => Suit::Pin,
        }
    }

    // 数牌は1~9, 風牌は東南西北で1~4, 三元牌は中發白で1~3
    pub fn rank(&self) -> u8 {
        let b = self.block();
        (match self.suit() {
            Suit::Wind => b + 1,
            Suit::Dragon => b - 3,
            Suit::Man => b - 6,
            Suit::Sou => b - 15,
            Suit::Pin => b - 24,
        }) as u8
    }

    // 各数牌の5のうち最初の1枚が赤5
    #[inline]
    pub fn is_red5(&self) -> bool {
        self.is_number() && self.rank() == 5 && self.id() % TILE == 0
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self.suit(), Suit::Man | Suit::Sou | Suit::Pin)
    }

    #[inline]
    pub fn identity(&self) -> (Suit, u8, bool) {
        (self.suit(), self.rank(), self.is_red5())
    }

    #[inline]
    pub fn symbol(&self) -> char {
        GLYPHS[self.block()]
    }

    #[inline]
    pub fn kind(&self) -> Tile {
        Tile::from_block(self.block())
    }

    #[inline]
    pub fn kind_equals(&self, other: &TileId) -> bool {
        self.block() == other.block()
    }

    // 同種の4枚のID (先頭が赤5の候補)
    pub fn copies(t: Tile) -> [TileId; TILE] {
        let base = (t.block() * TILE) as u8;
        [Self(base), Self(base + 1), Self(base + 2), Self(base + 3)]
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.kind();
        if self.is_red5() {
            write!(f, "{}0", ['m', 'p', 's', 'z'][t.0])
        } else {
            write!(f, "{}", t)
        }
    }
}

impl fmt::Debug for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

pub fn identity(id: usize) -> Res<(Suit, u8, bool)> {
    Ok(TileId::new(id)?.identity())
}

pub fn symbol(id: usize) -> Res<char> {
    Ok(TileId::new(id)?.symbol())
}

#[inline]
pub fn kind_equals(a: TileId, b: TileId) -> bool {
    a.kind_equals(&b)
}

// symbolの逆引き
pub fn from_symbol(c: char) -> Option<(Suit, u8)> {
    let b = GLYPHS.iter().position(|&g| g == c)?;
    TileId::new(b * TILE).ok().map(|t| (t.suit(), t.rank()))
}

// 136枚の牌IDを昇順で返却
pub fn full_set() -> Vec<TileId> {
    (0..TILE_COUNT as u8).map(TileId).collect()
}

// [TileTable]
// 種類ごとの枚数 (index 0 は未使用)
pub type TileRow = [usize; TNUM];
pub type TileTable = [TileRow; TYPE];

#[test]
fn test_symbol_round_trip() {
    for id in 0..TILE_COUNT {
        let (suit, rank, _) = identity(id).unwrap();
        let c = symbol(id).unwrap();
        assert_eq!(from_symbol(c), Some((suit, rank)), "id {}", id);
    }
}

#[test]
fn test_out_of_range() {
    assert_eq!(identity(136), Err(Error::OutOfRange(136)));
    assert_eq!(symbol(1000), Err(Error::OutOfRange(1000)));
    assert!(TileId::new(135).is_ok());
}

#[test]
fn test_identity_layout() {
    assert_eq!(identity(0).unwrap(), (Suit::Wind, 1, false));
    assert_eq!(identity(15).unwrap(), (Suit::Wind, 4, false));
    assert_eq!(identity(16).unwrap(), (Suit::Dragon, 1, false));
    assert_eq!(identity(27).unwrap(), (Suit::Dragon, 3, false));
    assert_eq!(identity(28).unwrap(), (Suit::Man, 1, false));
    assert_eq!(identity(64).unwrap(), (Suit::Sou, 1, false));
    assert_eq!(identity(135).unwrap(), (Suit::Pin, 9, false));
    assert_eq!(symbol(16).unwrap(), '🀄');

    let reds: Vec<usize> = (0..TILE_COUNT)
        .filter(|&id| identity(id).unwrap().2)
        .collect();
    assert_eq!(reds, vec![44, 80, 116]);
}

#[test]
fn test_kind_equals() {
    let red = TileId::new(44).unwrap();
    let five = TileId::new(45).unwrap();
    let six = TileId::new(48).unwrap();
    assert!(kind_equals(red, five));
    assert!(red != five);
    assert!(!kind_equals(five, six));
    assert_eq!(red.kind(), Tile(TM, 5));
    assert_eq!(TileId::new(16).unwrap().kind(), Tile(TZ, DR));
    assert_eq!(TileId::new(24).unwrap().kind(), Tile(TZ, DW));
}

#[test]
fn test_block_round_trip() {
    for b in 0..34 {
        assert_eq!(Tile::from_block(b).block(), b);
    }
    assert_eq!(Tile(TZ, WN).next(), Tile(TZ, WE));
    assert_eq!(Tile(TZ, DR).next(), Tile(TZ, DW));
    assert_eq!(Tile(TP, 9).next(), Tile(TP, 1));
}
