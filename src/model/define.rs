// 型エイリアス
pub type Seat = usize; // 座席 (0: East, 1: South, 2: West, 3: North)
pub type Type = usize; // 牌の種別部分 (萬子,筒子,索子,字牌)
pub type Tnum = usize; // 牌の数字部分 (1~9, 字牌は WE~DR)
pub type Index = usize; // その他Index

// Number
pub const SEAT: usize = 4; // 座席の数
pub const TYPE: usize = 4; // 牌の種別部分の数 (萬子,筒子,索子,字牌)
pub const TNUM: usize = 10; // 牌の数字部分の数 (index 0 は未使用)
pub const TILE: usize = 4; // 同種の牌の数

// Wall
pub const TILE_COUNT: usize = 136; // 牌の総数
pub const WALL_SIZE: usize = 34; // 各家の前の山の枚数 (17x2)
pub const DEAD_WALL_SIZE: usize = 14; // 王牌
pub const REPLACEMENT_SIZE: usize = 4; // 嶺上牌
pub const INDICATOR_SIZE: usize = 5; // ドラ表示牌 (裏ドラも同数)
pub const HAND_SIZE: usize = 13; // 配牌
pub const DEALT_COUNT: usize = HAND_SIZE * SEAT; // 配牌の総数
pub const LIVE_WALL_SIZE: usize = TILE_COUNT - DEAD_WALL_SIZE - DEALT_COUNT; // 配牌後のツモ山

// Type Index
pub const TM: usize = 0; // Type: Manzu (萬子)
pub const TP: usize = 1; // Type: Pinzu (筒子)
pub const TS: usize = 2; // Type: Souzu (索子)
pub const TZ: usize = 3; // Type: Zihai (字牌)

// Tnum Index
pub const WE: usize = 1; // Wind:    East  (東)
pub const WS: usize = 2; // Wind:    South (南)
pub const WW: usize = 3; // Wind:    West  (西)
pub const WN: usize = 4; // Wind:    North (北)
pub const DW: usize = 5; // Doragon: White (白)
pub const DG: usize = 6; // Doragon: Green (發)
pub const DR: usize = 7; // Doragon: Red   (中)

#[inline]
pub fn seat_wind(seat: Seat) -> Tnum {
    seat % SEAT + 1 // WE | WS | WW | WN
}

// fromから見てtoが何番目の下家か (0: 自分, 1: 下家, 2: 対面, 3: 上家)
#[inline]
pub fn seat_offset(from: Seat, to: Seat) -> usize {
    (to + SEAT - from) % SEAT
}
