use crate::model::*;

// 么九牌13種
const YAOCHUU: [Tile; 13] = [
    Tile(TM, 1),
    Tile(TM, 9),
    Tile(TP, 1),
    Tile(TP, 9),
    Tile(TS, 1),
    Tile(TS, 9),
    Tile(TZ, WE),
    Tile(TZ, WS),
    Tile(TZ, WW),
    Tile(TZ, WN),
    Tile(TZ, DW),
    Tile(TZ, DG),
    Tile(TZ, DR),
];

#[inline]
fn count_row(tr: &TileRow) -> usize {
    tr[1..].iter().sum()
}

#[inline]
fn count_table(hand: &TileTable) -> usize {
    hand.iter().map(count_row).sum()
}

// [面子, 雀頭]

// 牌種が面子のみで構成されているか
// 小さい数字から刻子を外し, 残った枚数をその数字から始まる順子として消費する
pub fn is_sets(tr: &TileRow, ti: Type) -> bool {
    let mut r = *tr;
    for ni in 1..TNUM {
        let n = r[ni] % 3;
        if n == 0 {
            continue;
        }
        if ti == TZ || ni > 7 || r[ni + 1] < n || r[ni + 2] < n {
            return false;
        }
        r[ni + 1] -= n;
        r[ni + 2] -= n;
    }
    true
}

// 牌種が面子+雀頭で構成されている場合の雀頭の一覧 (3113, 3111113などは2つ)
pub fn calc_pair_candidate(tr: &TileRow, ti: Type) -> Vec<Tile> {
    let mut r = *tr;
    let mut res = vec![];
    for ni in 1..TNUM {
        if r[ni] < 2 {
            continue;
        }
        r[ni] -= 2;
        if is_sets(&r, ti) {
            res.push(Tile(ti, ni));
        }
        r[ni] += 2;
    }
    res
}

// 門前の牌(14-3n枚)が通常形の和了形である場合の雀頭の一覧
// 雀頭を含む牌種(枚数が3で割って2余る)はちょうど1つ
pub fn calc_possible_pairs(hand: &TileTable) -> Vec<Tile> {
    let mut pairs = None;
    for ti in 0..TYPE {
        match count_row(&hand[ti]) % 3 {
            0 if is_sets(&hand[ti], ti) => {}
            2 if pairs.is_none() => pairs = Some(calc_pair_candidate(&hand[ti], ti)),
            _ => return vec![],
        }
    }
    pairs.unwrap_or_default()
}

// [和了形判定]

// 通常形
#[inline]
pub fn is_normal_win(hand: &TileTable) -> bool {
    !calc_possible_pairs(hand).is_empty()
}

// 七対子 (同じ牌4枚は2対子として扱わない)
pub fn is_chiitoitsu_win(hand: &TileTable) -> bool {
    let mut n_pair = 0;
    for tr in hand {
        for &n in &tr[1..] {
            match n {
                0 => {}
                2 => n_pair += 1,
                _ => return false,
            }
        }
    }
    n_pair == 7
}

// 国士無双
pub fn is_kokushimusou_win(hand: &TileTable) -> bool {
    let n_yaochuu: usize = YAOCHUU.iter().map(|t| hand[t.0][t.1]).sum();
    n_yaochuu == 14
        && count_table(hand) == 14
        && YAOCHUU.iter().all(|t| hand[t.0][t.1] != 0)
}

#[inline]
pub fn is_win(hand: &TileTable) -> bool {
    is_normal_win(hand) || is_chiitoitsu_win(hand) || is_kokushimusou_win(hand)
}

// [和了牌判定]

// 門前の牌(13-3n枚)に34種の牌を1枚ずつ加えて和了形になるものを返却
// 手牌で4枚使い切っている牌は待ちに含めない
pub fn calc_tiles_to_win(hand: &TileTable) -> Vec<Tile> {
    let mut hand = *hand;
    let mut res = vec![];
    for ti in 0..TYPE {
        let max = if ti == TZ { DR } else { 9 };
        for ni in 1..=max {
            if hand[ti][ni] >= TILE {
                continue;
            }
            hand[ti][ni] += 1;
            if is_win(&hand) {
                res.push(Tile(ti, ni));
            }
            hand[ti][ni] -= 1;
        }
    }
    res
}

// ツモ番(14-3n枚)において聴牌となる打牌と待ちの組み合わせの一覧
pub fn calc_discards_to_tenpai(hand: &TileTable) -> Vec<(Tile, Vec<Tile>)> {
    let mut hand = *hand;
    let mut res = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if hand[ti][ni] == 0 {
                continue;
            }
            hand[ti][ni] -= 1;
            let waits = calc_tiles_to_win(&hand);
            hand[ti][ni] += 1;
            if !waits.is_empty() {
                res.push((Tile(ti, ni), waits));
            }
        }
    }
    res
}

#[cfg(test)]
use crate::control::tiles_to_table;

#[test]
fn test_is_win() {
    assert!(is_normal_win(&tiles_to_table("m123456789p11s345").unwrap()));
    assert!(!is_normal_win(&tiles_to_table("m123456789p12s345").unwrap()));
    assert!(is_chiitoitsu_win(&tiles_to_table("m1133p2255s66z1177").unwrap()));
    assert!(is_kokushimusou_win(&tiles_to_table("m19p19s19z12345677").unwrap()));
    assert!(!is_kokushimusou_win(&tiles_to_table("m19p19s19z1234567m2").unwrap()));
    // 同じ牌4枚は七対子にならない
    assert!(!is_chiitoitsu_win(&tiles_to_table("m1111p2255s66z1177").unwrap()));
    assert_eq!(
        calc_possible_pairs(&tiles_to_table("m11123p456s789z777").unwrap()),
        vec![Tile(TM, 1)]
    );
    // 副露後の手牌
    assert!(is_normal_win(&tiles_to_table("m234z11").unwrap()));
}

#[test]
fn test_calc_tiles_to_win() {
    // 多面張
    let tt = tiles_to_table("m1112345678999").unwrap();
    assert_eq!(calc_tiles_to_win(&tt).len(), 9);

    // 両面
    let tt = tiles_to_table("m23p456789s11z777").unwrap();
    assert_eq!(calc_tiles_to_win(&tt), vec![Tile(TM, 1), Tile(TM, 4)]);

    // 七対子単騎
    let tt = tiles_to_table("m1133p2255s66z117").unwrap();
    assert_eq!(calc_tiles_to_win(&tt), vec![Tile(TZ, 7)]);

    // 国士無双十三面待ち
    let tt = tiles_to_table("m19p19s19z1234567").unwrap();
    assert_eq!(calc_tiles_to_win(&tt).len(), 13);

    // 4枚使い切りの牌は待ちにならない
    let tt = tiles_to_table("m1111p456s789z777").unwrap();
    assert!(!calc_tiles_to_win(&tt).contains(&Tile(TM, 1)));

    let tt = tiles_to_table("m147p258s369z1234").unwrap();
    assert!(calc_tiles_to_win(&tt).is_empty());
}

#[test]
fn test_calc_discards_to_tenpai() {
    let tt = tiles_to_table("m123456789p11s35z1").unwrap();
    let v = calc_discards_to_tenpai(&tt);
    assert!(v.iter().any(|(d, w)| *d == Tile(TZ, 1) && w == &vec![Tile(TS, 4)]));
}
