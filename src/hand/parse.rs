use crate::model::*;
use crate::util::misc::cartesian_product;

use super::win::{calc_possible_pairs, is_chiitoitsu_win, is_kokushimusou_win};

use SetPairType::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetPairType {
    Pair,    // 雀頭
    Shuntsu, // 順子
    Koutsu,  // 刻子
    Chi,     // チー
    Pon,     // ポン
    Minkan,  // 明槓 (大明槓 + 加槓)
    Ankan,   // 暗槓
}

// Tileは順子、チーの場合は先頭の牌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPair(pub SetPairType, pub Tile);

pub type ParsedHand = Vec<SetPair>;

// 鳴きをSetPairに変換したリストを返却
pub fn parse_melds(melds: &[Meld]) -> ParsedHand {
    melds
        .iter()
        .map(|m| {
            let t = m.kind();
            match m.meld_type {
                MeldType::Chi => SetPair(Chi, t),
                MeldType::Pon => SetPair(Pon, t),
                MeldType::Minkan | MeldType::Kakan => SetPair(Minkan, t),
                MeldType::Ankan => SetPair(Ankan, t),
            }
        })
        .collect()
}

// 牌種を順子と刻子に分解するすべての方法を列挙
// 最も小さい数字の牌は必ずその数字から始まる刻子か順子に含まれるので両方を試す
// TileRowが空(すべて0)の場合は分解可能とみなし[[]]を返却
// 分解できない場合は空のリストを返却
fn parse_row_into_sets(tr: &TileRow, ti: Type) -> Vec<ParsedHand> {
    let mut tr = *tr;
    let mut res = vec![];
    parse_row_rec(&mut tr, ti, 1, &mut vec![], &mut res);
    res
}

fn parse_row_rec(
    tr: &mut TileRow,
    ti: Type,
    start: Tnum,
    cur: &mut ParsedHand,
    res: &mut Vec<ParsedHand>,
) {
    let i = match (start..TNUM).find(|&i| tr[i] > 0) {
        Some(i) => i,
        None => {
            res.push(cur.clone());
            return;
        }
    };

    // 刻子
    if tr[i] >= 3 {
        tr[i] -= 3;
        cur.push(SetPair(Koutsu, Tile(ti, i)));
        parse_row_rec(tr, ti, i, cur, res);
        cur.pop();
        tr[i] += 3;
    }

    // 順子 (字牌は不可)
    if ti != TZ && i <= 7 && tr[i + 1] > 0 && tr[i + 2] > 0 {
        tr[i] -= 1;
        tr[i + 1] -= 1;
        tr[i + 2] -= 1;
        cur.push(SetPair(Shuntsu, Tile(ti, i)));
        parse_row_rec(tr, ti, i, cur, res);
        cur.pop();
        tr[i] += 1;
        tr[i + 1] += 1;
        tr[i + 2] += 1;
    }
}

// 手牌が完成形(七対子・国士無双は除く)なら面子+雀頭に分解して返却
// 雀頭の選び方と各牌種の分解の組み合わせをすべて列挙する
pub fn parse_into_normal_win(hand: &TileTable) -> Vec<ParsedHand> {
    let mut res = vec![];
    for pair in calc_possible_pairs(hand) {
        let mut hand = *hand;
        hand[pair.0][pair.1] -= 2;

        let mut phs_list = vec![];
        for ti in 0..TYPE {
            phs_list.push(parse_row_into_sets(&hand[ti], ti));
        }

        // それぞれの列の分割のすべての組み合わせ(直積)を求める
        for v in cartesian_product(&phs_list) {
            let mut ph = vec![SetPair(Pair, pair)];
            for v2 in v {
                ph.extend(v2);
            }
            res.push(ph);
        }
    }

    res
}

// 手牌が完成形(七対子)ならすべて対子に分解して返却
pub fn parse_into_chiitoitsu_win(hand: &TileTable) -> Vec<ParsedHand> {
    if !is_chiitoitsu_win(hand) {
        return vec![];
    }

    let mut ph = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if hand[ti][ni] == 2 {
                ph.push(SetPair(Pair, Tile(ti, ni)));
            }
        }
    }
    vec![ph]
}

// 手牌が完成形(国士無双)なら空のParsedHandが入ったリストを返却
pub fn parse_into_kokushimusou_win(hand: &TileTable) -> Vec<ParsedHand> {
    if is_kokushimusou_win(hand) {
        vec![vec![]]
    } else {
        vec![]
    }
}

#[cfg(test)]
use crate::control::tiles_to_table;

#[test]
fn test_parse_row_exhaustive() {
    // 三連刻: 刻子3つ or 順子3つ
    let tt = tiles_to_table("m111222333").unwrap();
    assert_eq!(parse_row_into_sets(&tt[TM], TM).len(), 2);

    // 四連刻: 刻子4つ, 順子3つ+刻子 (2通り)
    let tt = tiles_to_table("m222333444555").unwrap();
    assert_eq!(parse_row_into_sets(&tt[TM], TM).len(), 3);

    let tt = tiles_to_table("m124").unwrap();
    assert!(parse_row_into_sets(&tt[TM], TM).is_empty());

    let tt = tiles_to_table("z111").unwrap();
    assert_eq!(
        parse_row_into_sets(&tt[TZ], TZ),
        vec![vec![SetPair(Koutsu, Tile(TZ, 1))]]
    );
}

#[test]
fn test_parse_into_normal_win() {
    // m111は雀頭m11と順子m123に分解される
    let tt = tiles_to_table("m11123p456s789z555").unwrap();
    let phs = parse_into_normal_win(&tt);
    assert_eq!(phs.len(), 1);
    assert_eq!(phs[0].len(), 5);

    // 一盃口形と七対子形
    let tt = tiles_to_table("m112233p445566s77").unwrap();
    assert!(!parse_into_normal_win(&tt).is_empty());
    assert_eq!(parse_into_chiitoitsu_win(&tt).len(), 1);

    let tt = tiles_to_table("m19p19s19z12345677").unwrap();
    assert!(parse_into_normal_win(&tt).is_empty());
    assert_eq!(parse_into_kokushimusou_win(&tt), vec![vec![]]);
}
