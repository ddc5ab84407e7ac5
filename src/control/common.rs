use crate::error::{Error, Res};
use crate::hand::*;
use crate::model::*;

// 門前の牌(13-3n枚)に対する和了牌 (役の有無は問わない)
#[inline]
pub fn calc_waits(hand: &Hand) -> Vec<Tile> {
    calc_tiles_to_win(&hand.table())
}

#[inline]
pub fn is_tenpai(hand: &Hand) -> bool {
    !calc_waits(hand).is_empty()
}

// 自分の捨て牌に待ちが含まれている, または見逃し中
pub fn is_furiten(pl: &Player) -> bool {
    if pl.is_furiten_other || pl.is_furiten_riichi {
        return true;
    }
    calc_waits(&pl.hand)
        .iter()
        .any(|&t| pl.has_discarded(t))
}

// 配牌後の最初の自分の番で, それまでに誰も鳴いていない (天和, 地和, ダブルリーチ, 九種九牌)
#[inline]
pub fn is_no_meld_turn1(stg: &RoundState, seat: Seat) -> bool {
    stg.is_first_go_around && stg.players[seat].discards.is_empty()
}

// 和了者がリーチしている場合のみ裏ドラ表示牌を公開
pub fn revealed_ura_doras(stg: &RoundState, seat: Seat) -> Vec<TileId> {
    if stg.rule.ura_dora && stg.players[seat].is_riichi {
        stg.ura_dora_indicators()
    } else {
        vec![]
    }
}

fn situation(stg: &RoundState, seat: Seat, is_drawn: bool, yaku_flags: YakuFlags) -> Situation {
    Situation {
        seat,
        prevalent_wind: stg.round_wind,
        seat_wind: seat_wind(seat),
        is_drawn,
        yaku_flags,
        doras: stg.dora_indicators(),
        ura_doras: revealed_ura_doras(stg, seat),
        rule: stg.rule.clone(),
    }
}

fn riichi_flags(pl: &Player) -> YakuFlags {
    YakuFlags {
        riichi: pl.is_riichi && !pl.is_daburii,
        dabururiichi: pl.is_daburii,
        ippatsu: pl.is_ippatsu,
        ..Default::default()
    }
}

// ツモ番のプレイヤーのツモ和了を評価
pub fn evaluate_tsumo(stg: &RoundState, seat: Seat) -> Res<WinContext> {
    let pl = &stg.players[seat];
    let wt = pl
        .drawn
        .ok_or_else(|| Error::IllegalDeclare("no drawn tile".to_string()))?;

    let mut flags = riichi_flags(pl);
    flags.menzentsumo = pl.hand.is_menzen();
    flags.rinshankaihou = pl.is_rinshan;
    flags.haiteiraoyue = stg.draw_pile.is_empty() && !pl.is_rinshan;
    if is_no_meld_turn1(stg, seat) {
        if seat == 0 {
            flags.tenhou = true;
        } else {
            flags.tiihou = true;
        }
    }

    evaluate(&pl.hand, wt, &situation(stg, seat, true, flags))
}

// 打牌(または加槓の牌)に対するロン和了を評価
// フリテンの場合はIllegalDeclare
pub fn evaluate_ron(stg: &RoundState, seat: Seat, tile: TileId, window: CallWindow) -> Res<WinContext> {
    let pl = &stg.players[seat];
    if !calc_waits(&pl.hand).contains(&tile.kind()) {
        return Err(Error::IllegalDeclare(format!("{} is not a winning tile", tile)));
    }
    if is_furiten(pl) {
        return Err(Error::IllegalDeclare("furiten".to_string()));
    }

    let mut flags = riichi_flags(pl);
    // 自分の最初のツモより前のロン
    flags.renhou = is_no_meld_turn1(stg, seat);
    match window {
        CallWindow::Discard => flags.houteiraoyui = stg.draw_pile.is_empty(),
        CallWindow::Kakan => flags.chankan = true,
    }

    let mut hand = pl.hand.clone();
    hand.insert(tile);
    evaluate(&hand, tile, &situation(stg, seat, false, flags))
}

// 流し満貫: 捨て牌がすべて么九牌で, 他家に鳴かれていない
pub fn is_nagashimangan(pl: &Player) -> bool {
    !pl.discards.is_empty()
        && pl
            .discards
            .iter()
            .all(|d| d.tile.kind().is_end() && !d.claimed)
}

// 九種九牌の対象となる么九牌の種類数
pub fn count_terminal_kinds(hand: &Hand) -> usize {
    let tt = hand.table();
    let mut c = 0;
    for ti in 0..TZ {
        for ni in [1, 9] {
            if tt[ti][ni] != 0 {
                c += 1;
            }
        }
    }
    for ni in WE..=DR {
        if tt[TZ][ni] != 0 {
            c += 1;
        }
    }
    c
}

#[cfg(test)]
use super::string::tile_ids_from_string;

#[test]
fn test_furiten() {
    let mut pl = Player::new(1, tile_ids_from_string("m123456789p11s45").unwrap());
    assert_eq!(calc_waits(&pl.hand), vec![Tile(TS, 3), Tile(TS, 6)]);
    assert!(!is_furiten(&pl));

    // 待ちの片方でも捨てていればフリテン
    pl.discards.push(Discard {
        tile: tile_ids_from_string("s6").unwrap()[0],
        is_drawn: false,
        is_riichi: false,
        claimed: true,
    });
    assert!(is_furiten(&pl));

    pl.discards.clear();
    pl.is_furiten_other = true;
    assert!(is_furiten(&pl));
}

#[test]
fn test_nagashimangan() {
    let mut pl = Player::new(0, vec![]);
    assert!(!is_nagashimangan(&pl));

    for s in ["z1", "m9", "p1"] {
        pl.discards.push(Discard {
            tile: tile_ids_from_string(s).unwrap()[0],
            is_drawn: true,
            is_riichi: false,
            claimed: false,
        });
    }
    assert!(is_nagashimangan(&pl));

    // 鳴かれた牌があれば不成立
    pl.discards[1].claimed = true;
    assert!(!is_nagashimangan(&pl));
    pl.discards[1].claimed = false;

    pl.discards.push(Discard {
        tile: tile_ids_from_string("s2").unwrap()[0],
        is_drawn: false,
        is_riichi: false,
        claimed: false,
    });
    assert!(!is_nagashimangan(&pl));
}

#[test]
fn test_count_terminal_kinds() {
    let h = Hand::new(tile_ids_from_string("m19p19s1z1234555m5").unwrap());
    assert_eq!(count_terminal_kinds(&h), 10);
    let h = Hand::new(tile_ids_from_string("m23456p234s2345z11").unwrap());
    assert_eq!(count_terminal_kinds(&h), 1);
}
