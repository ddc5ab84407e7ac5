use super::common::*;
use crate::error::{Error, Res};
use crate::model::*;
use crate::util::misc::cartesian_product;

// 指定したプレイヤーが現在の状態で実行可能な操作の一覧 (読み取りのみ)
pub fn legal_actions(stg: &RoundState, seat: Seat) -> Vec<Action> {
    match &stg.phase {
        Phase::AwaitingDraw(s) if *s == seat => vec![Action::Draw],
        Phase::AwaitingDiscard(s) if *s == seat => calc_possible_turn_actions(stg, seat),
        Phase::AwaitingCalls {
            tile,
            discarder,
            window,
        } if *discarder != seat && stg.responses[seat].is_none() => {
            calc_possible_call_actions(stg, seat, *tile, *discarder, *window)
        }
        _ => vec![],
    }
}

// [Turn Action Check]
// プレイヤーのツモ番に可能な操作をチェックする

pub fn calc_possible_turn_actions(stg: &RoundState, seat: Seat) -> Vec<Action> {
    let pl = &stg.players[seat];
    let mut acts = vec![];
    if pl.is_riichi {
        // ツモ牌と同種の牌 (待ちは変わらない)
        if let Some(d) = pl.drawn {
            for &t in &pl.hand.concealed {
                if t.kind() == d.kind() {
                    acts.push(Action::Discard(t));
                }
            }
        }
    } else {
        for &t in &pl.hand.concealed {
            if !pl.restricted.contains(&t.kind()) {
                acts.push(Action::Discard(t));
            }
        }
    }

    // ツモ直後でなければ (チー, ポンの直後) 打牌のみ
    if pl.drawn.is_none() {
        return acts;
    }

    acts.append(&mut check_riichi(stg, seat));
    acts.append(&mut check_ankan(stg, seat));
    acts.append(&mut check_kakan(stg, seat));
    acts.append(&mut check_tsumo(stg, seat));
    acts.append(&mut check_kyushukyuhai(stg, seat));
    acts
}

// 槓が可能な状態か (槓の上限, 海底)
fn can_kan(stg: &RoundState) -> bool {
    !stg.draw_pile.is_empty() && stg.kan_count < stg.rule.kan_limit
}

// リーチ宣言牌として打牌可能な牌か
pub fn can_riichi(stg: &RoundState, seat: Seat, t: TileId) -> bool {
    let pl = &stg.players[seat];
    if pl.is_riichi || !pl.hand.is_menzen() || pl.drawn.is_none() {
        return false;
    }
    if stg.draw_pile.len() < TILE || !pl.hand.contains(t) {
        return false;
    }
    let mut h = pl.hand.clone();
    h.remove(t);
    is_tenpai(&h)
}

fn check_riichi(stg: &RoundState, seat: Seat) -> Vec<Action> {
    let pl = &stg.players[seat];
    pl.hand
        .concealed
        .iter()
        .filter(|&&t| can_riichi(stg, seat, t))
        .map(|&t| Action::Riichi(t))
        .collect()
}

fn check_tsumo(stg: &RoundState, seat: Seat) -> Vec<Action> {
    if evaluate_tsumo(stg, seat).is_ok() {
        vec![Action::DeclareWin]
    } else {
        vec![]
    }
}

fn check_ankan(stg: &RoundState, seat: Seat) -> Vec<Action> {
    if !can_kan(stg) {
        return vec![];
    }

    let pl = &stg.players[seat];
    let tt = pl.hand.table();
    let mut acts = vec![];
    if pl.is_riichi {
        // リーチ中でも待ちが変わらない暗槓は可能
        if let Some(d) = pl.drawn {
            let t = d.kind();
            if tt[t.0][t.1] == 4 {
                let mut h = pl.hand.clone();
                h.remove(d);
                let v1 = calc_waits(&h);

                for id in h.find_kind(t, 3) {
                    h.remove(id);
                }
                let v2 = calc_waits(&h);

                if v1 == v2 {
                    acts.push(Action::Ankan(t));
                }
            }
        }
    } else {
        for ti in 0..TYPE {
            for ni in 1..TNUM {
                if tt[ti][ni] == 4 {
                    acts.push(Action::Ankan(Tile(ti, ni)));
                }
            }
        }
    }

    acts
}

fn check_kakan(stg: &RoundState, seat: Seat) -> Vec<Action> {
    if !can_kan(stg) {
        return vec![];
    }

    let pl = &stg.players[seat];
    if pl.is_riichi {
        return vec![];
    }

    let mut acts = vec![];
    for m in &pl.hand.melds {
        if m.meld_type == MeldType::Pon {
            for id in pl.hand.find_kind(m.kind(), 1) {
                acts.push(Action::Kakan(id));
            }
        }
    }

    acts
}

fn check_kyushukyuhai(stg: &RoundState, seat: Seat) -> Vec<Action> {
    if !is_no_meld_turn1(stg, seat) || count_terminal_kinds(&stg.players[seat].hand) < 9 {
        return vec![];
    }
    vec![Action::Kyushukyuhai]
}

// [Call Action Check]
// 打牌(加槓)に対して打牌者以外のプレイヤーが可能な操作をチェックする
// 常にPassを含む

pub fn calc_possible_call_actions(
    stg: &RoundState,
    seat: Seat,
    tile: TileId,
    discarder: Seat,
    window: CallWindow,
) -> Vec<Action> {
    let mut acts = vec![Action::Pass];
    if seat == discarder {
        return acts;
    }

    if evaluate_ron(stg, seat, tile, window).is_ok() {
        acts.push(Action::DeclareWin);
    }

    // 加槓に対してはロン(槍槓)のみ 河底牌は鳴けない
    let pl = &stg.players[seat];
    if window == CallWindow::Kakan || stg.draw_pile.is_empty() || pl.is_riichi {
        return acts;
    }

    let mut claims = vec![];
    if seat == (discarder + 1) % SEAT {
        claims.append(&mut check_chi(&pl.hand, tile.kind()));
    }
    claims.append(&mut check_pon(&pl.hand, tile.kind()));
    claims.append(&mut check_minkan(&pl.hand, tile.kind()));
    claims.retain(|a| match a {
        Action::Claim(tp, consumed) => {
            check_claim(stg, seat, tile, discarder, window, *tp, consumed).is_ok()
        }
        _ => false,
    });
    acts.append(&mut claims);
    acts
}

// 鳴きの検証 (手牌の同種の牌はどのIDを指定してもよい)
// 優先順位の判定は行わない
pub fn check_claim(
    stg: &RoundState,
    seat: Seat,
    tile: TileId,
    discarder: Seat,
    window: CallWindow,
    tp: CallType,
    consumed: &[TileId],
) -> Res {
    let err = |msg: &str| Err(Error::IllegalClaim(format!("{:?}{:?}: {}", tp, consumed, msg)));

    let pl = &stg.players[seat];
    if seat == discarder || window == CallWindow::Kakan {
        return err("only ron is allowed");
    }
    if stg.draw_pile.is_empty() {
        return err("the last discard cannot be called");
    }
    if pl.is_riichi {
        return err("player is in riichi");
    }

    let n = if tp == CallType::Kan { 3 } else { 2 };
    if consumed.len() != n {
        return err("wrong number of tiles");
    }
    for (i, &t) in consumed.iter().enumerate() {
        if consumed[..i].contains(&t) || !pl.hand.contains(t) {
            return err("tiles are not in hand");
        }
    }

    let d = tile.kind();
    match tp {
        CallType::Chi => {
            if seat != (discarder + 1) % SEAT {
                return err("chi is allowed only from the left player");
            }
            if !is_run_with(d, consumed) {
                return err("not a run");
            }
        }
        CallType::Pon | CallType::Kan => {
            if consumed.iter().any(|t| t.kind() != d) {
                return err("kind mismatch");
            }
            if tp == CallType::Kan && stg.kan_count >= stg.rule.kan_limit {
                return err("kan limit reached");
            }
        }
    }

    // 食い替えの制限で打牌できる牌がなくなる鳴きは不可
    if tp != CallType::Kan {
        let restricted = calc_prohibited_discards(tp, d, consumed);
        let n_left = pl
            .hand
            .concealed
            .iter()
            .filter(|t| !consumed.contains(t) && !restricted.contains(&t.kind()))
            .count();
        if n_left == 0 {
            return err("no tile left to discard");
        }
    }

    Ok(())
}

// 鳴いた牌と手牌の2枚で順子になるか
fn is_run_with(d: Tile, consumed: &[TileId]) -> bool {
    if d.is_honor() || consumed.iter().any(|t| t.kind().0 != d.0) {
        return false;
    }
    let mut ns: Vec<Tnum> = consumed.iter().map(|t| t.kind().1).collect();
    ns.push(d.1);
    ns.sort();
    ns[1] == ns[0] + 1 && ns[2] == ns[1] + 1
}

// 同じ種類の牌の赤5とそれ以外の組み合わせ (最大2通り)
fn tile_variants(hand: &Hand, t: Tile) -> Vec<TileId> {
    let ids = hand.find_kind(t, TILE);
    let mut v: Vec<TileId> = ids.iter().copied().filter(|id| !id.is_red5()).take(1).collect();
    v.extend(ids.iter().copied().filter(|id| id.is_red5()));
    v
}

fn check_chi(hand: &Hand, d: Tile) -> Vec<Action> {
    if d.is_honor() {
        return vec![];
    }

    let i = d.1;
    // l2 l1 c0(discarded) r1 r2
    let mut check: Vec<(Tnum, Tnum)> = vec![];
    if 3 <= i {
        check.push((i - 2, i - 1));
    }
    if 2 <= i && i <= 8 {
        check.push((i - 1, i + 1));
    }
    if i <= 7 {
        check.push((i + 1, i + 2));
    }

    let mut acts = vec![];
    for (n0, n1) in check {
        let vv = [
            tile_variants(hand, Tile(d.0, n0)),
            tile_variants(hand, Tile(d.0, n1)),
        ];
        for pair in cartesian_product(&vv) {
            acts.push(Action::chi(vec![*pair[0], *pair[1]]));
        }
    }
    acts
}

fn check_pon(hand: &Hand, d: Tile) -> Vec<Action> {
    let ids = hand.find_kind(d, TILE);
    if ids.len() < 2 {
        return vec![];
    }

    let plain: Vec<TileId> = ids.iter().copied().filter(|id| !id.is_red5()).collect();
    let red: Vec<TileId> = ids.iter().copied().filter(|id| id.is_red5()).collect();
    let mut acts = vec![];
    if plain.len() >= 2 {
        acts.push(Action::pon(vec![plain[0], plain[1]]));
    }
    if let (Some(&p), Some(&r)) = (plain.first(), red.first()) {
        // 手牌の赤5を含むポン
        acts.push(Action::pon(vec![p, r]));
    }
    acts
}

fn check_minkan(hand: &Hand, d: Tile) -> Vec<Action> {
    let ids = hand.find_kind(d, TILE);
    if ids.len() != 3 {
        return vec![];
    }
    vec![Action::kan(ids)]
}

// 鳴き後の組み換え禁止の牌 (食い替え)
// consumedは手牌から消費した2枚
pub fn calc_prohibited_discards(call: CallType, d: Tile, consumed: &[TileId]) -> Vec<Tile> {
    let mut v = vec![d];
    if call == CallType::Chi {
        let (n0, n1) = (consumed[0].kind().1, consumed[1].kind().1);
        let s = n0.min(n1);
        let b = n0.max(n1);
        // 両面の反対側 (辺張, 嵌張は鳴いた牌のみ)
        if d.1 + 1 == s && b + 1 < TNUM {
            v.push(Tile(d.0, b + 1));
        }
        if b + 1 == d.1 && s > 1 {
            v.push(Tile(d.0, s - 1));
        }
    }
    v
}

#[cfg(test)]
use super::string::tile_ids_from_string;

#[test]
fn test_check_chi() {
    let h = Hand::new(tile_ids_from_string("m23450678p11").unwrap());
    // m5に対して m34, m46, m67
    let acts = check_chi(&h, Tile(TM, 5));
    assert_eq!(acts.len(), 3);

    // m3に対して m24, m45, m40 (m12はなし)
    let acts = check_chi(&h, Tile(TM, 3));
    assert_eq!(acts.len(), 3);

    assert!(check_chi(&h, Tile(TZ, 1)).is_empty());
}

#[test]
fn test_is_run_with() {
    let c = tile_ids_from_string("m46").unwrap();
    assert!(is_run_with(Tile(TM, 5), &c));
    assert!(!is_run_with(Tile(TP, 5), &c));
    assert!(!is_run_with(Tile(TM, 7), &c));
    let c = tile_ids_from_string("z12").unwrap();
    assert!(!is_run_with(Tile(TZ, 3), &c));
}

#[test]
fn test_check_pon_red5() {
    let h = Hand::new(tile_ids_from_string("p550z11").unwrap());
    assert_eq!(check_pon(&h, Tile(TP, 5)).len(), 2);
    assert_eq!(check_pon(&h, Tile(TZ, 1)).len(), 1);
    assert!(check_minkan(&h, Tile(TZ, 1)).is_empty());
    assert_eq!(check_minkan(&h, Tile(TP, 5)).len(), 1);
}

#[test]
fn test_prohibited_discards() {
    let c = tile_ids_from_string("m34").unwrap();
    // m2で両面チー: m2とm5は捨てられない
    assert_eq!(
        calc_prohibited_discards(CallType::Chi, Tile(TM, 2), &c),
        vec![Tile(TM, 2), Tile(TM, 5)]
    );
    // m5で両面チー: m5とm2
    assert_eq!(
        calc_prohibited_discards(CallType::Chi, Tile(TM, 5), &c),
        vec![Tile(TM, 5), Tile(TM, 2)]
    );
    // 嵌張は鳴いた牌のみ
    let c = tile_ids_from_string("m35").unwrap();
    assert_eq!(
        calc_prohibited_discards(CallType::Chi, Tile(TM, 4), &c),
        vec![Tile(TM, 4)]
    );
    let c = tile_ids_from_string("z11").unwrap();
    assert_eq!(
        calc_prohibited_discards(CallType::Pon, Tile(TZ, 1), &c),
        vec![Tile(TZ, 1)]
    );
}
