use crate::error::{Error, Res};
use crate::model::*;

use super::parse::*;
use super::yaku::*;

// 和了時の状況 (手牌の組み合わせ以外の情報)
#[derive(Debug, Clone, Default)]
pub struct Situation {
    pub seat: Seat,                  // 和了者
    pub prevalent_wind: Tnum,        // 場風 (東: 1, 南: 2, 西: 3, 北: 4)
    pub seat_wind: Tnum,             // 自風 (同上)
    pub is_drawn: bool,              // ツモ和了
    pub yaku_flags: YakuFlags,       // 特殊条件役
    pub doras: Vec<TileId>,          // ドラ表示牌 (注:ドラそのものではない)
    pub ura_doras: Vec<TileId>,      // 裏ドラ表示牌 リーチしていない場合は空
    pub rule: Rule,
}

// 和了形である場合、最も高い役の組み合わせとなる分解形のWinContextを返却
// handは和了牌を含む (門前 14-3n 枚)
// 和了形でない場合はIllegalDeclare, 和了形でも無役の場合はNoYakuを返却
pub fn evaluate(hand: &Hand, winning_tile: TileId, sit: &Situation) -> Res<WinContext> {
    if hand.size() != 14 {
        return Err(Error::IllegalDeclare(format!(
            "hand size must be 14: {}",
            hand.size()
        )));
    }
    if !hand.contains(winning_tile) {
        return Err(Error::IllegalDeclare(format!(
            "winning tile {} is not in hand",
            winning_tile
        )));
    }

    let tt = hand.table();
    let wt = winning_tile.kind();
    let pm = parse_melds(&hand.melds);

    let mut phs = vec![];
    for mut ph in parse_into_normal_win(&tt) {
        ph.extend(pm.iter().copied());
        phs.push(ph);
    }
    phs.extend(parse_into_chiitoitsu_win(&tt));
    phs.extend(parse_into_kokushimusou_win(&tt));

    if phs.is_empty() {
        return Err(Error::IllegalDeclare(format!("not a winning hand: {}", hand)));
    }

    // (役一覧, 役満倍率, 翻数, 符) 役満, 翻, 符, 役の数の順に比較
    let mut best: Option<(Vec<(Yaku, usize)>, usize, usize, usize)> = None;
    for ph in phs {
        let ctx = YakuContext::new(
            tt,
            ph,
            wt,
            sit.prevalent_wind,
            sit.seat_wind,
            sit.is_drawn,
            sit.yaku_flags,
            sit.rule.kuitan,
        );
        let (yakus, yakuman, fan) = ctx.calc_yaku();
        let fu = ctx.calc_fu();
        let key = (yakuman, fan, fu, yakus.len());
        let replace = match &best {
            Some((y, m, f, u)) => key > (*m, *f, *u, y.len()),
            None => true,
        };
        if replace {
            best = Some((yakus, yakuman, fan, fu));
        }
    }

    let (yakus, yakuman, fan, fu) =
        best.ok_or_else(|| Error::IllegalDeclare(format!("not a winning hand: {}", hand)))?;
    if yakus.is_empty() {
        return Err(Error::NoYaku);
    }

    let n_dora = count_dora(hand, &sit.doras);
    let n_red5 = if sit.rule.red5 { hand.n_red5() } else { 0 };
    let n_ura_dora = if sit.rule.ura_dora && (sit.yaku_flags.riichi || sit.yaku_flags.dabururiichi) {
        count_dora(hand, &sit.ura_doras)
    } else {
        0
    };
    let fan = if yakuman == 0 {
        fan + n_dora + n_red5 + n_ura_dora
    } else {
        0
    };

    Ok(WinContext {
        seat: sit.seat,
        winning_tile,
        is_drawn: sit.is_drawn,
        yakus,
        fu,
        fan,
        yakuman,
        n_dora,
        n_red5,
        n_ura_dora,
    })
}

// ドラ表示牌のリストを受け取ってドラ評価値のテーブルを返却
fn create_dora_table(doras: &[TileId]) -> TileTable {
    let mut dt = TileTable::default();
    for d in doras {
        let t = d.kind().next();
        dt[t.0][t.1] += 1;
    }
    dt
}

// ドラ(赤5は含まない)の数を勘定
fn count_dora(hand: &Hand, doras: &[TileId]) -> usize {
    let dt = create_dora_table(doras);
    let mut n_dora = 0;
    for t in &hand.concealed {
        let k = t.kind();
        n_dora += dt[k.0][k.1];
    }
    for m in &hand.melds {
        for t in &m.tiles {
            let k = t.kind();
            n_dora += dt[k.0][k.1];
        }
    }
    n_dora
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{meld_from_string, tile_ids_from_string};

    fn hand(s: &str) -> Hand {
        Hand::new(tile_ids_from_string(s).unwrap())
    }

    fn find(h: &Hand, s: &str) -> TileId {
        let t = crate::control::tiles_from_string(s).unwrap()[0];
        h.find_kind(t, 1)[0]
    }

    fn tsumo() -> Situation {
        Situation {
            prevalent_wind: WE,
            seat_wind: WS,
            is_drawn: true,
            yaku_flags: YakuFlags {
                menzentsumo: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn ron() -> Situation {
        Situation {
            prevalent_wind: WE,
            seat_wind: WS,
            ..Default::default()
        }
    }

    #[test]
    fn test_pinfu_tsumo() {
        // 中張牌のみの順子4つ+雀頭, 両面待ちのツモ和了
        let h = hand("m234567p345678s22");
        let ctx = evaluate(&h, find(&h, "m7"), &tsumo()).unwrap();
        let yakus: Vec<Yaku> = ctx.yaku_set().into_iter().collect();
        assert_eq!(yakus, vec![Yaku::Pinfu, Yaku::Tanyaochuu, Yaku::MenzenTsumo]);
        assert_eq!(ctx.fu, 20);

        // 么九牌を含む順子があれば平和と門前自摸のみ
        let h = hand("m123567p345678s22");
        let ctx = evaluate(&h, find(&h, "m7"), &tsumo()).unwrap();
        let yakus: Vec<Yaku> = ctx.yaku_set().into_iter().collect();
        assert_eq!(yakus, vec![Yaku::Pinfu, Yaku::MenzenTsumo]);
        assert_eq!(ctx.fan, 2);
    }

    #[test]
    fn test_pinfu_excludes_penchan() {
        // 辺張待ち (m12に対するm3)
        let h = hand("m123567p345678s22");
        let ctx = evaluate(&h, find(&h, "m3"), &tsumo()).unwrap();
        assert!(!ctx.has(Yaku::Pinfu));
        assert!(ctx.has(Yaku::MenzenTsumo));
        assert_eq!(ctx.fu, 30); // 20 + 2(ツモ) + 2(辺張)
    }

    #[test]
    fn test_kokushimusou() {
        let h = hand("m19p19s19z12345677");
        let ctx = evaluate(&h, find(&h, "z1"), &ron()).unwrap();
        assert!(ctx.has(Yaku::Kokushimusou));
        assert_eq!(ctx.yakuman, 1);
        for y in [
            Yaku::Pinfu,
            Yaku::Iipeikou,
            Yaku::Ikkitsuukan,
            Yaku::Sanshokudoujun,
        ] {
            assert!(!ctx.has(y));
        }

        // 十三面待ち
        let ctx = evaluate(&h, find(&h, "z7"), &ron()).unwrap();
        assert!(ctx.has(Yaku::KokushimusouJuusanmenmachi));
        assert_eq!(ctx.yakuman, 2);
    }

    #[test]
    fn test_no_yaku() {
        // 門前ロンで役なし
        let h = hand("m123567p345789s22");
        assert_eq!(evaluate(&h, find(&h, "m3"), &ron()), Err(Error::NoYaku));

        // 和了形でない
        let h = hand("m123567p345789s23");
        assert!(matches!(
            evaluate(&h, find(&h, "m3"), &ron()),
            Err(Error::IllegalDeclare(_))
        ));
    }

    #[test]
    fn test_renhou() {
        // 無役の形でも人和は役満
        let h = hand("m123567p345789s22");
        let mut sit = ron();
        sit.yaku_flags.renhou = true;
        let ctx = evaluate(&h, find(&h, "m3"), &sit).unwrap();
        assert!(ctx.has(Yaku::Renhou));
        assert_eq!(ctx.yakuman, 1);
        assert_eq!(ctx.yaku_set().len(), 1);
    }

    #[test]
    fn test_exhaustive_decomposition() {
        // 三連刻は順子3つとしても解釈できる
        // 刻子: 三暗刻+門前自摸 (3翻40符) / 順子: 平和+一盃口+門前自摸 (3翻20符)
        let h = hand("m111222333p456s99");
        let ctx = evaluate(&h, find(&h, "p6"), &tsumo()).unwrap();
        assert!(ctx.has(Yaku::Sanankou));
        assert!(ctx.has(Yaku::MenzenTsumo));

        // 二盃口と七対子は二盃口を優先
        let h = hand("m223344p667788s55");
        let ctx = evaluate(&h, find(&h, "s5"), &tsumo()).unwrap();
        assert!(ctx.has(Yaku::Ryanpeikou));
        assert!(!ctx.has(Yaku::Chiitoitsu));
    }

    #[test]
    fn test_suuankou_ron() {
        // シャンポン待ちのロンは三暗刻+対々和
        let h = hand("m111p222s333z11177");
        let ctx = evaluate(&h, find(&h, "z1"), &ron()).unwrap();
        assert!(ctx.has(Yaku::Sanankou));
        assert!(ctx.has(Yaku::Toitoihou));
        assert!(!ctx.has(Yaku::Suuankou));

        // 単騎待ちのロンは四暗刻単騎
        let ctx = evaluate(&h, find(&h, "z7"), &ron()).unwrap();
        assert!(ctx.has(Yaku::SuuankouTanki));
        assert_eq!(ctx.yakuman, 2);

        // ツモなら四暗刻
        let ctx = evaluate(&h, find(&h, "z1"), &tsumo()).unwrap();
        assert!(ctx.has(Yaku::Suuankou));
    }

    #[test]
    fn test_open_hand() {
        // 喰いタン
        let mut h = hand("m234567p55s678");
        h.melds
            .push(meld_from_string(MeldType::Chi, "s456", "s4", 3).unwrap());
        let ctx = evaluate(&h, find(&h, "m7"), &ron()).unwrap();
        assert_eq!(ctx.yakus, vec![(Yaku::Tanyaochuu, 1)]);
        assert_eq!(ctx.fu, 30);

        let mut sit = ron();
        sit.rule.kuitan = false;
        assert_eq!(evaluate(&h, find(&h, "m7"), &sit), Err(Error::NoYaku));
    }

    #[test]
    fn test_dora() {
        let h = hand("m234067p345678s22");
        let mut sit = tsumo();
        sit.doras = tile_ids_from_string("s1").unwrap(); // ドラ: s2
        let ctx = evaluate(&h, find(&h, "m7"), &sit).unwrap();
        assert_eq!(ctx.n_dora, 2);
        assert_eq!(ctx.n_red5, 1);
        assert_eq!(ctx.n_ura_dora, 0);
        assert_eq!(ctx.fan, 3 + 2 + 1);

        // 裏ドラはリーチ時のみ
        sit.ura_doras = tile_ids_from_string("m1").unwrap(); // 裏ドラ: m2
        let ctx = evaluate(&h, find(&h, "m7"), &sit).unwrap();
        assert_eq!(ctx.n_ura_dora, 0);
        sit.yaku_flags.riichi = true;
        let ctx = evaluate(&h, find(&h, "m7"), &sit).unwrap();
        assert_eq!(ctx.n_ura_dora, 1);
        assert!(ctx.has(Yaku::Riichi));
    }

    #[test]
    fn test_yakuhai_and_honitsu() {
        let h = hand("m123456789z11555");
        let mut sit = ron();
        sit.seat_wind = WE;
        let ctx = evaluate(&h, find(&h, "z5"), &sit).unwrap();
        assert!(ctx.has(Yaku::Haku));
        assert!(ctx.has(Yaku::Ikkitsuukan));
        assert!(ctx.has(Yaku::Honiisou));
        assert!(!ctx.has(Yaku::Bakaze));
    }
}
