use std::fmt;

use crate::model::*;

use super::parse::{ParsedHand, SetPair, SetPairType};
use super::win::is_kokushimusou_win;

use SetPairType::*;

// [YakuContext]
// 1つの分解形に対して役判定を行うための情報
#[derive(Debug)]
pub struct YakuContext {
    hand: TileTable,            // 門前の牌 (和了牌を含む14-3n枚) 国士, 九蓮宝燈の判定などに使用
    parsed_hand: ParsedHand,    // 鳴きを含むすべての面子
    pair_tile: Option<Tile>,    // 雀頭の牌 (国士無双はNone)
    winning_tile: Tile,         // 上がり牌
    is_self_drawn: bool,        // ツモ和了
    is_open: bool,              // 鳴きの有無
    prevalent_wind: Tnum,       // 場風 (東: 1, 南: 2, 西: 3, 北: 4)
    seat_wind: Tnum,            // 自風 (同上)
    yaku_flags: YakuFlags,      // 組み合わせ以外による役 外部から設定を行う
    kuitan: bool,               // 喰いタンあり
    counts: Counts,             // 面子や牌種別のカウント
    iipeikou_count: usize,      // 一盃口, 二盃口用
    yakuhai_check: TileRow,     // 役牌面子のカウント(雀頭は含まない)
    ron_koutsu: Option<Tile>,   // ロン牌で完成した刻子 (明刻扱い)
}

impl YakuContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        hand: TileTable,
        parsed_hand: ParsedHand,
        winning_tile: Tile,
        prevalent_wind: Tnum,
        seat_wind: Tnum,
        is_self_drawn: bool,
        yaku_flags: YakuFlags,
        kuitan: bool,
    ) -> Self {
        let pair_tile = get_pair(&parsed_hand);
        let mut counts = count_type(&parsed_hand);
        let iipeikou_count = count_iipeikou(&parsed_hand);
        let yakuhai_check = check_yakuhai(&parsed_hand);
        let is_open = counts.chi + counts.pon + counts.minkan != 0;

        // ロン牌が順子や雀頭に含まれない場合, その刻子は明刻として扱う
        let mut ron_koutsu = None;
        if !is_self_drawn {
            let in_shuntsu = parsed_hand.iter().any(|&SetPair(tp, t)| {
                tp == Shuntsu
                    && t.0 == winning_tile.0
                    && t.1 <= winning_tile.1
                    && winning_tile.1 <= t.1 + 2
            });
            let in_koutsu = parsed_hand
                .iter()
                .any(|&SetPair(tp, t)| tp == Koutsu && t == winning_tile);
            if in_koutsu && !in_shuntsu && pair_tile != Some(winning_tile) {
                ron_koutsu = Some(winning_tile);
                counts.ankou_total -= 1;
            }
        }

        Self {
            hand,
            parsed_hand,
            pair_tile,
            winning_tile,
            is_self_drawn,
            is_open,
            prevalent_wind,
            seat_wind,
            yaku_flags,
            kuitan,
            counts,
            iipeikou_count,
            yakuhai_check,
            ron_koutsu,
        }
    }

    // (役一覧, 役満倍率, 翻数)を返却
    // 役満が含まれている場合は役満の役のみを返却 (翻数は0)
    pub fn calc_yaku(&self) -> (Vec<(Yaku, usize)>, usize, usize) {
        let mut yaku = vec![];
        for y in YAKU_LIST {
            if self.is_open && y.fan_open == 0 {
                continue;
            }
            if (y.func)(self) {
                yaku.push(y);
            }
        }

        let yakuman: Vec<&YakuDefine> = yaku.iter().copied().filter(|y| y.is_yakuman()).collect();
        if !yakuman.is_empty() {
            let v: Vec<(Yaku, usize)> = yakuman
                .iter()
                .map(|y| (y.yaku, y.fan_close - 12))
                .collect();
            let m = v.iter().map(|&(_, m)| m).sum();
            (v, m, 0)
        } else {
            let v: Vec<(Yaku, usize)> = yaku
                .iter()
                .map(|y| (y.yaku, if self.is_open { y.fan_open } else { y.fan_close }))
                .collect();
            let fan = v.iter().map(|&(_, f)| f).sum();
            (v, 0, fan)
        }
    }

    pub fn calc_fu(&self) -> usize {
        if is_chiitoitsu(self) {
            return 25;
        }
        if is_pinfu(self) {
            return if self.is_self_drawn { 20 } else { 30 };
        }

        // 副底
        let mut fu = 20;

        // 和了り方
        fu += if self.is_self_drawn {
            2 // ツモ
        } else if !self.is_open {
            10 // 門前ロン
        } else {
            0
        };

        // 面子, 雀頭
        for &SetPair(tp, t) in &self.parsed_hand {
            match tp {
                Pair => {
                    fu += if t.is_doragon() || t.1 == self.prevalent_wind && t.is_wind() {
                        2
                    } else {
                        0
                    };
                    if t.is_wind() && t.1 == self.seat_wind {
                        fu += 2;
                    }
                }
                Koutsu if self.ron_koutsu == Some(t) => fu += if t.is_end() { 4 } else { 2 },
                Koutsu => fu += if t.is_end() { 8 } else { 4 },
                Pon => fu += if t.is_end() { 4 } else { 2 },
                Minkan => fu += if t.is_end() { 16 } else { 8 },
                Ankan => fu += if t.is_end() { 32 } else { 16 },
                _ => {}
            }
        }

        // 待ちの形 (嵌張, 辺張, 単騎)
        if self.is_fu2_wait() {
            fu += 2;
        }

        // 喰い平和形
        if self.is_open && fu == 20 {
            return 30;
        }

        (fu + 9) / 10 * 10 // １の位は切り上げ
    }

    // 和了牌を嵌張, 辺張, 単騎のいずれかとして解釈できる場合true
    fn is_fu2_wait(&self) -> bool {
        let wt = &self.winning_tile;
        for &SetPair(tp, t) in &self.parsed_hand {
            match tp {
                Pair if t == *wt => return true,
                Shuntsu if t.0 == wt.0 => {
                    if t.1 + 1 == wt.1 {
                        return true; // 嵌張
                    }
                    if (t.1 == 1 && wt.1 == 3) || (t.1 == 7 && wt.1 == 7) {
                        return true; // 辺張
                    }
                }
                _ => {}
            }
        }
        false
    }
}

#[derive(Debug, Default)]
struct Counts {
    pair: usize,
    shuntsu: usize,
    koutsu: usize,
    chi: usize,
    pon: usize,
    minkan: usize,
    ankan: usize,
    shuntsu_total: usize, // shuntu + chi
    koutsu_total: usize,  // koutsu + pon + minkan + ankan
    ankou_total: usize,   // koutsu + ankan
    kantsu_total: usize,  // minkan + ankan
    tis: [usize; TYPE],   // tile Type Indices counts
}

// 特殊形&特殊条件の役
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct YakuFlags {
    pub menzentsumo: bool,
    pub riichi: bool,
    pub dabururiichi: bool,
    pub ippatsu: bool,
    pub haiteiraoyue: bool,
    pub houteiraoyui: bool,
    pub rinshankaihou: bool,
    pub chankan: bool,
    pub tenhou: bool,
    pub tiihou: bool,
    pub renhou: bool,
}

fn get_pair(ph: &ParsedHand) -> Option<Tile> {
    ph.iter()
        .find(|SetPair(tp, _)| *tp == Pair)
        .map(|&SetPair(_, t)| t)
}

fn count_type(ph: &ParsedHand) -> Counts {
    let mut cnt = Counts::default();
    for SetPair(tp, t) in ph {
        match tp {
            Pair => cnt.pair += 1,
            Shuntsu => cnt.shuntsu += 1,
            Koutsu => cnt.koutsu += 1,
            Chi => cnt.chi += 1,
            Pon => cnt.pon += 1,
            Minkan => cnt.minkan += 1,
            Ankan => cnt.ankan += 1,
        }
        cnt.tis[t.0] += 1;
    }
    cnt.shuntsu_total = cnt.shuntsu + cnt.chi;
    cnt.koutsu_total = cnt.koutsu + cnt.pon + cnt.minkan + cnt.ankan;
    cnt.ankou_total = cnt.koutsu + cnt.ankan;
    cnt.kantsu_total = cnt.minkan + cnt.ankan;

    cnt
}

fn count_iipeikou(ph: &ParsedHand) -> usize {
    let mut n = 0;
    let mut shuntsu = TileTable::default();
    for &SetPair(tp, t) in ph {
        if tp == Shuntsu {
            shuntsu[t.0][t.1] += 1;
            if shuntsu[t.0][t.1] % 2 == 0 {
                n += 1;
            }
        }
    }

    n
}

fn check_yakuhai(ph: &ParsedHand) -> TileRow {
    let mut tr = TileRow::default();
    for &SetPair(tp, t) in ph {
        match tp {
            Koutsu | Pon | Minkan | Ankan => {
                if t.is_honor() {
                    tr[t.1] += 1;
                }
            }
            _ => {}
        }
    }

    tr
}

// 面子の種別ごとの順子の先頭の数字 (萬子, 筒子, 索子)
fn shuntsu_flags(ph: &ParsedHand) -> [[bool; TNUM]; 3] {
    let mut f = [[false; TNUM]; 3];
    for &SetPair(tp, t) in ph {
        if matches!(tp, Shuntsu | Chi) {
            f[t.0][t.1] = true;
        }
    }
    f
}

pub struct YakuDefine {
    pub yaku: Yaku,
    pub func: fn(&YakuContext) -> bool,
    pub fan_close: usize, // 鳴きなしの翻 (13以上は役満, 13: 役満, 14: 二倍役満)
    pub fan_open: usize,  // 鳴きありの翻(食い下がり) 0は門前限定
}

impl YakuDefine {
    #[inline]
    pub fn is_yakuman(&self) -> bool {
        self.fan_close >= 13
    }
}

impl fmt::Debug for YakuDefine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.yaku, self.fan_close, self.fan_open)
    }
}

macro_rules! yaku {
    ($y: expr, $f: expr, $c: expr, $o: expr) => {
        YakuDefine {
            yaku: $y,
            func: $f,
            fan_close: $c,
            fan_open: $o,
        }
    };
}

pub static YAKU_LIST: &[YakuDefine] = &[
    yaku!(Yaku::Bakaze, is_bakaze, 1, 1),
    yaku!(Yaku::Jikaze, is_jikaze, 1, 1),
    yaku!(Yaku::Haku, is_haku, 1, 1),
    yaku!(Yaku::Hatsu, is_hatsu, 1, 1),
    yaku!(Yaku::Chun, is_chun, 1, 1),
    yaku!(Yaku::Tanyaochuu, is_tanyaochuu, 1, 1),
    yaku!(Yaku::Pinfu, is_pinfu, 1, 0),
    yaku!(Yaku::Iipeikou, is_iipeikou, 1, 0),
    yaku!(Yaku::Ryanpeikou, is_ryanpeikou, 3, 0),
    yaku!(Yaku::Ikkitsuukan, is_ikkitsuukan, 2, 1),
    yaku!(Yaku::Sanshokudoujun, is_sanshokudoujun, 2, 1),
    yaku!(Yaku::Sanshokudoukou, is_sanshokudoukou, 2, 2),
    yaku!(Yaku::Chanta, is_chanta, 2, 1),
    yaku!(Yaku::Junchan, is_junchan, 3, 2),
    yaku!(Yaku::Honroutou, is_honroutou, 2, 2),
    yaku!(Yaku::Chinroutou, is_chinroutou, 13, 13),
    yaku!(Yaku::Toitoihou, is_toitoihou, 2, 2),
    yaku!(Yaku::Sanankou, is_sanankou, 2, 2),
    yaku!(Yaku::Suuankou, is_suuankou, 13, 0),
    yaku!(Yaku::SuuankouTanki, is_suuankoutanki, 14, 0),
    yaku!(Yaku::Sankantsu, is_sankantsu, 2, 2),
    yaku!(Yaku::Suukantsu, is_suukantsu, 13, 13),
    yaku!(Yaku::Honiisou, is_honiisou, 3, 2),
    yaku!(Yaku::Chiniisou, is_chiniisou, 6, 5),
    yaku!(Yaku::Shousangen, is_shousangen, 2, 2),
    yaku!(Yaku::Daisangen, is_daisangen, 13, 13),
    yaku!(Yaku::Shousuushii, is_shousuushii, 13, 13),
    yaku!(Yaku::Daisuushii, is_daisuushii, 14, 14),
    yaku!(Yaku::Ryuuiisou, is_ryuuiisou, 13, 13),
    yaku!(Yaku::Tsuuiisou, is_tuuiisou, 13, 13),
    yaku!(Yaku::Chuurenpoutou, is_chuurenpoutou, 13, 0),
    yaku!(Yaku::JunseiChuurenpoutou, is_junseichuurenpoutou, 14, 0),
    // 特殊な組み合わせ
    yaku!(Yaku::Kokushimusou, is_kokushimusou, 13, 0),
    yaku!(
        Yaku::KokushimusouJuusanmenmachi,
        is_kokushimusoujuusanmenmachi,
        14,
        0
    ),
    yaku!(Yaku::Chiitoitsu, is_chiitoitsu, 2, 0),
    // 特殊条件
    yaku!(Yaku::MenzenTsumo, is_menzentsumo, 1, 0),
    yaku!(Yaku::Riichi, is_riichi, 1, 0),
    yaku!(Yaku::DaburuRiichi, is_dabururiichi, 2, 0),
    yaku!(Yaku::Ippatsu, is_ippatsu, 1, 0),
    yaku!(Yaku::Haiteiraoyue, is_haiteiraoyue, 1, 1),
    yaku!(Yaku::Houteiraoyui, is_houteiraoyui, 1, 1),
    yaku!(Yaku::Rinshankaihou, is_rinshankaihou, 1, 1),
    yaku!(Yaku::Chankan, is_chankan, 1, 1),
    yaku!(Yaku::Tenhou, is_tenhou, 13, 0),
    yaku!(Yaku::Tiihou, is_tiihou, 13, 0),
    yaku!(Yaku::Renhou, is_renhou, 13, 0),
];

// 役の優先順位 =================================================================
// * 役満が存在する場合は役満以外の役は削除
// * 以下の役は排他的(包含関係)であり右側を優先
//     一盃口, 二盃口
//     チャンタ, 純チャンタ
//     混老頭, 清老頭
//     混一色, 清一色
//     三暗刻, 四暗刻, 四暗刻単騎
//     三槓子, 四槓子
//     小四喜, 大四喜
//     九蓮宝燈, 純正九蓮宝燈
//     国士無双, 国士無双十三面待ち

// 場風
fn is_bakaze(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[ctx.prevalent_wind] == 1
}

// 自風
fn is_jikaze(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[ctx.seat_wind] == 1
}

// 白
fn is_haku(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DW] == 1
}

// 發
fn is_hatsu(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DG] == 1
}

// 中
fn is_chun(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DR] == 1
}

// 断么九
fn is_tanyaochuu(ctx: &YakuContext) -> bool {
    if ctx.parsed_hand.is_empty() {
        return false; // 国士対策
    }
    if ctx.is_open && !ctx.kuitan {
        return false;
    }

    for &SetPair(tp, t) in &ctx.parsed_hand {
        match tp {
            Chi | Shuntsu => {
                if t.1 == 1 || t.1 == 7 {
                    return false;
                }
            }
            _ => {
                if t.is_end() {
                    return false;
                }
            }
        }
    }

    true
}

// 平和
fn is_pinfu(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu != 4 {
        return false;
    }

    if let Some(pt) = ctx.pair_tile {
        if pt.is_doragon() || (pt.is_wind() && (pt.1 == ctx.prevalent_wind || pt.1 == ctx.seat_wind))
        {
            return false;
        }
    }

    // 上がり牌の両面待ち判定 (辺張は除く)
    let wt = &ctx.winning_tile;
    if wt.is_honor() {
        return false;
    }
    for &SetPair(tp, t) in &ctx.parsed_hand {
        if tp == Shuntsu && t.0 == wt.0 {
            if t.1 == wt.1 && t.1 != 7 {
                return true;
            }
            if t.1 + 2 == wt.1 && t.1 != 1 {
                return true;
            }
        }
    }

    false
}

// 一盃口
fn is_iipeikou(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 1
}

// 二盃口
fn is_ryanpeikou(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 2
}

// 一気通貫
fn is_ikkitsuukan(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total < 3 {
        return false;
    }

    let f = shuntsu_flags(&ctx.parsed_hand);
    f.iter().any(|s| s[1] && s[4] && s[7])
}

// 三色同順
fn is_sanshokudoujun(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total < 3 {
        return false;
    }

    let f = shuntsu_flags(&ctx.parsed_hand);
    (1..8).any(|ni| f[TM][ni] && f[TP][ni] && f[TS][ni])
}

// 三色同刻
fn is_sanshokudoukou(ctx: &YakuContext) -> bool {
    if ctx.counts.koutsu_total < 3 {
        return false;
    }

    let mut f = [[false; TNUM]; 3];
    for &SetPair(tp, t) in &ctx.parsed_hand {
        if matches!(tp, Koutsu | Pon | Minkan | Ankan) && t.is_suit() {
            f[t.0][t.1] = true;
        }
    }
    (1..TNUM).any(|ni| f[TM][ni] && f[TP][ni] && f[TS][ni])
}

// チャンタ
fn is_chanta(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total == 0 {
        return false;
    }

    let mut has_honor = false;
    for &SetPair(tp, t) in &ctx.parsed_hand {
        match tp {
            Pair | Koutsu | Pon | Minkan | Ankan => {
                if t.is_honor() {
                    has_honor = true;
                } else if !t.is_terminal() {
                    return false;
                }
            }
            Shuntsu | Chi => {
                if t.1 != 1 && t.1 != 7 {
                    return false;
                }
            }
        }
    }

    has_honor
}

// 純チャン
fn is_junchan(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total == 0 {
        return false;
    }

    for &SetPair(tp, t) in &ctx.parsed_hand {
        match tp {
            Pair | Koutsu | Pon | Minkan | Ankan => {
                if !t.is_terminal() {
                    return false;
                }
            }
            Shuntsu | Chi => {
                if t.1 != 1 && t.1 != 7 {
                    return false;
                }
            }
        }
    }

    true
}

// 混老頭
fn is_honroutou(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total != 0 {
        return false;
    }

    let mut has_honor = false;
    let mut has_terminal = false;
    for SetPair(_, t) in &ctx.parsed_hand {
        if t.is_honor() {
            has_honor = true;
        } else if t.is_terminal() {
            has_terminal = true;
        } else {
            return false;
        }
    }

    has_honor && has_terminal
}

// 清老頭
fn is_chinroutou(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total != 0 {
        return false;
    }

    let mut has_terminal = false;
    for SetPair(_, t) in &ctx.parsed_hand {
        if t.is_terminal() {
            has_terminal = true;
        } else {
            return false;
        }
    }

    has_terminal
}

// 対々和
fn is_toitoihou(ctx: &YakuContext) -> bool {
    ctx.counts.koutsu_total == 4
}

// 三暗刻
fn is_sanankou(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total == 3
}

// 四暗刻 (ロンで完成した刻子は暗刻に数えない)
fn is_suuankou(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total == 4 && ctx.pair_tile != Some(ctx.winning_tile)
}

// 四暗刻単騎
fn is_suuankoutanki(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total == 4 && ctx.pair_tile == Some(ctx.winning_tile)
}

// 三槓子
fn is_sankantsu(ctx: &YakuContext) -> bool {
    ctx.counts.kantsu_total == 3
}

// 四槓子
fn is_suukantsu(ctx: &YakuContext) -> bool {
    ctx.counts.kantsu_total == 4
}

// 混一色
fn is_honiisou(ctx: &YakuContext) -> bool {
    use std::cmp::min;
    let tis = &ctx.counts.tis;
    let suit = min(tis[TM], 1) + min(tis[TP], 1) + min(tis[TS], 1);
    suit == 1 && tis[TZ] > 0
}

// 清一色
fn is_chiniisou(ctx: &YakuContext) -> bool {
    use std::cmp::min;
    let tis = &ctx.counts.tis;
    let suit = min(tis[TM], 1) + min(tis[TP], 1) + min(tis[TS], 1);
    suit == 1 && tis[TZ] == 0
}

// 小三元
fn is_shousangen(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[DW] + yc[DG] + yc[DR] == 2 && ctx.pair_tile.map_or(false, |t| t.is_doragon())
}

// 大三元
fn is_daisangen(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[DW] + yc[DG] + yc[DR] == 3
}

// 小四喜
fn is_shousuushii(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[WE] + yc[WS] + yc[WW] + yc[WN] == 3 && ctx.pair_tile.map_or(false, |t| t.is_wind())
}

// 大四喜
fn is_daisuushii(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[WE] + yc[WS] + yc[WW] + yc[WN] == 4
}

// 緑一色
fn is_ryuuiisou(ctx: &YakuContext) -> bool {
    let tis = &ctx.counts.tis;
    if ctx.parsed_hand.is_empty() || tis[TS] + tis[TZ] != ctx.parsed_hand.len() {
        return false;
    }

    for &SetPair(tp, t) in &ctx.parsed_hand {
        match tp {
            Pair | Koutsu | Pon | Minkan | Ankan => {
                if t.is_honor() {
                    if t.1 != DG {
                        return false;
                    }
                } else {
                    match t.1 {
                        2 | 3 | 4 | 6 | 8 => {}
                        _ => return false,
                    }
                }
            }
            Shuntsu | Chi => {
                if t.1 != 2 {
                    // 順子は234以外は不可
                    return false;
                }
            }
        }
    }

    true
}

// 字一色
fn is_tuuiisou(ctx: &YakuContext) -> bool {
    !ctx.parsed_hand.is_empty() && ctx.counts.tis[TZ] == ctx.parsed_hand.len()
}

// 九蓮宝燈
fn is_chuurenpoutou(ctx: &YakuContext) -> bool {
    let wt = &ctx.winning_tile;
    let cnt = ctx.hand[wt.0][wt.1];
    is_chuurenpoutou2(ctx) && (cnt == 1 || cnt == 3)
}

// 純正九蓮宝燈
fn is_junseichuurenpoutou(ctx: &YakuContext) -> bool {
    let wt = &ctx.winning_tile;
    let cnt = ctx.hand[wt.0][wt.1];
    is_chuurenpoutou2(ctx) && (cnt == 2 || cnt == 4)
}

// 国士無双
fn is_kokushimusou(ctx: &YakuContext) -> bool {
    if !ctx.parsed_hand.is_empty() {
        return false;
    }
    let wt = &ctx.winning_tile;
    is_kokushimusou_win(&ctx.hand) && ctx.hand[wt.0][wt.1] != 2
}

// 国士無双十三面待ち
fn is_kokushimusoujuusanmenmachi(ctx: &YakuContext) -> bool {
    if !ctx.parsed_hand.is_empty() {
        return false;
    }
    let wt = &ctx.winning_tile;
    is_kokushimusou_win(&ctx.hand) && ctx.hand[wt.0][wt.1] == 2
}

// 七対子
fn is_chiitoitsu(ctx: &YakuContext) -> bool {
    ctx.parsed_hand.len() == 7
}

// 門前自摸
fn is_menzentsumo(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.menzentsumo
}

// リーチ
fn is_riichi(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.riichi && !ctx.yaku_flags.dabururiichi
}

// ダブルリーチ
fn is_dabururiichi(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.dabururiichi
}

// 一発
fn is_ippatsu(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.ippatsu
}

// 海底撈月
fn is_haiteiraoyue(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.haiteiraoyue
}

// 河底撈魚
fn is_houteiraoyui(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.houteiraoyui
}

// 嶺上開花
fn is_rinshankaihou(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.rinshankaihou
}

// 槍槓
fn is_chankan(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.chankan
}

// 天和
fn is_tenhou(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.tenhou
}

// 地和
fn is_tiihou(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.tiihou
}

// 人和 (役満として扱う)
fn is_renhou(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.renhou
}

// 共通処理 ====================================================================

// 九蓮宝燈(純正を含む)
fn is_chuurenpoutou2(ctx: &YakuContext) -> bool {
    if ctx.is_open || ctx.counts.kantsu_total != 0 || ctx.parsed_hand.len() != 5 {
        return false;
    }

    let tis = &ctx.counts.tis;
    let ti = if tis[TM] == 5 {
        TM
    } else if tis[TP] == 5 {
        TP
    } else if tis[TS] == 5 {
        TS
    } else {
        return false;
    };

    let h = &ctx.hand;
    if h[ti][1] < 3 || h[ti][9] < 3 {
        return false;
    }
    for ni in 2..9 {
        if h[ti][ni] == 0 {
            return false;
        }
    }

    true
}
