use std::collections::BTreeSet;

use super::*;

// [Yaku]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Yaku {
    // 役牌
    Bakaze, // 場風
    Jikaze, // 自風
    Haku,   // 白
    Hatsu,  // 發
    Chun,   // 中
    // 順子系
    Pinfu,           // 平和
    Iipeikou,        // 一盃口
    Ryanpeikou,      // 二盃口
    Ikkitsuukan,     // 一気通貫
    Sanshokudoujun,  // 三色同順
    // 刻子系
    Toitoihou,       // 対々和
    Sanankou,        // 三暗刻
    Sanshokudoukou,  // 三色同刻
    Sankantsu,       // 三槓子
    // 么九牌系
    Tanyaochuu,      // 断么九
    Chanta,          // チャンタ
    Junchan,         // 純チャン
    Honroutou,       // 混老頭
    Shousangen,      // 小三元
    // 染め手
    Honiisou,        // 混一色
    Chiniisou,       // 清一色
    // 特殊形
    Chiitoitsu,      // 七対子
    // 条件役
    MenzenTsumo,     // 門前自摸
    Riichi,          // リーチ
    DaburuRiichi,    // ダブルリーチ
    Ippatsu,         // 一発
    Haiteiraoyue,    // 海底撈月
    Houteiraoyui,    // 河底撈魚
    Rinshankaihou,   // 嶺上開花
    Chankan,         // 槍槓
    // 役満
    Tenhou,                     // 天和
    Tiihou,                     // 地和
    Renhou,                     // 人和
    Kokushimusou,               // 国士無双
    KokushimusouJuusanmenmachi, // 国士無双十三面待ち
    Suuankou,                   // 四暗刻
    SuuankouTanki,              // 四暗刻単騎
    Daisangen,                  // 大三元
    Shousuushii,                // 小四喜
    Daisuushii,                 // 大四喜
    Tsuuiisou,                  // 字一色
    Chinroutou,                 // 清老頭
    Ryuuiisou,                  // 緑一色
    Chuurenpoutou,              // 九蓮宝燈
    JunseiChuurenpoutou,        // 純正九蓮宝燈
    Suukantsu,                  // 四槓子
}

impl fmt::Display for Yaku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// 和了情報 (点数への換算は行わない)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinContext {
    pub seat: Seat,              // 和了者
    pub winning_tile: TileId,    // 和了牌
    pub is_drawn: bool,          // ツモ和了
    pub yakus: Vec<(Yaku, usize)>, // 役一覧(ドラは含まない), Vec<(役, 翻)> 役満の場合は倍率
    pub fu: usize,               // 符数
    pub fan: usize,              // 飜数(ドラを含む), 役満の場合は0
    pub yakuman: usize,          // 役満倍率 (0: 通常役, 1: 役満, 2: 二倍役満, ...)
    pub n_dora: usize,           // ドラの数 (赤5, 裏ドラは含まない)
    pub n_red5: usize,           // 赤5の数
    pub n_ura_dora: usize,       // 裏ドラの数
}

impl WinContext {
    pub fn yaku_set(&self) -> BTreeSet<Yaku> {
        self.yakus.iter().map(|&(y, _)| y).collect()
    }

    #[inline]
    pub fn has(&self, yaku: Yaku) -> bool {
        self.yakus.iter().any(|&(y, _)| y == yaku)
    }
}
