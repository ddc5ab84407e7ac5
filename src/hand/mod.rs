// 手牌の和了形や役の判定を行うモジュール
mod evaluate;
mod parse;
mod win;
mod yaku;

pub use self::{
    evaluate::{evaluate, Situation},
    parse::{
        parse_into_chiitoitsu_win, parse_into_kokushimusou_win, parse_into_normal_win,
        parse_melds, ParsedHand, SetPair, SetPairType,
    },
    win::{
        calc_discards_to_tenpai, calc_possible_pairs, calc_tiles_to_win, is_chiitoitsu_win,
        is_kokushimusou_win, is_normal_win, is_win,
    },
    yaku::{YakuDefine, YakuFlags, YAKU_LIST},
};
