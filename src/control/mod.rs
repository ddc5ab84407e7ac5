// 牌山の生成, 配牌, 局の状態遷移を行うモジュール
pub mod common;
pub mod deal;
pub mod possible_actions;
pub mod string;
pub mod turn;
pub mod wall;

pub use self::{
    deal::{deal, deal_seeded, deal_with_rule, deal_with_wall},
    possible_actions::legal_actions,
    string::{
        meld_from_string, tile_ids_from_string, tile_ids_to_string, tiles_from_string,
        tiles_to_string, tiles_to_table,
    },
    wall::{build_walls, build_walls_at, create_wall_debug, roll_dice, shuffle, Walls},
};
