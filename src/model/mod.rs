// 麻雀のデータモデル
mod action;
mod define;
mod event;
mod meld;
mod player;
mod round;
mod rule;
mod tile;
mod wall;
mod win_context;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use action::*;
pub use define::*;
pub use event::*;
pub use meld::*;
pub use player::*;
pub use round::*;
pub use rule::*;
pub use tile::*;
pub use wall::*;
pub use win_context::*;
