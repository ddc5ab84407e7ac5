// 構造的な意味合いや一貫性を保つために以下のclippy警告は無効化
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]

#[macro_use]
pub mod util;

pub mod control;
pub mod error;
pub mod hand;
pub mod listener;
pub mod model;
