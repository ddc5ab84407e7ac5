use super::wall::*;
use crate::error::Res;
use crate::model::*;

// [DealEngine]
// シャッフル -> 牌山の構築 -> 配牌 を行って局の初期状態を生成

pub fn deal(seed: u64, dice: [usize; 2]) -> Res<RoundState> {
    deal_with_rule(seed, dice, Rule::default())
}

// サイコロもシード値から決定
pub fn deal_seeded(seed: u64, rule: Rule) -> Res<RoundState> {
    deal_with_rule(seed, roll_dice(seed), rule)
}

pub fn deal_with_rule(seed: u64, dice: [usize; 2], rule: Rule) -> Res<RoundState> {
    let roll = dice_total(dice)?;
    let shuffled = shuffle(full_set(), seed)?;
    let walls = build_walls(&shuffled, roll)?;
    let mut stg = new_round(walls, rule);
    stg.dice = dice;
    info!(
        "deal: seed {}, dice {:?}, wall_break {}",
        seed, dice, stg.wall_break
    );
    Ok(stg)
}

// 並び順と開門位置を直接指定 (create_wall_debugと組み合わせてテストに使用)
pub fn deal_with_wall(shuffled: &[TileId], wall_break: usize, rule: Rule) -> Res<RoundState> {
    let walls = build_walls_at(shuffled, wall_break)?;
    Ok(new_round(walls, rule))
}

fn new_round(walls: Walls, rule: Rule) -> RoundState {
    let Walls {
        wall_break,
        hands,
        draw_pile,
        dead_wall,
    } = walls;

    let mut seat = 0;
    let players = hands.map(|h| {
        let pl = Player::new(seat, h);
        seat += 1;
        pl
    });

    RoundState {
        rule,
        round_wind: WE,
        wall_break,
        draw_pile: draw_pile.into(),
        dead_wall: DeadWall::new(dead_wall),
        players,
        phase: Phase::AwaitingDraw(0),
        n_dora: 1,
        is_first_go_around: true,
        ..Default::default()
    }
}

#[test]
fn test_deal() {
    for seed in 0..10 {
        let stg = deal(seed, [3, 4]).unwrap();
        assert_eq!(stg.tile_count(), TILE_COUNT);
        let mut all = stg.all_tiles();
        all.sort();
        assert_eq!(all, full_set());

        assert_eq!(stg.phase, Phase::AwaitingDraw(0));
        assert_eq!(stg.dora_indicators().len(), 1);
        assert_eq!(stg.wall_count(), LIVE_WALL_SIZE);
        for (s, pl) in stg.players.iter().enumerate() {
            assert_eq!(pl.seat, s);
            assert_eq!(pl.hand.size(), HAND_SIZE);
        }
    }

    // 同じシード値とサイコロなら同じ配牌
    assert_eq!(deal(1, [2, 5]).unwrap(), deal(1, [2, 5]).unwrap());
    assert!(deal(1, [0, 5]).is_err());
    assert_eq!(deal_seeded(9, Rule::default()).unwrap().dice, roll_dice(9));
}
