use rand::prelude::*;

use super::string::alloc_tile_ids;
use crate::error::{Error, Res};
use crate::model::*;

// [Shuffler]

// 136枚の重複のない牌IDであることを確認
pub fn validate_tiles(ids: &[TileId]) -> Res {
    if ids.len() != TILE_COUNT {
        return Err(Error::MalformedInput(format!(
            "tile count must be {}: {}",
            TILE_COUNT,
            ids.len()
        )));
    }
    let mut used = [false; TILE_COUNT];
    for id in ids {
        if used[id.id()] {
            return Err(Error::MalformedInput(format!("duplicate tile id: {}", id.id())));
        }
        used[id.id()] = true;
    }
    Ok(())
}

// シード値に従って並べ替え (Fisher-Yates)
pub fn shuffle(mut ids: Vec<TileId>, seed: u64) -> Res<Vec<TileId>> {
    validate_tiles(&ids)?;
    let mut rng = StdRng::seed_from_u64(seed);
    ids.shuffle(&mut rng);
    Ok(ids)
}

// サイコロ2つ (牌山のシャッフルとは別系列の乱数)
pub fn roll_dice(seed: u64) -> [usize; 2] {
    let mut rng = StdRng::seed_from_u64(!seed);
    [rng.gen_range(1..=6), rng.gen_range(1..=6)]
}

// サイコロの目の合計 (各1~6)
pub fn dice_total(dice: [usize; 2]) -> Res<usize> {
    for d in dice {
        if !(1..=6).contains(&d) {
            return Err(Error::MalformedInput(format!("invalid die: {}", d)));
        }
    }
    Ok(dice[0] + dice[1])
}

// [WallEngine]

// 配牌後の牌の配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walls {
    pub wall_break: usize,           // 開門位置
    pub hands: [Vec<TileId>; SEAT],  // 配牌 (各13枚)
    pub draw_pile: Vec<TileId>,      // ツモ山 (先頭が最初のツモ)
    pub dead_wall: Vec<TileId>,      // 王牌 (14枚)
}

// 出目から割れ目の山を決定 (東: 1,5,9 南: 2,6,10 西: 3,7,11 北: 4,8,12)
pub fn breaking_wall(roll: usize) -> Res<Seat> {
    if !(2..=12).contains(&roll) {
        return Err(Error::MalformedInput(format!("invalid dice roll: {}", roll)));
    }
    Ok(match roll % 4 {
        1 => 0,
        2 => 1,
        3 => 2,
        _ => 3,
    })
}

// 開門位置 = 割れ目の山の先頭 + 出目x2
pub fn calc_wall_break(roll: usize) -> Res<usize> {
    Ok(breaking_wall(roll)? * WALL_SIZE + 2 * roll)
}

pub fn build_walls(shuffled: &[TileId], roll: usize) -> Res<Walls> {
    build_walls_at(shuffled, calc_wall_break(roll)?)
}

// 配牌位置のindex (開門位置からの相対位置)
// 4枚ずつ3周, 最後に1枚ずつ
pub fn dealt_positions(seat: Seat) -> Vec<Index> {
    let mut v = vec![];
    for r in 0..3 {
        let base = r * TILE * SEAT + seat * TILE;
        v.extend(base..base + TILE);
    }
    v.push(TILE * SEAT * 3 + seat);
    v
}

// 開門位置を起点に円環状に並べ替えて配牌, ツモ山, 王牌に分割
// 王牌は開門位置の直前の14枚 (配列の先頭をまたぐ場合を含む)
pub fn build_walls_at(shuffled: &[TileId], wall_break: usize) -> Res<Walls> {
    validate_tiles(shuffled)?;
    if wall_break >= TILE_COUNT {
        return Err(Error::MalformedInput(format!(
            "invalid wall break: {}",
            wall_break
        )));
    }

    let rotated: Vec<TileId> = (0..TILE_COUNT)
        .map(|i| shuffled[(wall_break + i) % TILE_COUNT])
        .collect();

    let hands: [Vec<TileId>; SEAT] =
        [0, 1, 2, 3].map(|s| dealt_positions(s).iter().map(|&i| rotated[i]).collect());
    let live_end = DEALT_COUNT + LIVE_WALL_SIZE;
    let draw_pile = rotated[DEALT_COUNT..live_end].to_vec();
    let dead_wall = rotated[live_end..].to_vec();
    assert!(dead_wall.len() == DEAD_WALL_SIZE);

    Ok(Walls {
        wall_break,
        hands,
        draw_pile,
        dead_wall,
    })
}

// デバッグ用に作為的な牌山を生成 指定がない場所はシード値に従ってランダムに生成
// 開門位置0で build_walls_at に渡すと指定通りに配置される
// draws: ツモ山の先頭から (最初の牌は親の14枚目)
pub fn create_wall_debug(
    seed: u64,
    hands: [&str; SEAT],
    draws: &str,
    replacements: &str,
    doras: &str,
    ura_doras: &str,
) -> Result<Vec<TileId>, String> {
    let mut used = [false; TILE_COUNT];
    let mut wall: Vec<Option<TileId>> = vec![None; TILE_COUNT];
    let dead = DEALT_COUNT + LIVE_WALL_SIZE;

    let mut place = |exp: &str, pos: &[Index], wall: &mut Vec<Option<TileId>>| {
        let ids = alloc_tile_ids(exp, &mut used)?;
        if ids.len() > pos.len() {
            return Err(format!("too many tiles: {}", exp));
        }
        for (id, &p) in ids.into_iter().zip(pos) {
            wall[p] = Some(id);
        }
        Ok::<(), String>(())
    };

    for (s, h) in hands.iter().enumerate() {
        place(h, &dealt_positions(s), &mut wall)?;
    }
    let pos: Vec<Index> = (DEALT_COUNT..dead).collect();
    place(draws, &pos, &mut wall)?;
    let pos: Vec<Index> = (0..REPLACEMENT_SIZE).map(|i| dead + i).collect();
    place(replacements, &pos, &mut wall)?;
    let pos: Vec<Index> = (0..INDICATOR_SIZE)
        .map(|i| dead + REPLACEMENT_SIZE + 2 * i)
        .collect();
    place(doras, &pos, &mut wall)?;
    let pos: Vec<Index> = (0..INDICATOR_SIZE)
        .map(|i| dead + REPLACEMENT_SIZE + 2 * i + 1)
        .collect();
    place(ura_doras, &pos, &mut wall)?;

    // 余った牌をランダムにシャッフル
    let mut remain: Vec<TileId> = full_set().into_iter().filter(|id| !used[id.id()]).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    remain.shuffle(&mut rng);

    let mut res = vec![];
    for t in wall {
        match t {
            Some(id) => res.push(id),
            None => res.push(remain.pop().ok_or("tile shortage")?),
        }
    }
    assert!(remain.is_empty());
    Ok(res)
}

#[cfg(test)]
fn assert_partition(w: &Walls) {
    let mut all = w.draw_pile.clone();
    all.extend(&w.dead_wall);
    for h in &w.hands {
        assert_eq!(h.len(), HAND_SIZE);
        all.extend(h);
    }
    all.sort();
    assert_eq!(all, full_set());
    assert_eq!(w.draw_pile.len(), LIVE_WALL_SIZE);
    assert_eq!(w.dead_wall.len(), DEAD_WALL_SIZE);
}

#[test]
fn test_partition_for_all_rolls() {
    for seed in 0..20 {
        let shuffled = shuffle(full_set(), seed).unwrap();
        for roll in 2..=12 {
            let w = build_walls(&shuffled, roll).unwrap();
            assert_partition(&w);
        }
    }
}

#[test]
fn test_wall_break() {
    assert_eq!(calc_wall_break(2).unwrap(), 34 + 4); // 南
    assert_eq!(calc_wall_break(5).unwrap(), 10); // 東
    assert_eq!(calc_wall_break(7).unwrap(), 68 + 14); // 西
    assert_eq!(calc_wall_break(12).unwrap(), 102 + 24); // 北
    assert!(calc_wall_break(1).is_err());
    assert!(calc_wall_break(13).is_err());
    assert!(dice_total([0, 3]).is_err());
    assert!(dice_total([6, 7]).is_err());
    assert_eq!(dice_total([6, 6]).unwrap(), 12);
}

#[test]
fn test_dead_wall_wraps_around() {
    // 開門位置3: 王牌は配列末尾の11枚と先頭の3枚
    let shuffled = shuffle(full_set(), 7).unwrap();
    let w = build_walls_at(&shuffled, 3).unwrap();
    assert_partition(&w);
    let mut expected = shuffled[125..].to_vec();
    expected.extend(&shuffled[..3]);
    assert_eq!(w.dead_wall, expected);
    assert_eq!(w.hands[0][0], shuffled[3]);
    assert_eq!(w.draw_pile[0], shuffled[3 + DEALT_COUNT]);

    // 出目5 (開門位置10) も先頭をまたぐ
    let w = build_walls(&shuffled, 5).unwrap();
    let mut expected = shuffled[132..].to_vec();
    expected.extend(&shuffled[..10]);
    assert_eq!(w.dead_wall, expected);
}

#[test]
fn test_deal_order() {
    let shuffled = full_set();
    let w = build_walls_at(&shuffled, 0).unwrap();
    let ids = |v: &[TileId]| v.iter().map(|t| t.id()).collect::<Vec<_>>();
    assert_eq!(
        ids(&w.hands[0]),
        vec![0, 1, 2, 3, 16, 17, 18, 19, 32, 33, 34, 35, 48]
    );
    assert_eq!(
        ids(&w.hands[3]),
        vec![12, 13, 14, 15, 28, 29, 30, 31, 44, 45, 46, 47, 51]
    );
    assert_eq!(w.draw_pile[0].id(), 52);
    assert_eq!(w.dead_wall[0].id(), 122);
}

#[test]
fn test_malformed_input() {
    let mut v = full_set();
    v.pop();
    assert!(matches!(shuffle(v.clone(), 0), Err(Error::MalformedInput(_))));
    v.push(v[0]);
    assert!(matches!(shuffle(v.clone(), 0), Err(Error::MalformedInput(_))));
    assert!(matches!(build_walls(&v, 7), Err(Error::MalformedInput(_))));
    assert!(build_walls_at(&full_set(), 136).is_err());
}

#[test]
fn test_shuffle_deterministic() {
    let a = shuffle(full_set(), 42).unwrap();
    let b = shuffle(full_set(), 42).unwrap();
    let c = shuffle(full_set(), 43).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(roll_dice(42), roll_dice(42));
    for seed in 0..100 {
        let [d0, d1] = roll_dice(seed);
        assert!((1..=6).contains(&d0) && (1..=6).contains(&d1));
    }
}

#[test]
fn test_shuffle_no_fixed_point_bias() {
    // 一様な置換の不動点の数の期待値は1
    let n = 2000;
    let mut fixed = [0usize; TILE_COUNT];
    for seed in 0..n {
        let v = shuffle(full_set(), seed as u64).unwrap();
        for (i, id) in v.iter().enumerate() {
            if id.id() == i {
                fixed[i] += 1;
            }
        }
    }
    let total: usize = fixed.iter().sum();
    assert!((n * 8 / 10..n * 12 / 10).contains(&total), "total: {}", total);
    // 各位置の期待値は n / 136 (約15)
    assert!(fixed.iter().all(|&c| c < 60), "{:?}", fixed);
}

#[test]
fn test_create_wall_debug() {
    let wall = create_wall_debug(
        0,
        ["m111222333p456s9", "", "z1234567", ""],
        "s9",
        "p1",
        "z5",
        "z6",
    )
    .unwrap();
    validate_tiles(&wall).unwrap();
    let w = build_walls_at(&wall, 0).unwrap();
    let mut h0: Vec<Tile> = w.hands[0].iter().map(|t| t.kind()).collect();
    h0.sort();
    assert_eq!(super::string::tiles_to_string(&h0), "m111222333p456s9");
    let mut h2: Vec<Tile> = w.hands[2].iter().take(7).map(|t| t.kind()).collect();
    h2.sort();
    assert_eq!(super::string::tiles_to_string(&h2), "z1234567");
    assert_eq!(w.draw_pile[0].kind(), Tile(TS, 9));
    assert_eq!(w.dead_wall[0].kind(), Tile(TP, 1));
    assert_eq!(w.dead_wall[4].kind(), Tile(TZ, 5));
    assert_eq!(w.dead_wall[5].kind(), Tile(TZ, 6));
}
