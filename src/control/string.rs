use crate::model::*;

// 牌の文字列表現 ("m123p456s789z1234" 0は赤5)

pub fn tile_type_from_char(ch: char) -> Result<Type, String> {
    match ch {
        'm' => Ok(TM),
        'p' => Ok(TP),
        's' => Ok(TS),
        'z' => Ok(TZ),
        _ => Err(format!("invalid tile type char: {}", ch)),
    }
}

pub fn tile_type_to_char(ti: Type) -> char {
    match ti {
        TM => 'm',
        TP => 'p',
        TS => 's',
        TZ => 'z',
        _ => panic!("invalid tile type index: {}", ti),
    }
}

// (牌種, 数字, 赤5)のリストに分解
fn parse_tiles(exp: &str) -> Result<Vec<(Tile, bool)>, String> {
    let mut tiles = vec![];
    let mut ti = None;
    for ch in exp.chars() {
        match ch {
            'm' | 'p' | 's' | 'z' => ti = Some(tile_type_from_char(ch)?),
            '0'..='9' => {
                let ti = ti.ok_or("tile number befor tile type")?;
                let ni = ch.to_digit(10).unwrap_or(0) as usize;
                let valid = if ti == TZ {
                    (WE..=DR).contains(&ni)
                } else {
                    ni <= 9
                };
                if !valid {
                    return Err(format!("invalid tile: {}{}", tile_type_to_char(ti), ni));
                }
                if ni == 0 {
                    tiles.push((Tile(ti, 5), true));
                } else {
                    tiles.push((Tile(ti, ni), false));
                }
            }
            ' ' => {}
            _ => return Err(format!("invalid char: '{}'", ch)),
        }
    }
    Ok(tiles)
}

// 牌の種類のリスト (赤5は通常の5として扱う)
pub fn tiles_from_string(exp: &str) -> Result<Vec<Tile>, String> {
    Ok(parse_tiles(exp)?.into_iter().map(|(t, _)| t).collect())
}

// 重複のない牌IDのリスト
// 0は赤5, 5は赤5以外の5を優先して割り当てる (通常の5を使い切った場合は赤5)
pub fn tile_ids_from_string(exp: &str) -> Result<Vec<TileId>, String> {
    alloc_tile_ids(exp, &mut [false; TILE_COUNT])
}

// usedに含まれていないIDを割り当ててusedに追加
pub(crate) fn alloc_tile_ids(exp: &str, used: &mut [bool; TILE_COUNT]) -> Result<Vec<TileId>, String> {
    let mut ids = vec![];
    for (t, red) in parse_tiles(exp)? {
        let copies = TileId::copies(t);
        let order: Vec<TileId> = if t.is_suit() && t.1 == 5 {
            if red {
                vec![copies[0]]
            } else {
                vec![copies[1], copies[2], copies[3], copies[0]]
            }
        } else {
            copies.to_vec()
        };
        let id = order
            .into_iter()
            .find(|id| !used[id.id()])
            .ok_or_else(|| format!("too many tiles: {}", t))?;
        used[id.id()] = true;
        ids.push(id);
    }
    Ok(ids)
}

pub fn tiles_to_table(exp: &str) -> Result<TileTable, String> {
    let mut tt = TileTable::default();
    for t in tiles_from_string(exp)? {
        tt[t.0][t.1] += 1;
    }
    Ok(tt)
}

pub fn tiles_to_string(tiles: &[Tile]) -> String {
    let mut res = String::new();
    let mut last_ti = None;
    for t in tiles {
        if Some(t.0) != last_ti {
            last_ti = Some(t.0);
            res.push(tile_type_to_char(t.0));
        }
        res.push_str(&t.1.to_string());
    }
    res
}

pub fn tile_ids_to_string(ids: &[TileId]) -> String {
    let mut res = String::new();
    let mut last_ti = None;
    for id in ids {
        let t = id.kind();
        if Some(t.0) != last_ti {
            last_ti = Some(t.0);
            res.push(tile_type_to_char(t.0));
        }
        if id.is_red5() {
            res.push('0');
        } else {
            res.push_str(&t.1.to_string());
        }
    }
    res
}

// 面子の文字列表現から鳴きを生成 (手牌とIDが重複しうるのでテスト用)
pub fn meld_from_string(
    meld_type: MeldType,
    exp: &str,
    claimed: &str,
    from: Seat,
) -> Result<Meld, String> {
    let tiles = tile_ids_from_string(exp)?;
    let n = if matches!(meld_type, MeldType::Chi | MeldType::Pon) {
        3
    } else {
        4
    };
    if tiles.len() != n {
        return Err(format!("invalid meld: '{}'", exp));
    }
    if meld_type == MeldType::Ankan {
        return Ok(Meld::new(meld_type, tiles, None, None));
    }

    let ct = tiles_from_string(claimed)?;
    if ct.len() != 1 {
        return Err(format!("invalid claimed tile: '{}'", claimed));
    }
    let claimed = tiles
        .iter()
        .copied()
        .find(|id| id.kind() == ct[0])
        .ok_or_else(|| format!("claimed tile is not in meld: '{}'", exp))?;
    Ok(Meld::new(meld_type, tiles, Some(claimed), Some(from)))
}

#[test]
fn test_tiles_to_string() {
    let hand_str = "p34777s1235567z66";
    let hand = tiles_from_string(hand_str).unwrap();
    assert_eq!(tiles_to_string(&hand), hand_str);
    assert_eq!(tiles_from_string("s0"), Ok(vec![Tile(TS, 5)]));
    assert!(tiles_from_string("z8").is_err());
    assert!(tiles_from_string("1m").is_err());
}

#[test]
fn test_tile_ids_from_string() {
    let ids = tile_ids_from_string("m550").unwrap();
    assert_eq!(ids.len(), 3);
    assert!(!ids[0].is_red5());
    assert!(!ids[1].is_red5());
    assert!(ids[2].is_red5());
    assert_eq!(tile_ids_to_string(&ids), "m550");

    assert!(tile_ids_from_string("z11111").is_err());
    assert!(tile_ids_from_string("m00").is_err());

    let ids = tile_ids_from_string("z1234567").unwrap();
    assert_eq!(ids[0].id(), 0);
    assert_eq!(ids[4].id(), 24); // 白
    assert_eq!(ids[6].id(), 16); // 中
}
