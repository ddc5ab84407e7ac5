use super::*;

// [DeadWall]
// 王牌14枚
// slot 0~3: 嶺上牌 (0から順に取り出す)
// slot 4~13: 表示牌 偶数offset(4,6,..,12)がドラ表示牌, 奇数offset(5,7,..,13)が裏ドラ表示牌
// 嶺上牌を取り出すたびにツモ山の末尾(海底)の牌を王牌に補充して14枚を維持する
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadWall {
    pub slots: Vec<TileId>,       // 配牌時の王牌 (14枚)
    pub n_replacement: usize,     // 取り出し済みの嶺上牌の数
    pub supplements: Vec<TileId>, // ツモ山から補充された牌
}

impl DeadWall {
    pub fn new(slots: Vec<TileId>) -> Self {
        assert!(slots.len() == DEAD_WALL_SIZE);
        Self {
            slots,
            n_replacement: 0,
            supplements: vec![],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        DEAD_WALL_SIZE - self.n_replacement + self.supplements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn replacement_left(&self) -> usize {
        REPLACEMENT_SIZE - self.n_replacement
    }

    // 嶺上牌を取り出してツモ山の末尾の牌を補充
    pub fn draw_replacement(&mut self, supplement: Option<TileId>) -> Option<TileId> {
        if self.n_replacement == REPLACEMENT_SIZE {
            return None;
        }
        let t = self.slots[self.n_replacement];
        self.n_replacement += 1;
        if let Some(s) = supplement {
            self.supplements.push(s);
        }
        Some(t)
    }

    #[inline]
    pub fn dora_indicator(&self, i: usize) -> TileId {
        self.slots[REPLACEMENT_SIZE + 2 * i]
    }

    #[inline]
    pub fn ura_dora_indicator(&self, i: usize) -> TileId {
        self.slots[REPLACEMENT_SIZE + 2 * i + 1]
    }

    pub fn dora_indicators(&self, n: usize) -> Vec<TileId> {
        (0..n.min(INDICATOR_SIZE))
            .map(|i| self.dora_indicator(i))
            .collect()
    }

    pub fn ura_dora_indicators(&self, n: usize) -> Vec<TileId> {
        (0..n.min(INDICATOR_SIZE))
            .map(|i| self.ura_dora_indicator(i))
            .collect()
    }

    // 現在王牌に含まれている牌
    pub fn tiles(&self) -> Vec<TileId> {
        let mut v = self.slots[self.n_replacement..].to_vec();
        v.extend(&self.supplements);
        v
    }
}
