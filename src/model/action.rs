use super::*;

// 他家の打牌に対する鳴きの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallType {
    Chi, // チー (上家の打牌のみ)
    Pon, // ポン
    Kan, // 大明槓
}

// プレイヤーの操作
// Claimの配列は鳴きにより手牌から消失する牌のリスト
// 鳴きの標的の牌はRoundState.phaseを参照する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    // Turn Actions
    Draw,             // ツモ
    Discard(TileId),  // 打牌
    Riichi(TileId),   // リーチ宣言牌の打牌
    Ankan(Tile),      // 暗槓
    Kakan(TileId),    // 加槓
    Kyushukyuhai,     // 九種九牌
    // Call Actions
    Claim(CallType, Vec<TileId>),
    Pass, // 鳴き,ロンのスキップ
    // Turn: ツモ和了, Call: ロン
    DeclareWin,
}

impl Action {
    #[inline]
    pub fn chi(mut v: Vec<TileId>) -> Self {
        assert!(v.len() == 2);
        v.sort();
        Self::Claim(CallType::Chi, v)
    }

    #[inline]
    pub fn pon(mut v: Vec<TileId>) -> Self {
        assert!(v.len() == 2);
        v.sort();
        Self::Claim(CallType::Pon, v)
    }

    #[inline]
    pub fn kan(mut v: Vec<TileId>) -> Self {
        assert!(v.len() == 3);
        v.sort();
        Self::Claim(CallType::Kan, v)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Discard(t) => write!(f, "Discard({})", t),
            Action::Riichi(t) => write!(f, "Riichi({})", t),
            Action::Ankan(t) => write!(f, "Ankan({})", t),
            Action::Kakan(t) => write!(f, "Kakan({})", t),
            Action::Claim(tp, v) => write!(f, "{:?}{:?}", tp, v),
            act => write!(f, "{:?}", act),
        }
    }
}

// 打牌に対する各プレイヤーの応答 (AwaitingCallsで収集)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    Pass,
    Call(CallType, Vec<TileId>),
    Ron(WinContext), // 受付時に評価済み
}

impl Response {
    // 優先順位 (ロン > 槓・ポン > チー > スキップ)
    pub fn priority(&self) -> usize {
        match self {
            Response::Ron(_) => 3,
            Response::Call(CallType::Kan | CallType::Pon, _) => 2,
            Response::Call(CallType::Chi, _) => 1,
            Response::Pass => 0,
        }
    }
}
