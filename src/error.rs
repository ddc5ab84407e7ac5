use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 牌IDが [0, 136) の範囲外
    OutOfRange(usize),
    /// 牌の集合の枚数・重複・サイコロの目などの入力不正
    MalformedInput(String),
    /// ツモ山が空 (局の終了条件であり, 呼び出し側へはRoundEndedとして通知)
    WallExhausted,
    /// 手牌にない牌の打牌, リーチ中の手出しなど
    IllegalDiscard(String),
    /// 必要な牌を持たない鳴き, 優先権のない鳴きなど
    IllegalClaim(String),
    /// 和了形でない和了宣言, フリテンなど
    IllegalDeclare(String),
    /// 和了形だが役がない
    NoYaku,
    /// 現在のフェーズでは受け付けない操作
    IllegalAction(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfRange(id) => write!(f, "tile id out of range: {}", id),
            Error::MalformedInput(msg) => write!(f, "malformed input: {}", msg),
            Error::WallExhausted => write!(f, "wall exhausted"),
            Error::IllegalDiscard(msg) => write!(f, "illegal discard: {}", msg),
            Error::IllegalClaim(msg) => write!(f, "illegal claim: {}", msg),
            Error::IllegalDeclare(msg) => write!(f, "illegal declare: {}", msg),
            Error::NoYaku => write!(f, "complete hand without yaku"),
            Error::IllegalAction(msg) => write!(f, "illegal action: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

pub type Res<T = ()> = Result<T, Error>;
