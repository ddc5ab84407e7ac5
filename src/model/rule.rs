use super::*;
use crate::error::{Error, Res};

// 卓のルール設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default = "default_true")]
    pub red5: bool, // 赤5をドラとして数える
    #[serde(default = "default_true")]
    pub kuitan: bool, // 喰いタン
    #[serde(default = "default_true")]
    pub ura_dora: bool, // 裏ドラ
    #[serde(default = "default_kan_limit")]
    pub kan_limit: usize, // 一局での槓の上限 (嶺上牌の数以下)
}

fn default_true() -> bool {
    true
}

fn default_kan_limit() -> usize {
    REPLACEMENT_SIZE
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            red5: true,
            kuitan: true,
            ura_dora: true,
            kan_limit: REPLACEMENT_SIZE,
        }
    }
}

impl Rule {
    pub fn from_json(s: &str) -> Res<Self> {
        let rule: Self =
            serde_json::from_str(s).map_err(|e| Error::MalformedInput(e.to_string()))?;
        if rule.kan_limit > REPLACEMENT_SIZE {
            return Err(Error::MalformedInput(format!(
                "kan_limit must be <= {}: {}",
                REPLACEMENT_SIZE, rule.kan_limit
            )));
        }
        Ok(rule)
    }
}

#[test]
fn test_rule_from_json() {
    let rule = Rule::from_json(r#"{"kuitan": false}"#).unwrap();
    assert!(!rule.kuitan);
    assert!(rule.red5);
    assert_eq!(rule.kan_limit, 4);

    assert_eq!(Rule::from_json("{}").unwrap(), Rule::default());
    assert!(Rule::from_json(r#"{"kan_limit": 5}"#).is_err());
    assert!(Rule::from_json("not json").is_err());
}
