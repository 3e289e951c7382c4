use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 認証済み主体の種別。
///
/// token の `type` claim (`"regular"` / `"system"`) に対応する。
/// claim が無い場合は `Regular` 扱い。未知の値は verify エラーになる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityClass {
    /// Platform user. Not restricted by the gate.
    #[default]
    Regular,
    /// Service token issued by the platform (build/deploy pipeline).
    System,
}

impl IdentityClass {
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }
}

/// Verifier が返す「検証済み・アプリ側で使う型」
///
/// - リクエストごとに token から組み立てる (永続化しない)
/// - gate が request extensions に 1 度だけ格納し、以降は読み取り専用
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub subject: String,
    pub class: IdentityClass,

    pub username: String,
    pub customer: String,
    #[serde(rename = "org")]
    pub organization: String,
    pub groups: Vec<String>,

    pub expires_at: DateTime<Utc>,
}

impl Identity {
    pub fn is_system(&self) -> bool {
        self.class.is_system()
    }
}

/// Claims carried by platform tokens, regardless of signing scheme.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IdentityClaims {
    // presence of sub/exp is enforced by the verifier's required claims
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub exp: u64,

    #[serde(default, rename = "type")]
    pub class: IdentityClass,

    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub org: String,
    #[serde(default)]
    pub groups: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_type_claim_defaults_to_regular() {
        let claims: IdentityClaims =
            serde_json::from_value(serde_json::json!({ "sub": "u-1", "exp": 1 })).unwrap();
        assert_eq!(claims.class, IdentityClass::Regular);
        assert!(claims.groups.is_empty());
    }

    #[test]
    fn system_type_claim_is_recognized() {
        let claims: IdentityClaims = serde_json::from_value(serde_json::json!({
            "sub": "svc",
            "exp": 1,
            "type": "system",
            "org": "koli",
            "groups": ["koli"]
        }))
        .unwrap();
        assert!(claims.class.is_system());
        assert_eq!(claims.org, "koli");
    }

    #[test]
    fn unknown_type_claim_is_rejected() {
        let parsed = serde_json::from_value::<IdentityClaims>(serde_json::json!({
            "sub": "u-1",
            "exp": 1,
            "type": "admin"
        }));
        assert!(parsed.is_err());
    }
}
