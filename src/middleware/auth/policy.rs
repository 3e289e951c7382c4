//! Coarse access policy applied after a credential has been verified.
//!
//! Pure functions over an already-resolved identity class, so they can be
//! tested without an HTTP harness. Finer-grained authorization happens in the
//! downstream handlers.

use axum::http::Method;

use crate::services::auth::IdentityClass;

const RELEASES_SEGMENT: &str = "/releases";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// `/releases` の後ろに (改行以外の) 文字が 1 文字以上続く箇所があるか。
///
/// `/releases` 単体は対象外、`/releases/<id>` や `/releasesX` は対象。
/// path は受信したまま (percent-decode しない) で評価する。
pub fn is_releases_path(path: &str) -> bool {
    path.match_indices(RELEASES_SEGMENT).any(|(idx, _)| {
        path[idx + RELEASES_SEGMENT.len()..]
            .chars()
            .next()
            .is_some_and(|c| c != '\n')
    })
}

/// System tokens may read anything and may use any method on release
/// sub-resources; everything else is denied. Other classes pass through.
pub fn authorize(class: IdentityClass, method: &Method, path: &str) -> Decision {
    match class {
        IdentityClass::Regular => Decision::Allow,
        // TODO: review whether destructive methods on release sub-paths should stay open to system tokens
        IdentityClass::System if *method == Method::GET || is_releases_path(path) => {
            Decision::Allow
        }
        IdentityClass::System => Decision::Deny,
    }
}
