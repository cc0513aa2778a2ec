//! Known video-services permission strings

/// Fixed catalog of permission strings operators pick scopes from.
pub struct ScopeCatalog;

const SCOPES: [&str; 14] = [
    "video.services.assets:read",
    "video.services.assets:write",
    "video.services.channels:read",
    "video.services.channels:write",
    "video.services.channels.schedule:read",
    "video.services.channels.schedule:write",
    "video.services.failover-groups:read",
    "video.services.failover-groups:write",
    "video.services.libraries:read",
    "video.services.libraries:write",
    "video.services.libraries.users:admin",
    "video.services.workspace.api_key:read",
    "video.services.workspace.api_key:update",
    "video.services.workspace.api_key:admin",
];

impl ScopeCatalog {
    /// Every catalog entry, in presentation order
    #[must_use]
    pub fn all() -> &'static [&'static str] {
        &SCOPES
    }

    /// Whether `scope` is a catalog entry
    #[must_use]
    pub fn is_known(scope: &str) -> bool {
        SCOPES.contains(&scope)
    }
}
