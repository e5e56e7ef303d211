use crate::Result as DbErrorResult;

use ups_core::UserRecord;

use async_trait::async_trait;

/// Record store consumed by the profile pipeline.
///
/// `save` overwrites the whole record, address and roles included, and
/// returns what was stored. Concurrent saves of one record are last-write-wins.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<UserRecord>>;

    async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<UserRecord>>;

    async fn save(&self, user: &UserRecord) -> DbErrorResult<UserRecord>;

    /// Point the user's picture at `url`, leaving every other field as stored
    async fn set_profile_picture(&self, id: i64, url: &str) -> DbErrorResult<()>;
}
