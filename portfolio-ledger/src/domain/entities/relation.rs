use crate::domain::value_objects::{AssetId, UserId};
use serde::{Deserialize, Serialize};

/// Link between a user and an asset they have transacted in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetUserRelation {
    pub asset_id: AssetId,
    pub user_id: UserId,
}

impl AssetUserRelation {
    pub fn new(asset_id: AssetId, user_id: impl Into<UserId>) -> Self {
        AssetUserRelation {
            asset_id,
            user_id: user_id.into(),
        }
    }
}
