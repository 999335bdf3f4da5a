//! Users

use serde::Deserialize;

use crate::ids::TypedId;

/// User Id
pub type UserId = TypedId<User>;

/// A user as embedded in other documents.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    /// Server id.
    #[serde(rename = "_id")]
    pub id: UserId,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}
