//! [`Identity`] definitions.

use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::User;
use crate::domain::user;

/// Identity of the currently signed-in actor, as supplied by the external
/// identity provider.
///
/// Gates which lifecycle operations are permitted: commands take the acting
/// [`Identity`] (or its [`user::Id`]) explicitly instead of reading ambient
/// global state.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Identity {
    /// ID of the signed-in [`User`].
    pub user_id: user::Id,

    /// Whether the identity provider has verified the [`User`]'s email.
    pub email_verified: bool,
}
