//! Normalization of directory records into accounts.

use idm_directory::UserRecord;
use idm_model::Account;

use crate::error::{StorageError, StorageResult};

/// Opaque attribute holding the numeric user id.
pub const UID_ATTRIBUTE: &str = "uid";

/// Opaque attribute holding the numeric primary group id.
pub const GID_ATTRIBUTE: &str = "gid";

/// Maps a directory record to an [`Account`].
///
/// The username fills both login names. Numeric ids stay 0 when the opaque
/// attribute is absent or uses an unknown decoder.
///
/// ## Errors
///
/// Returns `StorageError::InvalidData` if the record has no id or a numeric
/// attribute cannot be decoded.
pub fn map_to_account(user: &UserRecord) -> StorageResult<Account> {
    let id = user
        .record_id()
        .ok_or_else(|| StorageError::InvalidData(format!("record '{}' has no id", user.username)))?;

    let decode = |key: &str| -> StorageResult<i64> {
        user.opaque_i64(key)
            .map(Option::unwrap_or_default)
            .map_err(|e| StorageError::InvalidData(format!("{id}: {key}: {e}")))
    };
    let uid_number = decode(UID_ATTRIBUTE)?;
    let gid_number = decode(GID_ATTRIBUTE)?;

    Ok(Account {
        uid_number,
        gid_number,
        ..Account::new(id)
            .with_username(&user.username)
            .with_mail(&user.mail)
            .with_display_name(&user.display_name)
    })
}
