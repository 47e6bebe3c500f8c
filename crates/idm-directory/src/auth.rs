//! Per-call authentication.

use idm_core::ServiceUser;

use crate::client::CallContext;
use crate::error::TokenError;
use crate::token::TokenProvider;

/// Mints a session token for `user` and attaches it to a fresh call context.
///
/// ## Errors
///
/// Propagates the provider's failure unchanged; no retries.
pub async fn authenticated_context(
    provider: &dyn TokenProvider,
    user: &ServiceUser,
) -> Result<CallContext, TokenError> {
    let token = provider.authenticate(user).await?;
    Ok(CallContext::new().with_token(token))
}
