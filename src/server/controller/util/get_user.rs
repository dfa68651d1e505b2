use tower_sessions::Session;

use crate::server::{
    data::user::GymUserRepository,
    error::{auth::AuthError, Error},
    model::{app::AppState, auth::CurrentUser, session::user::SessionUserId},
    service::retry::RetryContext,
};

/// Loads the logged in staff account from the session.
///
/// # Returns
/// - `Ok(CurrentUser)`: the active account whose id is in the session
/// - `Err(AuthError::NotLoggedIn)`: no user id in the session
/// - `Err(AuthError::UserNotInDatabase)`: the account is gone or deactivated, the session is cleared
/// - `Err(Error)`: session or database failures after retries
pub async fn get_current_user(state: &AppState, session: &Session) -> Result<CurrentUser, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(AuthError::NotLoggedIn.into());
    };

    let mut ctx: RetryContext<()> = RetryContext::new();
    let db = state.db.clone();

    let user = ctx
        .execute_with_retry(&format!("get staff user ID {}", user_id), |_| {
            let db = db.clone();

            Box::pin(async move { Ok(GymUserRepository::new(&db).get_by_id(user_id).await?) })
        })
        .await?;

    match user {
        Some(user) if user.is_active => Ok(CurrentUser(user)),
        _ => {
            session.clear().await;

            tracing::debug!(
                user_id = %user_id,
                "Session cleared for user missing from database or deactivated"
            );

            Err(AuthError::UserNotInDatabase(user_id).into())
        }
    }
}
