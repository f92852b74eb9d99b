//! Login, logout and professional selection.

use crate::domain::job_board::Professional;
use crate::domain::user::Credentials;
use crate::dto::auth::LoginResponse;
use crate::forms::login::LoginForm;
use crate::repository::AuthGateway;
use crate::services::ServiceResult;
use crate::session::{PersistedSession, Session, SessionHandle, SessionStore};

/// Exchanges credentials for a token and stores the resulting session.
pub async fn login<G>(
    gateway: &G,
    store: &dyn SessionStore,
    session: &SessionHandle,
    form: LoginForm,
) -> ServiceResult<Session>
where
    G: AuthGateway + ?Sized,
{
    let credentials = Credentials::try_from(form)?;

    let LoginResponse { data, token, .. } = gateway.login(&credentials).await?;

    let new_session = Session {
        token: Some(token),
        user: Some(data.user),
        roles: data.roles,
        permissions: data.permissions,
        professional: data.professional,
    };

    store.save(&PersistedSession::from(&new_session))?;
    session.replace(new_session.clone());

    log::info!("Logged in as {}", credentials.username);

    Ok(new_session)
}

/// Ends the session locally. The backend is told first, but a failure
/// there does not keep the user logged in.
pub async fn logout<G>(
    gateway: &G,
    store: &dyn SessionStore,
    session: &SessionHandle,
) -> ServiceResult<()>
where
    G: AuthGateway + ?Sized,
{
    if session.token().is_some() {
        if let Err(err) = gateway.logout().await {
            log::warn!("Backend logout failed: {err}");
        }
    }

    session.clear();
    store.clear()?;

    log::info!("Logged out");

    Ok(())
}

/// Makes `professional` the subject of the curriculum screens.
pub fn select_professional(
    store: &dyn SessionStore,
    session: &SessionHandle,
    professional: Professional,
) -> ServiceResult<()> {
    let mut current = session.snapshot();
    current.professional = Some(professional);

    store.save(&PersistedSession::from(&current))?;
    session.replace(current);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::RecordId;
    use crate::domain::user::{Role, User};
    use crate::dto::auth::LoginData;
    use crate::dto::envelope::ApiMessage;
    use crate::forms::FormError;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockGateway;
    use crate::services::ServiceError;
    use crate::session::MemorySessionStore;

    fn form() -> LoginForm {
        LoginForm {
            username: "admin".to_string(),
            password: "secret".to_string(),
            device_name: "console".to_string(),
        }
    }

    fn response() -> LoginResponse {
        LoginResponse {
            data: LoginData {
                user: User {
                    username: "admin".to_string(),
                    ..User::default()
                },
                roles: vec![Role {
                    code: "ADMIN".to_string(),
                    ..Role::default()
                }],
                permissions: vec![],
                professional: Some(Professional::reference(RecordId::new(12).unwrap())),
            },
            token: "abc".to_string(),
            msg: None,
        }
    }

    #[tokio::test]
    async fn login_stores_token_in_handle_and_store() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_login()
            .withf(|c| c.username.as_str() == "admin" && c.device_name.as_str() == "console")
            .times(1)
            .returning(|_| Ok(response()));
        let store = MemorySessionStore::default();
        let session = SessionHandle::default();

        let logged_in = login(&gateway, &store, &session, form()).await.unwrap();

        assert!(logged_in.has_role("ADMIN"));
        assert_eq!(session.token().as_deref(), Some("abc"));
        assert_eq!(session.professional_id(), RecordId::new(12).ok());
        assert_eq!(store.load().unwrap().token.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_backend() {
        let mut gateway = MockGateway::new();
        gateway.expect_login().never();
        let store = MemorySessionStore::default();
        let session = SessionHandle::default();
        let mut form = form();
        form.password.clear();

        let result = login(&gateway, &store, &session, form).await;

        assert!(matches!(result, Err(ServiceError::Form(FormError::Validation(_)))));
        assert_eq!(session.token(), None);
    }

    #[tokio::test]
    async fn rejected_login_keeps_anonymous_session() {
        let mut gateway = MockGateway::new();
        gateway.expect_login().returning(|_| {
            Err(RepositoryError::Unauthorized(ApiMessage::new(
                "Unauthorized",
                "Wrong credentials",
            )))
        });
        let store = MemorySessionStore::default();
        let session = SessionHandle::default();

        let result = login(&gateway, &store, &session, form()).await;

        assert!(matches!(
            result,
            Err(ServiceError::Repository(RepositoryError::Unauthorized(_)))
        ));
        assert_eq!(store.load().unwrap(), PersistedSession::default());
    }

    #[tokio::test]
    async fn logout_clears_session_even_when_backend_fails() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_logout()
            .times(1)
            .returning(|| Err(RepositoryError::Connection("refused".to_string())));
        let store = MemorySessionStore::default();
        let session = SessionHandle::new(Session::from(PersistedSession {
            token: Some("abc".to_string()),
            professional: None,
        }));
        store.save(&PersistedSession::from(&session.snapshot())).unwrap();

        logout(&gateway, &store, &session).await.unwrap();

        assert_eq!(session.token(), None);
        assert_eq!(store.load().unwrap(), PersistedSession::default());
    }

    #[tokio::test]
    async fn anonymous_logout_skips_backend() {
        let mut gateway = MockGateway::new();
        gateway.expect_logout().never();

        logout(&gateway, &MemorySessionStore::default(), &SessionHandle::default())
            .await
            .unwrap();
    }

    #[test]
    fn selected_professional_is_persisted() {
        let store = MemorySessionStore::default();
        let session = SessionHandle::default();

        select_professional(&store, &session, Professional::reference(RecordId::new(7).unwrap()))
            .unwrap();

        assert_eq!(session.professional_id(), RecordId::new(7).ok());
        assert_eq!(
            store.load().unwrap().professional.and_then(|p| p.id),
            RecordId::new(7).ok()
        );
    }
}
