//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers deal only with the domain-level
//! [`Principal`]. Establishing a session (login) is an external concern;
//! requests without one act as guests.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Principal, Role};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ROLES_KEY: &str = "roles";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist an authenticated principal in the session cookie.
    pub fn persist_principal(&self, principal: &Principal) -> Result<(), Error> {
        let Some(actor_id) = principal.actor_id() else {
            return Err(Error::internal("cannot persist a guest principal"));
        };
        let roles: Vec<&str> = [Role::Admin, Role::User]
            .into_iter()
            .filter(|role| principal.has_role(*role))
            .map(Role::as_str)
            .collect();
        self.0
            .insert(USER_ID_KEY, actor_id)
            .and_then(|()| self.0.insert(ROLES_KEY, roles))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Resolve the acting principal from the session.
    ///
    /// An absent or unreadable `user_id` yields the guest principal; role
    /// names that are no longer recognised are dropped.
    pub fn principal(&self) -> Result<Principal, Error> {
        let actor_id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let Some(actor_id) = actor_id else {
            return Ok(Principal::guest());
        };

        let role_names = self
            .0
            .get::<Vec<String>>(ROLES_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?
            .unwrap_or_default();
        let roles = role_names.iter().filter_map(|name| {
            let role = Role::from_name(name);
            if role.is_none() {
                tracing::warn!(role = %name, "unknown role in session cookie");
            }
            role
        });

        Ok(Principal::authenticated(actor_id, roles))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().wrap(crate::inbound::http::test_utils::test_session_middleware())
    }

    #[actix_web::test]
    async fn round_trips_principal() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        let principal = Principal::authenticated("alice", [Role::Admin]);
                        session.persist_principal(&principal)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let principal = session.principal()?;
                        Ok::<_, Error>(
                            HttpResponse::Ok().body(format!(
                                "{}:{}",
                                principal.audit_name(),
                                principal.has_role(Role::Admin)
                            )),
                        )
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body, "alice:true");
    }

    #[actix_web::test]
    async fn missing_session_yields_guest() {
        let app = test::init_service(session_test_app().route(
            "/whoami",
            web::get().to(|session: SessionContext| async move {
                let principal = session.principal()?;
                Ok::<_, Error>(
                    HttpResponse::Ok().body(format!("{}", principal.is_authenticated())),
                )
            }),
        ))
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, "false");
    }

    #[actix_web::test]
    async fn unknown_role_names_are_dropped() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set-stale",
                    web::get().to(|session: Session| async move {
                        session.insert(USER_ID_KEY, "bob").expect("set user id");
                        session
                            .insert(ROLES_KEY, vec!["superuser", "user"])
                            .expect("set roles");
                        HttpResponse::Ok()
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let principal = session.principal()?;
                        Ok::<_, Error>(HttpResponse::Ok().body(format!(
                            "{}:{}",
                            principal.has_role(Role::User),
                            principal.has_role(Role::Admin)
                        )))
                    }),
                ),
        )
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-stale").to_request(),
        )
        .await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body = test::read_body(res).await;
        assert_eq!(body, "true:false");
    }
}
