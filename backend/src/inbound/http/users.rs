//! Users API handlers.
//!
//! ```text
//! POST   /api/users          {"name":"Ada","email":"ada@example.com","password":"secret"}
//! GET    /api/users?page=1&limit=10
//! GET    /api/users/{id}
//! PUT    /api/users/{id}     {"name":"Grace"}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::PageEnvelope;
use serde::{Deserialize, Serialize};

use crate::domain::User;
use crate::inbound::http::validation::{
    parse_document_id, validate_create_user, validate_update_user, validation_failed,
};
use crate::inbound::http::{ApiResult, HttpState};

/// User creation body for `POST /api/users`.
///
/// All fields are optional at the type level so that missing values surface
/// as field errors rather than opaque deserialization failures.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequestBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Partial user update body for `PUT /api/users/{id}`.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequestBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User representation on the wire. The password digest never appears here.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseBody {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponseBody {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// Pagination query parameters, kept as raw text so that unparsable values
/// fall back to defaults instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    page: Option<String>,
    limit: Option<String>,
}

/// Create a user.
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequestBody>,
) -> ApiResult<HttpResponse> {
    let new_user = validate_create_user(payload.into_inner()).map_err(validation_failed)?;
    let created = state.users_command.create_user(new_user).await?;
    Ok(HttpResponse::Created().json(UserResponseBody::from(created)))
}

/// List users, paginated.
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<ListUsersQuery>,
) -> ApiResult<web::Json<PageEnvelope<UserResponseBody>>> {
    let page = pagination::parse_param(query.page.as_deref(), pagination::DEFAULT_PAGE);
    let limit = pagination::parse_param(query.limit.as_deref(), pagination::DEFAULT_LIMIT);
    let envelope = state.users_query.list_users(page, limit).await?;
    Ok(web::Json(envelope.map(UserResponseBody::from)))
}

/// Fetch a single user.
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let id = parse_document_id(&path, "id")?;
    let user = state.users_query.get_user(id).await?;
    Ok(web::Json(user.into()))
}

/// Apply a partial update to a user.
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequestBody>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let id = parse_document_id(&path, "id")?;
    let changes = validate_update_user(payload.into_inner()).map_err(validation_failed)?;
    let updated = state.users_command.update_user(id, changes).await?;
    Ok(web::Json(updated.into()))
}

/// Delete a user.
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_document_id(&path, "id")?;
    state.users_command.delete_user(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockTasksCommand, MockTasksQuery, MockUsersCommand, MockUsersQuery,
    };
    use crate::domain::{DocumentId, Error};
    use actix_web::{App, test as actix_test};
    use chrono::Utc;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn sample_user() -> User {
        User {
            id: DocumentId::generate(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn state(command: MockUsersCommand, query: MockUsersQuery) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            users_command: Arc::new(command),
            users_query: Arc::new(query),
            tasks_command: Arc::new(MockTasksCommand::new()),
            tasks_query: Arc::new(MockTasksQuery::new()),
        })
    }

    fn test_app(
        state: web::Data<HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(state).service(
            web::scope("/api")
                .service(create_user)
                .service(list_users)
                .service(get_user)
                .service(update_user)
                .service(delete_user),
        )
    }

    #[actix_web::test]
    async fn create_user_returns_created_body_without_digest() {
        let mut command = MockUsersCommand::new();
        command
            .expect_create_user()
            .times(1)
            .return_once(|new_user| {
                let mut user = sample_user();
                user.name = new_user.name;
                user.email = new_user.email;
                Ok(user)
            });
        let app = actix_test::init_service(test_app(state(command, MockUsersQuery::new()))).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "secret"
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        assert_eq!(value.get("email").and_then(Value::as_str), Some("ada@example.com"));
        assert!(value.get("password").is_none());
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("createdAt").is_some());
    }

    #[actix_web::test]
    async fn create_user_reports_field_errors_with_bad_request() {
        let mut command = MockUsersCommand::new();
        command.expect_create_user().times(0);
        let app = actix_test::init_service(test_app(state(command, MockUsersQuery::new()))).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "email": "not-an-email" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("Validation failed.")
        );
        let errors = value["details"]["errors"].as_array().expect("errors array");
        let fields: Vec<_> = errors
            .iter()
            .filter_map(|e| e.get("field").and_then(Value::as_str))
            .collect();
        assert_eq!(fields, vec!["name", "email", "password"]);
    }

    #[actix_web::test]
    async fn list_users_forwards_pagination_and_wraps_items() {
        let mut query = MockUsersQuery::new();
        query
            .expect_list_users()
            .withf(|page, limit| (*page, *limit) == (2, 5))
            .times(1)
            .return_once(|page, limit| {
                let request = match pagination::PageRequest::new(page, limit) {
                    Ok(request) => request,
                    Err(_) => panic!("valid pagination"),
                };
                Ok(PageEnvelope::new(vec![sample_user()], 12, request))
            });
        let app =
            actix_test::init_service(test_app(state(MockUsersCommand::new(), query))).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/users?page=2&limit=5")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert!(response.status().is_success());
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        assert_eq!(value.get("total").and_then(Value::as_u64), Some(12));
        assert_eq!(value.get("page").and_then(Value::as_u64), Some(2));
        assert_eq!(value.get("limit").and_then(Value::as_u64), Some(5));
        assert_eq!(value["items"].as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn list_users_defaults_unparsable_pagination_text() {
        let mut query = MockUsersQuery::new();
        query
            .expect_list_users()
            .withf(|page, limit| (*page, *limit) == (1, 10))
            .times(1)
            .return_once(|page, limit| {
                let request = match pagination::PageRequest::new(page, limit) {
                    Ok(request) => request,
                    Err(_) => panic!("valid pagination"),
                };
                Ok(PageEnvelope::new(Vec::new(), 0, request))
            });
        let app =
            actix_test::init_service(test_app(state(MockUsersCommand::new(), query))).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/users?page=abc&limit=ten")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert!(response.status().is_success());
    }

    #[actix_web::test]
    async fn get_user_rejects_malformed_identifier() {
        let app = actix_test::init_service(test_app(state(
            MockUsersCommand::new(),
            MockUsersQuery::new(),
        )))
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/api/users/not-hex")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn delete_user_maps_absence_to_not_found() {
        let mut command = MockUsersCommand::new();
        let mut deleted = false;
        command.expect_delete_user().times(2).returning(move |_| {
            if deleted {
                Err(Error::not_found("User"))
            } else {
                deleted = true;
                Ok(())
            }
        });
        let app = actix_test::init_service(test_app(state(command, MockUsersQuery::new()))).await;

        let uri = format!("/api/users/{}", DocumentId::generate());
        let first = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete().uri(&uri).to_request(),
        )
        .await;
        assert_eq!(first.status(), actix_web::http::StatusCode::NO_CONTENT);

        let second = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete().uri(&uri).to_request(),
        )
        .await;
        assert_eq!(second.status(), actix_web::http::StatusCode::NOT_FOUND);
        let body = actix_test::read_body(second).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("User not found.")
        );
    }

    #[actix_web::test]
    async fn update_user_returns_updated_record() {
        let mut command = MockUsersCommand::new();
        command
            .expect_update_user()
            .withf(|_, changes| changes.name.as_deref() == Some("Grace"))
            .times(1)
            .return_once(|_, changes| {
                let mut user = sample_user();
                if let Some(name) = changes.name {
                    user.name = name;
                }
                Ok(user)
            });
        let app = actix_test::init_service(test_app(state(command, MockUsersQuery::new()))).await;

        let request = actix_test::TestRequest::put()
            .uri(&format!("/api/users/{}", DocumentId::generate()))
            .set_json(json!({ "name": "Grace" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert!(response.status().is_success());
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        assert_eq!(value.get("name").and_then(Value::as_str), Some("Grace"));
    }
}
