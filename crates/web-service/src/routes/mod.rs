//! 路由入口
//!
//! 提供 [`create_app_router`] 函数，导出当前App的所有路由。
//!
//! 用户可以在导出路由时传入共享数据 shared_state，这样所有路由函数都可以访问。

use crate::AppState;
use axum::Router;
use projects::*;
use sprints::*;
use users::*;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_scalar::{Scalar, Servable};

pub mod projects;
pub mod sprints;
pub mod users;

/// 健康检查
#[utoipa::path(get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = String)
    )
)]
pub async fn health() -> &'static str {
    "OK"
}

/// 导出当前App的所有业务路由
///
/// ## 参数定义
/// - state: 共享数据，参考 [`AppState`] 定义。存放各个服务的实现。
///
/// ## **❗️注意事项：**
///
/// 由于 [`routes!`] 宏限制，在同一个宏里面不能同时定义多个相同类型的http接口。
/// 不能这样定义：
///
/// ```text
/// routes!(get, get, post)
/// ```
///
/// 这样会导致Panic
///
/// 需要按路径拆开定义
///
/// ```text
/// routes!(get, post)
/// .routes!(get)
/// ```
///
fn routers(state: AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(find_projects, create_project))
        .routes(routes!(get_project, update_project, delete_project))
        .routes(routes!(get_project_members, add_project_member))
        .routes(routes!(find_project_sprints))
        .routes(routes!(find_sprints, create_sprint))
        .routes(routes!(get_sprint, update_sprint, delete_sprint))
        .routes(routes!(find_users, create_user))
        .routes(routes!(get_user, update_user, delete_user))
        .routes(routes!(find_user_by_email))
        .with_state(state)
}

/// 创建当前App的路由
///
/// 完成以下功能：
/// - 生成OpenAPI文档
/// - 生成App路由
/// - 使用Scalar作为最终在线文档格式
///
/// 由于使用了 `utoipa` 库来自动化生成`openapi`文档，因此我们没有使用原生的 [`Router`]，而是使用了
/// [`OpenApiRouter`] 。
pub fn create_app_router(shared_state: AppState) -> Router {
    // 当前项目的OpenAPI声明
    #[derive(OpenApi)]
    #[openapi(
        tags(
            (name = "projects", description = "项目与项目成员"),
            (name = "sprints", description = "迭代"),
            (name = "users", description = "用户"),
        ),
    )]
    struct ApiDoc;

    // 使用`utoipa_axum`提供的OpenApiRouter来创建路由。
    // 最终拿到的变量：
    // - router: Axum的Router，实际的路由对象
    // - api: utoipa的OpenApi，生成的OpenAPI对象
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(health))
        .nest("/api/v1", routers(shared_state))
        .split_for_parts();

    // 合并文档路由，用户可通过 /docs 访问文档网页地址
    router.merge(Scalar::with_url("/docs", api))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_app_state, MemoryStore};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_app_router(memory_app_state(&MemoryStore::new()))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, _) = send(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_resources_are_404() {
        let app = app();

        for uri in [
            "/api/v1/projects/1",
            "/api/v1/projects/1/members",
            "/api/v1/projects/1/sprints",
            "/api/v1/sprints/1",
            "/api/v1/users/1",
            "/api/v1/users/by-email/nobody@example.com",
        ] {
            let (status, _) = send(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn project_lifecycle() {
        let app = app();

        let project = json!({ "name": "apollo", "budget": 10.5 });
        let (status, body) = send(&app, "POST", "/api/v1/projects", Some(project)).await;
        assert_eq!(status, StatusCode::OK);
        let id = body["data"]["id"].as_i64().unwrap();
        assert_eq!(body["data"]["deleted"], json!(false));
        assert_eq!(body["data"]["creation_date"], body["data"]["last_update"]);

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/v1/projects/{id}"),
            Some(json!({ "name": "artemis" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], json!("artemis"));
        assert_eq!(body["data"]["budget"], Value::Null);

        let (status, body) = send(&app, "DELETE", &format!("/api/v1/projects/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["deleted"], json!(true));

        let (_, body) = send(&app, "GET", "/api/v1/projects", None).await;
        assert_eq!(body["total"], json!(1));
    }

    #[tokio::test]
    async fn moving_project_to_another_workspace_returns_new_workspace() {
        let store = MemoryStore::new();
        let alpha = store.insert_workspace("alpha");
        let beta = store.insert_workspace("beta");
        let app = create_app_router(memory_app_state(&store));

        let project = json!({ "name": "apollo", "workspace_id": alpha });
        let (_, body) = send(&app, "POST", "/api/v1/projects", Some(project)).await;
        let id = body["data"]["id"].as_i64().unwrap();
        assert_eq!(body["data"]["workspace"]["name"], json!("alpha"));

        let update = json!({ "name": "apollo", "workspace_id": beta });
        let (status, put) = send(&app, "PUT", &format!("/api/v1/projects/{id}"), Some(update)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(put["data"]["workspace"], json!({ "id": beta, "name": "beta" }));

        let (_, get) = send(&app, "GET", &format!("/api/v1/projects/{id}"), None).await;
        assert_eq!(put["data"]["workspace"], get["data"]["workspace"]);

        let update = json!({ "name": "apollo" });
        let (_, cleared) = send(&app, "PUT", &format!("/api/v1/projects/{id}"), Some(update)).await;
        assert_eq!(cleared["data"]["workspace"], Value::Null);
    }

    #[tokio::test]
    async fn members_can_be_added_and_listed() {
        let app = app();
        let (_, project) = send(&app, "POST", "/api/v1/projects", Some(json!({ "name": "apollo" }))).await;
        let project_id = project["data"]["id"].as_i64().unwrap();
        let (_, user) = send(
            &app,
            "POST",
            "/api/v1/users",
            Some(json!({ "email": "alice@example.com", "password": "wonderland" })),
        )
        .await;
        let user_id = user["data"]["id"].as_i64().unwrap();

        let members_uri = format!("/api/v1/projects/{project_id}/members");
        let (status, _) = send(&app, "POST", &members_uri, Some(json!({ "user_id": user_id + 100 }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "POST", &members_uri, Some(json!({ "user_id": user_id }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["user"]["name"], json!("alice"));
        assert_eq!(body["data"]["project"]["name"], json!("apollo"));

        let (_, body) = send(&app, "GET", &members_uri, None).await;
        assert_eq!(body["total"], json!(1));
    }

    #[tokio::test]
    async fn invalid_payloads_are_400() {
        let app = app();

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/users",
            Some(json!({ "email": "not-an-email", "password": "wonderland" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "POST", "/api/v1/projects", Some(json!({ "name": "" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn duplicate_email_is_400() {
        let app = app();
        let user = json!({ "email": "carol@example.com", "password": "wonderland" });

        let (status, _) = send(&app, "POST", "/api/v1/users", Some(user.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "POST", "/api/v1/users", Some(user)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn user_response_hides_password() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/users",
            Some(json!({ "email": "bob@example.com", "password": "builder99" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], json!("bob"));
        assert!(body["data"].get("password").is_none());

        let (status, body) = send(&app, "GET", "/api/v1/users/by-email/bob@example.com", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["email"], json!("bob@example.com"));
    }

    #[tokio::test]
    async fn sprints_are_listed_per_project() {
        let app = app();
        let (_, project) = send(&app, "POST", "/api/v1/projects", Some(json!({ "name": "apollo" }))).await;
        let project_id = project["data"]["id"].as_i64().unwrap();

        for name in ["s1", "s2"] {
            let sprint = json!({ "name": name, "project_id": project_id });
            let (status, _) = send(&app, "POST", "/api/v1/sprints", Some(sprint)).await;
            assert_eq!(status, StatusCode::OK);
        }
        send(&app, "POST", "/api/v1/sprints", Some(json!({ "name": "orphan" }))).await;

        let (_, body) = send(&app, "GET", &format!("/api/v1/projects/{project_id}/sprints"), None).await;
        assert_eq!(body["total"], json!(2));

        let (_, body) = send(&app, "GET", "/api/v1/sprints", None).await;
        assert_eq!(body["total"], json!(3));
    }
}
