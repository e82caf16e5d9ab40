mod common;

use common::{anonymous, logged_in, page, student};
use serde_json::json;
use student_records::router::Route;
use student_records::students::{Level, SortDirection};
use student_records::views::{LoadState, NOT_FOUND_MESSAGE, UNAUTHORIZED_MESSAGE};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_login_rejected_shows_message_and_stays() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "alice", "password": "bad"})))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Unauthorized",
            "message": "Bad credentials"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let records = anonymous(&server.uri());
    let before = records.router().current();
    let view = records.login_view();
    view.set_field("username", "alice");
    view.set_field("password", "bad");
    view.submit().await;

    assert_eq!(
        view.state().get().error_message(),
        Some("Invalid username or password")
    );
    assert_eq!(records.router().current(), before);
    assert!(!records.auth().is_authenticated());
}

#[tokio::test]
async fn test_login_with_empty_form_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let records = anonymous(&server.uri());
    let view = records.login_view();
    view.set_field("username", "alice");
    view.submit().await;

    let form = view.form().get();
    assert_eq!(
        form.get("password").unwrap().visible_error().as_deref(),
        Some("Password is required")
    );
    assert_eq!(view.state().get(), LoadState::Idle);
}

#[tokio::test]
async fn test_login_returns_to_blocked_route() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "tok",
            "tokenType": "Bearer"
        })))
        .mount(&server)
        .await;

    let records = anonymous(&server.uri());
    let redirected = records.router().navigate(Route::StudentEdit(4));
    assert_eq!(
        redirected,
        Route::Login {
            return_url: Some("/students/4/edit".to_string())
        }
    );

    let view = records.login_view();
    assert_eq!(view.return_url(), Some("/students/4/edit"));
    view.set_field("username", "alice");
    view.set_field("password", "secret");
    view.submit().await;

    assert_eq!(view.state().get(), LoadState::Success);
    assert_eq!(records.router().current(), Route::StudentEdit(4));
}

#[tokio::test]
async fn test_register_shows_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "status": 409,
            "message": "Admin with username 'alice' already exists"
        })))
        .mount(&server)
        .await;

    let records = anonymous(&server.uri());
    let view = records.register_view();
    view.set_field("username", "alice");
    view.set_field("password", "pw");
    view.submit().await;

    assert_eq!(
        view.state().get().error_message(),
        Some("Admin with username 'alice' already exists")
    );
    assert!(!records.auth().is_authenticated());
}

#[tokio::test]
async fn test_create_navigates_to_new_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/students"))
        .and(body_json(json!({"username": "bob", "level": "MASTER"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(student(42, "bob", "MASTER")))
        .expect(1)
        .mount(&server)
        .await;

    let records = logged_in(&server.uri());
    let view = records.create_view();
    view.set_field("username", "bob");
    view.set_field("level", "MASTER");
    view.submit().await;

    assert_eq!(view.state().get(), LoadState::Success);
    assert_eq!(records.router().current(), Route::StudentDetail(42));
}

#[tokio::test]
async fn test_create_shows_field_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": 400,
            "errors": {"username": "Username already taken"}
        })))
        .mount(&server)
        .await;

    let records = logged_in(&server.uri());
    let view = records.create_view();
    view.set_field("username", "bob");
    view.set_field("level", "PHD");
    view.submit().await;

    assert_eq!(
        view.field_errors().get().get("username").map(String::as_str),
        Some("Username already taken")
    );
    assert_eq!(view.state().get(), LoadState::Idle);
    assert_eq!(records.router().current(), Route::StudentList);
}

#[tokio::test]
async fn test_create_generic_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let records = logged_in(&server.uri());
    let view = records.create_view();
    view.set_field("username", "bob");
    view.set_field("level", "PHD");
    view.submit().await;

    assert_eq!(
        view.state().get().error_message(),
        Some("Failed to create student. Please try again.")
    );
}

#[tokio::test]
async fn test_edit_submit_requires_a_change() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(student(5, "carol", "MASTER")))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/students/5"))
        .and(body_json(json!({"username": "carol", "level": "PHD"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(student(5, "carol", "PHD")))
        .expect(1)
        .mount(&server)
        .await;

    let records = logged_in(&server.uri());
    let view = records.edit_view(5);
    assert!(!view.can_submit());

    view.load().await;
    assert_eq!(view.page_state().get(), LoadState::Success);
    assert_eq!(view.form().get().value("username"), "carol");
    assert!(!view.is_dirty());
    assert!(!view.can_submit());

    // Unchanged submissions are ignored.
    view.submit().await;
    assert_eq!(view.state().get(), LoadState::Idle);

    view.set_field("level", "PHD");
    assert!(view.can_submit());
    view.set_field("level", "MASTER");
    assert!(!view.can_submit());

    view.set_field("username", "");
    assert!(view.is_dirty());
    assert!(!view.can_submit());

    view.set_field("username", "carol");
    view.set_field("level", "PHD");
    view.submit().await;

    assert_eq!(view.state().get(), LoadState::Success);
    assert_eq!(records.router().current(), Route::StudentDetail(5));
}

#[tokio::test]
async fn test_edit_missing_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students/77"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let records = logged_in(&server.uri());
    let view = records.edit_view(77);
    view.load().await;

    assert_eq!(view.page_state().get().error_message(), Some(NOT_FOUND_MESSAGE));
    assert!(view.original().get().is_none());
}

#[tokio::test]
async fn test_detail_delete_returns_to_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(student(9, "ivy", "BACHELOR")))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/students/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let records = logged_in(&server.uri());
    records.router().navigate(Route::StudentDetail(9));

    let view = records.detail_view(9);
    view.load().await;
    assert_eq!(view.student().get().unwrap().username, "ivy");

    view.open_delete();
    assert!(view.delete_modal().get().open);
    view.confirm_delete().await;

    assert_eq!(records.router().current(), Route::StudentList);
}

#[tokio::test]
async fn test_detail_unauthorized_does_not_log_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students/9"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let records = logged_in(&server.uri());
    let view = records.detail_view(9);
    view.load().await;

    assert_eq!(view.state().get().error_message(), Some(UNAUTHORIZED_MESSAGE));
    assert!(records.auth().is_authenticated());
}

#[tokio::test]
async fn test_list_delete_success_reloads() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![student(7, "gus", "PHD"), student(8, "hal", "MASTER")],
            0,
            2,
        )))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/students/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let records = logged_in(&server.uri());
    let view = records.list_view();
    view.load().await;

    let target = view.students().get()[0].clone();
    view.open_delete(target);
    assert_eq!(
        view.delete_modal().get().message(),
        "Are you sure you want to delete student 'gus'? This action cannot be undone."
    );

    view.confirm_delete().await;

    let modal = view.delete_modal().get();
    assert!(!modal.open);
    assert!(!modal.in_progress);
    assert_eq!(view.state().get(), LoadState::Success);
}

#[tokio::test]
async fn test_list_delete_failure_keeps_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(vec![student(7, "gus", "PHD")], 0, 1)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/students/7"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let records = logged_in(&server.uri());
    let view = records.list_view();
    view.load().await;

    let target = view.students().get()[0].clone();
    view.open_delete(target);
    view.confirm_delete().await;

    assert!(!view.delete_modal().get().open);
    assert_eq!(
        view.state().get().error_message(),
        Some("Failed to delete student. Please try again.")
    );
    assert_eq!(view.students().get().len(), 1);
}

#[tokio::test]
async fn test_list_search_takes_precedence_over_level() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students/level/MASTER"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(vec![student(2, "max", "MASTER")], 0, 1)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/students/search"))
        .and(query_param("query", "jo"))
        .and(query_param("page", "0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(vec![student(1, "john", "BACHELOR")], 0, 1)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let records = logged_in(&server.uri());
    let view = records.list_view();
    view.select_level(Some(Level::Master)).await;
    assert_eq!(view.filters().get().level, Some(Level::Master));

    view.set_search_query("jo");
    view.search().await;

    let filters = view.filters().get();
    assert_eq!(filters.level, None);
    assert_eq!(filters.search_query, "jo");
    assert_eq!(view.students().get()[0].username, "john");
}

#[tokio::test]
async fn test_list_page_resets() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .and(query_param("page", "2"))
        .and(query_param("sortDirection", "ASC"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(vec![student(21, "u21", "PHD")], 2, 30)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .and(query_param("page", "2"))
        .and(query_param("sortDirection", "DESC"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(vec![student(9, "u9", "PHD")], 2, 30)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .and(query_param("page", "0"))
        .and(query_param("sortBy", "username"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(vec![student(1, "aaa", "PHD")], 0, 30)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let records = logged_in(&server.uri());
    let view = records.list_view();

    view.go_to_page(2).await;
    assert_eq!(view.page_info().get().number, 2);

    view.toggle_sort_direction().await;
    assert_eq!(view.page_info().get().number, 2);
    assert_eq!(view.filters().get().sort_direction, SortDirection::Desc);

    view.set_sort_by("username").await;
    assert_eq!(view.page_info().get().number, 0);
    assert_eq!(view.students().get()[0].username, "aaa");
}

#[tokio::test]
async fn test_list_load_failure_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let records = logged_in(&server.uri());
    let view = records.list_view();
    view.load().await;

    assert_eq!(
        view.state().get().error_message(),
        Some("Failed to load students. Please try again.")
    );
    assert!(view.is_empty());
}

#[tokio::test]
async fn test_detail_delete_requires_open_modal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(student(9, "ivy", "BACHELOR")))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/students/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let records = logged_in(&server.uri());
    records.router().navigate(Route::StudentDetail(9));

    let view = records.detail_view(9);
    view.load().await;

    view.confirm_delete().await;
    assert_eq!(records.router().current(), Route::StudentDetail(9));

    view.open_delete();
    view.close_delete();
    let modal = view.delete_modal().get();
    assert!(!modal.open);
    assert!(modal.target.is_none());

    view.confirm_delete().await;
    assert_eq!(records.router().current(), Route::StudentDetail(9));
}

#[tokio::test]
async fn test_detail_delete_failure_stays_on_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(student(9, "ivy", "BACHELOR")))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/students/9"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let records = logged_in(&server.uri());
    records.router().navigate(Route::StudentDetail(9));

    let view = records.detail_view(9);
    view.load().await;
    view.open_delete();
    view.confirm_delete().await;

    let modal = view.delete_modal().get();
    assert!(!modal.open);
    assert!(!modal.in_progress);
    assert_eq!(view.state().get().error_message(), Some("Failed to delete student."));
    assert_eq!(records.router().current(), Route::StudentDetail(9));
}

#[tokio::test]
async fn test_list_level_and_search_return_to_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(vec![student(21, "u21", "PHD")], 2, 30)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/students/level/PHD"))
        .and(query_param("page", "0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(vec![student(3, "pia", "PHD")], 0, 25)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/students/level/PHD"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(vec![student(23, "pat", "PHD")], 2, 25)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/students/search"))
        .and(query_param("query", "pa"))
        .and(query_param("page", "0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(vec![student(23, "pat", "PHD")], 0, 1)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let records = logged_in(&server.uri());
    let view = records.list_view();

    view.go_to_page(2).await;
    assert_eq!(view.page_info().get().number, 2);

    view.select_level(Some(Level::Phd)).await;
    assert_eq!(view.page_info().get().number, 0);
    assert_eq!(view.students().get()[0].username, "pia");

    view.go_to_page(2).await;
    assert_eq!(view.page_info().get().number, 2);

    view.set_search_query("pa");
    view.search().await;
    assert_eq!(view.page_info().get().number, 0);
    assert_eq!(view.filters().get().level, None);
    assert_eq!(view.state().get(), LoadState::Success);
}

#[tokio::test]
async fn test_list_reset_filters_restores_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .and(query_param("sortBy", "username"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![], 0, 0)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/students/level/MASTER"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(vec![student(2, "max", "MASTER")], 1, 12)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .and(query_param("page", "0"))
        .and(query_param("sortBy", "id"))
        .and(query_param("sortDirection", "ASC"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(vec![student(1, "ann", "BACHELOR")], 0, 1)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let records = logged_in(&server.uri());
    let view = records.list_view();

    view.set_sort_by("username").await;
    view.toggle_sort_direction().await;
    view.select_level(Some(Level::Master)).await;
    view.go_to_page(1).await;
    assert_eq!(view.page_info().get().number, 1);

    view.reset_filters().await;

    let filters = view.filters().get();
    assert!(filters.search_query.is_empty());
    assert_eq!(filters.level, None);
    assert_eq!(filters.sort_by, "id");
    assert_eq!(filters.sort_direction, SortDirection::Asc);
    assert_eq!(view.page_info().get().number, 0);
    assert_eq!(view.students().get()[0].username, "ann");
}
