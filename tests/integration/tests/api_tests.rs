//! API Integration Tests
//!
//! The server runs over in-memory repositories, so no external services are
//! needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_redirect, assert_status, fixtures::*, session_cookie,
    test_config_with, TestServer,
};
use reqwest::StatusCode;
use userbind_core::{StudentInvite, UserId, INVITE_CODE_LEN};

fn scoreboard_row(
    rank: u32,
    user_id: UserId,
    handle: &str,
    score: i64,
) -> userbind_core::ScoreboardRow {
    userbind_core::ScoreboardRow::new(rank, user_id, handle.to_string(), score, 1)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/no/such/page").await.expect("Request failed");
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND")
        .await
        .unwrap();
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_first_registered_account_is_admin() {
    let server = TestServer::start().await.expect("Failed to start server");

    let first: AuthResponse = assert_json(
        server
            .post("/register", &RegisterRequest::new("founder"))
            .await
            .unwrap(),
        StatusCode::CREATED,
    )
    .await
    .unwrap();
    let second: AuthResponse = assert_json(
        server
            .post("/register", &RegisterRequest::new("newcomer"))
            .await
            .unwrap(),
        StatusCode::CREATED,
    )
    .await
    .unwrap();

    assert_eq!(first.token_type, "Bearer");
    assert_ne!(first.user.privileges & 0b10, 0);
    assert_eq!(second.user.privileges & 0b10, 0);
}

#[tokio::test]
async fn test_register_duplicate_handle() {
    let server = TestServer::start().await.expect("Failed to start server");
    server
        .post("/register", &RegisterRequest::new("twin"))
        .await
        .unwrap();

    let response = server
        .post("/register", &RegisterRequest::new("twin"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (user, _) = server.user("regular", false).await.unwrap();

    let response = server
        .post(
            "/login",
            &LoginRequest {
                handle: user.handle.clone(),
                password: server.password().to_string(),
            },
        )
        .await
        .unwrap();
    let sid = session_cookie(&response).expect("sid cookie");

    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.id, user.id.into_inner());
    assert_eq!(sid, auth.access_token);

    // The cookie alone authenticates
    let settings = server
        .get_cookie(&format!("/user/{}/settings", user.id), &sid)
        .await
        .unwrap();
    assert_status(settings, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (user, _) = server.user("regular", false).await.unwrap();

    let response = server
        .post(
            "/login",
            &LoginRequest {
                handle: user.handle,
                password: "not-the-password1".to_string(),
            },
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_login_of_unbound_student_redirects_to_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (student, _) = server.user("pupil", true).await.unwrap();

    let response = server
        .post(
            "/login",
            &LoginRequest {
                handle: student.handle,
                password: server.password().to_string(),
            },
        )
        .await
        .unwrap();

    assert_redirect(&response, "/user-bind/check").unwrap();
    assert!(session_cookie(&response).is_some());
}

#[tokio::test]
async fn test_logout_requires_session() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server.user("leaving", true).await.unwrap();

    let anonymous = server.post_empty("/logout", None).await.unwrap();
    assert_status(anonymous, StatusCode::UNAUTHORIZED).await.unwrap();

    // Unbound students may still log out
    let response = server.post_empty("/logout", Some(&token)).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Binding Gate Tests
// ============================================================================

#[tokio::test]
async fn test_gate_redirects_unbound_student() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server.user("pupil", true).await.unwrap();

    let response = server.get_auth("/contest/1/scoreboard", &token).await.unwrap();
    assert_redirect(&response, "/user-bind/check").unwrap();

    let response = server.get_cookie("/", &token).await.unwrap();
    assert_redirect(&response, "/user-bind/check").unwrap();
}

#[tokio::test]
async fn test_gate_exempts_binding_paths() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server.user("pupil", true).await.unwrap();

    // Reaches the handler: an unknown code is a 404, not a redirect
    let response = server.get_auth("/user-bind/anycode", &token).await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "UNKNOWN_INVITE")
        .await
        .unwrap();

    let response = server.get_auth("/api/settings/account", &token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_gate_passes_other_users() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server.user("regular", false).await.unwrap();

    let anonymous = server.get("/contest/1/scoreboard").await.unwrap();
    assert_status(anonymous, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/contest/1/scoreboard", &token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_check_page_outcomes() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (student, student_token) = server.user("pupil", true).await.unwrap();
    let (_, regular_token) = server.user("regular", false).await.unwrap();

    let anonymous = server.get("/user-bind/check").await.unwrap();
    assert_redirect(&anonymous, "/login").unwrap();

    let required: BindingRequiredResponse = assert_json(
        server
            .get_auth("/user-bind/check", &student_token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(required.binding_required);
    assert_eq!(required.user.id, student.id.into_inner());
    assert!(!required.user.is_bound);

    let regular = server
        .get_auth("/user-bind/check", &regular_token)
        .await
        .unwrap();
    assert_redirect(&regular, "/").unwrap();
}

// ============================================================================
// Invite Management Tests
// ============================================================================

#[tokio::test]
async fn test_manage_requires_privilege() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server.user("regular", false).await.unwrap();

    let anonymous = server.get("/user-bind/manage").await.unwrap();
    assert_error(anonymous, StatusCode::FORBIDDEN, "MISSING_PRIVILEGE")
        .await
        .unwrap();

    let response = server.get_auth("/user-bind/manage", &token).await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "MISSING_PRIVILEGE")
        .await
        .unwrap();

    let response = server
        .post_auth(
            "/user-bind/manage",
            &CreateInviteRequest::new("S001", "Alice"),
            &token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_create_invite() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server.admin("staff").await.unwrap();

    let invite: InviteResponse = assert_json(
        server
            .post_auth(
                "/user-bind/manage",
                &CreateInviteRequest::new(" S001 ", "Alice Lee"),
                &token,
            )
            .await
            .unwrap(),
        StatusCode::CREATED,
    )
    .await
    .unwrap();

    assert_eq!(invite.code.len(), INVITE_CODE_LEN);
    assert_eq!(invite.student_id, "S001");
    assert_eq!(invite.student_name, "Alice Lee");
    assert!(!invite.used);
    assert_eq!(server.fixture.invites.len(), 1);
}

#[tokio::test]
async fn test_create_invite_rejects_blank_fields() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server.admin("staff").await.unwrap();

    let response = server
        .post_auth(
            "/user-bind/manage",
            &CreateInviteRequest::new("S001", "   "),
            &token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(server.fixture.invites.is_empty());
}

#[tokio::test]
async fn test_manage_pagination() {
    let config = test_config_with(&[("INVITE_PAGE_SIZE", "50")]).unwrap();
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");
    let (_, token) = server.admin("staff").await.unwrap();

    for i in 0..120 {
        server.seed_invite(StudentInvite::new(
            format!("code{i:04}"),
            format!("S{i:04}"),
            format!("Student {i}"),
        ));
    }

    let page: ManageInvitesResponse = assert_json(
        server
            .get_auth("/user-bind/manage?page=2", &token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(page.page, 2);
    assert_eq!(page.page_count, 3);
    assert_eq!(page.total, 120);
    assert_eq!(page.invites.len(), 50);

    let last: ManageInvitesResponse = assert_json(
        server
            .get_auth("/user-bind/manage?page=3", &token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(last.invites.len(), 20);

    // Out-of-range pages clamp to the first page
    let clamped: ManageInvitesResponse = assert_json(
        server
            .get_auth("/user-bind/manage?page=0", &token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(clamped.page, 1);
}

#[tokio::test]
async fn test_manage_shows_redeemer() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, admin_token) = server.admin("staff").await.unwrap();
    let (student, student_token) = server.user("pupil", true).await.unwrap();
    server.seed_invite(StudentInvite::new(
        "redeemedcode".to_string(),
        "S001".to_string(),
        "Alice".to_string(),
    ));

    let redeem = server
        .post_empty("/user-bind/redeemedcode", Some(&student_token))
        .await
        .unwrap();
    assert_redirect(&redeem, "/").unwrap();

    let page: ManageInvitesResponse = assert_json(
        server
            .get_auth("/user-bind/manage", &admin_token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let row = &page.invites[0];
    assert!(row.invite.used);
    assert_eq!(row.invite.used_by, Some(student.id.into_inner()));
    let redeemer = row.used_by_user.as_ref().expect("redeemer resolved");
    assert_eq!(redeemer.handle, "pupil");
}

#[tokio::test]
async fn test_delete_invite_redirects_to_manage() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server.admin("staff").await.unwrap();
    server.seed_invite(StudentInvite::new(
        "doomed".to_string(),
        "S001".to_string(),
        "Alice".to_string(),
    ));

    let response = server
        .post_empty("/user-bind/delete/doomed", Some(&token))
        .await
        .unwrap();
    assert_redirect(&response, "/user-bind/manage").unwrap();
    assert!(server.fixture.invites.is_empty());

    // Deleting again is not an error
    let again = server
        .post_empty("/user-bind/delete/doomed", Some(&token))
        .await
        .unwrap();
    assert_redirect(&again, "/user-bind/manage").unwrap();
}

#[tokio::test]
async fn test_import_creates_invites_per_line() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server.admin("staff").await.unwrap();

    let form = server.get_auth("/user-bind/import", &token).await.unwrap();
    assert_status(form, StatusCode::OK).await.unwrap();

    let response: ImportResponse = assert_json(
        server
            .post_auth(
                "/user-bind/import",
                &ImportRequest {
                    text: "S001 Alice Lee\nbadline\nS002 Bob".to_string(),
                },
                &token,
            )
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();

    assert_eq!(response.succeeded, 2);
    assert_eq!(response.failed, 0);
    assert_eq!(response.results.len(), 2);
    assert_eq!(response.results[0].student_id, "S001");
    assert_eq!(response.results[0].student_name, "Alice Lee");
    assert!(response.results.iter().all(|r| r.success && r.code.is_some()));
    assert_eq!(server.fixture.invites.len(), 2);
}

// ============================================================================
// Redemption Tests
// ============================================================================

#[tokio::test]
async fn test_redeem_binds_student() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (student, token) = server.user("pupil", true).await.unwrap();
    server.seed_invite(StudentInvite::new(
        "welcome".to_string(),
        "S001".to_string(),
        "Alice Lee".to_string(),
    ));

    let confirm: RedeemConfirmResponse = assert_json(
        server.get_auth("/user-bind/welcome", &token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(confirm.code, "welcome");
    assert_eq!(confirm.student_name, "Alice Lee");
    assert!(confirm.can_redeem);

    let response = server
        .post_empty("/user-bind/welcome", Some(&token))
        .await
        .unwrap();
    assert_redirect(&response, "/").unwrap();

    // The gate now lets the student through
    let home = server.get_auth("/", &token).await.unwrap();
    assert_status(home, StatusCode::OK).await.unwrap();

    let settings: AccountSettingsResponse = assert_json(
        server
            .get_auth(&format!("/user/{}/settings", student.id), &token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(settings.student_id, "S001");
    assert_eq!(settings.student_name, "Alice Lee");
    assert!(settings.is_school_student);
}

#[tokio::test]
async fn test_redeem_twice_is_refused() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, first) = server.user("first", true).await.unwrap();
    let (_, second) = server.user("second", true).await.unwrap();
    server.seed_invite(StudentInvite::new(
        "onceonly".to_string(),
        "S001".to_string(),
        "Alice".to_string(),
    ));

    let response = server
        .post_empty("/user-bind/onceonly", Some(&first))
        .await
        .unwrap();
    assert_redirect(&response, "/").unwrap();

    let response = server
        .post_empty("/user-bind/onceonly", Some(&second))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "INVITE_ALREADY_USED")
        .await
        .unwrap();

    // The loser is still gated
    let gated = server.get_auth("/", &second).await.unwrap();
    assert_redirect(&gated, "/user-bind/check").unwrap();
}

#[tokio::test]
async fn test_redeem_when_already_bound() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server.user("pupil", true).await.unwrap();
    for code in ["first", "second"] {
        server.seed_invite(StudentInvite::new(
            code.to_string(),
            format!("S-{code}"),
            "Alice".to_string(),
        ));
    }

    let response = server.post_empty("/user-bind/first", Some(&token)).await.unwrap();
    assert_redirect(&response, "/").unwrap();

    let response = server.get_auth("/user-bind/second", &token).await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "ALREADY_BOUND")
        .await
        .unwrap();
    let response = server.post_empty("/user-bind/second", Some(&token)).await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "ALREADY_BOUND")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_redeem_anonymous() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.seed_invite(StudentInvite::new(
        "public".to_string(),
        "S001".to_string(),
        "Alice".to_string(),
    ));

    let confirm: RedeemConfirmResponse = assert_json(
        server.get("/user-bind/public").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(!confirm.can_redeem);

    let response = server.post_empty("/user-bind/public", None).await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "NOT_LOGGED_IN")
        .await
        .unwrap();
}

// ============================================================================
// View Hook Tests
// ============================================================================

#[tokio::test]
async fn test_user_detail_shows_bind_block_for_students() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (student, token) = server.user("pupil", true).await.unwrap();
    let (regular, _) = server.user("regular", false).await.unwrap();

    let unbound: UserDetailResponse = assert_json(
        server
            .get(&format!("/user/{}", student.id))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let bind = unbound.bind.expect("bind block for flagged users");
    assert!(!bind.is_bound);

    server.seed_invite(StudentInvite::new(
        "welcome".to_string(),
        "S001".to_string(),
        "Alice".to_string(),
    ));
    server
        .post_empty("/user-bind/welcome", Some(&token))
        .await
        .unwrap();

    let bound: UserDetailResponse = assert_json(
        server
            .get(&format!("/user/{}", student.id))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let bind = bound.bind.expect("bind block for flagged users");
    assert!(bind.is_bound);
    assert_eq!(bind.student_id, "S001");

    let plain: UserDetailResponse = assert_json(
        server
            .get(&format!("/user/{}", regular.id))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(plain.bind.is_none());
}

#[tokio::test]
async fn test_scoreboard_real_names_for_admins_only() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, admin_token) = server.admin("staff").await.unwrap();
    let (student, student_token) = server.user("pupil", true).await.unwrap();
    let (regular, regular_token) = server.user("regular", false).await.unwrap();

    server.seed_invite(StudentInvite::new(
        "welcome".to_string(),
        "S001".to_string(),
        "Alice".to_string(),
    ));
    server
        .post_empty("/user-bind/welcome", Some(&student_token))
        .await
        .unwrap();
    server.seed_scoreboard(
        7,
        vec![
            scoreboard_row(1, student.id, "pupil", 300),
            scoreboard_row(2, regular.id, "regular", 200),
        ],
    );

    let admin_view: ScoreboardResponse = assert_json(
        server
            .get_auth("/contest/7/scoreboard", &admin_token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(admin_view.contest_id, 7);
    assert_eq!(
        admin_view.rows[0].user.display_name.as_deref(),
        Some("Alice(pupil)")
    );
    assert!(admin_view.rows[1].user.display_name.is_none());

    let plain_view: ScoreboardResponse = assert_json(
        server
            .get_auth("/contest/7/scoreboard", &regular_token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(plain_view.rows.iter().all(|r| r.user.display_name.is_none()));
    assert_eq!(plain_view.rows[0].rank, 1);
    assert_eq!(plain_view.rows[0].score, 300);
}

// ============================================================================
// Settings Tests
// ============================================================================

#[tokio::test]
async fn test_settings_access() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, owner_token) = server.user("owner", false).await.unwrap();
    let (_, other_token) = server.user("other", false).await.unwrap();
    let (_, admin_token) = server.admin("staff").await.unwrap();
    let path = format!("/user/{}/settings", owner.id);

    let updated: AccountSettingsResponse = assert_json(
        server
            .patch_auth(
                &path,
                &UpdateSettingsRequest {
                    student_name: Some(" Owen ".to_string()),
                    ..Default::default()
                },
                &owner_token,
            )
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(updated.user_id, owner.id.into_inner());
    assert_eq!(updated.student_name, "Owen");

    let response = server.get_auth(&path, &other_token).await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "MISSING_PRIVILEGE")
        .await
        .unwrap();

    let response = server.get_auth(&path, &admin_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_settings_registry_lists_identity_fields() {
    let server = TestServer::start().await.expect("Failed to start server");
    let body: serde_json::Value = assert_json(
        server.get("/api/settings/account").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();

    let keys: Vec<&str> = body["settings"]
        .as_array()
        .expect("settings array")
        .iter()
        .filter_map(|s| s["key"].as_str())
        .collect();
    assert!(keys.contains(&"student_id"));
    assert!(keys.contains(&"student_name"));
    assert!(keys.contains(&"is_school_student"));
}
