//! Integration tests per il livre d'or
//!
//! Test per:
//! - POST /guestbook, GET /guestbook
//! - GET /admin/guestbook, approve/reject/delete
//! - GET /admin/guestbook/export

mod common;

#[cfg(test)]
mod guestbook_tests {
    use super::common::*;
    use axum::http::StatusCode;
    use rsvp_server::dtos::{CreateGuestbookMessageDTO, WsEventDTO};
    use rsvp_server::repositories::Create;
    use serde_json::{Value, json};

    async fn post_message(server: &axum_test::TestServer, author: &str) -> i64 {
        let response = server
            .post("/guestbook")
            .json(&json!({ "author_name": author, "message": "Tous nos voeux de bonheur !" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        created["message_id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_new_message_is_hidden_until_approved() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;

        let id = post_message(&server, "Tante Rose").await;

        let feed: Vec<Value> = server.get("/guestbook").await.json();
        assert!(feed.is_empty());

        let approved: Value = server
            .post(&format!("/admin/guestbook/{id}/approve"))
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(approved["is_approved"], true);

        let feed: Vec<Value> = server.get("/guestbook").await.json();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0]["author_name"], "Tante Rose");

        // reject hides it again without deleting it
        server
            .post(&format!("/admin/guestbook/{id}/reject"))
            .authorization_bearer(&token)
            .await
            .assert_status_ok();
        let feed: Vec<Value> = server.get("/guestbook").await.json();
        assert!(feed.is_empty());
        assert_eq!(state.guestbook.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_submission_is_trimmed_and_requires_fields() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());

        let created: Value = server
            .post("/guestbook")
            .json(&json!({ "author_name": "  Awa ", "message": " Bravo \n" }))
            .await
            .json();
        assert_eq!(created["author_name"], "Awa");
        assert_eq!(created["message"], "Bravo");
        assert_eq!(created["is_approved"], false);

        server
            .post("/guestbook")
            .json(&json!({ "author_name": "Awa", "message": "   " }))
            .await
            .assert_status_bad_request();
        server
            .post("/guestbook")
            .json(&json!({ "author_name": "", "message": "Bravo" }))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_invitation_code_links_message_to_guest() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let guest = seed_guest(&state, "LP001", "Linda", "Ngono").await;

        let created: Value = server
            .post("/guestbook")
            .json(&json!({ "author_name": "Linda", "message": "Merci", "invitation_code": "LP001" }))
            .await
            .json();
        assert_eq!(created["guest_id"], guest.guest_id);

        server
            .post("/guestbook")
            .json(&json!({ "author_name": "X", "message": "Y", "invitation_code": "NOPE" }))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_public_feed_is_newest_first_and_limited() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());

        for i in 0..12 {
            let message = state
                .guestbook
                .create(&CreateGuestbookMessageDTO {
                    guest_id: None,
                    author_name: format!("author {i}"),
                    message: "Bravo".to_string(),
                })
                .await
                .unwrap();
            state.guestbook.set_approved(&message.message_id, true).await.unwrap();
        }

        let feed: Vec<Value> = server.get("/guestbook").await.json();
        assert_eq!(feed.len(), 10);
        assert_eq!(feed[0]["author_name"], "author 11");

        let feed: Vec<Value> = server.get("/guestbook").add_query_param("limit", 3).await.json();
        assert_eq!(feed.len(), 3);
    }

    #[tokio::test]
    async fn test_moderation_list_filters_and_counts() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;

        let first = post_message(&server, "Awa").await;
        post_message(&server, "Pablo").await;
        post_message(&server, "Rose").await;
        server
            .post(&format!("/admin/guestbook/{first}/approve"))
            .authorization_bearer(&token)
            .await
            .assert_status_ok();

        let pending: Value = server
            .get("/admin/guestbook")
            .add_query_param("status", "pending")
            .authorization_bearer(&token)
            .await
            .json();

        assert_eq!(pending["counts"], json!({ "all": 3, "pending": 2, "approved": 1 }));
        assert_eq!(pending["messages"].as_array().unwrap().len(), 2);
        assert_eq!(pending["messages"][0]["author_name"], "Rose");

        let all: Value = server
            .get("/admin/guestbook")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(all["messages"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_and_missing_message() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;
        let id = post_message(&server, "Awa").await;

        server
            .delete(&format!("/admin/guestbook/{id}"))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NO_CONTENT);
        assert_eq!(state.guestbook.count().await.unwrap(), 0);

        server
            .delete(&format!("/admin/guestbook/{id}"))
            .authorization_bearer(&token)
            .await
            .assert_status_not_found();
        server
            .post(&format!("/admin/guestbook/{id}/approve"))
            .authorization_bearer(&token)
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_moderation_requires_admin() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let id = post_message(&server, "Awa").await;
        let token = user_token(&state, "guest@example.com").await;

        server
            .post(&format!("/admin/guestbook/{id}/approve"))
            .await
            .assert_status_unauthorized();
        server
            .post(&format!("/admin/guestbook/{id}/approve"))
            .authorization_bearer(&token)
            .await
            .assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_approval_reaches_the_live_feed() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;
        let id = post_message(&server, "Awa").await;
        let mut live = state.changes.subscribe_approved();

        server
            .post(&format!("/admin/guestbook/{id}/approve"))
            .authorization_bearer(&token)
            .await
            .assert_status_ok();

        match live.try_recv().unwrap() {
            WsEventDTO::MessageApproved(message) => assert_eq!(message.message_id, id),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_approving_twice_goes_live_once() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;
        let id = post_message(&server, "Awa").await;
        let mut live = state.changes.subscribe_approved();
        let mut changes = state.changes.subscribe();

        for _ in 0..2 {
            let approved: Value = server
                .post(&format!("/admin/guestbook/{id}/approve"))
                .authorization_bearer(&token)
                .await
                .json();
            assert_eq!(approved["is_approved"], true);
        }

        assert!(matches!(live.try_recv(), Ok(WsEventDTO::MessageApproved(_))));
        assert!(live.try_recv().is_err());
        assert!(matches!(changes.try_recv(), Ok(WsEventDTO::Change(_))));
        assert!(changes.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_export() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;
        server
            .post("/guestbook")
            .json(&json!({ "author_name": "Awa", "message": "Bravo, \"les mariés\"" }))
            .await
            .assert_status(StatusCode::CREATED);

        let csv = server
            .get("/admin/guestbook/export")
            .authorization_bearer(&token)
            .await
            .text();

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Auteur,Message,Statut,Date"));
        assert!(
            lines
                .next()
                .unwrap()
                .starts_with("Awa,\"Bravo, \"\"les mariés\"\"\",En attente,")
        );
    }
}
