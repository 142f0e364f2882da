//! Integration tests per la gestione degli invitati
//!
//! Test per:
//! - GET/POST /admin/guests
//! - GET/PATCH/DELETE /admin/guests/{guest_id}
//! - POST /admin/guests/import
//! - GET /admin/guests/export

mod common;

#[cfg(test)]
mod guests_tests {
    use super::common::*;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    // ============================================================
    // Test per POST /admin/guests - create_guest
    // ============================================================

    #[tokio::test]
    async fn test_create_generates_sequential_codes() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;

        let mut codes = Vec::new();
        for (first, last) in [("Linda", "Ngono"), ("Pablo", "Essomba")] {
            let response = server
                .post("/admin/guests")
                .authorization_bearer(&token)
                .json(&json!({ "first_name": first, "last_name": last }))
                .await;
            response.assert_status(StatusCode::CREATED);
            let guest: Value = response.json();
            codes.push(guest["invitation_code"].as_str().unwrap().to_string());

            // defaults
            assert_eq!(guest["category"], "friend");
            assert_eq!(guest["num_adults"], 1);
            assert_eq!(guest["num_children"], 0);
        }

        assert_eq!(codes, vec!["LP001", "LP002"]);
    }

    #[tokio::test]
    async fn test_create_uses_configured_prefix() {
        let state = create_test_state_with_prefix("NM").await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;

        let guest: Value = server
            .post("/admin/guests")
            .authorization_bearer(&token)
            .json(&json!({ "first_name": "Awa", "last_name": "Ngono" }))
            .await
            .json();

        assert_eq!(guest["invitation_code"], "NM001");
    }

    #[tokio::test]
    async fn test_create_requires_names() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;

        server
            .post("/admin/guests")
            .authorization_bearer(&token)
            .json(&json!({ "first_name": "  ", "last_name": "Ngono" }))
            .await
            .assert_status_bad_request();

        assert_eq!(state.guest.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_with_supplied_code() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;

        let guest: Value = server
            .post("/admin/guests")
            .authorization_bearer(&token)
            .json(&json!({
                "invitation_code": "VIP-01",
                "first_name": "Awa",
                "last_name": "Ngono",
                "category": "vip",
                "num_adults": 2,
                "num_children": 3,
                "phone": "  "
            }))
            .await
            .json();

        assert_eq!(guest["invitation_code"], "VIP-01");
        assert_eq!(guest["category"], "vip");
        assert_eq!(guest["num_children"], 3);
        assert!(guest["phone"].is_null());

        server
            .post("/admin/guests")
            .authorization_bearer(&token)
            .json(&json!({ "invitation_code": "VIP 01", "first_name": "A", "last_name": "B" }))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_create_with_code_in_use_is_conflict() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;

        // deleting LP001 of two guests leaves count = 1, so the next generated
        // code is LP002 again
        let first = seed_guest(&state, "LP001", "Linda", "Ngono").await;
        seed_guest(&state, "LP002", "Pablo", "Essomba").await;
        server
            .delete(&format!("/admin/guests/{}", first.guest_id))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let response = server
            .post("/admin/guests")
            .authorization_bearer(&token)
            .json(&json!({ "first_name": "Awa", "last_name": "Mballa" }))
            .await;

        response.assert_status_conflict();
        assert_eq!(state.guest.count().await.unwrap(), 1);
    }

    // ============================================================
    // Test per GET /admin/guests - list_guests
    // ============================================================

    #[tokio::test]
    async fn test_list_newest_first_and_search() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;
        seed_guest(&state, "LP001", "Linda", "Ngono").await;
        seed_guest(&state, "LP002", "Pablo", "Essomba").await;
        seed_guest(&state, "LP003", "Awa", "Ngono").await;

        let all: Vec<Value> = server
            .get("/admin/guests")
            .authorization_bearer(&token)
            .await
            .json();
        let codes: Vec<&str> = all.iter().map(|g| g["invitation_code"].as_str().unwrap()).collect();
        assert_eq!(codes, vec!["LP003", "LP002", "LP001"]);

        let found: Vec<Value> = server
            .get("/admin/guests")
            .add_query_param("search", "NGONO")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(found.len(), 2);

        let by_code: Vec<Value> = server
            .get("/admin/guests")
            .add_query_param("search", "lp002")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0]["first_name"], "Pablo");
    }

    // ============================================================
    // Test per /admin/guests/{guest_id}
    // ============================================================

    #[tokio::test]
    async fn test_get_and_update_guest() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;
        let guest = seed_guest(&state, "LP001", "Linda", "Ngono").await;
        let path = format!("/admin/guests/{}", guest.guest_id);

        let updated: Value = server
            .patch(&path)
            .authorization_bearer(&token)
            .json(&json!({ "last_name": "Mballa", "phone": "+237 699 00 00 00", "num_children": 2 }))
            .await
            .json();
        assert_eq!(updated["last_name"], "Mballa");
        assert_eq!(updated["first_name"], "Linda");
        assert_eq!(updated["invitation_code"], "LP001");

        // empty phone clears it
        let cleared: Value = server
            .patch(&path)
            .authorization_bearer(&token)
            .json(&json!({ "phone": "" }))
            .await
            .json();
        assert!(cleared["phone"].is_null());

        let fetched: Value = server.get(&path).authorization_bearer(&token).await.json();
        assert_eq!(fetched["num_children"], 2);
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;
        let guest = seed_guest(&state, "LP001", "Linda", "Ngono").await;

        server
            .patch(&format!("/admin/guests/{}", guest.guest_id))
            .authorization_bearer(&token)
            .json(&json!({ "first_name": " " }))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_missing_guest_is_not_found() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;

        server
            .get("/admin/guests/42")
            .authorization_bearer(&token)
            .await
            .assert_status_not_found();
        server
            .patch("/admin/guests/42")
            .authorization_bearer(&token)
            .json(&json!({ "first_name": "Awa" }))
            .await
            .assert_status_not_found();
        server
            .delete("/admin/guests/42")
            .authorization_bearer(&token)
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_delete_removes_the_rsvp_response() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;
        let guest = seed_guest(&state, "LP001", "Linda", "Ngono").await;

        server
            .post("/invitation/rsvp")
            .add_query_param("i", "LP001")
            .json(&json!({ "is_attending": true, "num_adults": 2, "num_children": 0 }))
            .await
            .assert_status(StatusCode::CREATED);

        server
            .delete(&format!("/admin/guests/{}", guest.guest_id))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        assert!(state.rsvp.list_all().await.unwrap().is_empty());
        server
            .get("/invitation")
            .add_query_param("i", "LP001")
            .await
            .assert_status_not_found();
    }

    // ============================================================
    // Test per import / export CSV
    // ============================================================

    #[tokio::test]
    async fn test_import_skips_incomplete_rows_and_continues_codes() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;
        seed_guest(&state, "LP001", "Linda", "Ngono").await;

        let csv = "Prénom,Nom,Téléphone,Catégorie\n\
                   Pablo,Essomba,699000000,Famille\n\
                   Awa,,,\n\
                   \"Jean, dit Jeannot\",Mballa,,Collègue\n";

        let report: Value = server
            .post("/admin/guests/import")
            .authorization_bearer(&token)
            .text(csv)
            .await
            .json();

        assert_eq!(report["imported"], 2);
        assert_eq!(report["skipped"], 1);
        assert_eq!(report["guests"][0]["invitation_code"], "LP002");
        assert_eq!(report["guests"][0]["category"], "family");
        assert_eq!(report["guests"][1]["invitation_code"], "LP003");
        assert_eq!(report["guests"][1]["first_name"], "Jean, dit Jeannot");
        assert_eq!(report["guests"][1]["category"], "colleague");
        assert_eq!(state.guest.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_import_is_all_or_nothing() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;
        seed_guest(&state, "LP001", "Linda", "Ngono").await;

        // the second row reuses a code already in the directory
        let csv = "code,first_name,last_name\nVIP-1,Pablo,Essomba\nLP001,Awa,Mballa\n";

        server
            .post("/admin/guests/import")
            .authorization_bearer(&token)
            .text(csv)
            .await
            .assert_status_conflict();

        assert_eq!(state.guest.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_export_then_reimport_into_empty_directory() {
        let state = create_test_state().await;
        let server = create_test_server(state.clone());
        let token = admin_token(&state).await;
        seed_guest(&state, "LP001", "Linda", "Ngono, épouse Mballa").await;
        seed_guest(&state, "LP002", "Pablo", "Essomba").await;

        let response = server
            .get("/admin/guests/export")
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();
        assert!(
            response
                .header("content-type")
                .to_str()
                .unwrap()
                .starts_with("text/csv")
        );
        let csv = response.text();
        assert!(csv.starts_with("Code,Prénom,Nom,Téléphone,Email,Catégorie,Adultes,Enfants\n"));
        assert!(csv.contains("\"Ngono, épouse Mballa\""));

        let other = create_test_state().await;
        let other_server = create_test_server(other.clone());
        let other_token = admin_token(&other).await;

        let report: Value = other_server
            .post("/admin/guests/import")
            .authorization_bearer(&other_token)
            .text(csv)
            .await
            .json();

        assert_eq!(report["imported"], 2);
        assert_eq!(report["skipped"], 0);
        let linda = other.guest.find_by_invitation_code("LP001").await.unwrap().unwrap();
        assert_eq!(linda.last_name, "Ngono, épouse Mballa");
        assert_eq!(linda.num_adults, 2);
    }
}
