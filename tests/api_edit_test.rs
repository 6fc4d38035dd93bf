//! Integration tests for the edit API endpoint

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use serial_test::serial;
    use tower::util::ServiceExt;

    use crate::test_utils::{test_app_with, token_response, tool_call_response};

    fn edit_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/edit")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn mock_llm(server: &mut mockito::Server, arguments: Value) -> mockito::Mock {
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(tool_call_response(arguments))
            .create()
    }

    fn mock_token(server: &mut mockito::Server) -> mockito::Mock {
        server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(token_response())
            .create()
    }

    fn mock_list(server: &mut mockito::Server, events: Value) -> mockito::Mock {
        server
            .mock("GET", "/calendar/v3/calendars/primary/events")
            .match_query(mockito::Matcher::Regex("singleEvents=true".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "items": events }).to_string())
            .create()
    }

    /// Tests an edit matching several events returns the candidates
    /// instead of guessing
    #[tokio::test]
    #[serial]
    async fn it_returns_409_with_candidates_for_multiple_matches() {
        let mut server = mockito::Server::new_async().await;
        let _llm = mock_llm(
            &mut server,
            json!({"operation": "delete", "target": "standup"}),
        );
        let _token = mock_token(&mut server);
        let _list = mock_list(
            &mut server,
            json!([
                {
                    "id": "evt_1",
                    "summary": "Team standup",
                    "start": {"dateTime": "2024-06-11T09:00:00-06:00"}
                },
                {
                    "id": "evt_2",
                    "summary": "Design standup",
                    "start": {"dateTime": "2024-06-12T09:00:00-06:00"}
                }
            ]),
        );

        let app = test_app_with(&server.url()).await;
        let response = app
            .oneshot(edit_request(json!({
                "text": "Cancel my standup",
                "email": "test@example.com",
                "reference_time": "2024-06-10T09:00:00-06:00"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert_eq!(body["error"], "ambiguous_reference");
        assert_eq!(body["target"], "standup");
        assert_eq!(body["candidates"].as_array().unwrap().len(), 2);
        assert_eq!(body["candidates"][0]["id"], "evt_1");
    }

    /// Tests an edit matching nothing is an ambiguity with no
    /// candidates, never a silent no-op
    #[tokio::test]
    #[serial]
    async fn it_returns_409_with_no_candidates_for_zero_matches() {
        let mut server = mockito::Server::new_async().await;
        let _llm = mock_llm(
            &mut server,
            json!({"operation": "delete", "target": "doctor's appointment"}),
        );
        let _token = mock_token(&mut server);
        let _list = mock_list(
            &mut server,
            json!([{
                "id": "evt_other",
                "summary": "Standup",
                "start": {"dateTime": "2024-06-12T09:00:00-06:00"}
            }]),
        );

        let app = test_app_with(&server.url()).await;
        let response = app
            .oneshot(edit_request(json!({
                "text": "Cancel my doctor's appointment",
                "email": "test@example.com"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert!(body["candidates"].as_array().unwrap().is_empty());
    }

    /// Tests a single matching event is deleted
    #[tokio::test]
    #[serial]
    async fn it_deletes_a_single_matching_event() {
        let mut server = mockito::Server::new_async().await;
        let _llm = mock_llm(
            &mut server,
            json!({"operation": "delete", "target": "doctor's appointment"}),
        );
        let _token = mock_token(&mut server);
        let _list = mock_list(
            &mut server,
            json!([{
                "id": "evt_dr",
                "summary": "Doctor's appointment",
                "start": {"dateTime": "2024-06-12T10:00:00-06:00"},
                "end": {"dateTime": "2024-06-12T10:30:00-06:00"}
            }]),
        );
        let delete = server
            .mock("DELETE", "/calendar/v3/calendars/primary/events/evt_dr")
            .with_status(204)
            .create_async()
            .await;

        let app = test_app_with(&server.url()).await;
        let response = app
            .oneshot(edit_request(json!({
                "text": "Cancel my doctor's appointment",
                "email": "test@example.com"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        delete.assert_async().await;
        let body = body_json(response).await;
        assert_eq!(body["action"], "deleted");
        assert_eq!(body["summary"], "Doctor's appointment");
    }

    /// Tests resubmitting with a chosen event id applies the edit to
    /// that event
    #[tokio::test]
    #[serial]
    async fn it_applies_to_the_chosen_event_after_disambiguation() {
        let mut server = mockito::Server::new_async().await;
        let _llm = mock_llm(
            &mut server,
            json!({
                "operation": "update",
                "target": "standup",
                "date": "2024-06-13",
                "time": "15:00"
            }),
        );
        let _token = mock_token(&mut server);
        let _get = server
            .mock("GET", "/calendar/v3/calendars/primary/events/evt_2")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": "evt_2",
                    "summary": "Design standup",
                    "start": {"dateTime": "2024-06-12T09:00:00-06:00"},
                    "end": {"dateTime": "2024-06-12T09:30:00-06:00"}
                })
                .to_string(),
            )
            .create_async()
            .await;
        let patch = server
            .mock("PATCH", "/calendar/v3/calendars/primary/events/evt_2")
            .match_body(mockito::Matcher::PartialJson(json!({
                "start": {"dateTime": "2024-06-13T15:00:00-06:00"},
                "end": {"dateTime": "2024-06-13T15:30:00-06:00"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"id": "evt_2", "summary": "Design standup"}).to_string(),
            )
            .create_async()
            .await;

        let app = test_app_with(&server.url()).await;
        let response = app
            .oneshot(edit_request(json!({
                "text": "Move the standup to 3pm on Thursday",
                "email": "test@example.com",
                "event_id": "evt_2",
                "reference_time": "2024-06-10T09:00:00-06:00"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        patch.assert_async().await;
        let body = body_json(response).await;
        assert_eq!(body["action"], "updated");
    }

    /// Tests a request that isn't an edit is rejected
    #[tokio::test]
    #[serial]
    async fn it_rejects_non_edit_requests() {
        let mut server = mockito::Server::new_async().await;
        let _llm = mock_llm(
            &mut server,
            json!({
                "operation": "create",
                "title": "lunch",
                "date": "tomorrow",
                "time": "noon"
            }),
        );

        let app = test_app_with(&server.url()).await;
        let response = app
            .oneshot(edit_request(json!({
                "text": "Lunch tomorrow at noon",
                "email": "test@example.com"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
