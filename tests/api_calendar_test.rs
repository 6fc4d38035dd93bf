//! Integration tests for the calendar API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use serial_test::serial;
    use tower::util::ServiceExt;

    use crate::test_utils::{test_app, test_app_with, token_response};

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Tests calendar endpoint returns 400 when email is missing
    #[tokio::test]
    #[serial]
    async fn it_returns_400_for_missing_email() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/calendar")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Missing required param should return 400 Bad Request
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Tests calendar endpoint returns 401 when no refresh token
    /// exists for the account
    #[tokio::test]
    #[serial]
    async fn it_returns_401_for_unknown_account() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/calendar?email=nonexistent@test.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    /// Tests calendar endpoint accepts days_ahead parameter
    #[tokio::test]
    #[serial]
    async fn it_accepts_days_ahead_parameter() {
        let app = test_app().await;

        // Request with days_ahead but no refresh token in DB
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/calendar?email=nonexistent@test.com&days_ahead=14")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Returns 401 because no refresh token, but accepts the param
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    /// Tests calendar endpoint returns upcoming events
    #[tokio::test]
    #[serial]
    async fn it_lists_upcoming_events() {
        let mut server = mockito::Server::new_async().await;
        let _token = server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(token_response())
            .create_async()
            .await;
        let _list = server
            .mock("GET", "/calendar/v3/calendars/primary/events")
            .match_query(mockito::Matcher::Regex("singleEvents=true".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "items": [{
                        "id": "evt_1",
                        "summary": "Standup",
                        "start": {"dateTime": "2024-06-11T09:00:00-06:00"},
                        "end": {"dateTime": "2024-06-11T09:15:00-06:00"},
                        "attendees": [
                            {"email": "alice@example.com", "displayName": "Alice"}
                        ]
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let app = test_app_with(&server.url()).await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/calendar?email=test@example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let events = body.as_array().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["summary"], "Standup");
        assert_eq!(events[0]["attendees"][0]["email"], "alice@example.com");
    }

    /// Tests the stats endpoint summarizes the upcoming window
    #[tokio::test]
    #[serial]
    async fn it_summarizes_usage_stats() {
        let mut server = mockito::Server::new_async().await;
        let _token = server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(token_response())
            .create_async()
            .await;
        let _list = server
            .mock("GET", "/calendar/v3/calendars/primary/events")
            .match_query(mockito::Matcher::Regex("singleEvents=true".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "items": [
                        {
                            "id": "evt_1",
                            "summary": "Standup",
                            "start": {"dateTime": "2024-06-11T09:00:00-06:00"},
                            "end": {"dateTime": "2024-06-11T09:30:00-06:00"}
                        },
                        {
                            "id": "evt_2",
                            "summary": "Planning",
                            "start": {"dateTime": "2024-06-12T09:00:00-06:00"},
                            "end": {"dateTime": "2024-06-12T10:00:00-06:00"}
                        }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let app = test_app_with(&server.url()).await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/calendar/stats?email=test@example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["total_events"], 2);
        assert_eq!(body["busy_hours"][0][0], 9);
        assert_eq!(body["busy_hours"][0][1], 2);
        assert_eq!(body["avg_duration_minutes"], 45.0);
    }
}
