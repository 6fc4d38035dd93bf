use std::env;

use chrono_tz::Tz;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage_path: String,
    pub db_path: String,
    /// IANA timezone name all relative dates resolve against
    pub timezone: String,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_api_hostname: String,
    pub google_oauth_hostname: String,
    pub openai_api_hostname: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub calendar_id: String,
    pub max_days_ahead: i64,
    pub max_results: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let storage_path = env::var("CHRONOSAGE_STORAGE_PATH").unwrap_or("./".to_string());
        let db_path = format!("{}/db", storage_path);
        let timezone =
            env::var("CHRONOSAGE_TIMEZONE").unwrap_or_else(|_| "America/Denver".to_string());
        let google_client_id =
            env::var("CHRONOSAGE_GOOGLE_CLIENT_ID").expect("Missing CHRONOSAGE_GOOGLE_CLIENT_ID");
        let google_client_secret = env::var("CHRONOSAGE_GOOGLE_CLIENT_SECRET")
            .expect("Missing CHRONOSAGE_GOOGLE_CLIENT_SECRET");
        let google_api_hostname = env::var("CHRONOSAGE_GOOGLE_API_HOST")
            .unwrap_or_else(|_| "https://www.googleapis.com".to_string());
        let google_oauth_hostname = env::var("CHRONOSAGE_GOOGLE_OAUTH_HOST")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com".to_string());
        let openai_api_hostname = env::var("CHRONOSAGE_LLM_HOST")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());
        let openai_api_key =
            env::var("OPENAI_API_KEY").unwrap_or_else(|_| "thiswontworkforopenai".to_string());
        let openai_model =
            env::var("CHRONOSAGE_LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let calendar_id =
            env::var("CHRONOSAGE_CALENDAR_ID").unwrap_or_else(|_| "primary".to_string());
        let max_days_ahead = env::var("CHRONOSAGE_MAX_DAYS_AHEAD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        let max_results = env::var("CHRONOSAGE_MAX_RESULTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Self {
            storage_path,
            db_path,
            timezone,
            google_client_id,
            google_client_secret,
            google_api_hostname,
            google_oauth_hostname,
            openai_api_hostname,
            openai_api_key,
            openai_model,
            calendar_id,
            max_days_ahead,
            max_results,
        }
    }
}

impl AppConfig {
    pub fn tz(&self) -> Tz {
        self.timezone
            .parse()
            .expect("Invalid CHRONOSAGE_TIMEZONE value")
    }
}
