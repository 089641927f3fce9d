#![allow(non_snake_case)]

mod cli;
mod clients;
mod config;
mod error;
mod handlers;
mod models;
mod runtime;
mod service;
mod session;

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::AppConfig;
use crate::service::approval_prompt::{AutoConfirm, ConfirmationPolicy, ConsoleConfirm};
use crate::service::calendar_service::GoogleCalendarService;
use crate::service::model_service::GeminiService;
use crate::session::Session;

const DEFAULT_RUN_MODE: &str = "cli";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8085";

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calendarAgent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    };

    let api_key = config
        .get("GOOGLE_API_KEY")
        .expect("GOOGLE_API_KEY environment variable not set");
    let model_name = config.get_or("GEMINI_MODEL", DEFAULT_MODEL);

    // The credential handle is obtained by an external OAuth flow and passed
    // through opaque; only its location is configured here.
    let token = match config.get("CALENDAR_TOKEN") {
        Some(token) => token,
        None => {
            let path = config
                .get("CALENDAR_TOKEN_FILE")
                .expect("CALENDAR_TOKEN or CALENDAR_TOKEN_FILE must be set");
            fs::read_to_string(&path)
                .expect("Unable to read calendar token file")
                .trim()
                .to_string()
        }
    };

    let calendar_id = config.get_or("CALENDAR_ID", "primary");
    let delete_all_matches = config.get_or("DELETE_ALL_MATCHES", "false") == "true";
    let run_mode = config.get_or("RUN_MODE", DEFAULT_RUN_MODE);

    let confirmation: Arc<dyn ConfirmationPolicy> = if run_mode == "cli" {
        Arc::new(ConsoleConfirm)
    } else {
        Arc::new(AutoConfirm)
    };

    let session = Session {
        model: Arc::new(GeminiService::new(api_key, model_name)),
        calendar: Arc::new(GoogleCalendarService::new(token)),
        confirmation,
        calendar_id,
        delete_all_matches,
    };

    if run_mode == "api" {
        let bind_addr: SocketAddr = config
            .get_or("BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse()
            .expect("Invalid BIND_ADDR");
        runtime::run_api(Arc::new(session), bind_addr).await;
    } else if run_mode == "cli" {
        cli::cli(session).await;
    } else {
        println!("Invalid run mode {}", run_mode);
    }
}
