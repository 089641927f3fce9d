use std::net::SocketAddr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use warp::Filter;

use crate::handlers::dispatch;
use crate::models::outcome::Outcome;
use crate::session::Session;

#[derive(Debug, Deserialize)]
struct ApiRequest {
    text: String,
}

#[derive(Debug, Serialize)]
struct ApiResponse {
    /// False when the text was not understood as a calendar request; no
    /// outcome is produced on that path.
    handled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<Outcome>,
}

const FORM_PAGE: &str = r#"<!doctype html>
<html>
<head><title>Calendar Agent</title></head>
<body>
<h1>Calendar Agent</h1>
<p>Describe the calendar event you want the agent to create, modify, or delete.</p>
<form onsubmit="send(event)">
  <input id="text" size="80" placeholder="Schedule a meeting with John tomorrow at 2 PM for 1 hour">
  <button>Send</button>
</form>
<pre id="result"></pre>
<script>
async function send(e) {
  e.preventDefault();
  const response = await fetch('/api/request', {
    method: 'POST',
    headers: {'content-type': 'application/json'},
    body: JSON.stringify({text: document.getElementById('text').value})
  });
  document.getElementById('result').textContent = JSON.stringify(await response.json(), null, 2);
}
</script>
</body>
</html>
"#;

pub async fn run_api(session: Arc<Session>, bind_addr: SocketAddr) {
    let with_session = warp::any().map(move || session.clone());

    let request = warp::path!("api" / "request")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_session)
        .and_then(handle_request);

    let form = warp::path::end().and(warp::get()).map(|| warp::reply::html(FORM_PAGE));

    info!(%bind_addr, "calendar agent listening");
    warp::serve(request.or(form)).run(bind_addr).await;
}

async fn handle_request(
    request: ApiRequest,
    session: Arc<Session>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let response = match dispatch::process_calendar_request(&session, &request.text).await {
        Ok(Some(outcome)) => ApiResponse {
            handled: true,
            outcome: Some(outcome),
        },
        Ok(None) => ApiResponse {
            handled: false,
            outcome: None,
        },
        Err(err) => ApiResponse {
            handled: true,
            outcome: Some(Outcome::failure(err.to_string())),
        },
    };
    Ok(warp::reply::json(&response))
}
