//! Embedded monitor dashboard.
//!
//! # Responsibilities
//! - Serve the single-page live monitor at `/`
//! - Render current history server-side (sanitized), newest first
//! - Embed the WebSocket client that streams new captures
//!
//! # Design Decisions
//! - One self-contained page, no static asset pipeline (Tailwind via CDN)
//! - The page clears its server-rendered entries once the socket opens;
//!   the connect-time replay repopulates them, so the two sources never
//!   show duplicates

use axum::{extract::State, response::Html};

use crate::capture::sanitize::sanitize;
use crate::http::server::AppState;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Monitor de Datos</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-100 p-6">
    <div class="max-w-2xl mx-auto bg-white p-6 rounded-lg shadow-md">
        <h2 class="text-xl font-bold text-center mb-4">&#128202; Últimos Datos Recibidos</h2>
        <div id="dataContainer" class="space-y-2">
{{entries}}
        </div>
    </div>

    <script>
        const dataContainer = document.getElementById("dataContainer");

        const wsProtocol = window.location.protocol === "https:" ? "wss://" : "ws://";
        const ws = new WebSocket(wsProtocol + window.location.host + "/ws");

        ws.onopen = () => {
            dataContainer.innerHTML = "";
        };

        ws.onmessage = (event) => {
            const data = JSON.parse(event.data);
            const newEntry = document.createElement("div");
            newEntry.classList = "p-3 bg-blue-100 border-l-4 border-blue-500 rounded";
            const pre = document.createElement("pre");
            pre.classList = "text-sm";
            pre.textContent = JSON.stringify(data, null, 2);
            newEntry.appendChild(pre);
            dataContainer.prepend(newEntry);
        };
    </script>
</body>
</html>
"#;

/// Render the dashboard with the current history inlined.
pub async fn render(State(state): State<AppState>) -> Html<String> {
    let mut entries = String::new();
    for entry in state.history.snapshot() {
        let pretty = match serde_json::to_string_pretty(&entry) {
            Ok(pretty) => pretty,
            Err(_) => continue,
        };
        entries.push_str(&format!(
            "<div class=\"p-3 bg-blue-100 border-l-4 border-blue-500 rounded\"><pre class=\"text-sm\">{}</pre></div>\n",
            sanitize(&pretty)
        ));
    }
    if entries.is_empty() {
        entries = "<p class=\"text-gray-500\">Esperando datos...</p>".to_string();
    }

    Html(PAGE_TEMPLATE.replace("{{entries}}", &entries))
}
