//! Demo HTTP server.
//!
//! # Responsibilities
//! - Create the Axum router with the demo handlers
//! - Wire up middleware (tracing, HX)
//! - Serve on a listener until the shutdown future resolves
//!
//! Every handler here goes through the HX extractors, so the server doubles
//! as an end-to-end exercise of the middleware.

use std::future::Future;
use std::net::SocketAddr;

use axum::{
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::htmx::{Htmx, HtmxResult, HxLocation, HxState, TriggerTiming};
use crate::http::extract::{HxRedirect, IsHtmx};
use crate::http::middleware::HtmxLayer;

const ITEMS: [&str; 3] = ["alpha", "beta", "gamma"];

/// HTTP server hosting the demo pages.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let router = Self::build_router(&config);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(config: &AppConfig) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/items", get(items))
            .route("/items/more", get(more_items))
            .route("/search", post(search))
            .route("/go", post(go))
            .route("/reload", post(reload))
            .route("/details", get(details))
            .layer(HtmxLayer::new(config.htmx.clone()))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            redirect_status = self.config.htmx.redirect_status,
            auto_vary = self.config.htmx.auto_vary,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

fn layout(body: &str) -> String {
    format!(
        "<!doctype html><html><head><title>hx-state</title>\
         <script src=\"https://unpkg.com/htmx.org@2\"></script></head>\
         <body><main id=\"content\">{body}</main></body></html>"
    )
}

/// Escape text for use in element content and quoted attributes.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn item_list(items: &[&str]) -> String {
    let rows: String = items.iter().map(|i| format!("<li>{i}</li>")).collect();
    format!("<ul id=\"items\">{rows}</ul>")
}

/// Full page for plain requests, bare fragment for HX requests.
async fn index(IsHtmx(is_htmx): IsHtmx) -> Html<String> {
    let body = "<h1>hx-state</h1>\
                <button hx-get=\"/items\" hx-target=\"#content\">Load items</button>";
    if is_htmx {
        Html(body.to_string())
    } else {
        Html(layout(body))
    }
}

async fn items(htmx: Htmx) -> HtmxResult<Response> {
    htmx.push_url("/items")?;
    htmx.trigger(
        &json!({"items-loaded": {"count": ITEMS.len()}}),
        TriggerTiming::AfterSettle,
    )?;

    let fragment = item_list(&ITEMS);
    if htmx.is_htmx() {
        Ok(Html(fragment).into_response())
    } else {
        Ok(Html(layout(&fragment)).into_response())
    }
}

/// Appends to the existing list instead of replacing the target.
async fn more_items(htmx: Htmx) -> HtmxResult<Html<String>> {
    htmx.retarget("#items")?;
    htmx.reswap(["beforeend", "scroll:bottom", "settle:100ms"])?;
    Ok(Html("<li>delta</li><li>epsilon</li>".to_string()))
}

/// Echoes the prompt answer and the triggering element.
async fn search(state: HxState) -> Html<String> {
    let query = state.prompt.unwrap_or_default();
    let from = escape_html(&state.trigger_name.or(state.trigger_id).unwrap_or_default());
    let hits: Vec<&str> = ITEMS
        .iter()
        .copied()
        .filter(|i| !query.is_empty() && i.contains(query.as_str()))
        .collect();
    Html(format!(
        "<p data-from=\"{from}\">{} result(s)</p>{}",
        hits.len(),
        item_list(&hits)
    ))
}

async fn go(redirect: HxRedirect) -> HtmxResult<()> {
    redirect.to("/items")
}

async fn reload(htmx: Htmx) {
    htmx.refresh();
}

/// Client-side navigation into a specific target.
async fn details(htmx: Htmx) -> HtmxResult<()> {
    htmx.location(
        HxLocation::new("/items")
            .target("#content")
            .swap("innerHTML"),
    )?;
    htmx.replace_url("/items")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(
            escape_html(r#"<b a="1">&</b>"#),
            "&lt;b a=&quot;1&quot;&gt;&amp;&lt;/b&gt;"
        );
    }

    #[tokio::test]
    async fn test_search_escapes_trigger_name() {
        let state = HxState {
            participating: true,
            prompt: Some("<script>".to_string()),
            trigger_name: Some(r#""><img src=x>"#.to_string()),
            ..HxState::default()
        };
        let Html(body) = search(state).await;
        assert_eq!(
            body,
            "<p data-from=\"&quot;&gt;&lt;img src=x&gt;\">0 result(s)</p><ul id=\"items\"></ul>"
        );
    }
}
