//! Shared test helpers for the download and optimize phases.

use crate::types::{Event, RenderResults};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub(crate) const SAMPLE_SVG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- Generator: design tool -->
<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24">
  <path d="M12.0000 2L2 12h3v8h6v-6h2v6h6v-8h3z"/>
</svg>
"#;

/// Mount a successful SVG response at `/assets/<file>` and return its URL.
pub(crate) async fn mount_svg(server: &MockServer, file: &str, body: &str) -> String {
    let route = format!("/assets/{file}");
    Mock::given(method("GET"))
        .and(path(route.as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "image/svg+xml")
                .set_body_string(body),
        )
        .mount(server)
        .await;
    format!("{}{route}", server.uri())
}

/// Mount a failing response at `/assets/<file>` and return its URL.
pub(crate) async fn mount_failure(server: &MockServer, file: &str, status: u16) -> String {
    let route = format!("/assets/{file}");
    Mock::given(method("GET"))
        .and(path(route.as_str()))
        .respond_with(ResponseTemplate::new(status).set_body_string("render expired"))
        .mount(server)
        .await;
    format!("{}{route}", server.uri())
}

/// Build render results from `(export name, url)` pairs.
pub(crate) fn results(pairs: &[(&str, &str)]) -> RenderResults {
    pairs
        .iter()
        .map(|(name, url)| (name.to_string(), url.to_string()))
        .collect()
}

/// Progress callback that records every event it sees.
pub(crate) fn recorder() -> (Arc<Mutex<Vec<Event>>>, impl Fn(&Event) + Send + Sync) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    (events, move |event: &Event| {
        sink.lock().unwrap().push(event.clone());
    })
}
