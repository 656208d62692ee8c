//! Mock remote API and CDN built on wiremock

use figma_svg_dl::Config;
use serde_json::{Value, json};
use std::path::Path;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// File key used by every test
pub const FILE_ID: &str = "FILEKEY";

/// Access token the mock API expects
pub const TOKEN: &str = "test-token";

/// Mock server serving the document, image-render and CDN endpoints
pub struct FigmaMock {
    pub server: MockServer,
}

impl FigmaMock {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to put in `Config::api_base_url`
    pub fn api_url(&self) -> String {
        format!("{}/v1", self.server.uri())
    }

    /// Valid configuration pointing at this server
    pub fn config(&self, output_dir: &Path) -> Config {
        Config {
            access_token: TOKEN.to_string(),
            file_id: FILE_ID.to_string(),
            output_dir: output_dir.to_path_buf(),
            api_base_url: self.api_url(),
            ..Default::default()
        }
    }

    /// Serve `body` from the document endpoint, expecting `hits` requests
    pub async fn mount_document(&self, body: Value, hits: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/v1/files/{FILE_ID}")))
            .and(header("X-Figma-Token", TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(hits)
            .mount(&self.server)
            .await;
    }

    /// Serve `images` from the image-render endpoint, expecting `hits` requests
    pub async fn mount_images(&self, images: Value, hits: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/v1/images/{FILE_ID}")))
            .and(header("X-Figma-Token", TOKEN))
            .and(query_param("format", "svg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "err": null,
                "images": images
            })))
            .expect(hits)
            .mount(&self.server)
            .await;
    }

    /// Image-render endpoint reporting a service error
    pub async fn mount_images_error(&self, message: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/v1/images/{FILE_ID}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "err": message,
                "images": {}
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve an SVG from the CDN and return its URL
    pub async fn mount_svg(&self, file: &str, body: &str) -> String {
        let route = format!("/cdn/{file}");
        Mock::given(method("GET"))
            .and(path(route.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&self.server)
            .await;
        format!("{}{route}", self.server.uri())
    }

    /// Failing CDN URL
    pub async fn mount_cdn_failure(&self, file: &str, status: u16) -> String {
        let route = format!("/cdn/{file}");
        Mock::given(method("GET"))
            .and(path(route.as_str()))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
        format!("{}{route}", self.server.uri())
    }
}
