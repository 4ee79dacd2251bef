use axum::{http::StatusCode, routing::get, Json, Router};
use protoform::adapters::{
    file_set_client::HttpFileSetSource,
    form_handler::{FormPageService, FormState},
    health_handler::HealthHandler,
    html_renderer::HtmlRenderer,
};
use protoform::config::{ServerSettings, Settings, SourceSettings};
use protoform::form::{FormBuilder, FormSettings};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;

/// File set served by the fake music service
pub fn music_file_set() -> Value {
    json!({
        "files": [{
            "package": "music",
            "message_types": [
                {"name": "Track", "fields": [
                    {"name": "title", "number": 1, "variant": "STRING", "label": "REQUIRED"},
                    {"name": "plays", "number": 2, "variant": "INT64", "label": "OPTIONAL", "default_value": "0"},
                    {"name": "tags", "number": 3, "variant": "STRING", "label": "REPEATED"},
                    {"name": "explicit", "number": 4, "variant": "BOOL"}
                ]}
            ],
            "service_types": [{"name": "MusicService", "methods": [
                {"name": "add_track", "request_type": "music.Track", "response_type": "music.Track"},
                {"name": "count", "request_type": "protorpc.message_types.VoidMessage", "response_type": "music.Track"},
                {"name": "broken", "request_type": "music.Missing", "response_type": "music.Track"}
            ]}]
        }]
    })
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// A protorpc-like service publishing its file set, plus the protoform app
/// pointed at it.
pub struct TestServer {
    pub addr: SocketAddr,
    pub base_url: String,
    /// Service path of the healthy fake service
    pub service_path: String,
    /// Service path whose file set responds with 500
    pub broken_service_path: String,
}

impl TestServer {
    pub async fn new() -> Self {
        let upstream = Router::new()
            .route("/music/form/file_set", get(|| async { Json(music_file_set()) }))
            .route(
                "/broken/form/file_set",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );
        let upstream_addr = spawn(upstream).await;
        let service_path = format!("http://{}/music", upstream_addr);

        let settings = Arc::new(Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            source: SourceSettings {
                service_path: Some(service_path.clone()),
                allowed_origins: Vec::new(),
            },
            form: FormSettings::default(),
        });

        let form_state = FormState {
            service: Arc::new(FormPageService::new(
                Arc::new(HttpFileSetSource::new()),
                FormBuilder::new(settings.form.clone()),
            )),
            renderer: Arc::new(HtmlRenderer::new().unwrap()),
            source: settings.source.clone(),
        };
        let health_handler = Arc::new(HealthHandler::new(settings.clone()));

        let app = protoform::create_app(health_handler, form_state);
        let addr = spawn(app).await;

        // Wait for both servers to be ready
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestServer {
            addr,
            base_url: format!("http://{}", addr),
            service_path,
            broken_service_path: format!("http://{}/broken", upstream_addr),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
