//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::usecase::{BroadcastRouter, GetRoomDetailUseCase, GetRoomsUseCase};

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Listener and CORS settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS. Empty allows any origin.
    pub allowed_origins: Vec<String>,
}

/// Chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(router, get_rooms_usecase, get_room_detail_usecase);
/// server.run(config).await?;
/// ```
pub struct Server {
    /// BroadcastRouter（セッションイベントの振り分け）
    router: BroadcastRouter,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}

impl Server {
    pub fn new(
        router: BroadcastRouter,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    ) -> Self {
        Self {
            router,
            get_rooms_usecase,
            get_room_detail_usecase,
        }
    }

    /// Bind to `config.host:config.port` and serve until a shutdown signal.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr).await?;
        tracing::info!("Connect to: ws://{}/ws", bind_addr);

        self.serve(listener, &config.allowed_origins).await?;

        Ok(())
    }

    /// Serve on an already bound listener until a shutdown signal.
    pub async fn serve(
        self,
        listener: TcpListener,
        allowed_origins: &[String],
    ) -> std::io::Result<()> {
        // Broadcast Router を単一のタスクとして起動
        let (router_handle, router_task) = self.router.spawn();
        let app_state = Arc::new(AppState {
            router: router_handle,
            get_rooms_usecase: self.get_rooms_usecase,
            get_room_detail_usecase: self.get_room_detail_usecase,
        });

        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room}", get(get_room_detail))
            .layer(cors_layer(allowed_origins))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        tracing::info!("Chat relay listening on {}", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        router_task.abort();
        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid allowed origin '{}'", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(allow_origin)
}
