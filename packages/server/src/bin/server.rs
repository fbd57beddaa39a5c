//! Real-time chat relay server.
//!
//! Clients connect to `/ws`, join a room with `join_room` and talk with
//! `send_message`. Every member of a room receives its roster as `room_users`.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin agora-server
//! cargo run --bin agora-server -- --host 127.0.0.1 --port 4000 --allowed-origin http://localhost:3000
//! ```

use std::sync::Arc;

use agora_server::{
    domain::{ChatRepository, MessagePusher},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryChatRepository,
    },
    ui::{Server, ServerConfig},
    usecase::{
        BroadcastRouter, DisconnectParticipantUseCase, GetRoomDetailUseCase, GetRoomsUseCase,
        JoinRoomUseCase, RegisterConnectionUseCase, SendMessageUseCase,
    },
};
use agora_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "agora-server")]
#[command(about = "Real-time chat relay over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "4000")]
    port: u16,

    /// Origin allowed by CORS (repeatable or comma-separated; any origin when absent)
    #[arg(long = "allowed-origin", env = "ALLOWED_ORIGIN", value_delimiter = ',')]
    allowed_origins: Vec<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Broadcast Router
    // 5. Server

    // 1. Create Repository (in-memory registry and directory)
    let repository: Arc<dyn ChatRepository> = Arc::new(InMemoryChatRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let register_connection_usecase = Arc::new(RegisterConnectionUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock,
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        repository.clone(),
        message_pusher,
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(repository));

    // 4. Create the Broadcast Router
    let router = BroadcastRouter::new(
        register_connection_usecase,
        join_room_usecase,
        send_message_usecase,
        disconnect_participant_usecase,
    );

    // 5. Create and run the server
    let server = Server::new(router, get_rooms_usecase, get_room_detail_usecase);
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        allowed_origins: args.allowed_origins,
    };
    if let Err(e) = server.run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
