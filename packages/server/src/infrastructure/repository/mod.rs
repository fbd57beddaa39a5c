//! Repository 実装
//!
//! - `inmemory`: プロセス内メモリを使った実装（永続化なし）

pub mod inmemory;

pub use inmemory::InMemoryChatRepository;
