//! UseCase 層
//!
//! 同期プロトコルのビジネスロジックを実装するレイヤー。
//! UI 層（WebSocket ハンドラ）から呼び出され、Registry を操作します。
//!
//! 各 UseCase は変更が受理された場合にのみ `Some(snapshot)` を返します。
//! 呼び出し側はその snapshot を全接続にブロードキャストします。

pub mod join_participant;
pub mod leave_participant;
pub mod move_participant;

pub use join_participant::JoinParticipantUseCase;
pub use leave_participant::LeaveParticipantUseCase;
pub use move_participant::MoveParticipantUseCase;
