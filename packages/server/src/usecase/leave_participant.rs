//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveParticipantUseCase::execute() メソッド
//! - 切断時の Registry からの削除とスナップショットの生成
//!
//! ### なぜこのテストが必要か
//! - 切断（正常・異常終了を問わず）で必ず Registry から削除されることを保証
//! - 二重切断や未参加の切断でブロードキャストが発生しないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済み接続の切断
//! - エッジケース：最後の参加者の切断（空のスナップショット）
//! - 異常系：未参加の接続の切断、二重切断

use std::sync::Arc;

use crate::domain::{ConnectionId, ParticipantRepository, ParticipantSnapshot};

/// 切断のユースケース
pub struct LeaveParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ParticipantRepository>,
}

impl LeaveParticipantUseCase {
    /// 新しい LeaveParticipantUseCase を作成
    pub fn new(repository: Arc<dyn ParticipantRepository>) -> Self {
        Self { repository }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// * `Some(ParticipantSnapshot)` - 削除された。このスナップショットを残りの接続にブロードキャストする
    /// * `None` - 参加していなかった、または既に削除済み
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<ParticipantSnapshot> {
        if !self.repository.remove(connection_id).await {
            return None;
        }
        Some(self.repository.snapshot().await)
    }

    /// 残りの参加者数を取得
    pub async fn count_remaining_participants(&self) -> usize {
        self.repository.count().await
    }
}
