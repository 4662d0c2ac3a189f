//! UseCase: 移動処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - MoveParticipantUseCase::execute() メソッド
//! - 移動報告による位置・アニメーション状態の置き換え
//!
//! ### なぜこのテストが必要か
//! - 受理された移動は毎回ブロードキャストされる（間引きなし）
//! - 未参加の接続からの移動が共有状態に影響しないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済み接続の移動
//! - 異常系：参加前の移動

use std::sync::Arc;

use crate::domain::{
    AnimationState, ConnectionId, ParticipantRepository, ParticipantSnapshot, Position,
};

/// 移動のユースケース
pub struct MoveParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ParticipantRepository>,
}

impl MoveParticipantUseCase {
    /// 新しい MoveParticipantUseCase を作成
    pub fn new(repository: Arc<dyn ParticipantRepository>) -> Self {
        Self { repository }
    }

    /// 移動を実行
    ///
    /// # Returns
    ///
    /// * `Some(ParticipantSnapshot)` - 更新された。このスナップショットをブロードキャストする
    /// * `None` - 未参加の接続。移動は破棄される
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        position: Position,
        animation_state: Option<AnimationState>,
    ) -> Option<ParticipantSnapshot> {
        if !self
            .repository
            .update(connection_id, position, animation_state)
            .await
        {
            return None;
        }
        Some(self.repository.snapshot().await)
    }
}
