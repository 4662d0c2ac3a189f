//! UseCase: 参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinParticipantUseCase::execute() メソッド
//! - 参加時の Registry 登録とブロードキャスト用スナップショットの生成
//!
//! ### なぜこのテストが必要か
//! - 重複参加（クライアント側のリトライなど）が状態を上書きしないことを保証
//! - 重複参加時に不要なブロードキャストが発生しないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加
//! - 異常系：同じ接続からの二度目の参加

use std::sync::Arc;

use crate::domain::{ConnectionId, ParticipantRepository, ParticipantSnapshot, Position};

/// 参加のユースケース
pub struct JoinParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ParticipantRepository>,
}

impl JoinParticipantUseCase {
    /// 新しい JoinParticipantUseCase を作成
    pub fn new(repository: Arc<dyn ParticipantRepository>) -> Self {
        Self { repository }
    }

    /// 参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続の ID（サーバー割り当て）
    /// * `position` - 初期位置
    ///
    /// # Returns
    ///
    /// * `Some(ParticipantSnapshot)` - 登録された。このスナップショットをブロードキャストする
    /// * `None` - 既に参加済み。何も変更されず、ブロードキャストも不要
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        position: Position,
    ) -> Option<ParticipantSnapshot> {
        if !self
            .repository
            .insert_if_absent(connection_id, position)
            .await
        {
            return None;
        }
        Some(self.repository.snapshot().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::repository::MockParticipantRepository,
        usecase::test_support::{connection_id, create_test_repository, position},
    };

    #[tokio::test]
    async fn test_join_participant_success() {
        // テスト項目: 新規参加で Registry に登録され、スナップショットが返される
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = JoinParticipantUseCase::new(repository.clone());

        // when (操作):
        let result = usecase
            .execute(connection_id("alice"), position(300.0, 300.0))
            .await;

        // then (期待する結果):
        let snapshot = result.expect("join should be accepted");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot[&connection_id("alice")].position,
            position(300.0, 300.0)
        );
        assert_eq!(repository.count().await, 1);
    }

    #[tokio::test]
    async fn test_join_participant_duplicate_is_ignored() {
        // テスト項目: 二度目の参加は無視され、最初の座標が保持される
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = JoinParticipantUseCase::new(repository.clone());
        usecase
            .execute(connection_id("alice"), position(300.0, 300.0))
            .await
            .unwrap();

        // when (操作): 異なる座標で再度参加
        let result = usecase
            .execute(connection_id("alice"), position(10.0, 10.0))
            .await;

        // then (期待する結果): ブロードキャスト不要、状態は最初の参加のまま
        assert!(result.is_none());
        let snapshot = repository.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot[&connection_id("alice")].position,
            position(300.0, 300.0)
        );
    }

    #[tokio::test]
    async fn test_join_participant_duplicate_takes_no_snapshot() {
        // テスト項目: 登録されなかった場合はスナップショットを取得しない
        // given (前提条件):
        let mut repository = MockParticipantRepository::new();
        repository
            .expect_insert_if_absent()
            .times(1)
            .returning(|_, _| false);
        repository.expect_snapshot().never();
        let usecase = JoinParticipantUseCase::new(Arc::new(repository));

        // when (操作):
        let result = usecase
            .execute(connection_id("alice"), position(0.0, 0.0))
            .await;

        // then (期待する結果):
        assert!(result.is_none());
    }
}
