//! InMemory Participant Repository 実装
//!
//! ドメイン層が定義する ParticipantRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。プロセス再起動をまたいだ永続化は行いません。
//!
//! 全ての操作は単一の Mutex の中で完結し、ロックを保持したまま await やネットワーク I/O を
//! 行うことはありません。スナップショットはロック内で clone されるため、
//! 書き込み途中の Participant が観測されることはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    AnimationState, ConnectionId, Participant, ParticipantRepository, ParticipantSnapshot,
    Position,
};

/// インメモリ Participant Repository 実装
#[derive(Default)]
pub struct InMemoryParticipantRepository {
    /// 参加済みの Participant（キーは接続 ID）
    participants: Mutex<HashMap<ConnectionId, Participant>>,
}

impl InMemoryParticipantRepository {
    /// 空の InMemoryParticipantRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn insert_if_absent(&self, id: ConnectionId, position: Position) -> bool {
        let mut participants = self.participants.lock().await;
        if participants.contains_key(&id) {
            return false;
        }
        participants.insert(id.clone(), Participant::joined(id, position));
        true
    }

    async fn update(
        &self,
        id: &ConnectionId,
        position: Position,
        animation_state: Option<AnimationState>,
    ) -> bool {
        let mut participants = self.participants.lock().await;
        match participants.get_mut(id) {
            Some(participant) => {
                participant.apply_movement(position, animation_state);
                true
            }
            None => false,
        }
    }

    async fn remove(&self, id: &ConnectionId) -> bool {
        let mut participants = self.participants.lock().await;
        participants.remove(id).is_some()
    }

    async fn snapshot(&self) -> ParticipantSnapshot {
        let participants = self.participants.lock().await;
        participants
            .iter()
            .map(|(id, participant)| (id.clone(), participant.clone()))
            .collect()
    }

    async fn count(&self) -> usize {
        let participants = self.participants.lock().await;
        participants.len()
    }
}
