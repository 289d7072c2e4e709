use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use channel_keep::application::interfaces::clock::Clock;
use channel_keep::domain::entities::subscriptions::SubscriptionEntity;
use channel_keep::domain::repositories::subscriptions::SubscriptionRepository;

/// Store double backed by a plain map, enough to drive full lifecycle
/// scenarios without Postgres.
#[derive(Default)]
pub struct InMemorySubscriptionRepository {
    records: Mutex<HashMap<Uuid, SubscriptionEntity>>,
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubscriptionEntity>> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    async fn save(&self, entity: SubscriptionEntity) -> Result<SubscriptionEntity> {
        self.records
            .lock()
            .unwrap()
            .insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.records.lock().unwrap().remove(&id).is_some())
    }

    async fn list_all(&self) -> Result<Vec<SubscriptionEntity>> {
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }
}

/// Clock that only moves when a test pushes it.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
