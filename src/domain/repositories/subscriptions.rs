use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::subscriptions::SubscriptionEntity;

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubscriptionEntity>>;
    async fn save(&self, entity: SubscriptionEntity) -> Result<SubscriptionEntity>;
    async fn delete(&self, id: Uuid) -> Result<bool>;
    async fn list_all(&self) -> Result<Vec<SubscriptionEntity>>;
}
