use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{insert_into, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::subscriptions::SubscriptionEntity,
        repositories::subscriptions::SubscriptionRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::subscriptions},
};

pub struct SubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = subscriptions::table
            .find(id)
            .select(SubscriptionEntity::as_select())
            .first::<SubscriptionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn save(&self, entity: SubscriptionEntity) -> Result<SubscriptionEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(subscriptions::table)
            .values(&entity)
            .on_conflict(subscriptions::id)
            .do_update()
            .set(&entity)
            .get_result::<SubscriptionEntity>(&mut conn)?;

        Ok(result)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let removed = diesel::delete(subscriptions::table.find(id)).execute(&mut conn)?;

        Ok(removed > 0)
    }

    async fn list_all(&self) -> Result<Vec<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = subscriptions::table
            .select(SubscriptionEntity::as_select())
            .load::<SubscriptionEntity>(&mut conn)?;

        Ok(results)
    }
}
