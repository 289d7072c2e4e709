use anyhow::anyhow;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::subscriptions::SubscriptionEntity;
use crate::domain::value_objects::enums::{
    subscription_statuses::SubscriptionStatus, subscription_types::SubscriptionType,
    time_units::TimeUnit,
};

/// Wire model of a subscription. The hashed credential never leaves the
/// service, so it has no field here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionModel {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub tel: String,
    pub adresse: String,
    pub channel_count: i32,
    pub subscription_type: SubscriptionType,
    pub subscription_start_date: Option<DateTime<Utc>>,
    pub subscription_end_date: Option<DateTime<Utc>>,
    pub duration: i32,
    pub time_unit: TimeUnit,
    pub status: SubscriptionStatus,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionEntity> for SubscriptionModel {
    type Error = anyhow::Error;

    fn try_from(entity: SubscriptionEntity) -> Result<Self, Self::Error> {
        let subscription_type = entity
            .parsed_type()
            .ok_or_else(|| anyhow!("unknown subscription type: {}", entity.subscription_type))?;
        let time_unit = entity
            .parsed_unit()
            .ok_or_else(|| anyhow!("unknown time unit: {}", entity.time_unit))?;
        let status = entity
            .parsed_status()
            .ok_or_else(|| anyhow!("unknown status: {}", entity.status))?;

        Ok(SubscriptionModel {
            id: entity.id,
            fullname: entity.fullname,
            email: entity.email,
            tel: entity.tel,
            adresse: entity.adresse,
            channel_count: entity.channel_count,
            subscription_type,
            subscription_start_date: entity.subscription_start_date,
            subscription_end_date: entity.subscription_end_date,
            duration: entity.duration,
            time_unit,
            status,
            price: entity.price,
            created_at: entity.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubscriptionModel {
    pub fullname: String,
    pub email: String,
    pub tel: String,
    pub adresse: String,
    pub code: String,
    pub subscription_type: SubscriptionType,
    pub duration: Option<i32>,
    pub time_unit: Option<String>,
    pub channel_count: Option<i32>,
}

/// Partial update of contact fields. Billing fields are deliberately not
/// representable here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscriptionUpdateModel {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub tel: Option<String>,
    pub adresse: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenewalRequest {
    pub renewal_period: i32,
    pub unit: String,
    pub subscription_type: Option<SubscriptionType>,
    pub channel_count: Option<i32>,
}

/// Renewal inputs after the usecase has resolved defaults: the effective
/// tier and capacity are always concrete by the time the entity mutates.
#[derive(Debug, Clone, Copy)]
pub struct RenewalTerms {
    pub period: i32,
    pub unit: TimeUnit,
    pub subscription_type: SubscriptionType,
    pub channel_count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionStatusModel {
    pub remaining_days: i64,
    pub progress_percentage: f64,
    pub is_expired: bool,
}
