use std::sync::Arc;

use anyhow::anyhow;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::application::interfaces::{clock::Clock, credential_hasher::CredentialHasher};
use crate::domain::{
    entities::subscriptions::SubscriptionEntity,
    pricing,
    repositories::subscriptions::SubscriptionRepository,
    value_objects::{
        enums::{
            subscription_statuses::SubscriptionStatus, time_units::TimeUnit,
        },
        subscriptions::{
            NewSubscriptionModel, RenewalRequest, RenewalTerms, SubscriptionModel,
            SubscriptionStatusModel, SubscriptionUpdateModel,
        },
    },
};

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("subscription not found")]
    SubscriptionNotFound,
    #[error("unsupported time unit: {0}")]
    InvalidTimeUnit(String),
    #[error("renewal period must be at least 1, got {0}")]
    InvalidDuration(i32),
    #[error("inconsistent subscription record: {0}")]
    InvalidState(String),
    #[error("subscription store failure")]
    StoreFailure(#[source] anyhow::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::SubscriptionNotFound => StatusCode::NOT_FOUND,
            SubscriptionError::InvalidTimeUnit(_) | SubscriptionError::InvalidDuration(_) => {
                StatusCode::BAD_REQUEST
            }
            SubscriptionError::InvalidState(_)
            | SubscriptionError::StoreFailure(_)
            | SubscriptionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionError>;

pub struct SubscriptionLifecycleUseCase<R>
where
    R: SubscriptionRepository + Send + Sync + 'static,
{
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    hasher: Arc<dyn CredentialHasher>,
}

impl<R> SubscriptionLifecycleUseCase<R>
where
    R: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self {
            repository,
            clock,
            hasher,
        }
    }

    pub async fn create(&self, details: NewSubscriptionModel) -> UseCaseResult<SubscriptionModel> {
        let duration = details.duration.unwrap_or(1);
        if duration <= 0 {
            warn!(duration, "subscriptions: rejected non-positive initial period");
            return Err(SubscriptionError::InvalidDuration(duration));
        }
        let unit = match details.time_unit.as_deref() {
            Some(raw) => TimeUnit::from_str(raw).ok_or_else(|| {
                warn!(unit = raw, "subscriptions: rejected unknown time unit");
                SubscriptionError::InvalidTimeUnit(raw.to_string())
            })?,
            None => TimeUnit::Months,
        };

        let rates = pricing::plan_rates(details.subscription_type);
        let channel_count = details.channel_count.unwrap_or(rates.base_channels);
        let price = pricing::total_price(
            details.subscription_type,
            duration,
            unit,
            Some(channel_count),
        );

        let now = self.clock.now();
        let end = unit
            .add_to(now, duration)
            .ok_or_else(|| anyhow!("initial subscription period is out of range"))?;
        let code = self
            .hasher
            .hash(&details.code)
            .map_err(SubscriptionError::Internal)?;

        let entity = SubscriptionEntity {
            id: Uuid::new_v4(),
            fullname: details.fullname,
            email: details.email,
            tel: details.tel,
            adresse: details.adresse,
            code,
            channel_count,
            subscription_type: details.subscription_type.to_string(),
            subscription_start_date: Some(now),
            subscription_end_date: Some(end),
            duration,
            time_unit: unit.to_string(),
            status: SubscriptionStatus::Active.to_string(),
            price,
            created_at: now,
        };

        info!(
            subscription_id = %entity.id,
            subscription_type = %details.subscription_type,
            duration,
            unit = %unit,
            channel_count,
            price = %price,
            "subscriptions: creating subscription"
        );

        let saved = self.repository.save(entity).await.map_err(|err| {
            error!(db_error = ?err, "subscriptions: failed to persist new subscription");
            SubscriptionError::StoreFailure(err)
        })?;

        self.to_model(saved)
    }

    pub async fn get_by_id(&self, id: Uuid) -> UseCaseResult<SubscriptionModel> {
        let entity = self.load(id).await?;
        self.to_model(entity)
    }

    pub async fn list_all(&self) -> UseCaseResult<Vec<SubscriptionModel>> {
        let entities = self.repository.list_all().await.map_err(|err| {
            error!(db_error = ?err, "subscriptions: failed to list subscriptions");
            SubscriptionError::StoreFailure(err)
        })?;

        entities
            .into_iter()
            .map(|entity| self.to_model(entity))
            .collect()
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: SubscriptionUpdateModel,
    ) -> UseCaseResult<SubscriptionModel> {
        let mut entity = self.load(id).await?;

        if let Some(fullname) = changes.fullname {
            entity.fullname = fullname;
        }
        if let Some(email) = changes.email {
            entity.email = email;
        }
        if let Some(tel) = changes.tel {
            entity.tel = tel;
        }
        if let Some(adresse) = changes.adresse {
            entity.adresse = adresse;
        }
        if let Some(code) = changes.code {
            if !code.is_empty() {
                entity.code = self
                    .hasher
                    .hash(&code)
                    .map_err(SubscriptionError::Internal)?;
            }
        }

        let saved = self.repository.save(entity).await.map_err(|err| {
            error!(%id, db_error = ?err, "subscriptions: failed to persist contact update");
            SubscriptionError::StoreFailure(err)
        })?;

        info!(subscription_id = %id, "subscriptions: contact details updated");
        self.to_model(saved)
    }

    pub async fn delete(&self, id: Uuid) -> UseCaseResult<()> {
        let removed = self.repository.delete(id).await.map_err(|err| {
            error!(%id, db_error = ?err, "subscriptions: failed to delete subscription");
            SubscriptionError::StoreFailure(err)
        })?;

        if !removed {
            return Err(SubscriptionError::SubscriptionNotFound);
        }

        info!(subscription_id = %id, "subscriptions: subscription deleted");
        Ok(())
    }

    /// Renews a subscription and settles the price for the new period.
    ///
    /// Pricing policy:
    /// - EXPIRED: the price is replaced by the freshly computed amount;
    ///   lapsed periods are never billed again.
    /// - ACTIVE on identical terms: the new period price stacks onto the
    ///   existing cumulative price.
    /// - ACTIVE onto different terms: the charge is the new period price
    ///   minus a prorated credit for the unconsumed part of the current
    ///   period, floored at zero so the cumulative price never shrinks.
    pub async fn renew(&self, id: Uuid, request: RenewalRequest) -> UseCaseResult<SubscriptionModel> {
        if request.renewal_period <= 0 {
            warn!(%id, period = request.renewal_period, "subscriptions: rejected non-positive renewal period");
            return Err(SubscriptionError::InvalidDuration(request.renewal_period));
        }
        let unit = TimeUnit::from_str(&request.unit).ok_or_else(|| {
            warn!(%id, unit = %request.unit, "subscriptions: rejected unknown renewal unit");
            SubscriptionError::InvalidTimeUnit(request.unit.clone())
        })?;

        let mut entity = self.load(id).await?;

        let status = entity
            .parsed_status()
            .ok_or_else(|| self.integrity_fault(id, format!("status {} is outside ACTIVE/EXPIRED", entity.status)))?;
        let current_type = entity
            .parsed_type()
            .ok_or_else(|| self.integrity_fault(id, format!("unknown subscription type {}", entity.subscription_type)))?;
        let current_unit = entity
            .parsed_unit()
            .ok_or_else(|| self.integrity_fault(id, format!("unknown stored time unit {}", entity.time_unit)))?;

        let effective_type = request.subscription_type.unwrap_or(current_type);
        let rates = pricing::plan_rates(effective_type);
        let effective_channels = request.channel_count.unwrap_or(rates.base_channels);
        let new_terms_price = pricing::total_price(
            effective_type,
            request.renewal_period,
            unit,
            Some(effective_channels),
        );

        let same_terms = effective_type == current_type
            && unit == current_unit
            && request.renewal_period == entity.duration
            && effective_channels == entity.channel_count;

        let now = self.clock.now();
        entity.price = match status {
            SubscriptionStatus::Expired => {
                info!(subscription_id = %id, price = %new_terms_price, "subscriptions: expired renewal, price reset");
                new_terms_price
            }
            SubscriptionStatus::Active if same_terms => entity.price + new_terms_price,
            SubscriptionStatus::Active => {
                let current_period_price = pricing::total_price(
                    current_type,
                    entity.duration,
                    current_unit,
                    Some(entity.channel_count),
                );
                let credit = match (entity.subscription_start_date, entity.subscription_end_date) {
                    (Some(start), Some(end)) => pricing::unused_credit(
                        current_period_price,
                        (end - now).num_days(),
                        (end - start).num_days(),
                    ),
                    _ => Decimal::ZERO,
                };
                let charge = (new_terms_price - credit).max(Decimal::ZERO);
                info!(
                    subscription_id = %id,
                    credit = %credit,
                    charge = %charge,
                    "subscriptions: active renewal onto changed terms"
                );
                entity.price + charge
            }
        };

        let terms = RenewalTerms {
            period: request.renewal_period,
            unit,
            subscription_type: effective_type,
            channel_count: effective_channels,
        };
        entity.apply_renewal(&terms, now)?;

        let saved = self.repository.save(entity).await.map_err(|err| {
            error!(%id, db_error = ?err, "subscriptions: failed to persist renewal");
            SubscriptionError::StoreFailure(err)
        })?;

        info!(
            subscription_id = %saved.id,
            price = %saved.price,
            ends_at = ?saved.subscription_end_date,
            "subscriptions: renewal persisted"
        );
        self.to_model(saved)
    }

    pub async fn compute_status(&self, id: Uuid) -> UseCaseResult<SubscriptionStatusModel> {
        let entity = self.load(id).await?;

        let start = entity
            .subscription_start_date
            .ok_or_else(|| self.integrity_fault(id, "start date is not set".to_string()))?;
        let end = entity
            .subscription_end_date
            .ok_or_else(|| self.integrity_fault(id, "end date is not set".to_string()))?;
        if end < start {
            return Err(self.integrity_fault(id, "end date precedes start date".to_string()));
        }

        let now = self.clock.now();
        let remaining_days = (end - now).num_days();
        let total_days = (end - start).num_days();

        // Reported as percentage REMAINING, not consumed.
        let progress_percentage = if total_days <= 0 {
            100.0
        } else {
            let elapsed_days = (now - start).num_days();
            100.0 - (elapsed_days as f64 / total_days as f64) * 100.0
        };

        Ok(SubscriptionStatusModel {
            remaining_days,
            progress_percentage,
            is_expired: remaining_days <= 0,
        })
    }

    async fn load(&self, id: Uuid) -> UseCaseResult<SubscriptionEntity> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|err| {
                error!(%id, db_error = ?err, "subscriptions: failed to load subscription");
                SubscriptionError::StoreFailure(err)
            })?
            .ok_or(SubscriptionError::SubscriptionNotFound)
    }

    fn to_model(&self, entity: SubscriptionEntity) -> UseCaseResult<SubscriptionModel> {
        let id = entity.id;
        SubscriptionModel::try_from(entity).map_err(|err| self.integrity_fault(id, err.to_string()))
    }

    fn integrity_fault(&self, id: Uuid, detail: String) -> SubscriptionError {
        error!(subscription_id = %id, detail = %detail, "subscriptions: data integrity fault");
        SubscriptionError::InvalidState(detail)
    }
}
