use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::application::interfaces::clock::Clock;
use crate::domain::{
    repositories::subscriptions::SubscriptionRepository,
    value_objects::enums::subscription_statuses::SubscriptionStatus,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepOutcome {
    pub scanned: usize,
    pub marked_expired: usize,
    pub marked_active: usize,
    pub skipped_invalid: usize,
    pub store_failures: usize,
}

/// Re-evaluates every subscription's ACTIVE/EXPIRED flag against the clock.
/// Writes only on a transition, so back-to-back passes are idempotent.
pub struct ExpirationSweepUseCase<R>
where
    R: SubscriptionRepository + Send + Sync + 'static,
{
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ExpirationSweepUseCase<R>
where
    R: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn run(&self) -> Result<SweepOutcome> {
        let now = self.clock.now();
        let subscriptions = self.repository.list_all().await?;

        let mut outcome = SweepOutcome {
            scanned: subscriptions.len(),
            ..Default::default()
        };

        for mut entity in subscriptions {
            let Some(end_date) = entity.subscription_end_date else {
                warn!(
                    subscription_id = %entity.id,
                    "expiration_sweep: subscription has no end date; skipping"
                );
                outcome.skipped_invalid += 1;
                continue;
            };
            let Some(current_status) = entity.parsed_status() else {
                warn!(
                    subscription_id = %entity.id,
                    status = %entity.status,
                    "expiration_sweep: unrecognized status; skipping"
                );
                outcome.skipped_invalid += 1;
                continue;
            };

            let next_status = if now > end_date {
                SubscriptionStatus::Expired
            } else {
                SubscriptionStatus::Active
            };

            if next_status == current_status {
                continue;
            }

            let subscription_id = entity.id;
            entity.status = next_status.to_string();
            match self.repository.save(entity).await {
                Ok(_) => {
                    info!(
                        %subscription_id,
                        from = %current_status,
                        to = %next_status,
                        "expiration_sweep: status updated"
                    );
                    match next_status {
                        SubscriptionStatus::Expired => outcome.marked_expired += 1,
                        SubscriptionStatus::Active => outcome.marked_active += 1,
                    }
                }
                Err(err) => {
                    error!(
                        %subscription_id,
                        db_error = ?err,
                        "expiration_sweep: failed to persist status; continuing"
                    );
                    outcome.store_failures += 1;
                }
            }
        }

        Ok(outcome)
    }
}

/// Recurring sweep owned by the service lifecycle: started on boot, stopped
/// by aborting the spawned task on shutdown.
pub async fn run_sweep_loop<R>(usecase: Arc<ExpirationSweepUseCase<R>>, interval: Duration)
where
    R: SubscriptionRepository + Send + Sync + 'static,
{
    loop {
        match usecase.run().await {
            Ok(outcome) => info!(
                scanned = outcome.scanned,
                marked_expired = outcome.marked_expired,
                marked_active = outcome.marked_active,
                skipped_invalid = outcome.skipped_invalid,
                store_failures = outcome.store_failures,
                "expiration_sweep: pass complete"
            ),
            Err(err) => error!(error = ?err, "expiration_sweep: pass failed"),
        }

        tokio::time::sleep(interval).await;
    }
}
