use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use crate::{
    application::{
        interfaces::{clock::SystemClock, credential_hasher::Argon2CredentialHasher},
        usecases::subscriptions::{SubscriptionError, SubscriptionLifecycleUseCase},
    },
    domain::{
        repositories::subscriptions::SubscriptionRepository,
        value_objects::subscriptions::{
            NewSubscriptionModel, RenewalRequest, SubscriptionUpdateModel,
        },
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad, repositories::subscriptions::SubscriptionPostgres,
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscriptions_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let subscriptions_usecase = SubscriptionLifecycleUseCase::new(
        Arc::new(subscriptions_repository),
        Arc::new(SystemClock),
        Arc::new(Argon2CredentialHasher),
    );

    Router::new()
        .route("/", post(create).get(list_all))
        .route("/:id", get(get_by_id))
        .route("/:id", put(update))
        .route("/:id", delete(remove))
        .route("/:id/renew", post(renew))
        .route("/:id/status", get(compute_status))
        .with_state(Arc::new(subscriptions_usecase))
}

pub async fn create<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionLifecycleUseCase<T>>>,
    Json(new_subscription_model): Json<NewSubscriptionModel>,
) -> Result<impl IntoResponse, SubscriptionError>
where
    T: SubscriptionRepository + Send + Sync + 'static,
{
    let created = subscriptions_usecase.create(new_subscription_model).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_by_id<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionLifecycleUseCase<T>>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, SubscriptionError>
where
    T: SubscriptionRepository + Send + Sync + 'static,
{
    let subscription = subscriptions_usecase.get_by_id(id).await?;
    Ok((StatusCode::OK, Json(subscription)))
}

pub async fn list_all<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionLifecycleUseCase<T>>>,
) -> Result<impl IntoResponse, SubscriptionError>
where
    T: SubscriptionRepository + Send + Sync + 'static,
{
    let subscriptions = subscriptions_usecase.list_all().await?;
    Ok((StatusCode::OK, Json(subscriptions)))
}

pub async fn update<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionLifecycleUseCase<T>>>,
    Path(id): Path<Uuid>,
    Json(update_model): Json<SubscriptionUpdateModel>,
) -> Result<impl IntoResponse, SubscriptionError>
where
    T: SubscriptionRepository + Send + Sync + 'static,
{
    let updated = subscriptions_usecase.update(id, update_model).await?;
    Ok((StatusCode::OK, Json(updated)))
}

pub async fn remove<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionLifecycleUseCase<T>>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, SubscriptionError>
where
    T: SubscriptionRepository + Send + Sync + 'static,
{
    subscriptions_usecase.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn renew<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionLifecycleUseCase<T>>>,
    Path(id): Path<Uuid>,
    Json(renewal_request): Json<RenewalRequest>,
) -> Result<impl IntoResponse, SubscriptionError>
where
    T: SubscriptionRepository + Send + Sync + 'static,
{
    let renewed = subscriptions_usecase.renew(id, renewal_request).await?;
    Ok((StatusCode::OK, Json(renewed)))
}

pub async fn compute_status<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionLifecycleUseCase<T>>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, SubscriptionError>
where
    T: SubscriptionRepository + Send + Sync + 'static,
{
    let status = subscriptions_usecase.compute_status(id).await?;
    Ok((StatusCode::OK, Json(status)))
}
