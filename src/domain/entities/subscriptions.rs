use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::value_objects::{
    enums::{
        subscription_statuses::SubscriptionStatus, subscription_types::SubscriptionType,
        time_units::TimeUnit,
    },
    subscriptions::RenewalTerms,
};
use crate::infrastructure::postgres::schema::subscriptions;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = subscriptions)]
#[diesel(treat_none_as_null = true)]
pub struct SubscriptionEntity {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub tel: String,
    pub adresse: String,
    pub code: String,
    pub channel_count: i32,
    pub subscription_type: String,
    pub subscription_start_date: Option<DateTime<Utc>>,
    pub subscription_end_date: Option<DateTime<Utc>>,
    pub duration: i32,
    pub time_unit: String,
    pub status: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl SubscriptionEntity {
    pub fn parsed_type(&self) -> Option<SubscriptionType> {
        SubscriptionType::from_str(&self.subscription_type)
    }

    pub fn parsed_unit(&self) -> Option<TimeUnit> {
        TimeUnit::from_str(&self.time_unit)
    }

    pub fn parsed_status(&self) -> Option<SubscriptionStatus> {
        SubscriptionStatus::from_str(&self.status)
    }

    /// Moves the paid period forward for a renewal. An unexpired period is
    /// extended from its current end date; an expired (or never-dated)
    /// subscription restarts from `now`. Price is the caller's business.
    pub fn apply_renewal(&mut self, terms: &RenewalTerms, now: DateTime<Utc>) -> Result<()> {
        self.duration = terms.period;
        self.time_unit = terms.unit.to_string();
        self.subscription_type = terms.subscription_type.to_string();
        self.channel_count = terms.channel_count;

        let new_start = match self.subscription_end_date {
            Some(current_end) if current_end > now => current_end,
            _ => now,
        };
        let new_end = terms
            .unit
            .add_to(new_start, terms.period)
            .context("renewed subscription period is out of range")?;

        self.subscription_start_date = Some(new_start);
        self.subscription_end_date = Some(new_end);

        if self.parsed_status() == Some(SubscriptionStatus::Expired) {
            self.status = SubscriptionStatus::Active.to_string();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample_entity(now: DateTime<Utc>) -> SubscriptionEntity {
        SubscriptionEntity {
            id: Uuid::new_v4(),
            fullname: "Awa Diallo".to_string(),
            email: "awa@example.com".to_string(),
            tel: "+221770000000".to_string(),
            adresse: "Dakar".to_string(),
            code: "$argon2id$hashed".to_string(),
            channel_count: 250,
            subscription_type: SubscriptionType::Basic.to_string(),
            subscription_start_date: Some(now - Duration::days(10)),
            subscription_end_date: Some(now + Duration::days(20)),
            duration: 1,
            time_unit: TimeUnit::Months.to_string(),
            status: SubscriptionStatus::Active.to_string(),
            price: Decimal::from(30_000),
            created_at: now - Duration::days(10),
        }
    }

    #[test]
    fn active_renewal_extends_from_the_current_end_date() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut entity = sample_entity(now);
        let current_end = entity.subscription_end_date.unwrap();

        let terms = RenewalTerms {
            period: 2,
            unit: TimeUnit::Weeks,
            subscription_type: SubscriptionType::Basic,
            channel_count: 250,
        };
        entity.apply_renewal(&terms, now).unwrap();

        assert_eq!(entity.subscription_start_date, Some(current_end));
        assert_eq!(
            entity.subscription_end_date,
            Some(current_end + Duration::weeks(2))
        );
        assert_eq!(entity.duration, 2);
        assert_eq!(entity.time_unit, "WEEKS");
        assert_eq!(entity.status, "ACTIVE");
    }

    #[test]
    fn expired_renewal_restarts_from_now_and_reactivates() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut entity = sample_entity(now);
        entity.subscription_end_date = Some(now - Duration::days(3));
        entity.status = SubscriptionStatus::Expired.to_string();

        let terms = RenewalTerms {
            period: 1,
            unit: TimeUnit::Months,
            subscription_type: SubscriptionType::Classic,
            channel_count: 500,
        };
        entity.apply_renewal(&terms, now).unwrap();

        assert_eq!(entity.subscription_start_date, Some(now));
        assert_eq!(
            entity.subscription_end_date,
            Some(TimeUnit::Months.add_to(now, 1).unwrap())
        );
        assert_eq!(entity.status, "ACTIVE");
        assert_eq!(entity.subscription_type, "CLASSIC");
        assert_eq!(entity.channel_count, 500);
    }

    #[test]
    fn renewal_without_an_end_date_restarts_from_now() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut entity = sample_entity(now);
        entity.subscription_start_date = None;
        entity.subscription_end_date = None;

        let terms = RenewalTerms {
            period: 10,
            unit: TimeUnit::Days,
            subscription_type: SubscriptionType::Basic,
            channel_count: 250,
        };
        entity.apply_renewal(&terms, now).unwrap();

        assert_eq!(entity.subscription_start_date, Some(now));
        assert_eq!(entity.subscription_end_date, Some(now + Duration::days(10)));
    }

    #[test]
    fn renewal_never_touches_price() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut entity = sample_entity(now);
        let price_before = entity.price;

        let terms = RenewalTerms {
            period: 1,
            unit: TimeUnit::Months,
            subscription_type: SubscriptionType::Basic,
            channel_count: 250,
        };
        entity.apply_renewal(&terms, now).unwrap();

        assert_eq!(entity.price, price_before);
    }
}
