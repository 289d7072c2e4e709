use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::value_objects::enums::{
    subscription_types::SubscriptionType, time_units::TimeUnit,
};

/// Billing rates for one subscription tier: the monthly base price, the
/// channel allowance it includes, and the per-channel rate above it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRates {
    pub base_price: Decimal,
    pub base_channels: i32,
    pub channel_rate: Decimal,
}

pub fn plan_rates(subscription_type: SubscriptionType) -> PlanRates {
    match subscription_type {
        SubscriptionType::Basic => PlanRates {
            base_price: Decimal::from(30_000),
            base_channels: 250,
            channel_rate: Decimal::new(12, 1),
        },
        SubscriptionType::Classic => PlanRates {
            base_price: Decimal::from(50_000),
            base_channels: 500,
            channel_rate: Decimal::new(15, 1),
        },
    }
}

/// Scales a monthly base price to an arbitrary period. Sub-month units
/// round the divided base to 2 decimal places half-up BEFORE multiplying
/// by the duration; downstream totals depend on that exact order.
pub fn period_price(base_price: Decimal, duration: i32, unit: TimeUnit) -> Decimal {
    let duration = Decimal::from(duration);
    match unit {
        TimeUnit::Days => round_money(base_price / Decimal::from(30)) * duration,
        TimeUnit::Weeks => round_money(base_price / Decimal::from(4)) * duration,
        TimeUnit::Months => base_price * duration,
        TimeUnit::Years => base_price * duration * Decimal::from(12),
    }
}

pub fn extra_channel_cost(subscription_type: SubscriptionType, requested: Option<i32>) -> Decimal {
    let rates = plan_rates(subscription_type);
    let requested = requested.unwrap_or(rates.base_channels);

    if requested <= rates.base_channels {
        return Decimal::ZERO;
    }

    Decimal::from(requested - rates.base_channels) * rates.channel_rate
}

/// Single source of truth for what a subscription costs for one period at
/// one capacity. Create and renew both price through here.
pub fn total_price(
    subscription_type: SubscriptionType,
    duration: i32,
    unit: TimeUnit,
    channel_count: Option<i32>,
) -> Decimal {
    let rates = plan_rates(subscription_type);
    period_price(rates.base_price, duration, unit) + extra_channel_cost(subscription_type, channel_count)
}

/// Value of the unconsumed part of the current period, used to offset the
/// charge when an active subscription renews onto different terms.
pub fn unused_credit(period_price: Decimal, remaining_days: i64, total_days: i64) -> Decimal {
    if total_days <= 0 {
        return Decimal::ZERO;
    }
    let remaining = remaining_days.clamp(0, total_days);
    round_money(period_price * Decimal::from(remaining) / Decimal::from(total_days))
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_month_costs_exactly_the_base_price() {
        let rates = plan_rates(SubscriptionType::Basic);
        assert_eq!(
            period_price(rates.base_price, 1, TimeUnit::Months),
            Decimal::from(30_000)
        );
    }

    #[test]
    fn zero_duration_is_free_for_every_unit() {
        for unit in [
            TimeUnit::Days,
            TimeUnit::Weeks,
            TimeUnit::Months,
            TimeUnit::Years,
        ] {
            assert_eq!(
                period_price(Decimal::from(30_000), 0, unit),
                Decimal::ZERO,
                "unit {unit}"
            );
        }
    }

    #[test]
    fn days_divide_by_thirty_before_multiplying() {
        // 30000 / 30 = 1000 per day
        assert_eq!(
            period_price(Decimal::from(30_000), 5, TimeUnit::Days),
            Decimal::from(5_000)
        );
    }

    #[test]
    fn weeks_divide_by_four_before_multiplying() {
        assert_eq!(
            period_price(Decimal::from(50_000), 3, TimeUnit::Weeks),
            Decimal::from(37_500)
        );
    }

    #[test]
    fn years_are_twelve_base_prices_per_year() {
        assert_eq!(
            period_price(Decimal::from(30_000), 2, TimeUnit::Years),
            Decimal::from(720_000)
        );
    }

    #[test]
    fn midpoints_round_up_on_the_divided_base() {
        // 30.34 / 4 = 7.585, half-up to 7.59 before scaling by the duration
        assert_eq!(
            period_price(Decimal::new(3034, 2), 2, TimeUnit::Weeks),
            Decimal::new(1518, 2)
        );
    }

    #[test]
    fn capacity_at_or_below_allowance_has_no_surcharge() {
        assert_eq!(
            extra_channel_cost(SubscriptionType::Basic, Some(250)),
            Decimal::ZERO
        );
        assert_eq!(
            extra_channel_cost(SubscriptionType::Basic, Some(10)),
            Decimal::ZERO
        );
        assert_eq!(extra_channel_cost(SubscriptionType::Basic, None), Decimal::ZERO);
    }

    #[test]
    fn surcharge_grows_with_each_extra_channel() {
        let ten_extra = extra_channel_cost(SubscriptionType::Basic, Some(260));
        let eleven_extra = extra_channel_cost(SubscriptionType::Basic, Some(261));
        assert_eq!(ten_extra, Decimal::from(12));
        assert!(eleven_extra > ten_extra);
    }

    #[test]
    fn total_combines_period_price_and_surcharge() {
        // CLASSIC month 50000 + 100 extra channels at 1.5
        assert_eq!(
            total_price(SubscriptionType::Classic, 1, TimeUnit::Months, Some(600)),
            Decimal::from(50_150)
        );
    }

    #[test]
    fn unused_credit_is_proportional_and_clamped() {
        let period = Decimal::from(30_000);
        assert_eq!(unused_credit(period, 15, 30), Decimal::from(15_000));
        assert_eq!(unused_credit(period, -3, 30), Decimal::ZERO);
        assert_eq!(unused_credit(period, 45, 30), period);
        assert_eq!(unused_credit(period, 10, 0), Decimal::ZERO);
    }
}
