use wrapped_core::format::CounterFormat;
use wrapped_core::WrappedData;

use super::SectionId;

/// Every animated number in the presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterKey {
    TotalSpent,
    AverageTransaction,
    TransactionCount,
    MonthlyTransactions,
    TotalSaved,
    MonthlySavings,
    InterestEarned,
    SavingsStreak,
    TransportSpent,
    Rides,
    Distance,
    PointsEarned,
    CashbackEarned,
}

impl CounterKey {
    pub const ALL: [CounterKey; 13] = [
        CounterKey::TotalSpent,
        CounterKey::AverageTransaction,
        CounterKey::TransactionCount,
        CounterKey::MonthlyTransactions,
        CounterKey::TotalSaved,
        CounterKey::MonthlySavings,
        CounterKey::InterestEarned,
        CounterKey::SavingsStreak,
        CounterKey::TransportSpent,
        CounterKey::Rides,
        CounterKey::Distance,
        CounterKey::PointsEarned,
        CounterKey::CashbackEarned,
    ];

    pub fn section(&self) -> SectionId {
        match self {
            CounterKey::TotalSpent | CounterKey::AverageTransaction => SectionId::Spending,
            CounterKey::TransactionCount | CounterKey::MonthlyTransactions => SectionId::Habits,
            CounterKey::TotalSaved
            | CounterKey::MonthlySavings
            | CounterKey::InterestEarned
            | CounterKey::SavingsStreak => SectionId::Savings,
            CounterKey::TransportSpent | CounterKey::Rides | CounterKey::Distance => {
                SectionId::Transport
            }
            CounterKey::PointsEarned | CounterKey::CashbackEarned => SectionId::Rewards,
        }
    }

    /// Value the counter lands on
    pub fn target(&self, data: &WrappedData) -> f64 {
        match self {
            CounterKey::TotalSpent => data.spending.total,
            CounterKey::AverageTransaction => data.spending.average_transaction,
            CounterKey::TransactionCount => f64::from(data.transactions.total),
            CounterKey::MonthlyTransactions => f64::from(data.transactions.monthly_average()),
            CounterKey::TotalSaved => data.savings.total,
            CounterKey::MonthlySavings => data.savings.monthly_average,
            CounterKey::InterestEarned => data.savings.interest_earned,
            CounterKey::SavingsStreak => f64::from(data.savings.longest_streak),
            CounterKey::TransportSpent => data.transport.total,
            CounterKey::Rides => f64::from(data.transport.rides),
            CounterKey::Distance => data.transport.distance_traveled,
            CounterKey::PointsEarned => data.rewards.points_earned,
            CounterKey::CashbackEarned => data.rewards.cashback_earned,
        }
    }

    pub fn format(&self) -> CounterFormat {
        match self {
            CounterKey::TotalSpent
            | CounterKey::AverageTransaction
            | CounterKey::TotalSaved
            | CounterKey::MonthlySavings
            | CounterKey::InterestEarned
            | CounterKey::TransportSpent
            | CounterKey::CashbackEarned => CounterFormat::naira(),
            CounterKey::SavingsStreak => CounterFormat::default().with_suffix(" Days"),
            CounterKey::Distance => CounterFormat::default().with_suffix(" km"),
            CounterKey::TransactionCount
            | CounterKey::MonthlyTransactions
            | CounterKey::Rides
            | CounterKey::PointsEarned => CounterFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrapped_core::data::sample_summary;

    #[test]
    fn test_targets_from_summary() {
        let data = sample_summary();
        assert_eq!(CounterKey::TotalSpent.target(&data), 2_450_000.0);
        assert_eq!(
            CounterKey::MonthlyTransactions.target(&data),
            (f64::from(data.transactions.total) / 12.0).round()
        );
    }

    #[test]
    fn test_formats() {
        assert_eq!(CounterKey::TotalSaved.format().apply(850_000.0), "₦850,000");
        assert_eq!(CounterKey::SavingsStreak.format().apply(45.0), "45 Days");
        assert_eq!(CounterKey::Distance.format().apply(1250.0), "1,250 km");
    }
}
