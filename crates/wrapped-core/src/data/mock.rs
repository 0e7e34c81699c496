use indexmap::IndexMap;

use super::models::*;

/// Built-in sample summary used by the mock source and the tests
pub fn sample_summary() -> WrappedData {
    let by_category: IndexMap<String, f64> = [
        ("Food & Dining", 680000.0),
        ("Transport", 420000.0),
        ("Bills & Utilities", 350000.0),
        ("Shopping", 520000.0),
        ("Entertainment", 280000.0),
        ("Other", 200000.0),
    ]
    .into_iter()
    .map(|(name, amount)| (name.to_string(), amount))
    .collect();

    WrappedData {
        year: 2024,
        user: UserSummary {
            name: "Adebayo".to_string(),
            account_age: 365,
        },
        spending: SpendingSummary {
            total: 2450000.0,
            by_category,
            top_merchant: "Shoprite".to_string(),
            top_merchant_spend: 145000.0,
            average_transaction: 8500.0,
            year_over_year_change: 15.0,
        },
        transactions: TransactionSummary {
            total: 289,
            most_active_day: "Friday".to_string(),
            most_active_time: "6:00 PM".to_string(),
            largest_transaction: 75000.0,
            smallest_transaction: 50.0,
            average_per_month: 204166.0,
        },
        savings: SavingsSummary {
            total: 850000.0,
            goal: 1000000.0,
            percentage_of_goal: 85.0,
            monthly_average: 70833.0,
            longest_streak: 45,
            interest_earned: 12500.0,
        },
        transport: TransportSummary {
            total: 420000.0,
            rides: 156,
            average_ride_cost: 2692.0,
            top_route: "Lekki - VI".to_string(),
            distance_traveled: 2340.0,
            co2_saved: 125.0,
        },
        rewards: RewardsSummary {
            points_earned: 12450.0,
            cashback_earned: 18500.0,
            badges_unlocked: ["Early Bird", "Saver", "Frequent Rider", "Goal Crusher"]
                .iter()
                .map(|b| b.to_string())
                .collect(),
            rewards_redeemed: 8,
            tier: "Gold".to_string(),
        },
        personality: PersonalitySummary {
            kind: "Strategic Saver".to_string(),
            description: "You balance smart spending with consistent saving habits. Your disciplined approach to finances shows you understand the value of both enjoying today and planning for tomorrow.".to_string(),
            traits: vec![
                Trait { name: "Disciplined".to_string(), score: 85.0 },
                Trait { name: "Strategic".to_string(), score: 78.0 },
                Trait { name: "Rewarding".to_string(), score: 72.0 },
            ],
            financial_health: "Excellent".to_string(),
        },
    }
}
