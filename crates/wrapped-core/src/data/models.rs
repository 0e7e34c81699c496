use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The aggregated yearly financial record rendered by the presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedData {
    /// Year the summary covers
    #[serde(default = "default_year")]
    pub year: i32,
    pub user: UserSummary,
    pub spending: SpendingSummary,
    pub transactions: TransactionSummary,
    pub savings: SavingsSummary,
    pub transport: TransportSummary,
    pub rewards: RewardsSummary,
    pub personality: PersonalitySummary,
}

fn default_year() -> i32 {
    2024
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub name: String,
    /// Account age in days
    pub account_age: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSummary {
    pub total: f64,
    /// Spend per category, in the order the provider listed them
    pub by_category: IndexMap<String, f64>,
    pub top_merchant: String,
    pub top_merchant_spend: f64,
    pub average_transaction: f64,
    /// Percentage change against the previous year
    pub year_over_year_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub total: u32,
    pub most_active_day: String,
    pub most_active_time: String,
    pub largest_transaction: f64,
    pub smallest_transaction: f64,
    pub average_per_month: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsSummary {
    pub total: f64,
    pub goal: f64,
    pub percentage_of_goal: f64,
    pub monthly_average: f64,
    /// Longest streak in days
    pub longest_streak: u32,
    pub interest_earned: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportSummary {
    pub total: f64,
    pub rides: u32,
    pub average_ride_cost: f64,
    pub top_route: String,
    /// Kilometres
    pub distance_traveled: f64,
    /// Kilograms of CO2
    pub co2_saved: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardsSummary {
    pub points_earned: f64,
    pub cashback_earned: f64,
    pub badges_unlocked: Vec<String>,
    pub rewards_redeemed: u32,
    pub tier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalitySummary {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub traits: Vec<Trait>,
    pub financial_health: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trait {
    pub name: String,
    /// Score out of 100
    pub score: f64,
}

/// A spending category with its share of the total
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub name: String,
    pub amount: f64,
    pub percentage: f64,
}

impl SpendingSummary {
    /// Categories sorted by amount, largest first, with their share of the category total
    pub fn ranked_categories(&self) -> Vec<CategoryShare> {
        let total: f64 = self.by_category.values().sum();
        let mut categories: Vec<CategoryShare> = self
            .by_category
            .iter()
            .map(|(name, &amount)| CategoryShare {
                name: name.clone(),
                amount,
                percentage: if total > 0.0 { amount / total * 100.0 } else { 0.0 },
            })
            .collect();
        // Stable sort keeps provider order for equal amounts
        categories.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        categories
    }

    /// Name of the largest category
    pub fn top_category(&self) -> Option<String> {
        self.ranked_categories().into_iter().next().map(|c| c.name)
    }
}

impl TransactionSummary {
    /// Average transactions per month, rounded
    pub fn monthly_average(&self) -> u32 {
        (self.total as f64 / 12.0).round() as u32
    }

    /// Average transactions per day, rounded
    pub fn daily_average(&self) -> u32 {
        (self.total as f64 / 365.0).round() as u32
    }

    /// Hours between transactions on an average day, rounded
    pub fn hours_between(&self) -> Option<u32> {
        let per_day = self.total as f64 / 365.0;
        if per_day > 0.0 {
            Some((24.0 / per_day).round() as u32)
        } else {
            None
        }
    }
}

impl SavingsSummary {
    /// Goal progress capped to 100 for bar rendering
    pub fn capped_percentage(&self) -> f64 {
        self.percentage_of_goal.clamp(0.0, 100.0)
    }

    pub fn goal_reached(&self) -> bool {
        self.percentage_of_goal >= 100.0
    }

    /// Amount still missing to reach the goal
    pub fn remaining(&self) -> f64 {
        (self.goal - self.total).max(0.0)
    }
}

/// Emoji shown next to the most active day
pub fn day_emoji(day: &str) -> &'static str {
    match day {
        "Monday" => "😴",
        "Tuesday" => "💼",
        "Wednesday" => "🐫",
        "Thursday" => "🎯",
        "Friday" => "🎉",
        "Saturday" => "🛍️",
        "Sunday" => "😌",
        _ => "📅",
    }
}

/// Emoji shown next to a spending category
pub fn category_emoji(category: &str) -> &'static str {
    match category {
        "Food & Dining" => "🍽️",
        "Transport" => "🚗",
        "Bills & Utilities" => "💡",
        "Shopping" => "🛍️",
        "Entertainment" => "🎬",
        "Other" => "📦",
        _ => "📊",
    }
}
