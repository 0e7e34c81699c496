//! Content of each section of the presentation

use std::collections::HashMap;
use std::time::{Duration, Instant};

use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use wrapped_core::config::KeymapConfig;
use wrapped_core::data::{category_emoji, day_emoji};
use wrapped_core::format::{format_amount, format_millions, format_naira, format_thousands};
use wrapped_core::{DataState, WrappedData};

use super::blocks::{Card, Content};
use super::counters::CounterKey;
use super::SectionId;
use crate::counter::AnimatedCounter;
use crate::reveal::SectionReveal;
use crate::theme::Theme;

/// Category bars start this long after their section
const BAR_OFFSET: Duration = Duration::from_millis(300);
const BAR_STAGGER: Duration = Duration::from_millis(100);
const BAR_DURATION: Duration = Duration::from_millis(1000);

const BADGE_ICONS: [&str; 4] = ["🌅", "💰", "🚗", "🎯"];

/// Everything a section needs to build its lines for one frame
pub struct SectionContext<'a> {
    pub data: &'a DataState,
    pub theme: &'a Theme,
    pub keys: &'a KeymapConfig,
    pub counters: &'a HashMap<CounterKey, AnimatedCounter>,
    pub reveal: &'a SectionReveal,
    pub now: Instant,
}

impl SectionContext<'_> {
    fn counter_text(&self, key: CounterKey) -> String {
        self.counters
            .get(&key)
            .map(|c| c.text())
            .unwrap_or_else(|| key.format().apply(0.0))
    }

    fn counter_card(&self, icon: &'static str, title: &'static str, key: CounterKey) -> Card {
        Card::counter(icon, title, key, self.counter_text(key))
    }

    /// Grown fraction of the `index`-th bar of the section
    fn bar_growth(&self, index: usize) -> f64 {
        let offset = BAR_OFFSET + BAR_STAGGER * index as u32;
        self.reveal.child_progress(self.now, offset, BAR_DURATION)
    }

    fn key_hint(&self, key: &str, text: &str) -> Vec<Span<'static>> {
        vec![
            Span::styled(format!(" {} ", key), self.theme.highlight().add_modifier(Modifier::REVERSED)),
            Span::styled(format!(" {}", text), self.theme.dim()),
        ]
    }
}

/// Build the content of `id`; `None` when the section has nothing to show
pub fn build(id: SectionId, ctx: &SectionContext<'_>, width: u16) -> Option<Content> {
    let mut content = Content::new(width);
    let data = ctx.data.data();
    let loading = ctx.data.loading && data.is_none();

    match (id, data) {
        (SectionId::Hero, data) => hero(&mut content, ctx, data),
        _ if loading && id != SectionId::Share => {
            let (title, cards) = loading_copy(id);
            content.heading(ctx.theme, title, None);
            content.skeleton(ctx.theme, cards);
        }
        (SectionId::Spending, Some(data)) if ctx.data.error.is_none() => spending(&mut content, ctx, data),
        (SectionId::Spending, _) => spending_error(&mut content, ctx),
        (SectionId::Share, data) => share(&mut content, ctx, data),
        (_, None) => return None,
        (SectionId::Habits, Some(data)) if ctx.data.error.is_none() => habits(&mut content, ctx, data),
        (SectionId::Savings, Some(data)) if ctx.data.error.is_none() => savings(&mut content, ctx, data),
        (SectionId::Habits | SectionId::Savings, Some(_)) => return None,
        (SectionId::Transport, Some(data)) => transport(&mut content, ctx, data),
        (SectionId::Rewards, Some(data)) => rewards(&mut content, ctx, data),
        (SectionId::Personality, Some(data)) => personality(&mut content, ctx, data),
    }
    Some(content)
}

fn loading_copy(id: SectionId) -> (&'static str, usize) {
    match id {
        SectionId::Spending => ("Loading your spending story...", 3),
        SectionId::Habits => ("Analyzing your patterns...", 4),
        SectionId::Savings => ("Calculating your progress...", 3),
        SectionId::Transport => ("Mapping your journeys...", 3),
        SectionId::Rewards => ("Tallying your rewards...", 3),
        SectionId::Personality => ("Analyzing your profile...", 1),
        SectionId::Hero | SectionId::Share => ("Loading...", 1),
    }
}

fn hero(content: &mut Content, ctx: &SectionContext<'_>, data: Option<&WrappedData>) {
    let theme = ctx.theme;
    let year = data.map(|d| d.year).unwrap_or(2024);

    content.centered("✦ OPay Wrapped ✦", theme.dim());
    content.blank();
    match data.map(|d| d.user.name.as_str()).filter(|n| !n.is_empty()) {
        Some(name) => {
            content.centered("Welcome Back,", theme.title());
            content.centered(name, theme.title().fg(theme.accent_strong));
        }
        None => {
            content.centered("Your OPay Wrapped", theme.title());
            content.centered(&year.to_string(), theme.title().fg(theme.accent_strong));
        }
    }
    content.blank();
    content.centered(
        &format!("Your personalized financial journey through {}.", year),
        theme.text(),
    );
    content.centered("Let's explore your year together.", theme.text());
    content.blank();

    let mut hints = ctx.key_hint(&ctx.keys.next_section, "Start Your Journey");
    hints.push(Span::raw("    "));
    hints.extend(ctx.key_hint(&ctx.keys.skip_to_share, "Skip to Share"));
    content.centered_spans(hints);

    if let Some(data) = data {
        content.blank();
        content.grid(
            theme,
            &[
                (format_amount(f64::from(data.transactions.total)), "Transactions"),
                (format!("₦{}", format_millions(data.spending.total)), "Total Spent"),
                (format!("₦{}", format_thousands(data.savings.total)), "Saved"),
                (data.rewards.tier.clone(), "Tier"),
            ],
        );
    }

    content.blank();
    content.centered("↓", theme.dim());
}

fn spending_error(content: &mut Content, ctx: &SectionContext<'_>) {
    let theme = ctx.theme;
    content.heading(theme, "Oops!", None);
    content.centered(
        "We couldn't load your spending data. Please try again.",
        theme.text(),
    );
    if let Some(ref error) = ctx.data.error {
        content.centered(error, Style::default().fg(theme.error));
    }
    content.blank();
    content.centered_spans(ctx.key_hint(&ctx.keys.retry, "Reload"));
}

fn spending(content: &mut Content, ctx: &SectionContext<'_>, data: &WrappedData) {
    let theme = ctx.theme;
    let spending = &data.spending;

    content.heading(
        theme,
        "Your Spending Story",
        Some(&format!(
            "In {}, you made {} transactions",
            data.year, data.transactions.total
        )),
    );

    content.card(
        theme,
        ctx.counter_card("💰", "Total Spent", CounterKey::TotalSpent)
            .trend(spending.year_over_year_change),
    );
    content.card(
        theme,
        ctx.counter_card("📊", "Average Transaction", CounterKey::AverageTransaction)
            .subtitle("Per transaction"),
    );
    content.card(
        theme,
        Card::new("🏪", "Top Merchant", spending.top_merchant.clone())
            .subtitle(format!("{} spent", format_naira(spending.top_merchant_spend))),
    );

    content.centered("Where Your Money Went", theme.title());
    content.blank();
    for (index, category) in spending.ranked_categories().iter().enumerate() {
        let color = theme.palette_color(index);
        content.row(
            vec![Span::styled(
                format!("{} {}", category_emoji(&category.name), category.name),
                theme.text(),
            )],
            Span::styled(format_naira(category.amount), theme.dim()),
        );
        let label = (category.percentage > 15.0).then(|| format!("{:.1}%", category.percentage));
        content.bar(
            category.percentage / 100.0 * ctx.bar_growth(index),
            color,
            theme.track,
            label,
        );
    }
    content.blank();

    if let Some(top) = spending.top_category() {
        content.centered_spans(vec![
            Span::styled("Your top category was ", theme.text()),
            Span::styled(top, theme.highlight()),
        ]);
    }
    let change = spending.year_over_year_change;
    if change > 0.0 {
        content.centered(
            &format!(
                "You spent {}% more than last year, but that's okay! Growth means living life. 🌱",
                format_amount(change)
            ),
            theme.dim(),
        );
    } else if change < 0.0 {
        content.centered(
            &format!(
                "Amazing! You spent {}% less than last year. That's some serious financial discipline! 💪",
                format_amount(change.abs())
            ),
            theme.dim(),
        );
    }
}

fn habits(content: &mut Content, ctx: &SectionContext<'_>, data: &WrappedData) {
    let theme = ctx.theme;
    let tx = &data.transactions;

    content.heading(
        theme,
        "Your Transaction Habits",
        Some("Patterns that define your financial rhythm"),
    );
    content.card(
        theme,
        ctx.counter_card("🔄", "Total Transactions", CounterKey::TransactionCount)
            .subtitle("Throughout the year"),
    );
    content.card(
        theme,
        Card::new(day_emoji(&tx.most_active_day), "Most Active Day", tx.most_active_day.clone())
            .subtitle("Your busiest day"),
    );
    content.card(
        theme,
        Card::new("⏰", "Peak Time", tx.most_active_time.clone()).subtitle("When you transact most"),
    );
    content.card(
        theme,
        ctx.counter_card("📈", "Monthly Average", CounterKey::MonthlyTransactions)
            .subtitle("Transactions per month"),
    );

    content.row(
        vec![Span::styled("Biggest Transaction", theme.text())],
        Span::styled(format_naira(tx.largest_transaction), theme.highlight()),
    );
    content.text("That was a memorable moment!", theme.dim());
    content.row(
        vec![Span::styled("Smallest Transaction", theme.text())],
        Span::styled(format_naira(tx.smallest_transaction), theme.highlight()),
    );
    content.text("Every naira counts!", theme.dim());
    content.blank();

    content.centered("💡 Did you know?", theme.title());
    let fact = match tx.hours_between() {
        Some(hours) => format!(
            "You made an average of {} transactions per day in {}. That's one transaction every {} hours!",
            tx.daily_average(),
            data.year,
            hours
        ),
        None => format!("You made an average of 0 transactions per day in {}.", data.year),
    };
    content.centered(&fact, theme.text());
}

fn savings(content: &mut Content, ctx: &SectionContext<'_>, data: &WrappedData) {
    let theme = ctx.theme;
    let savings = &data.savings;

    content.heading(
        theme,
        "Your Savings Journey",
        Some("Building wealth, one naira at a time"),
    );
    content.card(
        theme,
        ctx.counter_card("💰", "Total Saved", CounterKey::TotalSaved).subtitle("Your safety net"),
    );
    content.card(
        theme,
        ctx.counter_card("📊", "Monthly Average", CounterKey::MonthlySavings)
            .subtitle("Consistent growth"),
    );
    content.card(
        theme,
        ctx.counter_card("🌱", "Interest Earned", CounterKey::InterestEarned)
            .subtitle("Passive income"),
    );

    let percentage = format_amount(savings.percentage_of_goal);
    content.row(
        vec![Span::styled("Goal Progress", theme.title())],
        Span::raw(if savings.goal_reached() { "🎯" } else { "🎪" }),
    );
    content.text(&format!("You're {}% of the way there!", percentage), theme.dim());
    let label = (savings.percentage_of_goal >= 20.0).then(|| format!("{}%", percentage));
    content.bar(
        savings.capped_percentage() / 100.0 * ctx.bar_growth(0),
        theme.accent,
        theme.track,
        label,
    );
    if savings.goal_reached() {
        content.text(
            "🎉 Congratulations! You've reached your savings goal!",
            Style::default().fg(theme.success),
        );
    } else {
        content.text(
            &format!(
                "Just {} more to reach your goal!",
                format_naira(savings.remaining())
            ),
            theme.text(),
        );
    }
    content.blank();

    content.counter(
        CounterKey::SavingsStreak,
        vec![
            Span::raw("🔥 "),
            Span::styled(ctx.counter_text(CounterKey::SavingsStreak), theme.highlight()),
        ],
        true,
    );
    content.centered("Your longest savings streak", theme.text());
    content.centered("Consistency is key to building wealth!", theme.dim());
    content.blank();

    content.centered_spans(vec![
        Span::styled("Excellent", Style::default().fg(theme.success).add_modifier(Modifier::BOLD)),
        Span::styled("  Savings Health Score", theme.text()),
    ]);
    content.centered("You're in the top 20% of savers!", theme.dim());
    content.blank();

    let quote = if savings.percentage_of_goal >= 80.0 {
        "You're almost there! Keep up the amazing work!"
    } else {
        "Every small step brings you closer to your dreams. Keep saving!"
    };
    content.centered(
        &format!("\"{}\"", quote),
        theme.dim().add_modifier(Modifier::ITALIC),
    );
}

fn transport(content: &mut Content, ctx: &SectionContext<'_>, data: &WrappedData) {
    let theme = ctx.theme;
    let transport = &data.transport;

    content.heading(
        theme,
        "Your Transport Journey",
        Some(&format!(
            "{} rides across {} km",
            transport.rides,
            format_amount(transport.distance_traveled)
        )),
    );
    content.card(theme, ctx.counter_card("🚗", "Total Spent", CounterKey::TransportSpent));
    content.card(
        theme,
        ctx.counter_card("🎫", "Total Rides", CounterKey::Rides)
            .subtitle(format!("Avg: {}/ride", format_naira(transport.average_ride_cost))),
    );
    content.card(
        theme,
        ctx.counter_card("🌍", "Distance Traveled", CounterKey::Distance)
            .subtitle("Around the world!"),
    );

    content.centered_spans(vec![
        Span::raw("📍 "),
        Span::styled(transport.top_route.clone(), theme.highlight()),
    ]);
    content.centered("Your go-to journey", theme.dim());
    content.blank();
    content.centered(
        &format!(
            "🌿 You helped save approximately {}kg of CO₂ by using OPay transport!",
            format_amount(transport.co2_saved)
        ),
        Style::default().fg(theme.success),
    );
}

fn rewards(content: &mut Content, ctx: &SectionContext<'_>, data: &WrappedData) {
    let theme = ctx.theme;
    let rewards = &data.rewards;

    content.heading(
        theme,
        "Your Rewards & Achievements",
        Some("All the perks you've earned"),
    );
    content.card(theme, ctx.counter_card("⭐", "Points Earned", CounterKey::PointsEarned));
    content.card(
        theme,
        ctx.counter_card("💸", "Cashback Earned", CounterKey::CashbackEarned),
    );
    content.card(
        theme,
        Card::new("👑", "Current Tier", rewards.tier.clone())
            .subtitle(format!("{} rewards redeemed", rewards.rewards_redeemed)),
    );

    if !rewards.badges_unlocked.is_empty() {
        content.centered("Badges Unlocked", theme.title());
        for (index, badge) in rewards.badges_unlocked.iter().enumerate() {
            let icon = BADGE_ICONS.get(index).copied().unwrap_or("🏅");
            content.centered_spans(vec![
                Span::raw(format!("{} ", icon)),
                Span::styled(badge.clone(), theme.text()),
            ]);
        }
        content.blank();
        content.centered(
            &format!(
                "{} badges unlocked and {} rewards redeemed this year",
                rewards.badges_unlocked.len(),
                rewards.rewards_redeemed
            ),
            theme.dim(),
        );
    }
}

fn personality(content: &mut Content, ctx: &SectionContext<'_>, data: &WrappedData) {
    let theme = ctx.theme;
    let personality = &data.personality;

    content.heading(
        theme,
        "Your Financial Personality",
        Some("Who are you with money?"),
    );
    content.centered(&personality.kind, theme.title().fg(theme.accent_strong));
    content.blank();
    content.centered(&personality.description, theme.text());
    content.blank();

    for (index, item) in personality.traits.iter().enumerate() {
        content.row(
            vec![Span::styled(item.name.clone(), theme.text())],
            Span::styled(format!("{}%", format_amount(item.score)), theme.highlight()),
        );
        content.bar(
            item.score.clamp(0.0, 100.0) / 100.0 * ctx.bar_growth(index),
            theme.accent,
            theme.track,
            None,
        );
    }
    content.blank();

    content.centered_spans(vec![
        Span::styled("Financial Health: ", theme.text()),
        Span::styled(
            personality.financial_health.clone(),
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        ),
    ]);
    content.centered(
        "Keep up the great work! Your financial decisions reflect wisdom and planning.",
        theme.dim(),
    );
}

fn share(content: &mut Content, ctx: &SectionContext<'_>, data: Option<&WrappedData>) {
    let theme = ctx.theme;
    content.heading(
        theme,
        "Share Your Story",
        Some("Let the world know about your financial journey"),
    );

    let Some(data) = data else {
        return;
    };

    content.centered(
        &format!("My OPay Wrapped {}", data.year),
        theme.title().fg(theme.accent_strong),
    );
    content.blank();
    content.grid(
        theme,
        &[
            (format!("₦{}", format_millions(data.spending.total)), "Spent"),
            (format!("₦{}", format_thousands(data.savings.total)), "Saved"),
        ],
    );
    content.blank();
    content.centered(&data.personality.kind, theme.highlight());
    content.blank();

    content.centered_spans(ctx.key_hint(&ctx.keys.share, "Share on X · WhatsApp · Copy Link · Mail"));
    content.blank();
    content.centered("Want to see your own OPay Wrapped?", theme.dim());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::RevealOptions;
    use wrapped_core::data::sample_summary;
    use wrapped_core::MotionController;

    fn text_of(content: Content) -> String {
        content
            .into_parts()
            .0
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn build_text(id: SectionId, data: &DataState) -> Option<String> {
        let motion = MotionController::new(true);
        let theme = Theme::default();
        let keys = KeymapConfig::default();
        let counters = HashMap::new();
        let reveal = SectionReveal::new(RevealOptions::default(), motion.preference());
        let ctx = SectionContext {
            data,
            theme: &theme,
            keys: &keys,
            counters: &counters,
            reveal: &reveal,
            now: Instant::now(),
        };
        build(id, &ctx, 80).map(text_of)
    }

    fn loaded() -> DataState {
        let mut state = DataState::loading();
        state.set_loaded(sample_summary());
        state
    }

    fn failed() -> DataState {
        let mut state = DataState::loading();
        state.set_failed("Failed to fetch data");
        state
    }

    #[test]
    fn test_loading_shows_titles() {
        let state = DataState::loading();
        assert!(build_text(SectionId::Spending, &state)
            .unwrap()
            .contains("Loading your spending story..."));
        assert!(build_text(SectionId::Personality, &state)
            .unwrap()
            .contains("Analyzing your profile..."));
    }

    #[test]
    fn test_error_hides_sections_but_keeps_spending_card() {
        let state = failed();
        let spending = build_text(SectionId::Spending, &state).unwrap();
        assert!(spending.contains("Oops!"));
        assert!(spending.contains("Reload"));
        for id in [
            SectionId::Habits,
            SectionId::Savings,
            SectionId::Transport,
            SectionId::Rewards,
            SectionId::Personality,
        ] {
            assert!(build_text(id, &state).is_none(), "{:?}", id);
        }
        assert!(build_text(SectionId::Hero, &state).is_some());
        assert!(build_text(SectionId::Share, &state).is_some());
    }

    #[test]
    fn test_hero_greets_user() {
        let text = build_text(SectionId::Hero, &loaded()).unwrap();
        assert!(text.contains("Welcome Back,"));
        assert!(text.contains("Adebayo"));
        assert!(text.contains("₦2.5M"));
        assert!(text.contains("₦850K"));

        let anonymous = build_text(SectionId::Hero, &DataState::loading()).unwrap();
        assert!(anonymous.contains("Your OPay Wrapped"));
    }

    #[test]
    fn test_spending_ranks_categories() {
        let text = build_text(SectionId::Spending, &loaded()).unwrap();
        assert!(text.contains("Your top category was Food & Dining"));
        assert!(text.contains("You spent 15% more than last year"));
        let food = text.find("Food & Dining").unwrap();
        let shopping = text.find("Shopping").unwrap();
        assert!(food < shopping);
    }

    #[test]
    fn test_habits_fun_fact() {
        let text = build_text(SectionId::Habits, &loaded()).unwrap();
        assert!(text.contains("Friday"));
        assert!(text.contains("That's one transaction every 30 hours!"));
    }

    #[test]
    fn test_savings_goal_copy() {
        let text = build_text(SectionId::Savings, &loaded()).unwrap();
        assert!(text.contains("You're 85% of the way there!"));
        assert!(text.contains("Just ₦150,000 more to reach your goal!"));
        assert!(text.contains("You're almost there!"));
    }

    #[test]
    fn test_counters_fall_back_to_zero_text() {
        let text = build_text(SectionId::Rewards, &loaded()).unwrap();
        assert!(text.contains("₦0"));
        assert!(text.contains("Early Bird"));
    }
}
