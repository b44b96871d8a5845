//! Analytics service - dashboard aggregation over stored transactions

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::domain::result::Result;
use crate::domain::StoredTransaction;
use crate::ports::{StatementStore, TransactionFilter};

/// How many categories the top/lowest lists keep
const RANKED_CATEGORIES: usize = 5;

/// Share of food spending suggested as a saving
const FOOD_SAVINGS_RATE: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

const FOOD_CATEGORY: &str = "Food & Dining";

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Full dashboard for a set of transactions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub summary: Summary,
    pub top_expenses: Vec<CategoryTotal>,
    pub lowest_expenses: Vec<CategoryTotal>,
    pub spending_by_day: WeekdaySpending,
    pub monthly_trend: Vec<MonthTotal>,
    pub category_distribution: Vec<CategoryShare>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_spending: Decimal,
    pub total_income: Decimal,
    /// Income and expense rows together
    pub total_transactions: usize,
    /// Distinct expense categories
    pub total_categories: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
    pub count: usize,
}

/// Expense totals per weekday, Sunday first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekdaySpending(pub [Decimal; 7]);

impl WeekdaySpending {
    pub fn get(&self, label: &str) -> Option<Decimal> {
        WEEKDAY_LABELS
            .iter()
            .position(|l| *l == label)
            .map(|i| self.0[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Decimal)> + '_ {
        WEEKDAY_LABELS.iter().copied().zip(self.0.iter().copied())
    }
}

impl Serialize for WeekdaySpending {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(WEEKDAY_LABELS.len()))?;
        for (label, total) in self.iter() {
            map.serialize_entry(label, &total)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    /// e.g. "Jan 2024"
    pub month: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    /// Percent of total spending, one decimal place
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

/// Pure aggregation: the same transactions always give the same dashboard
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    currency: String,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new("$")
    }
}

impl AnalyticsEngine {
    /// `currency` prefixes money amounts inside recommendation text
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    pub fn aggregate(&self, transactions: &[StoredTransaction]) -> Dashboard {
        let (income, expenses): (Vec<&StoredTransaction>, Vec<&StoredTransaction>) =
            transactions.iter().partition(|t| t.is_income);

        let total_spending: Decimal = expenses.iter().map(|t| t.amount).sum();
        let total_income: Decimal = income.iter().map(|t| t.amount).sum();

        let top_expenses = category_totals(&expenses);
        let mut lowest_expenses = top_expenses.clone();
        lowest_expenses.sort_by(|a, b| a.total.cmp(&b.total).then_with(|| a.category.cmp(&b.category)));

        let category_distribution = top_expenses
            .iter()
            .map(|c| CategoryShare {
                category: c.category.clone(),
                amount: c.total,
                percentage: percent_of(c.total, total_spending),
            })
            .collect();

        let recommendations = self.recommendations(&top_expenses, total_spending);

        let summary = Summary {
            total_spending,
            total_income,
            total_transactions: transactions.len(),
            total_categories: top_expenses.len(),
        };

        debug!(
            transactions = summary.total_transactions,
            categories = summary.total_categories,
            "aggregated dashboard"
        );

        Dashboard {
            summary,
            spending_by_day: weekday_spending(&expenses),
            monthly_trend: monthly_trend(&expenses),
            top_expenses: top_expenses.iter().take(RANKED_CATEGORIES).cloned().collect(),
            lowest_expenses: lowest_expenses.into_iter().take(RANKED_CATEGORIES).collect(),
            category_distribution,
            recommendations,
        }
    }

    /// Newest expenses first, at most `limit`
    pub fn recent_expenses(transactions: &[StoredTransaction], limit: usize) -> Vec<StoredTransaction> {
        let mut expenses: Vec<StoredTransaction> =
            transactions.iter().filter(|t| !t.is_income).cloned().collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.created_at.cmp(&a.created_at)));
        expenses.truncate(limit);
        expenses
    }

    /// `ranked` must be ordered by total descending
    fn recommendations(&self, ranked: &[CategoryTotal], total_spending: Decimal) -> Vec<Recommendation> {
        let mut out = Vec::new();
        if ranked.is_empty() || total_spending.is_zero() {
            return out;
        }

        let top = &ranked[..ranked.len().min(RANKED_CATEGORIES)];
        let top_total: Decimal = top.iter().map(|c| c.total).sum();
        let share = (top_total * Decimal::ONE_HUNDRED / total_spending).round_dp(0);
        out.push(Recommendation {
            kind: "Spending Pattern".to_string(),
            message: format!(
                "Your top {} spending categories account for {}% of total expenses.",
                top.len(),
                share
            ),
            amount: None,
        });

        let food = ranked
            .iter()
            .find(|c| c.category == FOOD_CATEGORY)
            .map(|c| c.total)
            .unwrap_or_default();
        if food > Decimal::ZERO {
            let saving = (food * FOOD_SAVINGS_RATE).round_dp(2);
            out.push(Recommendation {
                kind: "Potential Savings".to_string(),
                message: "Reduce Food & Dining expenses by 30% by meal planning and cooking at home more often."
                    .to_string(),
                amount: Some(format!("{}{:.2}/mo", self.currency, saving)),
            });
        }

        out
    }
}

/// Per-category totals over expenses, largest first, ties by name
fn category_totals(expenses: &[&StoredTransaction]) -> Vec<CategoryTotal> {
    let mut by_category: BTreeMap<&str, (Decimal, usize)> = BTreeMap::new();
    for tx in expenses {
        let entry = by_category.entry(tx.category.as_str()).or_default();
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    let mut totals: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total,
            count,
        })
        .collect();
    // Stable sort keeps the BTreeMap's name order among equal totals
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

fn weekday_spending(expenses: &[&StoredTransaction]) -> WeekdaySpending {
    let mut days = WeekdaySpending::default();
    for tx in expenses {
        days.0[tx.date.weekday().num_days_from_sunday() as usize] += tx.amount;
    }
    days
}

fn monthly_trend(expenses: &[&StoredTransaction]) -> Vec<MonthTotal> {
    let mut by_month: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for tx in expenses {
        *by_month.entry((tx.date.year(), tx.date.month())).or_default() += tx.amount;
    }

    by_month
        .into_iter()
        .filter_map(|((year, month), total)| {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(MonthTotal {
                month: first.format("%b %Y").to_string(),
                total,
            })
        })
        .collect()
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    (part * Decimal::ONE_HUNDRED / whole).round_dp(1)
}

/// Dashboard queries against a statement store
pub struct AnalyticsService {
    store: Arc<dyn StatementStore>,
    engine: AnalyticsEngine,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn StatementStore>, engine: AnalyticsEngine) -> Self {
        Self { store, engine }
    }

    pub fn dashboard(&self, filter: &TransactionFilter) -> Result<Dashboard> {
        let transactions = self.store.transactions(filter)?;
        Ok(self.engine.aggregate(&transactions))
    }

    pub fn recent_expenses(&self, filter: &TransactionFilter, limit: usize) -> Result<Vec<StoredTransaction>> {
        let transactions = self.store.transactions(filter)?;
        Ok(AnalyticsEngine::recent_expenses(&transactions, limit))
    }
}
