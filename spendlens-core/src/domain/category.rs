//! Keyword category rules
//!
//! Rules are an ordered list, not a map: when a description matches the
//! keywords of several categories, the one declared first wins.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use super::transaction::FALLBACK_CATEGORY;

/// One category and the lowercase substrings that select it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            category: category.into(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn matches(&self, description_lower: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| !keyword.is_empty() && description_lower.contains(keyword.as_str()))
    }
}

/// Ordered, immutable category rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRuleSet {
    rules: Vec<CategoryRule>,
}

impl CategoryRuleSet {
    /// Build a rule set; keywords are lowercased and trimmed
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| CategoryRule {
                category: rule.category.trim().to_string(),
                keywords: rule
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();
        Self { rules }
    }

    /// The process-wide built-in table
    pub fn builtin() -> Arc<CategoryRuleSet> {
        static BUILTIN: OnceLock<Arc<CategoryRuleSet>> = OnceLock::new();
        Arc::clone(BUILTIN.get_or_init(|| Arc::new(CategoryRuleSet::new(builtin_rules()))))
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Category for a description, or "Other" when nothing matches
    pub fn categorize(&self, description: &str) -> &str {
        let lower = description.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lower))
            .map(|rule| rule.category.as_str())
            .unwrap_or(FALLBACK_CATEGORY)
    }
}

impl Default for CategoryRuleSet {
    fn default() -> Self {
        Self::new(builtin_rules())
    }
}

fn builtin_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(
            "Healthcare",
            &[
                "hospital", "clinic", "pharmacy", "medical", "doctor", "health",
                // Doha pharmacies
                "afia", "raf pharmacy",
            ],
        ),
        CategoryRule::new(
            "Food & Dining",
            &[
                "restaurant", "cafe", "food", "dining", "grocery", "supermarket",
                "indian sup market", "new indian sup market", "lulu hyper market",
                "family food", "al aker sweets", "yummy corn", "dosa house",
                "pizza", "bangle seller", "bos coffee", "thaam al shaay",
                "namma veedu", "chennai spices", "mra restaurant", "aalishan",
                "jeelan foodstuff",
            ],
        ),
        CategoryRule::new(
            "Transportation",
            &[
                "uber", "lyft", "taxi", "gas", "fuel", "parking", "transport",
                "woqod", "qatar rail", "qatar bahrain internat",
                "souq al wakra parking",
            ],
        ),
        CategoryRule::new(
            "Utilities",
            &[
                "electric", "water", "internet", "phone", "utility",
                "vodafone", "ooredoo", "kahrmaa", "tangedco", "vodafone idea",
            ],
        ),
        CategoryRule::new(
            "Shopping",
            &[
                "amazon", "shop", "store", "mall", "retail", "market",
                "hyper market", "ansar gallery", "megamart", "day to day center",
                "pan emirates", "salutary food trading", "fah fah es wakra",
            ],
        ),
        CategoryRule::new(
            "Luxury",
            &["jewelry", "spa", "salon", "luxury", "kalyan jewellers", "pearling", "bangle"],
        ),
        CategoryRule::new(
            "Travel",
            &[
                "hotel", "airline", "booking", "airbnb", "flight", "travel",
                "holiday inn", "qatar rail", "trip", "visit",
            ],
        ),
        CategoryRule::new(
            "Entertainment",
            &["cinema", "movie", "theatre", "spotify", "netflix", "game"],
        ),
        CategoryRule::new("Mutual Funds & Stocks", &["mutual fund", "national pension scheme"]),
        CategoryRule::new("Real Estate", &["building"]),
        CategoryRule::new("Investments", &["sbi gold fund", "gold bond"]),
        CategoryRule::new("Loan", &["loan"]),
        CategoryRule::new("Savings", &["life insurance corporation", "pnbmetlife"]),
        CategoryRule::new("Home", &["cpt", "home monthly", "kumar monthly"]),
        CategoryRule::new("Education", &["pearling", "psi", "swimming"]),
    ]
}
