// Copyright (c) 2025 Centavo Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over transaction snapshots: per-day nets and counts,
//! category grouping, and the accumulated surplus/debt against a daily goal.
//! Nothing here touches the store; callers fetch a snapshot and recompute
//! from scratch whenever inputs change.

use crate::models::{BudgetItem, BudgetItemKind, Transaction, TxKind};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Ordered merchant rules, evaluated top to bottom. New merchants are added
/// here without touching the matching logic below.
static CATEGORY_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        // ride-hailing
        (r"(?i)uber", "Uber"),
        // food delivery: card store-code prefix or the brand name
        (r"(?i)(^ifd\*|ifood)", "iFood"),
        // recurring subscription markers
        (r"(?i)(assinatura|subscri)", "Subscriptions"),
    ]
    .into_iter()
    .map(|(p, label)| (Regex::new(p).expect("builtin category rule"), label))
    .collect()
});

/// Net signed amount per calendar date: debits add, credits subtract.
/// Dates with no transactions are absent; callers default to zero.
pub fn net_by_day(transactions: &[Transaction]) -> BTreeMap<NaiveDate, Decimal> {
    let mut net = BTreeMap::new();
    for tx in transactions {
        let bucket = net.entry(tx.date).or_insert(Decimal::ZERO);
        match tx.kind {
            TxKind::Debit => *bucket += tx.amount,
            TxKind::Credit => *bucket -= tx.amount,
        }
    }
    net
}

/// Transactions recorded per date, regardless of kind. Display annotation
/// only; never feeds spend math.
pub fn count_by_day(transactions: &[Transaction]) -> BTreeMap<NaiveDate, u32> {
    let mut counts = BTreeMap::new();
    for tx in transactions {
        *counts.entry(tx.date).or_insert(0u32) += 1;
    }
    counts
}

/// Map a free-text description to a grouping label. Case-insensitive,
/// deterministic, defined for every input. Descriptions with no merchant
/// match fall back to the text before the card-network `" *"` suffix.
pub fn normalize_category(description: Option<&str>) -> String {
    let Some(desc) = description.map(str::trim).filter(|d| !d.is_empty()) else {
        return "Other".to_string();
    };
    for (pattern, label) in CATEGORY_RULES.iter() {
        if pattern.is_match(desc) {
            return (*label).to_string();
        }
    }
    match desc.split_once(" *") {
        Some((head, _)) if !head.trim().is_empty() => head.trim().to_string(),
        Some(_) => "Other".to_string(),
        None => desc.to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub label: String,
    pub total: Decimal,
    pub count: u32,
    /// Percent of total debit spend; 0 when there are no debits.
    pub share: Decimal,
}

/// Debit-only grouping by normalized label, sorted descending by total.
/// Groups keep first-encountered order, so equal totals tie-break stably.
pub fn category_totals(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<CategoryTotal> = Vec::new();
    let mut total_debit = Decimal::ZERO;

    for tx in transactions.iter().filter(|t| t.kind == TxKind::Debit) {
        let label = normalize_category(Some(&tx.description));
        let slot = *index.entry(label.clone()).or_insert_with(|| {
            groups.push(CategoryTotal {
                label,
                total: Decimal::ZERO,
                count: 0,
                share: Decimal::ZERO,
            });
            groups.len() - 1
        });
        groups[slot].total += tx.amount;
        groups[slot].count += 1;
        total_debit += tx.amount;
    }

    groups.sort_by(|a, b| b.total.cmp(&a.total));
    if !total_debit.is_zero() {
        for group in &mut groups {
            group.share = group.total / total_debit * Decimal::ONE_HUNDRED;
        }
    }
    groups
}

/// How under-budget days interact with over-budget days when accumulating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BalanceMode {
    /// Only positive daily overages accumulate; staying under the goal never
    /// pays debt down. This is the shipped behavior.
    #[default]
    OverageOnly,
    /// Every day's signed difference accumulates, so under-budget days offset
    /// over-budget ones.
    Net,
}

/// Running deviation from the daily goal across `range_start..=range_end`,
/// clamped to days that have already elapsed. A range entirely in the future
/// yields zero. Missing dates count as a net of zero.
pub fn accumulated_balance(
    net_by_day: &BTreeMap<NaiveDate, Decimal>,
    daily_limit: Decimal,
    range_start: NaiveDate,
    range_end: NaiveDate,
    today: NaiveDate,
    mode: BalanceMode,
) -> Decimal {
    if range_start > today {
        return Decimal::ZERO;
    }
    let effective_end = today.min(range_end);
    let mut balance = Decimal::ZERO;
    let mut day = range_start;
    while day <= effective_end {
        let net = net_by_day.get(&day).copied().unwrap_or(Decimal::ZERO);
        let diff = net - daily_limit;
        match mode {
            BalanceMode::Net => balance += diff,
            BalanceMode::OverageOnly if diff > Decimal::ZERO => balance += diff,
            BalanceMode::OverageOnly => {}
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    balance
}

/// The four derived structures for one displayed range, bundled so the
/// boundary layer recomputes everything in one step per snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct MonthSummary {
    pub net_by_day: BTreeMap<NaiveDate, Decimal>,
    pub count_by_day: BTreeMap<NaiveDate, u32>,
    pub category_totals: Vec<CategoryTotal>,
    pub accumulated_balance: Decimal,
}

impl MonthSummary {
    pub fn compute(
        transactions: &[Transaction],
        daily_limit: Decimal,
        range_start: NaiveDate,
        range_end: NaiveDate,
        today: NaiveDate,
        mode: BalanceMode,
    ) -> Self {
        let net = net_by_day(transactions);
        let accumulated =
            accumulated_balance(&net, daily_limit, range_start, range_end, today, mode);
        MonthSummary {
            count_by_day: count_by_day(transactions),
            category_totals: category_totals(transactions),
            accumulated_balance: accumulated,
            net_by_day: net,
        }
    }

    /// Sum of all positive day nets, the "total spent" headline figure.
    pub fn total_spent(&self) -> Decimal {
        self.net_by_day
            .values()
            .filter(|net| **net > Decimal::ZERO)
            .sum()
    }
}

/// Derived figures for the monthly budget planner.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetOverview {
    pub total_income: Decimal,
    pub total_fixed: Decimal,
    pub total_variable: Decimal,
    pub total_expenses: Decimal,
    pub remaining: Decimal,
    /// Percent of total income still unallocated; 0 when there is no income.
    /// Negative when planned expenses exceed income.
    pub available_pct: Decimal,
}

/// Sum budget lines against the monthly salary. Pure, recomputed per call.
pub fn budget_overview(monthly_salary: Decimal, items: &[BudgetItem]) -> BudgetOverview {
    let mut total_fixed = Decimal::ZERO;
    let mut total_variable = Decimal::ZERO;
    let mut extra_income = Decimal::ZERO;
    for item in items {
        match item.kind {
            BudgetItemKind::Fixed => total_fixed += item.amount,
            BudgetItemKind::Variable => total_variable += item.amount,
            BudgetItemKind::Income => extra_income += item.amount,
        }
    }
    let total_income = monthly_salary + extra_income;
    let total_expenses = total_fixed + total_variable;
    let remaining = total_income - total_expenses;
    let available_pct = if total_income > Decimal::ZERO {
        remaining / total_income * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    BudgetOverview {
        total_income,
        total_fixed,
        total_variable,
        total_expenses,
        remaining,
        available_pct,
    }
}
