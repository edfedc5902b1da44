// Copyright (c) 2025 Centavo Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a money movement. Amounts are always positive; the kind
/// alone decides whether a transaction adds to or subtracts from a day's net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Debit,
    Credit,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Debit => "debit",
            TxKind::Credit => "credit",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debit" => Ok(TxKind::Debit),
            "credit" => Ok(TxKind::Credit),
            other => Err(anyhow::anyhow!(
                "Unknown transaction kind '{}', expected debit|credit",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal, // always > 0, direction carried by `kind`
    pub kind: TxKind,
    pub owner: String,
    pub created_at: String,
}

/// One row per owner; created lazily with the default limit on first read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyGoal {
    pub owner: String,
    pub daily_limit: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetItemKind {
    Fixed,
    Variable,
    Income,
}

impl BudgetItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetItemKind::Fixed => "fixed",
            BudgetItemKind::Variable => "variable",
            BudgetItemKind::Income => "income",
        }
    }
}

impl fmt::Display for BudgetItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetItemKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(BudgetItemKind::Fixed),
            "variable" => Ok(BudgetItemKind::Variable),
            "income" => Ok(BudgetItemKind::Income),
            other => Err(anyhow::anyhow!(
                "Unknown budget entry kind '{}', expected fixed|variable|income",
                other
            )),
        }
    }
}

/// A monthly budget line: a recurring expense (fixed), a one-off planned
/// expense (variable), or income on top of the salary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetItem {
    pub id: i64,
    pub owner: String,
    pub kind: BudgetItemKind,
    pub description: String,
    pub amount: Decimal,
    pub created_at: String,
}
