// Copyright (c) 2025 Centavo Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Validated mutations and snapshot queries against the SQLite store. All
//! input checks happen here, before anything is written; the aggregation
//! engine only ever sees well-formed records.

use crate::models::{BudgetItem, BudgetItemKind, DailyGoal, Transaction, TxKind};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use thiserror::Error;

/// Goal applied to owners who never set one explicitly.
pub const DEFAULT_DAILY_LIMIT: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("invalid transaction input: {0}")]
    InvalidTransactionInput(String),
    #[error("invalid goal value: {0}")]
    InvalidGoalValue(String),
    #[error("invalid budget input: {0}")]
    InvalidBudgetInput(String),
}

/// Parse a user-supplied amount, rejecting anything that is not a strictly
/// positive decimal (including non-numeric text such as "NaN").
pub fn parse_amount(s: &str) -> Result<Decimal, StoreError> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_| StoreError::InvalidTransactionInput(format!("invalid amount '{}'", s)))?;
    if amount <= Decimal::ZERO {
        return Err(StoreError::InvalidTransactionInput(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    Ok(amount)
}

pub fn parse_tx_date(s: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        StoreError::InvalidTransactionInput(format!(
            "invalid date '{}', expected YYYY-MM-DD",
            s
        ))
    })
}

pub fn parse_goal_value(s: &str) -> Result<Decimal, StoreError> {
    let limit = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_| StoreError::InvalidGoalValue(format!("invalid daily limit '{}'", s)))?;
    if limit <= Decimal::ZERO {
        return Err(StoreError::InvalidGoalValue(format!(
            "daily limit must be positive, got {}",
            limit
        )));
    }
    Ok(limit)
}

/// Insert a transaction for `owner`. The store assigns the id and the
/// creation timestamp; the timestamp orders listings but never buckets.
pub fn record_transaction(
    conn: &Connection,
    owner: &str,
    description: &str,
    amount: Decimal,
    date: NaiveDate,
    kind: TxKind,
) -> Result<i64> {
    let description = description.trim();
    if description.is_empty() {
        return Err(
            StoreError::InvalidTransactionInput("description must not be empty".into()).into(),
        );
    }
    if amount <= Decimal::ZERO {
        return Err(StoreError::InvalidTransactionInput(format!(
            "amount must be positive, got {}",
            amount
        ))
        .into());
    }
    conn.execute(
        "INSERT INTO transactions(date, description, amount, kind, owner)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            date.to_string(),
            description,
            amount.to_string(),
            kind.as_str(),
            owner
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Delete by id, scoped to `owner`. Missing rows are a no-op so that retried
/// deletes stay idempotent. Returns whether a row was actually removed.
pub fn remove_transaction(conn: &Connection, owner: &str, id: i64) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND owner=?2",
        params![id, owner],
    )?;
    Ok(n > 0)
}

/// Snapshot for one owner over an inclusive date range, the engine's input
/// contract. Ordered by date then id so repeated snapshots group stably.
pub fn transactions_in_range(
    conn: &Connection,
    owner: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, description, amount, kind, owner, created_at
         FROM transactions
         WHERE owner=?1 AND date>=?2 AND date<=?3
         ORDER BY date, id",
    )?;
    let mut rows = stmt.query(params![owner, start.to_string(), end.to_string()])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date_s: String = r.get(1)?;
        let description: String = r.get(2)?;
        let amount_s: String = r.get(3)?;
        let kind_s: String = r.get(4)?;
        let owner: String = r.get(5)?;
        let created_at: String = r.get(6)?;
        let date = NaiveDate::parse_from_str(&date_s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}' in transaction {}", date_s, id))?;
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in transaction {}", amount_s, id))?;
        let kind: TxKind = kind_s
            .parse()
            .with_context(|| format!("Invalid kind in transaction {}", id))?;
        out.push(Transaction {
            id,
            date,
            description,
            amount,
            kind,
            owner,
            created_at,
        });
    }
    Ok(out)
}

/// Fetch the owner's goal, creating it with [`DEFAULT_DAILY_LIMIT`] on first
/// access. Goals are never deleted, only replaced.
pub fn daily_goal(conn: &Connection, owner: &str) -> Result<DailyGoal> {
    let existing: Option<String> = conn
        .query_row(
            "SELECT daily_limit FROM goals WHERE owner=?1",
            params![owner],
            |r| r.get(0),
        )
        .optional()?;
    let daily_limit = match existing {
        Some(s) => s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid daily limit '{}' for owner '{}'", s, owner))?,
        None => {
            conn.execute(
                "INSERT INTO goals(owner, daily_limit) VALUES (?1, ?2)",
                params![owner, DEFAULT_DAILY_LIMIT.to_string()],
            )?;
            DEFAULT_DAILY_LIMIT
        }
    };
    Ok(DailyGoal {
        owner: owner.to_string(),
        daily_limit,
    })
}

/// Replace the owner's goal. Setting the same value twice is a no-op in
/// effect; non-positive limits are rejected before touching the store.
pub fn set_daily_goal(conn: &Connection, owner: &str, new_limit: Decimal) -> Result<()> {
    if new_limit <= Decimal::ZERO {
        return Err(StoreError::InvalidGoalValue(format!(
            "daily limit must be positive, got {}",
            new_limit
        ))
        .into());
    }
    conn.execute(
        "INSERT INTO goals(owner, daily_limit) VALUES (?1, ?2)
         ON CONFLICT(owner) DO UPDATE SET daily_limit=excluded.daily_limit",
        params![owner, new_limit.to_string()],
    )?;
    Ok(())
}

/// Parse a monthly salary. Zero is a valid salary; negatives are not.
pub fn parse_salary(s: &str) -> Result<Decimal, StoreError> {
    let salary = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_| StoreError::InvalidBudgetInput(format!("invalid salary '{}'", s)))?;
    if salary < Decimal::ZERO {
        return Err(StoreError::InvalidBudgetInput(format!(
            "salary must not be negative, got {}",
            salary
        )));
    }
    Ok(salary)
}

pub fn parse_budget_amount(s: &str) -> Result<Decimal, StoreError> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_| StoreError::InvalidBudgetInput(format!("invalid amount '{}'", s)))?;
    if amount <= Decimal::ZERO {
        return Err(StoreError::InvalidBudgetInput(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    Ok(amount)
}

/// Fetch the owner's monthly salary, creating the row at zero on first
/// access, like the goal's lazy default.
pub fn monthly_salary(conn: &Connection, owner: &str) -> Result<Decimal> {
    let existing: Option<String> = conn
        .query_row(
            "SELECT monthly_salary FROM budget_salaries WHERE owner=?1",
            params![owner],
            |r| r.get(0),
        )
        .optional()?;
    match existing {
        Some(s) => s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid salary '{}' for owner '{}'", s, owner)),
        None => {
            conn.execute(
                "INSERT INTO budget_salaries(owner, monthly_salary) VALUES (?1, '0')",
                params![owner],
            )?;
            Ok(Decimal::ZERO)
        }
    }
}

pub fn set_monthly_salary(conn: &Connection, owner: &str, salary: Decimal) -> Result<()> {
    if salary < Decimal::ZERO {
        return Err(StoreError::InvalidBudgetInput(format!(
            "salary must not be negative, got {}",
            salary
        ))
        .into());
    }
    conn.execute(
        "INSERT INTO budget_salaries(owner, monthly_salary) VALUES (?1, ?2)
         ON CONFLICT(owner) DO UPDATE SET monthly_salary=excluded.monthly_salary",
        params![owner, salary.to_string()],
    )?;
    Ok(())
}

pub fn add_budget_item(
    conn: &Connection,
    owner: &str,
    kind: BudgetItemKind,
    description: &str,
    amount: Decimal,
) -> Result<i64> {
    let description = description.trim();
    if description.is_empty() {
        return Err(StoreError::InvalidBudgetInput("description must not be empty".into()).into());
    }
    if amount <= Decimal::ZERO {
        return Err(StoreError::InvalidBudgetInput(format!(
            "amount must be positive, got {}",
            amount
        ))
        .into());
    }
    conn.execute(
        "INSERT INTO budget_items(owner, kind, description, amount)
         VALUES (?1, ?2, ?3, ?4)",
        params![owner, kind.as_str(), description, amount.to_string()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Delete a budget line by id, scoped to `owner`; no-op when already gone.
pub fn remove_budget_item(conn: &Connection, owner: &str, id: i64) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM budget_items WHERE id=?1 AND owner=?2",
        params![id, owner],
    )?;
    Ok(n > 0)
}

pub fn budget_items(conn: &Connection, owner: &str) -> Result<Vec<BudgetItem>> {
    let mut stmt = conn.prepare(
        "SELECT id, owner, kind, description, amount, created_at
         FROM budget_items WHERE owner=?1 ORDER BY id",
    )?;
    let mut rows = stmt.query(params![owner])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let owner: String = r.get(1)?;
        let kind_s: String = r.get(2)?;
        let description: String = r.get(3)?;
        let amount_s: String = r.get(4)?;
        let created_at: String = r.get(5)?;
        let kind: BudgetItemKind = kind_s
            .parse()
            .with_context(|| format!("Invalid kind in budget item {}", id))?;
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in budget item {}", amount_s, id))?;
        out.push(BudgetItem {
            id,
            owner,
            kind,
            description,
            amount,
            created_at,
        });
    }
    Ok(out)
}
