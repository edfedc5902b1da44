// Copyright (c) 2025 Centavo Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Transactions with amounts that do not parse or are not positive
    let mut stmt = conn.prepare("SELECT id, amount, date, description FROM transactions")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let amount: String = r.get(1)?;
        let date: String = r.get(2)?;
        let description: String = r.get(3)?;
        match amount.parse::<Decimal>() {
            Ok(a) if a > Decimal::ZERO => {}
            Ok(_) => rows.push(vec![
                "non_positive_amount".into(),
                format!("tx {}: {}", id, amount),
            ]),
            Err(_) => rows.push(vec![
                "unparsable_amount".into(),
                format!("tx {}: '{}'", id, amount),
            ]),
        }
        if chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
            rows.push(vec!["malformed_date".into(), format!("tx {}: '{}'", id, date)]);
        }
        if description.trim().is_empty() {
            rows.push(vec!["blank_description".into(), format!("tx {}", id)]);
        }
    }

    // 2) Kinds outside debit/credit (possible with hand-edited data)
    let mut stmt2 = conn.prepare(
        "SELECT id, kind FROM transactions WHERE kind NOT IN ('debit','credit')",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let kind: String = r.get(1)?;
        rows.push(vec!["unknown_kind".into(), format!("tx {}: '{}'", id, kind)]);
    }

    // 3) Goals that do not parse or are not positive
    let mut stmt3 = conn.prepare("SELECT owner, daily_limit FROM goals")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let owner: String = r.get(0)?;
        let limit: String = r.get(1)?;
        match limit.parse::<Decimal>() {
            Ok(l) if l > Decimal::ZERO => {}
            _ => rows.push(vec![
                "invalid_goal".into(),
                format!("owner '{}': '{}'", owner, limit),
            ]),
        }
    }

    // 4) Budget lines and salaries that do not parse or are out of range
    let mut stmt4 = conn.prepare("SELECT id, amount FROM budget_items")?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let id: i64 = r.get(0)?;
        let amount: String = r.get(1)?;
        match amount.parse::<Decimal>() {
            Ok(a) if a > Decimal::ZERO => {}
            _ => rows.push(vec![
                "invalid_budget_amount".into(),
                format!("entry {}: '{}'", id, amount),
            ]),
        }
    }
    let mut stmt5 = conn.prepare("SELECT owner, monthly_salary FROM budget_salaries")?;
    let mut cur5 = stmt5.query([])?;
    while let Some(r) = cur5.next()? {
        let owner: String = r.get(0)?;
        let salary: String = r.get(1)?;
        match salary.parse::<Decimal>() {
            Ok(s) if s >= Decimal::ZERO => {}
            _ => rows.push(vec![
                "invalid_salary".into(),
                format!("owner '{}': '{}'", owner, salary),
            ]),
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
