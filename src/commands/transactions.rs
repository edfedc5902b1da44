// Copyright (c) 2025 Centavo Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxKind;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, owner_from_args, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let description = sub.get_one::<String>("description").unwrap();
    let amount = store::parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => store::parse_tx_date(s)?,
        None => chrono::Local::now().date_naive(),
    };
    let kind: TxKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let owner = owner_from_args(conn, sub)?;

    let id = store::record_transaction(conn, &owner, description, amount, date, kind)?;
    println!(
        "Recorded {} {} '{}' on {} (id {})",
        kind,
        fmt_money(&amount),
        description.trim(),
        date,
        id
    );
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim().parse::<i64>()?;
    let owner = owner_from_args(conn, sub)?;
    if store::remove_transaction(conn, &owner, id)? {
        println!("Removed transaction {}", id);
    } else {
        println!("Transaction {} not found for '{}', nothing to do", id, owner);
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.kind.clone(),
                    r.created_at.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Amount", "Kind", "Created"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: String,
    pub kind: String,
    pub created_at: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let owner = owner_from_args(conn, sub)?;
    let mut sql = String::from(
        "SELECT id, date, description, amount, kind, created_at
         FROM transactions WHERE owner=?",
    );
    let mut params_vec: Vec<String> = vec![owner];

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(parse_month(month)?);
    }
    if let Some(from) = sub.get_one::<String>("from") {
        sql.push_str(" AND date>=?");
        params_vec.push(store::parse_tx_date(from)?.to_string());
    }
    if let Some(to) = sub.get_one::<String>("to") {
        sql.push_str(" AND date<=?");
        params_vec.push(store::parse_tx_date(to)?.to_string());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(TransactionRow {
            id: r.get(0)?,
            date: r.get(1)?,
            description: r.get(2)?,
            amount: r.get(3)?,
            kind: r.get(4)?,
            created_at: r.get(5)?,
        });
    }
    Ok(data)
}
