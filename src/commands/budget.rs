// Copyright (c) 2025 Centavo Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{BudgetOverview, budget_overview};
use crate::models::{BudgetItem, BudgetItemKind};
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, owner_from_args, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("salary", sub)) => salary(conn, sub)?,
        Some(("add", sub)) => add(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn salary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let salary = store::parse_salary(sub.get_one::<String>("amount").unwrap())?;
    let owner = owner_from_args(conn, sub)?;
    store::set_monthly_salary(conn, &owner, salary)?;
    println!("Monthly salary for '{}' set to {}", owner, fmt_money(&salary));
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind: BudgetItemKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let description = sub.get_one::<String>("description").unwrap();
    let amount = store::parse_budget_amount(sub.get_one::<String>("amount").unwrap())?;
    let owner = owner_from_args(conn, sub)?;

    let id = store::add_budget_item(conn, &owner, kind, description, amount)?;
    println!(
        "Added {} entry '{}' {} (id {})",
        kind,
        description.trim(),
        fmt_money(&amount),
        id
    );
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim().parse::<i64>()?;
    let owner = owner_from_args(conn, sub)?;
    if store::remove_budget_item(conn, &owner, id)? {
        println!("Removed budget entry {}", id);
    } else {
        println!("Budget entry {} not found for '{}', nothing to do", id, owner);
    }
    Ok(())
}

#[derive(Serialize)]
pub struct BudgetReport {
    pub monthly_salary: Decimal,
    pub items: Vec<BudgetItem>,
    pub overview: BudgetOverview,
}

pub fn build_report(conn: &Connection, owner: &str) -> Result<BudgetReport> {
    let monthly_salary = store::monthly_salary(conn, owner)?;
    let items = store::budget_items(conn, owner)?;
    let overview = budget_overview(monthly_salary, &items);
    Ok(BudgetReport {
        monthly_salary,
        items,
        overview,
    })
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner = owner_from_args(conn, sub)?;
    let report = build_report(conn, &owner)?;

    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        let rows: Vec<Vec<String>> = report
            .items
            .iter()
            .map(|item| {
                vec![
                    item.id.to_string(),
                    item.kind.to_string(),
                    item.description.clone(),
                    fmt_money(&item.amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Kind", "Description", "Amount"], rows)
        );
        let o = &report.overview;
        println!("Monthly salary:    {}", fmt_money(&report.monthly_salary));
        println!("Total income:      {}", fmt_money(&o.total_income));
        println!("Fixed expenses:    {}", fmt_money(&o.total_fixed));
        println!("Variable expenses: {}", fmt_money(&o.total_variable));
        println!(
            "Remaining:         {} ({}% available)",
            fmt_money(&o.remaining),
            o.available_pct.round_dp(1)
        );
    }
    Ok(())
}
