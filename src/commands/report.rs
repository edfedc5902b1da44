// Copyright (c) 2025 Centavo Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{BalanceMode, MonthSummary};
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, month_bounds, owner_from_args, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => month(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("balance", sub)) => balance(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn month_arg(sub: &clap::ArgMatches) -> String {
    match sub.get_one::<String>("month") {
        Some(m) => m.clone(),
        None => chrono::Local::now().format("%Y-%m").to_string(),
    }
}

fn balance_mode(sub: &clap::ArgMatches) -> BalanceMode {
    if sub.get_flag("net") {
        BalanceMode::Net
    } else {
        BalanceMode::OverageOnly
    }
}

struct ReportContext {
    summary: MonthSummary,
    daily_limit: Decimal,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
}

/// Every command pulls a fresh snapshot and recomputes the summary from
/// scratch; nothing is cached between invocations.
fn summary_for(
    conn: &Connection,
    sub: &clap::ArgMatches,
    mode: BalanceMode,
) -> Result<ReportContext> {
    let owner = owner_from_args(conn, sub)?;
    let (start, end) = month_bounds(&month_arg(sub))?;
    let transactions = store::transactions_in_range(conn, &owner, start, end)?;
    let goal = store::daily_goal(conn, &owner)?;
    let today = chrono::Local::now().date_naive();
    let summary = MonthSummary::compute(&transactions, goal.daily_limit, start, end, today, mode);
    Ok(ReportContext {
        summary,
        daily_limit: goal.daily_limit,
        start,
        end,
        today,
    })
}

/// One calendar row per day of the month, zero-spend days included, so
/// under-budget days stay visible. Days still in the future carry no flag.
pub fn month_rows(
    summary: &MonthSummary,
    daily_limit: Decimal,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut day = start;
    while day <= end {
        let net = summary
            .net_by_day
            .get(&day)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let count = summary.count_by_day.get(&day).copied().unwrap_or(0);
        let delta = net - daily_limit;
        let flag = if day > today {
            ""
        } else if delta > Decimal::ZERO {
            "over"
        } else {
            "ok"
        };
        rows.push(vec![
            day.to_string(),
            fmt_money(&net),
            count.to_string(),
            fmt_money(&delta),
            flag.to_string(),
        ]);
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    rows
}

fn month(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ctx = summary_for(conn, sub, balance_mode(sub))?;

    if !maybe_print_json(json_flag, jsonl_flag, &ctx.summary)? {
        let rows = month_rows(&ctx.summary, ctx.daily_limit, ctx.start, ctx.end, ctx.today);
        println!(
            "{}",
            pretty_table(&["Date", "Net", "Txns", "vs Goal", ""], rows)
        );
        println!("Total spent: {}", fmt_money(&ctx.summary.total_spent()));
        print_balance_line(ctx.summary.accumulated_balance);
    }
    Ok(())
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ctx = summary_for(conn, sub, BalanceMode::default())?;

    if !maybe_print_json(json_flag, jsonl_flag, &ctx.summary.category_totals)? {
        let rows: Vec<Vec<String>> = ctx
            .summary
            .category_totals
            .iter()
            .map(|c| {
                vec![
                    c.label.clone(),
                    fmt_money(&c.total),
                    c.count.to_string(),
                    format!("{}%", c.share.round_dp(1)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Total", "Txns", "Share"], rows)
        );
    }
    Ok(())
}

fn balance(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let ctx = summary_for(conn, sub, balance_mode(sub))?;
    print_balance_line(ctx.summary.accumulated_balance);
    Ok(())
}

fn print_balance_line(balance: Decimal) {
    if balance > Decimal::ZERO {
        println!("Accumulated debt: {} over goal", fmt_money(&balance));
    } else {
        println!("Within goal: {} to spare", fmt_money(&balance.abs()));
    }
}
