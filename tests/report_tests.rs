// Copyright (c) 2025 Centavo Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! End-to-end path: store snapshot -> engine recompute, the same flow the
//! report commands run per invocation.

use centavo::commands::report;
use centavo::engine::{BalanceMode, MonthSummary};
use centavo::models::TxKind;
use centavo::utils::{month_bounds, parse_month};
use centavo::{db, store};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn seed(conn: &Connection) {
    for (date, description, amount, kind) in [
        ("2025-09-15", "Assinatura SaaS", "59.90", TxKind::Debit),
        ("2025-09-15", "IFD*IFood", "35.50", TxKind::Debit),
        ("2025-09-14", "Pagamento Cliente X", "1200.00", TxKind::Credit),
        ("2025-09-12", "Uber *Viagens", "22.75", TxKind::Debit),
    ] {
        store::record_transaction(conn, "default", description, dec(amount), d(date), kind)
            .unwrap();
    }
}

#[test]
fn snapshot_recompute_matches_expected_month() {
    let conn = setup();
    seed(&conn);

    let (start, end) = month_bounds("2025-09").unwrap();
    let txs = store::transactions_in_range(&conn, "default", start, end).unwrap();
    let goal = store::daily_goal(&conn, "default").unwrap();
    let summary = MonthSummary::compute(
        &txs,
        goal.daily_limit,
        start,
        end,
        d("2025-09-30"),
        BalanceMode::OverageOnly,
    );

    assert_eq!(summary.net_by_day[&d("2025-09-15")], dec("95.40"));
    assert_eq!(summary.net_by_day[&d("2025-09-14")], dec("-1200.00"));
    assert_eq!(summary.net_by_day[&d("2025-09-12")], dec("22.75"));
    assert_eq!(summary.count_by_day[&d("2025-09-15")], 2);

    let grouped: Decimal = summary.category_totals.iter().map(|g| g.total).sum();
    assert_eq!(grouped, dec("118.15"));
    assert_eq!(summary.total_spent(), dec("118.15"));

    // default 100 goal, no day exceeded it
    assert_eq!(summary.accumulated_balance, Decimal::ZERO);
}

#[test]
fn recompute_is_idempotent_across_runs() {
    let conn = setup();
    seed(&conn);

    let (start, end) = month_bounds("2025-09").unwrap();
    let run = || {
        let txs = store::transactions_in_range(&conn, "default", start, end).unwrap();
        MonthSummary::compute(
            &txs,
            dec("100"),
            start,
            end,
            d("2025-09-30"),
            BalanceMode::Net,
        )
    };
    let first = run();
    let second = run();
    assert_eq!(first.net_by_day, second.net_by_day);
    assert_eq!(first.accumulated_balance, second.accumulated_balance);
    assert_eq!(first.accumulated_balance, dec("-4081.85"));
}

#[test]
fn month_table_shows_every_day_with_zero_defaults() {
    let conn = setup();
    seed(&conn);

    let (start, end) = month_bounds("2025-09").unwrap();
    let txs = store::transactions_in_range(&conn, "default", start, end).unwrap();
    let summary = MonthSummary::compute(
        &txs,
        dec("100"),
        start,
        end,
        d("2025-09-20"),
        BalanceMode::OverageOnly,
    );

    let rows = report::month_rows(&summary, dec("100"), start, end, d("2025-09-20"));
    assert_eq!(rows.len(), 30);

    // Sep 1 has no transactions but has elapsed: visible, zero count, ok
    assert_eq!(rows[0][0], "2025-09-01");
    assert_eq!(rows[0][2], "0");
    assert_eq!(rows[0][4], "ok");

    // Sep 15 spent 95.40 against a 100 goal: still ok, 2 transactions
    assert_eq!(rows[14][0], "2025-09-15");
    assert_eq!(rows[14][2], "2");
    assert_eq!(rows[14][4], "ok");

    // days after today carry no flag
    assert_eq!(rows[25][0], "2025-09-26");
    assert_eq!(rows[25][4], "");
}

#[test]
fn month_table_flags_over_goal_days() {
    let conn = setup();
    seed(&conn);

    let (start, end) = month_bounds("2025-09").unwrap();
    let txs = store::transactions_in_range(&conn, "default", start, end).unwrap();
    let summary = MonthSummary::compute(
        &txs,
        dec("20"),
        start,
        end,
        d("2025-09-30"),
        BalanceMode::OverageOnly,
    );

    let rows = report::month_rows(&summary, dec("20"), start, end, d("2025-09-30"));
    assert_eq!(rows[11][0], "2025-09-12"); // spent 22.75 against a 20 goal
    assert_eq!(rows[11][4], "over");
    assert_eq!(rows[13][0], "2025-09-14"); // credit day, well under
    assert_eq!(rows[13][4], "ok");
}

#[test]
fn parse_month_zero_pads_for_date_prefix_filters() {
    assert_eq!(parse_month("2025-9").unwrap(), "2025-09");
    assert_eq!(parse_month("2025-09").unwrap(), "2025-09");
    assert_eq!(parse_month(" 2025-12 ").unwrap(), "2025-12");
    assert!(parse_month("2025-13").is_err());
}

#[test]
fn month_bounds_cover_leap_and_short_months() {
    assert_eq!(
        month_bounds("2024-02").unwrap(),
        (d("2024-02-01"), d("2024-02-29"))
    );
    assert_eq!(
        month_bounds("2025-02").unwrap(),
        (d("2025-02-01"), d("2025-02-28"))
    );
    assert_eq!(
        month_bounds("2025-12").unwrap(),
        (d("2025-12-01"), d("2025-12-31"))
    );
    assert!(month_bounds("2025-13").is_err());
    assert!(month_bounds("september").is_err());
}

#[test]
fn deleting_a_transaction_changes_the_next_snapshot() {
    let conn = setup();
    seed(&conn);

    let (start, end) = month_bounds("2025-09").unwrap();
    let before = store::transactions_in_range(&conn, "default", start, end).unwrap();
    assert_eq!(before.len(), 4);

    let target = before
        .iter()
        .find(|t| t.description == "IFD*IFood")
        .unwrap()
        .id;
    assert!(store::remove_transaction(&conn, "default", target).unwrap());

    let after = store::transactions_in_range(&conn, "default", start, end).unwrap();
    let summary = MonthSummary::compute(
        &after,
        dec("100"),
        start,
        end,
        d("2025-09-30"),
        BalanceMode::OverageOnly,
    );
    assert_eq!(summary.net_by_day[&d("2025-09-15")], dec("59.90"));
    assert_eq!(summary.count_by_day[&d("2025-09-15")], 1);
}
