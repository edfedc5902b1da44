// Copyright (c) 2025 Centavo Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::db;
use centavo::engine::budget_overview;
use centavo::models::BudgetItemKind;
use centavo::store::{self, StoreError};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn salary_defaults_to_zero_lazily() {
    let conn = setup();
    assert_eq!(store::monthly_salary(&conn, "alice").unwrap(), Decimal::ZERO);

    // first access persisted the row
    let stored: String = conn
        .query_row(
            "SELECT monthly_salary FROM budget_salaries WHERE owner='alice'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(stored.parse::<Decimal>().unwrap(), Decimal::ZERO);
}

#[test]
fn salary_set_and_replace() {
    let conn = setup();
    store::set_monthly_salary(&conn, "alice", dec("3000")).unwrap();
    assert_eq!(store::monthly_salary(&conn, "alice").unwrap(), dec("3000"));

    store::set_monthly_salary(&conn, "alice", dec("3500")).unwrap();
    assert_eq!(store::monthly_salary(&conn, "alice").unwrap(), dec("3500"));

    // zero is a valid salary, negatives are not
    store::set_monthly_salary(&conn, "alice", Decimal::ZERO).unwrap();
    let err = store::set_monthly_salary(&conn, "alice", dec("-100")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::InvalidBudgetInput(_))
    ));
}

#[test]
fn parse_salary_rejects_negative_and_non_numeric() {
    for bad in ["-1", "abc", "NaN", ""] {
        assert!(matches!(
            store::parse_salary(bad),
            Err(StoreError::InvalidBudgetInput(_))
        ));
    }
    assert_eq!(store::parse_salary("0").unwrap(), Decimal::ZERO);
    assert_eq!(store::parse_salary(" 3000.50 ").unwrap(), dec("3000.50"));
}

#[test]
fn add_item_rejects_invalid_input() {
    let conn = setup();
    let err = store::add_budget_item(
        &conn,
        "alice",
        BudgetItemKind::Fixed,
        "   ",
        dec("1200"),
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::InvalidBudgetInput(_))
    ));

    let err = store::add_budget_item(
        &conn,
        "alice",
        BudgetItemKind::Variable,
        "Lazer",
        dec("0"),
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::InvalidBudgetInput(_))
    ));

    for bad in ["0", "-5", "NaN"] {
        assert!(matches!(
            store::parse_budget_amount(bad),
            Err(StoreError::InvalidBudgetInput(_))
        ));
    }
}

#[test]
fn remove_item_is_idempotent_and_owner_scoped() {
    let conn = setup();
    let id = store::add_budget_item(
        &conn,
        "alice",
        BudgetItemKind::Fixed,
        "Aluguel",
        dec("1200"),
    )
    .unwrap();

    assert!(!store::remove_budget_item(&conn, "bob", id).unwrap());
    assert_eq!(store::budget_items(&conn, "alice").unwrap().len(), 1);

    assert!(store::remove_budget_item(&conn, "alice", id).unwrap());
    assert!(!store::remove_budget_item(&conn, "alice", id).unwrap());
    assert!(store::budget_items(&conn, "alice").unwrap().is_empty());
}

#[test]
fn overview_sums_income_and_expenses() {
    let conn = setup();
    store::set_monthly_salary(&conn, "alice", dec("3000")).unwrap();
    for (kind, description, amount) in [
        (BudgetItemKind::Income, "Freelance", "500"),
        (BudgetItemKind::Fixed, "Aluguel", "1200"),
        (BudgetItemKind::Variable, "Lazer", "800"),
    ] {
        store::add_budget_item(&conn, "alice", kind, description, dec(amount)).unwrap();
    }

    let salary = store::monthly_salary(&conn, "alice").unwrap();
    let items = store::budget_items(&conn, "alice").unwrap();
    let overview = budget_overview(salary, &items);

    assert_eq!(overview.total_income, dec("3500"));
    assert_eq!(overview.total_fixed, dec("1200"));
    assert_eq!(overview.total_variable, dec("800"));
    assert_eq!(overview.total_expenses, dec("2000"));
    assert_eq!(overview.remaining, dec("1500"));
    // 1500 / 3500 * 100
    assert_eq!(overview.available_pct.round_dp(2), dec("42.86"));
}

#[test]
fn overview_without_income_has_zero_pct() {
    let conn = setup();
    store::add_budget_item(&conn, "alice", BudgetItemKind::Fixed, "Luz", dec("100")).unwrap();

    let salary = store::monthly_salary(&conn, "alice").unwrap();
    let items = store::budget_items(&conn, "alice").unwrap();
    let overview = budget_overview(salary, &items);

    assert_eq!(overview.remaining, dec("-100"));
    assert_eq!(overview.available_pct, Decimal::ZERO);
}

#[test]
fn overview_can_go_negative_when_overcommitted() {
    let conn = setup();
    store::set_monthly_salary(&conn, "alice", dec("1000")).unwrap();
    store::add_budget_item(&conn, "alice", BudgetItemKind::Fixed, "Aluguel", dec("1500"))
        .unwrap();

    let salary = store::monthly_salary(&conn, "alice").unwrap();
    let items = store::budget_items(&conn, "alice").unwrap();
    let overview = budget_overview(salary, &items);

    assert_eq!(overview.remaining, dec("-500"));
    assert_eq!(overview.available_pct.round_dp(0), dec("-50"));
}
