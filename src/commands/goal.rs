// Copyright (c) 2025 Centavo Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{fmt_money, owner_from_args};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let new_limit = store::parse_goal_value(sub.get_one::<String>("amount").unwrap())?;
            let owner = owner_from_args(conn, sub)?;
            store::set_daily_goal(conn, &owner, new_limit)?;
            println!("Daily goal for '{}' set to {}", owner, fmt_money(&new_limit));
        }
        Some(("show", sub)) => {
            let owner = owner_from_args(conn, sub)?;
            let goal = store::daily_goal(conn, &owner)?;
            println!(
                "Daily goal for '{}': {} per day",
                goal.owner,
                fmt_money(&goal.daily_limit)
            );
        }
        _ => {}
    }
    Ok(())
}
