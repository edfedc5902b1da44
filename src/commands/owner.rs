// Copyright (c) 2025 Centavo Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{current_owner, set_current_owner};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            println!("{}", current_owner(conn)?);
        }
        Some(("use", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            set_current_owner(conn, &name)?;
            println!("Current owner set to '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
