// Copyright (c) 2025 Centavo Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn owner_arg() -> Arg {
    Arg::new("owner")
        .long("owner")
        .help("Act on this owner's data set instead of the current one")
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("centavo")
        .version(crate_version!())
        .about("Daily spending goals, category insights, and monthly budget tracking")
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("description").required(true))
                        .arg(Arg::new("amount").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD, defaults to today"),
                        )
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["debit", "credit"])
                                .default_value("debit"),
                        )
                        .arg(owner_arg()),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(owner_arg()),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a transaction by id (no-op when already gone)")
                        .arg(Arg::new("id").required(true))
                        .arg(owner_arg()),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Daily spending goal")
                .subcommand(
                    Command::new("set")
                        .about("Set the daily limit")
                        .arg(Arg::new("amount").required(true))
                        .arg(owner_arg()),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show the daily limit, creating the default on first access")
                        .arg(owner_arg()),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly budget planner")
                .subcommand(
                    Command::new("salary")
                        .about("Set the monthly salary")
                        .arg(Arg::new("amount").required(true))
                        .arg(owner_arg()),
                )
                .subcommand(
                    Command::new("add")
                        .about("Add a budget entry")
                        .arg(Arg::new("description").required(true))
                        .arg(Arg::new("amount").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["fixed", "variable", "income"])
                                .default_value("variable"),
                        )
                        .arg(owner_arg()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a budget entry by id (no-op when already gone)")
                        .arg(Arg::new("id").required(true))
                        .arg(owner_arg()),
                )
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Budget entries and the remaining-budget summary")
                        .arg(owner_arg()),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Derived summaries for a displayed month")
                .subcommand(json_flags(
                    Command::new("month")
                        .about("Per-day nets and counts against the goal")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to the current month"))
                        .arg(
                            Arg::new("net")
                                .long("net")
                                .action(ArgAction::SetTrue)
                                .help("Let under-budget days offset over-budget ones"),
                        )
                        .arg(owner_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("categories")
                        .about("Debit totals grouped by normalized category")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to the current month"))
                        .arg(owner_arg()),
                ))
                .subcommand(
                    Command::new("balance")
                        .about("Accumulated surplus/debt against the daily goal")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to the current month"))
                        .arg(
                            Arg::new("net")
                                .long("net")
                                .action(ArgAction::SetTrue)
                                .help("Let under-budget days offset over-budget ones"),
                        )
                        .arg(owner_arg()),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .about("Dump transactions to a file")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .value_parser(["csv", "json"])
                                .default_value("csv"),
                        )
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(Arg::new("month").long("month").help("Restrict to YYYY-MM"))
                        .arg(owner_arg()),
                ),
        )
        .subcommand(Command::new("doctor").about("Scan the store for data issues"))
        .subcommand(
            Command::new("owner")
                .about("Current owner setting")
                .subcommand(Command::new("show").about("Show the current owner"))
                .subcommand(
                    Command::new("use")
                        .about("Switch the current owner")
                        .arg(Arg::new("name").required(true)),
                ),
        )
}
