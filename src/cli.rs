// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command, value_parser};

use crate::config::DATA_DIR_ENV;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON document per line"),
    )
}

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

fn req(name: &'static str, help: &'static str) -> Arg {
    opt(name, help).required(true)
}

fn bill_fields(cmd: Command, required: bool) -> Command {
    let mk = if required { req } else { opt };
    cmd.arg(mk("description", "What the bill is for"))
        .arg(mk("amount", "Unit amount"))
        .arg(mk("quantity", "Quantity"))
        .arg(mk("rate", "Rate"))
        .arg(mk("tax", "Tax percent"))
}

fn spending_fields(cmd: Command) -> Command {
    cmd.arg(req("description", "What was spent on"))
        .arg(req("amount", "Unit amount"))
        .arg(req("quantity", "Quantity"))
        .arg(req("rate", "Rate"))
        .arg(req("discount", "Discount percent"))
}

fn farmer_fields(cmd: Command, required: bool) -> Command {
    let name = if required {
        req("name", "Farmer name")
    } else {
        opt("name", "Farmer name")
    };
    cmd.arg(name)
        .arg(opt("bori", "Number of bags"))
        .arg(opt("bharti", "Weight per bag"))
        .arg(opt("kad", "Deduction per bag"))
        .arg(opt("bhav", "Price per man"))
}

fn id_arg() -> Arg {
    req("id", "Record id")
}

pub fn build_cli() -> Command {
    command!()
        .name("hisaab")
        .about("Bills, spendings, farmer hisaab and joint sales on local JSON files")
        .arg(
            Arg::new("data_dir")
                .long("data-dir")
                .global(true)
                .env(DATA_DIR_ENV)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Directory holding the JSON collections"),
        )
        .subcommand(Command::new("data-dir").about("Print the data directory"))
        .subcommand(
            Command::new("clear").about("Delete all stored data").arg(
                Arg::new("yes")
                    .long("yes")
                    .action(ArgAction::SetTrue)
                    .help("Confirm deletion"),
            ),
        )
        .subcommand(
            Command::new("bill")
                .about("Bills and their nested spendings")
                .subcommand(bill_fields(Command::new("add").about("Record a bill"), true))
                .subcommand(
                    bill_fields(Command::new("update").about("Edit a bill"), false)
                        .arg(id_arg()),
                )
                .subcommand(Command::new("rm").about("Delete a bill").arg(id_arg())),
        )
        .subcommand(
            Command::new("spending")
                .about("Spendings, nested under a bill or standalone")
                .subcommand(
                    spending_fields(Command::new("add").about("Record a spending"))
                        .arg(opt("bill", "Attach to this bill id")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a spending")
                        .arg(id_arg())
                        .arg(opt("bill", "Bill id the spending belongs to")),
                ),
        )
        .subcommand(
            Command::new("tx").about("Browse transactions").subcommand(json_flags(
                Command::new("list")
                    .about("List bills and spendings, newest first")
                    .arg(
                        opt("type", "all, bill or spending")
                            .value_parser(["all", "bill", "spending"])
                            .default_value("all"),
                    )
                    .arg(opt("search", "Description contains"))
                    .arg(opt("limit", "Max rows").value_parser(value_parser!(usize))),
            )),
        )
        .subcommand(json_flags(
            Command::new("summary").about("Bill and spending totals"),
        ))
        .subcommand(
            Command::new("farmer")
                .about("Farmer settlements")
                .subcommand(farmer_fields(Command::new("add").about("Record a farmer"), true))
                .subcommand(
                    farmer_fields(Command::new("update").about("Edit a farmer"), false)
                        .arg(id_arg()),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List farmers").arg(
                        Arg::new("all")
                            .long("all")
                            .action(ArgAction::SetTrue)
                            .help("Include farmers hidden by a joint sale"),
                    ),
                ))
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Print one farmer's settlement slip")
                        .arg(id_arg()),
                ))
                .subcommand(Command::new("rm").about("Delete a farmer").arg(id_arg()))
                .subcommand(
                    Command::new("reconcile")
                        .about("Recompute joint-sale visibility for every farmer"),
                ),
        )
        .subcommand(
            Command::new("sell")
                .about("Joint sales across several farmers")
                .subcommand(
                    Command::new("add")
                        .about("Record a joint sale")
                        .arg(req("farmers", "Comma separated farmer ids"))
                        .arg(req("kul-rakam", "Gross sale amount"))
                        .arg(opt("majuri", "Labour"))
                        .arg(opt("bardan", "Bags"))
                        .arg(opt("bhadu", "Freight"))
                        .arg(opt("kharch", "Other expenses")),
                )
                .subcommand(json_flags(Command::new("list").about("List joint sales")))
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Show a joint sale with its farmers")
                        .arg(id_arg()),
                ))
                .subcommand(Command::new("rm").about("Delete a joint sale").arg(id_arg())),
        )
        .subcommand(
            Command::new("export")
                .about("Export data to a file")
                .subcommand(
                    Command::new("transactions")
                        .about("Export bills and spendings")
                        .arg(req("format", "csv or json"))
                        .arg(req("out", "Output path")),
                )
                .subcommand(
                    Command::new("farmers")
                        .about("Export farmers")
                        .arg(req("format", "csv or json"))
                        .arg(req("out", "Output path")),
                ),
        )
        .subcommand(
            Command::new("serve")
                .about("Answer JSON requests on stdin, one per line, with responses on stdout"),
        )
}
