//! Command handlers. Every prompt and all formatting live here; the ledger
//! itself only ever sees validated numbers and the user's yes/no answers.

use chrono::NaiveDate;
use strsim::levenshtein;

use crate::{
    core::services::{ExpenseOutcome, History, DATE_FORMAT},
    errors::CliError,
    ledger::{AllocationSplit, EntryKind, SPENDING_SHARE_PERCENT},
};

use super::output;
use super::shell_context::ShellContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<LoopControl, CliError>;

pub const COMMAND_NAMES: &[&str] = &[
    "income",
    "expense",
    "delete",
    "reset",
    "dashboard",
    "recent",
    "history",
    "totals",
    "preview",
    "export",
    "help",
    "exit",
];

const HELP: &[(&str, &str)] = &[
    ("income <amount> [source] [date]", "record income, split 30/70"),
    (
        "expense <amount> [category] [date] [--use-savings]",
        "record an expense against spending",
    ),
    ("delete <income|expense> <id> [--yes]", "remove an entry and undo its effect"),
    ("reset [--yes]", "erase all balances and entries"),
    ("dashboard", "balances, allocation progress and recent entries"),
    ("recent [n]", "the n most recent entries"),
    ("history", "every entry with its id, newest first"),
    ("totals", "income total and balances"),
    ("preview <amount>", "show what an income or expense would do"),
    ("export", "print the stored record as JSON"),
    ("help", "this list"),
    ("exit", "leave the shell"),
];

pub fn dispatch(context: &mut ShellContext, command: &str, args: &[&str]) -> CommandResult {
    match command {
        "income" | "in" => cmd_income(context, args),
        "expense" | "out" => cmd_expense(context, args),
        "delete" | "rm" => cmd_delete(context, args),
        "reset" => cmd_reset(context, args),
        "dashboard" | "dash" => cmd_dashboard(context),
        "recent" => cmd_recent(context, args),
        "history" => cmd_history(context),
        "totals" => cmd_totals(context),
        "preview" => cmd_preview(context, args),
        "export" => cmd_export(context),
        "help" | "?" => cmd_help(),
        "exit" | "quit" => Ok(LoopControl::Exit),
        other => Err(unknown_command(other)),
    }
}

struct Args<'a> {
    positional: Vec<&'a str>,
    assume_yes: bool,
}

fn parse_args<'a>(args: &[&'a str]) -> Args<'a> {
    let mut parsed = Args {
        positional: Vec::new(),
        assume_yes: false,
    };
    for arg in args {
        match *arg {
            "--yes" | "-y" | "--use-savings" => parsed.assume_yes = true,
            other => parsed.positional.push(other),
        }
    }
    parsed
}

fn required<'a>(args: &Args<'a>, idx: usize, usage: &str) -> Result<&'a str, CliError> {
    args.positional
        .get(idx)
        .copied()
        .ok_or_else(|| CliError::Input(format!("usage: {usage}")))
}

fn parse_date(context: &ShellContext, value: Option<&&str>) -> Result<NaiveDate, CliError> {
    match value {
        None => Ok(context.manager.today()),
        Some(text) => NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map_err(|_| CliError::Input(format!("`{text}` is not a date (expected YYYY-MM-DD)"))),
    }
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = parse_args(args);
    let amount_text = required(&args, 0, "income <amount> [source] [date]")?;
    let amount = context.format.parse_amount(amount_text)?;
    let source = args.positional.get(1).copied().unwrap_or("");
    let date = parse_date(context, args.positional.get(2))?;

    let receipt = context.manager.record_income(amount, source, date)?;
    output::success(format!(
        "Income saved: {} ({}).",
        context.format.format(receipt.entry.amount),
        receipt.entry.id
    ));
    print_split(context, &receipt.split);
    context.report_persistence();
    Ok(LoopControl::Continue)
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = parse_args(args);
    let amount_text = required(&args, 0, "expense <amount> [category] [date] [--use-savings]")?;
    let amount = context.format.parse_amount(amount_text)?;
    let category = args.positional.get(1).copied().unwrap_or("");
    let date = parse_date(context, args.positional.get(2))?;

    let plan = context.manager.plan_expense(amount)?;
    let consent = if plan.needs_overflow_consent {
        output::warning("Spending balance is not enough.");
        output::info(format!("Expense: {}", context.format.format(plan.amount)));
        output::info(format!(
            "Spending balance: {}",
            context.format.format(plan.spending_before)
        ));
        if plan.uncovered > 0 {
            output::warning(format!(
                "Savings only hold {}; {} would not be covered.",
                context.format.format(plan.savings_before),
                context.format.format(plan.uncovered)
            ));
        }
        let question = format!(
            "Cover the shortfall of {} from savings?",
            context.format.format(plan.shortfall)
        );
        context.confirm(&question, args.assume_yes)?
    } else {
        false
    };

    match context.manager.commit_expense(&plan, category, date, consent)? {
        ExpenseOutcome::Declined { .. } => {
            output::info("Expense cancelled; balances unchanged.");
        }
        ExpenseOutcome::Recorded(receipt) => {
            output::success(format!(
                "Expense saved: {} ({}).",
                context.format.format(receipt.entry.amount),
                receipt.entry.id
            ));
            if receipt.used_savings {
                output::info(format!(
                    "{} taken from savings.",
                    context.format.format(receipt.shortfall)
                ));
            }
            context.report_persistence();
        }
    }
    Ok(LoopControl::Continue)
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = parse_args(args);
    let usage = "delete <income|expense> <id> [--yes]";
    let kind: EntryKind = required(&args, 0, usage)?
        .parse()
        .map_err(CliError::Input)?;
    let id = required(&args, 1, usage)?;

    let state = context.manager.state();
    let found = match kind {
        EntryKind::Income => state
            .income_entry(id)
            .map(|entry| (entry.amount, entry.date.clone())),
        EntryKind::Expense => state
            .expense_entry(id)
            .map(|entry| (entry.amount, entry.date.clone())),
    };
    let Some((amount, date)) = found else {
        output::info(format!("No {kind} with id `{id}`; nothing deleted."));
        return Ok(LoopControl::Continue);
    };

    let question = format!(
        "Delete {} {} on {}? The 30/70 balances will be adjusted.",
        kind.default_label(),
        context.format.format(amount),
        if date.is_empty() { "-" } else { date.as_str() }
    );
    if !context.confirm(&question, args.assume_yes)? {
        output::info("Nothing deleted.");
        return Ok(LoopControl::Continue);
    }

    context.manager.delete_transaction(id, kind);
    output::success(format!("Deleted {kind} {id}."));
    context.report_persistence();
    Ok(LoopControl::Continue)
}

fn cmd_reset(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = parse_args(args);
    if !context.confirm(
        "Erase all balances and transactions? This cannot be undone.",
        args.assume_yes,
    )? {
        output::info("Reset cancelled.");
        return Ok(LoopControl::Continue);
    }
    context.manager.reset_all();
    output::success("Ledger reset.");
    context.report_persistence();
    Ok(LoopControl::Continue)
}

fn cmd_dashboard(context: &mut ShellContext) -> CommandResult {
    print_totals(context);
    output::section("Recent");
    let history = context.manager.list_recent(context.config.recent_limit);
    print_history(context, &history, false);
    Ok(LoopControl::Continue)
}

fn cmd_recent(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let limit = match args.first() {
        Some(text) => text
            .parse::<usize>()
            .map_err(|_| CliError::Input(format!("`{text}` is not a count")))?,
        None => context.config.recent_limit,
    };
    let history = context.manager.list_recent(limit);
    print_history(context, &history, true);
    Ok(LoopControl::Continue)
}

fn cmd_history(context: &mut ShellContext) -> CommandResult {
    let history = context.manager.list_all();
    print_history(context, &history, true);
    Ok(LoopControl::Continue)
}

fn cmd_totals(context: &mut ShellContext) -> CommandResult {
    print_totals(context);
    Ok(LoopControl::Continue)
}

fn cmd_preview(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = parse_args(args);
    let amount = context
        .format
        .parse_amount(required(&args, 0, "preview <amount>")?)?;
    let plan = context.manager.plan_expense(amount)?;

    output::section("As income");
    print_split(context, &AllocationSplit::of(plan.amount));
    output::section("As expense");
    output::info(format!(
        "Spending before: {} | after: {}",
        context.format.format(plan.spending_before),
        context.format.format_signed(plan.projected_spending)
    ));
    if plan.needs_overflow_consent {
        output::info(format!(
            "Would need {} from savings.",
            context.format.format(plan.shortfall)
        ));
    }
    Ok(LoopControl::Continue)
}

fn cmd_export(context: &mut ShellContext) -> CommandResult {
    println!("{}", context.manager.export_json()?);
    Ok(LoopControl::Continue)
}

fn cmd_help() -> CommandResult {
    output::section("Commands");
    for (usage, about) in HELP {
        output::info(format!("{usage:<52} {about}"));
    }
    Ok(LoopControl::Continue)
}

fn print_split(context: &ShellContext, split: &AllocationSplit) {
    output::info(format!(
        "{}% to spending: {}",
        SPENDING_SHARE_PERCENT,
        context.format.format(split.spending)
    ));
    output::info(format!(
        "{}% to savings: {}",
        100 - SPENDING_SHARE_PERCENT,
        context.format.format(split.savings)
    ));
}

fn print_totals(context: &ShellContext) {
    let totals = context.manager.totals();
    output::section("Dashboard");
    output::info(format!(
        "Total income:     {}",
        context.format.format(totals.total_income)
    ));
    output::info(format!(
        "Total expense:    {}",
        context.format.format(totals.total_expense)
    ));
    output::info(format!(
        "Spending balance: {} {}",
        context.format.format(totals.spending_balance),
        output::progress_bar(totals.spending_progress)
    ));
    output::info(format!(
        "Savings balance:  {} {}",
        context.format.format(totals.savings_balance),
        output::progress_bar(totals.savings_progress)
    ));
}

fn print_history(context: &ShellContext, history: &History<'_>, with_ids: bool) {
    if history.is_empty() {
        output::info("No transactions yet.");
        return;
    }
    for item in history {
        let date = if item.date.is_empty() { "-" } else { item.date };
        let amount = context.format.format_entry(item.kind.sign(), item.amount);
        let line = if with_ids {
            format!("{:<20} {:<10} {:>16}  {}", item.label, date, amount, item.id)
        } else {
            format!("{:<20} {:<10} {:>16}", item.label, date, amount)
        };
        output::info(line);
    }
}

fn unknown_command(command: &str) -> CliError {
    let suggestion = COMMAND_NAMES
        .iter()
        .map(|name| (levenshtein(command, name), *name))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance);
    match suggestion {
        Some((_, name)) => {
            CliError::Command(format!("unknown command `{command}`; did you mean `{name}`?"))
        }
        None => CliError::Command(format!("unknown command `{command}`; try `help`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        core::{LedgerManager, ManualClock},
        storage::MemoryStorage,
    };
    use crate::cli::shell_context::CliMode;
    use std::sync::Arc;

    fn script_context() -> ShellContext {
        // 2024-01-01T00:00:00Z
        let clock = Arc::new(ManualClock::new(1_704_067_200_000));
        let manager =
            LedgerManager::open_with_clock(Box::new(MemoryStorage::new()), Box::new(clock));
        ShellContext::with_manager(CliMode::Script, manager, Config::default())
    }

    #[test]
    fn income_then_overflow_expense_with_flag() {
        let mut context = script_context();
        dispatch(&mut context, "income", &["1.000.000", "Gaji", "2024-01-01"]).unwrap();
        dispatch(
            &mut context,
            "expense",
            &["500000", "Makan", "2024-01-02", "--use-savings"],
        )
        .unwrap();
        let state = context.manager.state();
        assert_eq!(state.spending_balance, 0);
        assert_eq!(state.savings_balance, 500_000);
    }

    #[test]
    fn overflow_without_flag_is_declined_in_script_mode() {
        let mut context = script_context();
        dispatch(&mut context, "income", &["1000000"]).unwrap();
        dispatch(&mut context, "expense", &["500000", "Makan"]).unwrap();
        let state = context.manager.state();
        assert_eq!(state.spending_balance, 300_000);
        assert!(state.expense.is_empty());
    }

    #[test]
    fn missing_date_defaults_to_clock_today() {
        let mut context = script_context();
        dispatch(&mut context, "income", &["100", "Gaji"]).unwrap();
        assert_eq!(context.manager.state().income[0].date, "2024-01-01");
    }

    #[test]
    fn delete_requires_confirmation_flag() {
        let mut context = script_context();
        dispatch(&mut context, "income", &["1000"]).unwrap();
        let id = context.manager.state().income[0].id.clone();

        dispatch(&mut context, "delete", &["income", id.as_str()]).unwrap();
        assert_eq!(context.manager.state().income.len(), 1);

        dispatch(&mut context, "delete", &["income", id.as_str(), "--yes"]).unwrap();
        assert!(context.manager.state().income.is_empty());
        assert_eq!(context.manager.state().spending_balance, 0);
    }

    #[test]
    fn reset_without_confirmation_keeps_data() {
        let mut context = script_context();
        dispatch(&mut context, "income", &["1000"]).unwrap();
        dispatch(&mut context, "reset", &[]).unwrap();
        assert!(!context.manager.state().is_empty());
        dispatch(&mut context, "reset", &["-y"]).unwrap();
        assert!(context.manager.state().is_empty());
    }

    #[test]
    fn invalid_input_is_reported_as_error() {
        let mut context = script_context();
        assert!(dispatch(&mut context, "income", &["abc"]).is_err());
        assert!(dispatch(&mut context, "income", &["0"]).is_err());
        assert!(dispatch(&mut context, "income", &["10", "Gaji", "01/02/2024"]).is_err());
        assert!(dispatch(&mut context, "delete", &["transfer", "x"]).is_err());
        assert!(context.manager.state().is_empty());
    }

    #[test]
    fn unknown_command_suggests_nearest() {
        let err = unknown_command("incom");
        assert!(err.to_string().contains("`income`"), "{err}");
        let err = unknown_command("zzzzzzzz");
        assert!(err.to_string().contains("help"), "{err}");
    }

    #[test]
    fn exit_stops_the_loop() {
        let mut context = script_context();
        assert_eq!(dispatch(&mut context, "exit", &[]).unwrap(), LoopControl::Exit);
    }
}
