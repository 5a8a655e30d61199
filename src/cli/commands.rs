//! Command handlers for the estimation shell.

use std::path::Path;

use crate::{
    estimate::{quantity_default, QuantityDefault},
    format::format_quantity,
};

use super::core::{CommandError, CommandResult, ShellContext};
use super::output;
use super::registry::{CommandEntry, CommandRegistry};

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    registry.register(CommandEntry::new(
        "help",
        "Show available commands or details for one command",
        "help [command]",
        cmd_help,
    ));
    registry.register(CommandEntry::new(
        "load",
        "Load the area and category dataset files",
        "load [<area-file> <category-file>]",
        cmd_load,
    ));
    registry.register(CommandEntry::new(
        "areas",
        "List all areas with their sizes",
        "areas",
        cmd_areas,
    ));
    registry.register(CommandEntry::new(
        "area",
        "Select the active area",
        "area <name>",
        cmd_area,
    ));
    registry.register(CommandEntry::new(
        "categories",
        "List all item categories",
        "categories",
        cmd_categories,
    ));
    registry.register(CommandEntry::new(
        "category",
        "Select the active category",
        "category <name>",
        cmd_category,
    ));
    registry.register(CommandEntry::new(
        "items",
        "List items still available in the active area and category",
        "items",
        cmd_items,
    ));
    registry.register(CommandEntry::new(
        "item",
        "Select an item from the active category",
        "item <name>",
        cmd_item,
    ));
    registry.register(CommandEntry::new(
        "quantity",
        "Override the quantity for the next quote",
        "quantity <value>",
        cmd_quantity,
    ));
    registry.register(CommandEntry::new(
        "density",
        "Override the density for the next quote (cross-unit items only)",
        "density <value>",
        cmd_density,
    ));
    registry.register(CommandEntry::new(
        "assume",
        "Record assumption text for the next commit",
        "assume <text>",
        cmd_assume,
    ));
    registry.register(CommandEntry::new(
        "quote",
        "Compute the prospective cost for the current selection",
        "quote",
        cmd_quote,
    ));
    registry.register(CommandEntry::new(
        "add",
        "Commit the quoted cost to the active area's ledger",
        "add",
        cmd_add,
    ));
    registry.register(CommandEntry::new(
        "undo",
        "Remove a committed item from the active area",
        "undo <item>",
        cmd_undo,
    ));
    registry.register(CommandEntry::new(
        "summary",
        "Show the grand total and completed items for the active area",
        "summary",
        cmd_summary,
    ));
    registry.register(CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit));
    registry.register(CommandEntry::new("quit", "Leave the shell", "quit", cmd_exit));
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let entry = context.command(name).ok_or_else(|| {
            CommandError::InvalidArguments(format!("unknown command `{name}`"))
        })?;
        output::section(entry.name);
        output::detail(entry.description);
        output::detail(format!("usage: {}", entry.usage));
        return Ok(());
    }
    output::section("Commands");
    for entry in context.command_entries() {
        output::detail(format!("  {:<12} {}", entry.name, entry.description));
    }
    Ok(())
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (area_path, category_path) = match args {
        [area, category] => (area.to_string(), category.to_string()),
        [] => context.configured_table_paths().ok_or_else(|| {
            CommandError::InvalidArguments(
                "usage: load <area-file> <category-file> (no saved dataset paths yet)".into(),
            )
        })?,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: load <area-file> <category-file>".into(),
            ))
        }
    };
    context.load_tables(Path::new(&area_path), Path::new(&category_path))
}

fn cmd_areas(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = context.session()?;
    output::section("Areas");
    for (index, area) in session.catalog().areas().iter().enumerate() {
        output::detail(format!(
            "  {:>2}. {} ({} sqft)",
            index + 1,
            area.name,
            area.size_value
        ));
    }
    Ok(())
}

fn cmd_area(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = joined_name(args, "usage: area <name>")?;
    let session = context.session_mut()?;
    session.select_area(&name)?;
    let size = session.catalog().area_info(&name)?.size_value;
    context.reset_pending();
    output::success(format!("Area `{name}` selected. Area size: {size} sqft."));
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = context.session()?;
    output::section("Categories");
    for (index, category) in session.catalog().categories().enumerate() {
        output::detail(format!("  {:>2}. {category}", index + 1));
    }
    Ok(())
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = joined_name(args, "usage: category <name>")?;
    let session = context.session_mut()?;
    session.select_category(&name)?;
    let pinned = session.current_item().map(str::to_string);
    context.reset_pending();
    output::success(format!("Category `{name}` selected."));
    match pinned {
        Some(item) => output::info(format!("Current item: `{item}`.")),
        None => output::info("All items in this category have been added for this area."),
    }
    Ok(())
}

fn cmd_items(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = context.session()?;
    let available = session.available_items()?;
    if available.is_empty() {
        output::info("All items in this category have been added for this area.");
        return Ok(());
    }
    output::section("Available items");
    for (index, item) in available.iter().enumerate() {
        output::detail(format!("  {:>2}. {item}", index + 1));
    }
    Ok(())
}

fn cmd_item(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = joined_name(args, "usage: item <name>")?;
    let session = context.session_mut()?;
    session.select_item(&name)?;
    context.reset_pending();

    let session = context.session()?;
    let category = session.current_category().expect("category required by select_item");
    let item = session.catalog().item_info(category, &name)?;
    let area = session.catalog().area_info(
        session.current_area().expect("area required by select_item"),
    )?;

    output::success(format!("Item `{name}` selected."));
    if item.cross_unit() {
        output::detail(format!(
            "Item cost: {} per {}",
            context.format_money(item.cost_per_unit),
            item.cost_unit
        ));
        output::detail(format!(
            "Item density: {} {} per {}",
            item.default_density, item.cost_unit, item.density_unit
        ));
    } else {
        output::detail(format!(
            "Item cost: {} per {}",
            item.cost_per_unit, item.cost_unit
        ));
    }
    match quantity_default(item, area) {
        QuantityDefault::AreaSize(size) => {
            output::info(format!(
                "Using area sqft ({size}) by default. Use `quantity` to override."
            ));
        }
        QuantityDefault::Manual => {
            output::info(format!(
                "Enter total {} needed with `quantity <value>`.",
                item.density_unit
            ));
        }
    }
    Ok(())
}

fn cmd_quantity(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let value = parse_amount(args, "usage: quantity <value>")?;
    context.pending_quantity = Some(value);
    output::success(format!("Quantity set to {}.", format_quantity(value)));
    Ok(())
}

fn cmd_density(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let value = parse_amount(args, "usage: density <value>")?;
    let fixed = current_item_is_same_unit(context)?;
    context.pending_density = Some(value);
    if fixed {
        output::warning(
            "Density is fixed for this item (cost unit equals density unit); the override will be ignored.",
        );
    } else {
        output::success(format!("Density override set to {value}."));
    }
    Ok(())
}

fn cmd_assume(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: assume <text>".into()));
    }
    context.pending_assumption = args.join(" ");
    output::success("Assumptions recorded.");
    Ok(())
}

fn cmd_quote(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let quote = context
        .session()?
        .quote(context.pending_quantity, context.pending_density)?;
    match quote {
        Some(quote) => {
            output::section("Results");
            output::detail(format!(
                "Units needed: {} {}",
                format_quantity(quote.units_needed),
                quote.cost_unit
            ));
            output::detail(format!(
                "Cost per unit: {} per {}",
                context.format_money(quote.cost_per_unit),
                quote.cost_unit
            ));
            output::detail(format!(
                "Total cost: {}",
                context.format_money(quote.total_cost)
            ));
        }
        None => output::info("Please enter valid values to calculate."),
    }
    Ok(())
}

fn cmd_add(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let assumption = context.pending_assumption.clone();
    let quantity = context.pending_quantity;
    let density = context.pending_density;
    let receipt = context
        .session_mut()?
        .commit(&assumption, quantity, density)?;
    context.reset_pending();

    output::success(format!(
        "Added `{}` for {}.",
        receipt.entry.item,
        context.format_money(receipt.entry.total_cost)
    ));
    output::info(format!(
        "Grand total: {}.",
        context.format_money(receipt.grand_total)
    ));
    match receipt.next_item {
        Some(next) => output::info(format!("Next item: `{next}`.")),
        None => output::info("All items in this category have been added for this area."),
    }
    Ok(())
}

fn cmd_undo(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = joined_name(args, "usage: undo <item>")?;
    let removed = context.session_mut()?.undo(&name)?;
    output::success(format!(
        "Removed `{}` for {}.",
        removed.item,
        context.format_money(removed.total_cost)
    ));
    let summary = context.session()?.summary()?;
    output::info(format!(
        "Grand total: {}.",
        context.format_money(summary.grand_total)
    ));
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.session()?.summary()?;
    output::section(format!("Grand total for {}", summary.area));
    output::detail(format!(
        "Grand total for {}: {}",
        summary.area,
        context.format_money(summary.grand_total)
    ));
    if summary.entries.is_empty() {
        output::info("No completed items yet.");
        return Ok(());
    }
    output::detail("Completed items:");
    for (index, entry) in summary.entries.iter().enumerate() {
        let assumptions = if entry.assumption_text.is_empty() {
            String::new()
        } else {
            format!("  ({})", entry.assumption_text)
        };
        output::detail(format!(
            "  {:>2}. {}  {}{}",
            index + 1,
            entry.item,
            context.format_money(entry.total_cost),
            assumptions
        ));
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

fn joined_name(args: &[&str], usage: &str) -> Result<String, CommandError> {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(usage.into()));
    }
    Ok(args.join(" "))
}

fn parse_amount(args: &[&str], usage: &str) -> Result<f64, CommandError> {
    let raw = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments(usage.into()))?;
    let value: f64 = raw
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a number")))?;
    if value < 0.0 {
        output::warning("Negative values are clamped to 0.");
    }
    Ok(value.max(0.0))
}

fn current_item_is_same_unit(context: &ShellContext) -> Result<bool, CommandError> {
    let session = context.session()?;
    match (session.current_category(), session.current_item()) {
        (Some(category), Some(item)) => {
            Ok(!session.catalog().item_info(category, item)?.cross_unit())
        }
        _ => Ok(false),
    }
}
