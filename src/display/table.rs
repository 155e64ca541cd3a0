//! Table rendering for the command catalog and system information.

use crate::ops::command::{CommandCategory, SystemInfo};
use comfy_table::{presets, Attribute, Cell, Table};

/// Render one catalog category as a table with a category heading.
pub fn render_category(category: &CommandCategory) -> String {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(vec![
        Cell::new("Command").add_attribute(Attribute::Bold),
        Cell::new("Description").add_attribute(Attribute::Bold),
        Cell::new("Platform").add_attribute(Attribute::Bold),
    ]);
    for entry in &category.entries {
        table.add_row(vec![entry.command, entry.description, entry.platform]);
    }

    format!("{}\n{table}", heading(category.name))
}

/// Render several categories in catalog order, separated by blank lines.
pub fn render_catalog(categories: &[CommandCategory]) -> String {
    categories
        .iter()
        .map(render_category)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render collected system information as a two-column table.
pub fn render_system_info(info: &SystemInfo) -> String {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.add_row(vec!["System", &info.system]);
    table.add_row(vec!["Architecture", &info.architecture]);
    table.add_row(vec!["Family", &info.family]);
    table.add_row(vec!["Hostname", &info.hostname]);
    table.add_row(vec!["Toolkit version", &info.toolkit_version]);
    if let Some(distribution) = &info.distribution {
        table.add_row(vec!["Distribution", distribution]);
    }
    table.to_string()
}

/// "file_operations" becomes "FILE OPERATIONS".
fn heading(name: &str) -> String {
    name.replace('_', " ").to_uppercase()
}
