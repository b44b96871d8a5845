//! Rules command - show the active category rule table

use anyhow::Result;

use super::get_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;

    if json {
        println!("{}", serde_json::to_string_pretty(ctx.rules.rules())?);
        return Ok(());
    }

    if ctx.config.category_rules.is_some() {
        output::info("Using category rules from settings.json");
    }

    let mut table = output::create_table();
    table.set_header(vec!["#", "Category", "Keywords"]);
    for (i, rule) in ctx.rules.rules().iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            rule.category.clone(),
            rule.keywords.join(", "),
        ]);
    }
    println!("{}", table);

    Ok(())
}
