//! Categorize command - run descriptions through the rule table

use anyhow::Result;

use super::get_context;
use crate::output;

pub fn run(descriptions: &[String]) -> Result<()> {
    let ctx = get_context()?;

    let mut table = output::create_table();
    table.set_header(vec!["Description", "Category"]);
    for description in descriptions {
        table.add_row(vec![description.as_str(), ctx.rules.categorize(description)]);
    }
    println!("{}", table);

    Ok(())
}
