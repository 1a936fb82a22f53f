//! List the logged-in user's response records

use anyhow::Result;
use appraise_core::Role;
use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};

use crate::commands::guard;
use crate::context::AppContext;

pub async fn run(ctx: &AppContext) -> Result<()> {
    if !guard(&ctx.store, Role::User) {
        return Ok(());
    }

    let responses = ctx.api.list_responses().await?;
    if responses.is_empty() {
        println!("No responses yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["ID", "Test", "Answers", "Status", "Completed at"]);
    for response in responses {
        let status = if response.is_completed {
            "completed"
        } else {
            "in progress"
        };
        table.add_row(vec![
            response.id.to_string(),
            response.test_id.to_string(),
            response.answers.len().to_string(),
            status.to_string(),
            response.completed_at.unwrap_or_default(),
        ]);
    }
    println!("{table}");

    Ok(())
}
