//! Logout subcommand

use anyhow::Result;

use crate::context::AppContext;

pub fn run(ctx: &AppContext) -> Result<()> {
    ctx.store.clear()?;
    println!("Logged out.");
    Ok(())
}
