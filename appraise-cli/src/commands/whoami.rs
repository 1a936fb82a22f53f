//! Show the stored identity

use anyhow::Result;

use crate::context::AppContext;

pub fn run(ctx: &AppContext) -> Result<()> {
    if !ctx.store.is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }

    // is_authenticated guarantees the identity record exists
    if let Some(identity) = ctx.store.identity() {
        println!("{} <{}>", identity.name, identity.email);
        println!("  Role: {}", identity.role);
        if let Some(sub_role) = &identity.sub_role {
            println!("  Sub-role: {sub_role}");
        }
        if let Some(tenant_id) = identity.tenant_id {
            println!("  Tenant: {tenant_id}");
        }
        println!("  Server: {}", ctx.config.base_url);
    }

    Ok(())
}
