//! Login subcommand for the three authentication surfaces

use anyhow::Result;
use clap::{Args, ValueEnum};
use dialoguer::{Input, Password};

use appraise_core::{LoginOutcome, LoginRequest, Role, TenantRef};

use crate::context::AppContext;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Admin,
    Tenant,
    User,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Admin => Role::Admin,
            RoleArg::Tenant => Role::Tenant,
            RoleArg::User => Role::User,
        }
    }
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Which surface to authenticate against
    #[arg(value_enum)]
    pub role: RoleArg,

    /// Email address (prompted when omitted)
    #[arg(long)]
    pub email: Option<String>,

    /// Tenant slug or numeric id; only used for user login
    #[arg(long)]
    pub tenant: Option<String>,
}

pub async fn run(args: LoginArgs, ctx: &AppContext) -> Result<()> {
    let role = Role::from(args.role);

    let email = match args.email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;

    let tenant = args.tenant.map(|raw| match raw.parse::<i64>() {
        Ok(id) => TenantRef::Id(id),
        Err(_) => TenantRef::Slug(raw),
    });

    let outcome = ctx
        .api
        .login(&LoginRequest {
            role,
            email,
            password,
            tenant,
        })
        .await?;

    match outcome {
        LoginOutcome::Success { token, identity } => {
            // Token and identity are stored together; the guard requires both
            ctx.store.set_token(Some(token))?;
            ctx.store.set_identity(Some(identity.clone()))?;
            println!("Logged in as {} ({})", identity.name, identity.role);
        }
        LoginOutcome::PasswordResetRequired { user_id } => {
            println!("This account has a temporary password (user id {user_id}).");
            println!("Set a new password through your administrator, then log in again.");
        }
    }

    Ok(())
}
