//! Subcommands for the appraise CLI

pub mod login;
pub mod logout;
pub mod responses;
pub mod take;
pub mod whoami;

use appraise_core::{AccessDecision, IdentityStore, Role, can_enter};

/// Check the access guard for a role-scoped command, printing the
/// redirect hint when entry is refused. Returns true when the command
/// may proceed.
pub(crate) fn guard(store: &IdentityStore, required: Role) -> bool {
    match can_enter(store, required) {
        AccessDecision::Allow => true,
        AccessDecision::RedirectToLogin(role) => {
            println!("You are not logged in. Run: appraise login {role}");
            false
        }
        AccessDecision::RedirectHome => {
            println!("This command is only available to {required} accounts.");
            false
        }
    }
}
