//! User registration and listing commands

use anyhow::{bail, Context, Result};
use fisc_core::db::Database;

pub fn cmd_user_register(db: &Database, username: &str, email: Option<&str>) -> Result<()> {
    let password = rpassword::prompt_password("Password (min 6 characters): ")
        .context("Failed to read password")?;
    let confirm =
        rpassword::prompt_password("Confirm password: ").context("Failed to read password")?;

    if password != confirm {
        bail!("Passwords do not match");
    }

    let id = db.register_user(username, &password, email)?;
    println!("✅ Registered user '{}' (id {})", username, id);
    println!("   Use it with: fisc --user {} <command>", username);
    Ok(())
}

pub fn cmd_user_list(db: &Database) -> Result<()> {
    let users = db.list_users()?;

    if users.is_empty() {
        println!("No users registered yet. Create one with: fisc user register <name>");
        return Ok(());
    }

    println!();
    println!("👤 Users");
    println!("   {:20} │ {:25} │ {:12}", "Username", "Email", "Member since");
    println!("   ─────────────────────┼───────────────────────────┼─────────────");
    for user in users {
        println!(
            "   {:20} │ {:25} │ {:12}",
            user.username,
            user.email.as_deref().unwrap_or("-"),
            user.created_at.format("%Y-%m-%d")
        );
    }

    Ok(())
}
