use crate::app_data::AppData;
use crate::cli::AdminCommands;

/// Execute an admin role command
///
/// This is how the first admin comes to exist: accounts are never created
/// with the role, someone with server access grants it.
pub async fn run(app_data: &AppData, command: AdminCommands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        AdminCommands::Grant { username } => set_role(app_data, &username, true).await,
        AdminCommands::Revoke { username } => set_role(app_data, &username, false).await,
    }
}

async fn set_role(
    app_data: &AppData,
    username: &str,
    grant: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let changed = app_data.user_store.set_admin(username, grant).await?;

    if !changed {
        return Err(format!("No user named '{}'", username).into());
    }

    let verb = if grant { "granted to" } else { "revoked from" };
    println!("Admin role {} '{}'", verb, username);

    Ok(())
}
