//! Session and account commands.
//!
//! # Usage
//!
//! ```bash
//! shopfront login -e ada@example.com          # password from SHOPFRONT_PASSWORD
//! shopfront whoami
//! shopfront logout
//! ```

use shopfront_client::AppState;
use shopfront_core::{ChangePassword, Email, UserLogin, UserRegister, UserRole};

use super::{CommandResult, print_json};

/// Arguments of `shopfront register`.
#[derive(Debug, clap::Args)]
pub struct RegisterArgs {
    #[arg(short, long)]
    pub username: String,
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long)]
    pub surname: String,
    #[arg(short, long)]
    pub email: Email,
    #[arg(short, long, env = "SHOPFRONT_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long)]
    pub phone: String,
    /// `customer` (default) or `vendor`
    #[arg(short, long)]
    pub role: Option<UserRole>,
}

pub async fn login(state: &AppState, email: Email, password: String) -> CommandResult {
    state.auth().login(&UserLogin::new(email, password)).await?;
    print_user(state)
}

pub async fn logout(state: &AppState) -> CommandResult {
    state.auth().logout().await;
    Ok(())
}

pub async fn register(state: &AppState, args: RegisterArgs) -> CommandResult {
    let data = UserRegister {
        username: args.username,
        name: args.name,
        surname: args.surname,
        email: args.email,
        password: args.password,
        phone_number: args.phone,
        role: args.role,
        sensitive_info: None,
    };
    let user = state.auth().register(&data).await?;
    print_json(&user)
}

pub async fn whoami(state: &AppState) -> CommandResult {
    state.auth().check_auth().await;
    print_user(state)
}

fn print_user(state: &AppState) -> CommandResult {
    match state.auth().user() {
        Some(user) => print_json(&user),
        None => Err("not logged in".into()),
    }
}

pub async fn verify_email(state: &AppState, token: &str) -> CommandResult {
    state.auth().verify_email(token).await?;
    Ok(())
}

pub async fn change_password(state: &AppState, current: String, new: String) -> CommandResult {
    state
        .auth()
        .change_password(&ChangePassword::new(current, new))
        .await?;
    Ok(())
}
