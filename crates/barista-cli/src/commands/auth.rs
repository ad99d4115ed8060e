//! Account commands: login, register, logout, whoami.

use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;

use barista_application::AuthSession;
use barista_interaction::auth::{AuthClient, NewUser, UserProfile};

use crate::render;

fn session() -> Result<AuthSession<AuthClient>> {
    let config = super::load_config()?;
    Ok(AuthSession::new(
        AuthClient::new(&config)?,
        super::open_storage()?,
    ))
}

pub async fn login(username: &str) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let password = editor.readline("password: ")?;

    match session()?.login(username, password.trim()).await {
        Ok(profile) => greet(&profile),
        Err(err) => render::notice(&err.to_string()),
    }
    Ok(())
}

pub async fn register() -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let email = editor.readline("email: ")?.trim().to_string();
    let username = editor.readline("username: ")?.trim().to_string();
    let full_name = editor.readline("full name (optional): ")?.trim().to_string();
    let password = editor.readline("password: ")?.trim().to_string();

    let new_user = NewUser {
        email,
        username,
        full_name: (!full_name.is_empty()).then_some(full_name),
        password,
    };

    match session()?.register(new_user).await {
        Ok(profile) => greet(&profile),
        Err(err) => render::notice(&err.to_string()),
    }
    Ok(())
}

pub fn logout() -> Result<()> {
    super::open_storage()?.clear()?;
    println!("logged out");
    Ok(())
}

pub fn whoami() -> Result<()> {
    let credentials = super::open_storage()?.load();
    match credentials.user {
        Some(user) => {
            let username = user
                .get("username")
                .and_then(|u| u.as_str())
                .unwrap_or("<unknown>");
            let email = user.get("email").and_then(|e| e.as_str()).unwrap_or("");
            println!("{} {}", username.bold(), email.dimmed());
        }
        None => println!("not logged in"),
    }
    Ok(())
}

fn greet(profile: &UserProfile) {
    let name = profile
        .full_name
        .as_deref()
        .unwrap_or(profile.username.as_str());
    println!("welcome, {}!", name.bold());
}
