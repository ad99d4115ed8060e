//! Interactive chat session.

use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use barista_application::ConversationController;
use barista_core::session::{AgentMode, UserTier};
use barista_interaction::chat::{ChatBackend, HttpChatBackend};
use barista_interaction::voice::UnavailableVoiceSource;

use crate::render;

/// Mounts a conversation and runs the input loop until EOF or `/quit`.
pub async fn run() -> Result<()> {
    let config = super::load_config()?;
    let storage = super::open_storage()?;

    // Logged-in identity, read once at mount.
    let user_email = storage
        .load()
        .user
        .and_then(|user| user.get("email").and_then(|e| e.as_str().map(str::to_string)));

    let backend = HttpChatBackend::new(&config)?;
    let mut controller = ConversationController::new(config, backend, user_email)
        // No speech recognition in a terminal; /voice reports it.
        .with_voice_source(Box::new(UnavailableVoiceSource));
    controller.load_model_catalog().await;

    let mut rendered = 0;
    rendered = render_new_messages(&controller, rendered);
    println!("{}", "Type /help for commands.".dimmed());

    let mut editor = DefaultEditor::new()?;
    loop {
        // A finalized voice transcript would land in the draft; prefill it.
        let draft = controller.input_draft().to_string();
        let line = match editor.readline_with_initial("☕ ", (&draft, "")) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        let _ = editor.add_history_entry(&line);

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(command) = trimmed.strip_prefix('/') {
            if handle_command(&mut controller, command) {
                break;
            }
            continue;
        }

        println!("{}", "…".dimmed());
        if controller.send_message(&line).await {
            rendered = render_new_messages(&controller, rendered);
        }
    }

    Ok(())
}

/// Handles one slash command. Returns true to quit.
fn handle_command<B: ChatBackend>(controller: &mut ConversationController<B>, command: &str) -> bool {
    let (name, arg) = match command.split_once(' ') {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "quit" | "exit" => return true,
        "help" => help(controller),
        "agent" => match arg.parse::<AgentMode>() {
            Ok(mode) => {
                controller.select_agent_mode(mode);
                println!("agent mode: {}", controller.state.agent_mode);
            }
            Err(_) => render::notice("unknown agent mode"),
        },
        "tier" => match arg.parse::<UserTier>() {
            Ok(tier) => {
                controller.select_user_tier(tier);
                println!("tier: {}", controller.state.user_tier);
            }
            Err(_) => render::notice("unknown tier (basic | premium)"),
        },
        "provider" => {
            controller.select_model_provider(arg);
            match &controller.state.model_name {
                Some(model) => println!("provider: {arg}, model: {model}"),
                None => println!("provider: {arg} (no models known)"),
            }
        }
        "model" => {
            controller.select_model_name(arg);
            println!("model: {arg}");
        }
        "voice" => match controller.toggle_voice_capture() {
            Ok(()) => println!(
                "voice capture {}",
                if controller.state.voice_capture_active {
                    "started"
                } else {
                    "stopped"
                }
            ),
            Err(err) => render::notice(&err.to_string()),
        },
        "insights" => {
            controller.open_insights();
            render::insights(controller.insights().as_ref());
            controller.close_insights();
        }
        _ => render::notice("unknown command, try /help"),
    }

    false
}

fn help<B: ChatBackend>(controller: &ConversationController<B>) {
    let modes: Vec<String> = controller
        .config()
        .agent_modes()
        .iter()
        .map(ToString::to_string)
        .collect();
    let providers: Vec<&str> = controller.catalog().providers().collect();

    println!("/agent <{}>", modes.join(" | "));
    println!("/tier <basic | premium>");
    if providers.is_empty() {
        println!("/provider <name>   (catalog unavailable)");
    } else {
        println!("/provider <{}>", providers.join(" | "));
    }
    println!("/model <id>");
    println!("/voice             toggle voice capture");
    println!("/insights          show the latest structured output");
    println!("/quit");
}

/// Prints transcript turns appended since the last render.
fn render_new_messages<B: ChatBackend>(
    controller: &ConversationController<B>,
    rendered: usize,
) -> usize {
    let transcript = controller.state.transcript();
    for msg in &transcript[rendered..] {
        render::message(msg, controller.state.agent_mode);
    }
    transcript.len()
}

/// Prints the model catalog (the `models` subcommand).
pub async fn list_models() -> Result<()> {
    let config = super::load_config()?;
    let backend = HttpChatBackend::new(&config)?;

    match backend.fetch_models().await {
        Ok(catalog) => {
            if catalog.is_empty() {
                println!("no models advertised");
            }
            for provider in catalog.providers() {
                println!("{}", provider.bold());
                if let Some(entries) = catalog.models.get(provider) {
                    for entry in entries {
                        println!("  {}  {}", entry.id, entry.name.dimmed());
                    }
                }
            }
        }
        Err(err) => render::notice(&format!("could not fetch models: {err}")),
    }

    Ok(())
}
