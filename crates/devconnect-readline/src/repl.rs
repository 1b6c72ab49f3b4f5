//! The interactive loop and command dispatch.

use anyhow::Result;
use colored::Colorize;
use devconnect_application::{ChatService, MatchOutcome};
use devconnect_core::user::CreateProfileRequest;
use rustyline::Editor;
use rustyline::error::ReadlineError;

use crate::bootstrap::ModelStatus;
use crate::commands::{self, Command, PersonaRef};
use crate::helper::CliHelper;
use crate::render;

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub async fn run(service: ChatService, status: ModelStatus) -> Result<()> {
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    render::banner(&status, service.directory().len());

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let command = match commands::parse(trimmed) {
                    Ok(command) => command,
                    Err(e) => {
                        render::error(&e.to_string());
                        continue;
                    }
                };
                if dispatch(&service, &status, command).await == Flow::Quit {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                tracing::error!("[Repl] Readline failed: {:?}", err);
                render::error(&format!("Error: {:?}", err));
                break;
            }
        }
    }

    Ok(())
}

async fn dispatch(service: &ChatService, status: &ModelStatus, command: Command) -> Flow {
    match command {
        Command::Quit => return Flow::Quit,
        Command::Help => render::help(),
        Command::Join { name, bio } => {
            match service
                .create_profile(CreateProfileRequest::new(name, bio))
                .await
            {
                Ok(profile) => {
                    println!("{}", format!("Welcome, {}!", profile.name).bright_green());
                    render::notice("Try /browse to see the community or /match to find your co-founder.");
                }
                Err(e) => render::error(&e.to_string()),
            }
        }
        Command::Browse => {
            let state = service.snapshot().await;
            render::browse(service.directory(), state.selected());
        }
        Command::Match => {
            render::notice("AI is analyzing...");
            match service.request_match().await {
                Ok(MatchOutcome::Matched(matched)) => render::matched(&matched),
                Ok(MatchOutcome::Failed(failure)) => render::error(&failure.user_message()),
                Err(e) => render::error(&e.to_string()),
            }
        }
        Command::Chat(target) => {
            let selected = match target {
                PersonaRef::Id(id) => service.select_persona_by_id(id).await,
                PersonaRef::Name(name) => service.select_persona(&name).await,
            };
            match selected {
                Ok(persona) => render::started_chat(&persona),
                Err(e) => render::error(&e.to_string()),
            }
        }
        Command::Attach(path) => {
            if let Err(e) = service.require_active_chat().await {
                render::error(&e.to_string());
                return Flow::Continue;
            }
            match commands::load_attachment(&path) {
                Ok(attachment) => {
                    let line = render::attachment_line(&attachment);
                    match service.send_attachment(attachment).await {
                        Ok(()) => println!("{}", format!("> {}", line).green()),
                        Err(e) => render::error(&e.to_string()),
                    }
                }
                Err(e) => render::error(&format!("{:#}", e)),
            }
        }
        Command::Clear => {
            service.clear_chat().await;
            render::notice("Chat cleared.");
        }
        Command::Logout => {
            service.logout().await;
            render::notice("Logged out.");
        }
        Command::Status => {
            let state = service.snapshot().await;
            render::status(&state, status);
        }
        Command::Say(text) => {
            if let Some(persona) = service.snapshot().await.selected() {
                render::typing(persona);
            }
            match service.send_text(&text).await {
                Ok(turn) => render::reply(&turn.persona, &turn.reply),
                Err(e) => render::error(&e.to_string()),
            }
        }
    }
    Flow::Continue
}
