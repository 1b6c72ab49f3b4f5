//! Terminal output for the REPL.

use colored::Colorize;
use devconnect_core::matchmaking::MatchedPersona;
use devconnect_core::persona::{PersonaDirectory, PersonaRecord};
use devconnect_core::session::{Attachment, AttachmentKind, Message, MessageRole, SessionState};

use crate::bootstrap::ModelStatus;
use crate::commands::COMMANDS;

pub fn banner(status: &ModelStatus, members: usize) {
    println!("{}", "=== Dev Connect ===".bright_magenta().bold());
    match status {
        ModelStatus::Online(model) => println!("{}", format!("Online: {}", model).bright_green()),
        ModelStatus::KeyError(model) => println!(
            "{}",
            format!("Key Error (falling back to {})", model).bright_red()
        ),
        ModelStatus::MissingKey(path) => {
            println!("{}", "Offline: no Gemini API key".yellow());
            println!(
                "{}",
                format!(
                    "Set GEMINI_API_KEY, pass --api-key, or edit {}",
                    path.display()
                )
                .bright_black()
            );
        }
    }
    println!("{}", format!("Community Members: {}", members).bright_black());
    println!(
        "{}",
        "Type '/join <name> | <bio>' to start, '/help' for commands, or 'quit' to exit."
            .bright_black()
    );
    println!();
}

pub fn help() {
    for (_, usage) in COMMANDS {
        println!("  {}", usage.bright_black());
    }
    println!("  {}", "<text>                 Send a message to your match".bright_black());
    println!("  {}", "quit | exit            Leave".bright_black());
}

pub fn browse(directory: &PersonaDirectory, selected: Option<&PersonaRecord>) {
    for persona in directory.all() {
        let marker = if selected.is_some_and(|s| s.id == persona.id) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:>2}. {} {} {}",
            marker,
            persona.id,
            persona.avatar,
            persona.name.bold(),
            format!("- {}", persona.role).bright_black()
        );
        println!("       {}", persona.stack.cyan());
        println!("       {}", persona.bio.bright_black());
    }
}

pub fn started_chat(persona: &PersonaRecord) {
    println!("{}", format!("Started chat with {}!", persona.name).bright_green());
    chat_header(persona);
}

pub fn chat_header(persona: &PersonaRecord) {
    println!(
        "{}",
        format!("{} Chat with {}", persona.avatar, persona.name)
            .bright_magenta()
            .bold()
    );
    println!(
        "{}",
        format!("Role: {} | Style: {}", persona.role, persona.style).bright_black()
    );
}

pub fn matched(matched: &MatchedPersona) {
    println!(
        "{}",
        format!("Best Match: {}", matched.persona.name)
            .bright_yellow()
            .bold()
    );
    println!("{}", format!("AI Logic: {}", matched.reason).yellow());
    started_chat(&matched.persona);
}

pub fn typing(persona: &PersonaRecord) {
    println!(
        "{}",
        format!("{} is typing...", persona.first_name()).bright_black()
    );
}

pub fn reply(persona: &PersonaRecord, text: &str) {
    println!("{}", format!("[{} {}]", persona.avatar, persona.name).bright_magenta());
    for line in text.lines() {
        println!("{}", line.bright_blue());
    }
}

/// Replays the chat log, e.g. for `/status`.
pub fn transcript(state: &SessionState) {
    let Some(persona) = state.selected() else {
        return;
    };
    chat_header(persona);
    for message in state.messages() {
        transcript_line(persona, message);
    }
}

fn transcript_line(persona: &PersonaRecord, message: &Message) {
    let body = match (&message.attachment, message.text()) {
        (Some(attachment), _) => attachment_line(attachment),
        (None, Some(text)) => text.to_string(),
        (None, None) => return,
    };
    match message.role {
        MessageRole::User => println!("{}", format!("> {}", body).green()),
        MessageRole::Assistant => {
            println!("{} {}", format!("{}:", persona.first_name()).bright_magenta(), body.bright_blue())
        }
    }
}

/// One-line description of a shared file.
pub fn attachment_line(attachment: &Attachment) -> String {
    let label = match attachment.kind() {
        AttachmentKind::Image => "image",
        AttachmentKind::Video => "video",
        AttachmentKind::Other => "file",
    };
    format!(
        "[{}] {} ({}, {} bytes)",
        label,
        attachment.file_name,
        attachment.media_type,
        attachment.size()
    )
}

pub fn status(state: &SessionState, model: &ModelStatus) {
    let model = match model {
        ModelStatus::Online(model) => format!("online ({})", model),
        ModelStatus::KeyError(model) => format!("key error ({})", model),
        ModelStatus::MissingKey(_) => "offline".to_string(),
    };
    println!("{}", format!("Model: {}", model).bright_black());
    match state.profile() {
        Some(profile) => println!(
            "{}",
            format!("Logged in as {} ({})", profile.name, profile.bio).bright_black()
        ),
        None => println!("{}", "Not logged in".bright_black()),
    }
    println!(
        "{}",
        format!("Session: {}", state.phase().describe()).bright_black()
    );
    if let Some(attachment) = state.pending_attachment() {
        println!(
            "{}",
            format!("Pending file: {}", attachment.file_name).bright_black()
        );
    }
    transcript(state);
}

pub fn notice(text: &str) {
    println!("{}", text.yellow());
}

pub fn error(text: &str) {
    eprintln!("{}", text.red());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_line_labels_by_kind() {
        let image = Attachment::new(vec![0; 10], "image/png", "shot.png");
        assert_eq!(attachment_line(&image), "[image] shot.png (image/png, 10 bytes)");

        let other = Attachment::new(vec![0; 2], "text/x-rust", "main.rs");
        assert_eq!(attachment_line(&other), "[file] main.rs (text/x-rust, 2 bytes)");
    }
}
