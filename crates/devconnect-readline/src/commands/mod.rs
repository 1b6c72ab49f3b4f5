//! REPL command parsing.

mod attach;

pub use attach::load_attachment;

use std::path::PathBuf;

/// Slash commands with their usage line, in `/help` order.
pub const COMMANDS: [(&str, &str); 9] = [
    ("/join", "/join <name> | <bio>   Join the community"),
    ("/browse", "/browse                List community members"),
    ("/match", "/match                 Let the AI pick your best match"),
    ("/chat", "/chat <name|id>        Start a chat with a member"),
    ("/attach", "/attach <path>         Share a file in the current chat"),
    ("/clear", "/clear                 Clear the current chat"),
    ("/logout", "/logout                Log out"),
    ("/status", "/status                Show session status"),
    ("/help", "/help                  Show this help"),
];

/// Who `/chat` refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonaRef {
    Id(u32),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join { name: String, bio: String },
    Browse,
    Match,
    Chat(PersonaRef),
    Attach(PathBuf),
    Clear,
    Logout,
    Status,
    Help,
    Quit,
    /// Plain text for the active chat.
    Say(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Usage(&'static str),
    Unknown(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Usage(usage) => write!(f, "Usage: {}", usage),
            CommandError::Unknown(cmd) => write!(f, "Unknown command: {} (try /help)", cmd),
        }
    }
}

impl std::error::Error for CommandError {}

/// Parses one trimmed, non-empty input line.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line == "quit" || line == "exit" {
        return Ok(Command::Quit);
    }
    if !line.starts_with('/') {
        return Ok(Command::Say(line.to_string()));
    }

    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match cmd {
        "/join" => parse_join(rest),
        "/browse" => Ok(Command::Browse),
        "/match" => Ok(Command::Match),
        "/chat" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("/chat <name|id>"));
            }
            Ok(Command::Chat(match rest.parse::<u32>() {
                Ok(id) => PersonaRef::Id(id),
                Err(_) => PersonaRef::Name(rest.to_string()),
            }))
        }
        "/attach" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("/attach <path>"));
            }
            Ok(Command::Attach(PathBuf::from(rest)))
        }
        "/clear" => Ok(Command::Clear),
        "/logout" => Ok(Command::Logout),
        "/status" => Ok(Command::Status),
        "/help" => Ok(Command::Help),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_join(rest: &str) -> Result<Command, CommandError> {
    let (name, bio) = match rest.split_once('|') {
        Some((name, bio)) => (name.trim(), bio.trim()),
        None => (rest, ""),
    };
    if name.is_empty() {
        return Err(CommandError::Usage("/join <name> | <bio>"));
    }
    Ok(Command::Join {
        name: name.to_string(),
        bio: bio.to_string(),
    })
}
