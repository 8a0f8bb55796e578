//! REPL command parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Command name, argument synopsis and help text.
pub const COMMANDS: &[(&str, &str, &str)] = &[
    ("/signup", "<email> <password> <full name>", "Create an account"),
    ("/login", "<email> <password>", "Log in"),
    ("/logout", "", "Log out and clear the conversation"),
    ("/check", "", "Re-check the session cookie"),
    ("/me", "", "Show the signed-in user"),
    ("/avatar", "<path>", "Upload a profile picture"),
    ("/contacts", "", "Reload and list contacts"),
    ("/online", "", "List contacts that are online"),
    ("/select", "<number|id>", "Open a conversation"),
    ("/messages", "", "Show the open conversation"),
    ("/refresh", "", "Reload the open conversation"),
    ("/image", "<path> [caption]", "Send an image"),
    ("/help", "", "Show this help"),
    ("/quit", "", "Exit"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// 1-based position in the last listed contacts.
    Index(usize),
    Id(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    SignUp {
        email: String,
        password: String,
        full_name: String,
    },
    LogIn {
        email: String,
        password: String,
    },
    LogOut,
    Check,
    Me,
    Avatar(PathBuf),
    Contacts,
    Online,
    Select(Selector),
    Messages,
    Refresh,
    Image {
        path: PathBuf,
        caption: Option<String>,
    },
    Help,
    Quit,
    /// Plain text, sent to the open conversation.
    Send(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (try /help)")]
    Unknown(String),

    #[error("Usage: {0} {1}")]
    Usage(&'static str, &'static str),
}

impl CommandError {
    fn usage(command: &'static str) -> Self {
        let synopsis = COMMANDS
            .iter()
            .find(|(name, _, _)| *name == command)
            .map_or("", |(_, synopsis, _)| *synopsis);
        Self::Usage(command, synopsis)
    }
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<ReplCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if !line.starts_with('/') {
        return Ok(Some(ReplCommand::Send(line.to_string())));
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    let mut args = rest.split_whitespace();

    let command = match name {
        "/signup" => {
            let (Some(email), Some(password)) = (args.next(), args.next()) else {
                return Err(CommandError::usage("/signup"));
            };
            let full_name = args.collect::<Vec<_>>().join(" ");
            if full_name.is_empty() {
                return Err(CommandError::usage("/signup"));
            }
            ReplCommand::SignUp {
                email: email.to_string(),
                password: password.to_string(),
                full_name,
            }
        }
        "/login" => {
            let (Some(email), Some(password)) = (args.next(), args.next()) else {
                return Err(CommandError::usage("/login"));
            };
            ReplCommand::LogIn {
                email: email.to_string(),
                password: password.to_string(),
            }
        }
        "/logout" => ReplCommand::LogOut,
        "/check" => ReplCommand::Check,
        "/me" => ReplCommand::Me,
        "/avatar" => {
            if rest.is_empty() {
                return Err(CommandError::usage("/avatar"));
            }
            ReplCommand::Avatar(PathBuf::from(rest))
        }
        "/contacts" => ReplCommand::Contacts,
        "/online" => ReplCommand::Online,
        "/select" => {
            let Some(target) = args.next() else {
                return Err(CommandError::usage("/select"));
            };
            match target.parse::<usize>() {
                Ok(0) => return Err(CommandError::usage("/select")),
                Ok(index) => ReplCommand::Select(Selector::Index(index)),
                Err(_) => ReplCommand::Select(Selector::Id(target.to_string())),
            }
        }
        "/messages" => ReplCommand::Messages,
        "/refresh" => ReplCommand::Refresh,
        "/image" => {
            let Some(path) = args.next() else {
                return Err(CommandError::usage("/image"));
            };
            let caption = args.collect::<Vec<_>>().join(" ");
            ReplCommand::Image {
                path: PathBuf::from(path),
                caption: (!caption.is_empty()).then_some(caption),
            }
        }
        "/help" => ReplCommand::Help,
        "/quit" | "/exit" => ReplCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_send() {
        assert_eq!(
            parse("  hello there ").unwrap(),
            Some(ReplCommand::Send("hello there".to_string()))
        );
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn test_signup_joins_full_name() {
        assert_eq!(
            parse("/signup ada@example.com secret1 Ada King Lovelace").unwrap(),
            Some(ReplCommand::SignUp {
                email: "ada@example.com".to_string(),
                password: "secret1".to_string(),
                full_name: "Ada King Lovelace".to_string(),
            })
        );
        assert!(matches!(
            parse("/signup ada@example.com secret1"),
            Err(CommandError::Usage("/signup", _))
        ));
    }

    #[test]
    fn test_login_requires_two_arguments() {
        assert!(parse("/login ada@example.com").is_err());
        assert_eq!(
            parse("/login ada@example.com secret1").unwrap(),
            Some(ReplCommand::LogIn {
                email: "ada@example.com".to_string(),
                password: "secret1".to_string(),
            })
        );
    }

    #[test]
    fn test_select_by_index_or_id() {
        assert_eq!(
            parse("/select 2").unwrap(),
            Some(ReplCommand::Select(Selector::Index(2)))
        );
        assert_eq!(
            parse("/select demo").unwrap(),
            Some(ReplCommand::Select(Selector::Id("demo".to_string())))
        );
        assert!(parse("/select 0").is_err());
    }

    #[test]
    fn test_image_with_and_without_caption() {
        assert_eq!(
            parse("/image cat.png look at this").unwrap(),
            Some(ReplCommand::Image {
                path: PathBuf::from("cat.png"),
                caption: Some("look at this".to_string()),
            })
        );
        assert_eq!(
            parse("/image cat.png").unwrap(),
            Some(ReplCommand::Image {
                path: PathBuf::from("cat.png"),
                caption: None,
            })
        );
    }

    #[test]
    fn test_avatar_keeps_path_with_spaces() {
        assert_eq!(
            parse("/avatar My Pictures/me.jpg").unwrap(),
            Some(ReplCommand::Avatar(PathBuf::from("My Pictures/me.jpg")))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse("/dance").unwrap_err(),
            CommandError::Unknown("/dance".to_string())
        );
    }

    #[test]
    fn test_every_listed_command_parses_or_asks_for_arguments() {
        for (name, _, _) in COMMANDS {
            match parse(name) {
                Ok(Some(_)) | Err(CommandError::Usage(_, _)) => {}
                other => panic!("{name} -> {other:?}"),
            }
        }
    }
}
