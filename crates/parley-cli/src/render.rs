//! Terminal rendering of contacts, conversations and notifications.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use colored::Colorize;
use parley_core::contact::Contact;
use parley_core::media::is_data_url;
use parley_core::message::Message;
use parley_core::message::timeline::{format_relative_time, group_by_day};
use parley_core::notification::{Notification, NotificationLevel};
use parley_core::user::AuthUser;

pub fn contact_list(contacts: &[Contact], demo_mode: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if demo_mode {
        lines.push(
            "Demo mode: no contacts available from the server."
                .bright_yellow()
                .to_string(),
        );
    }
    if contacts.is_empty() {
        lines.push("No contacts".bright_black().to_string());
    }
    for (index, contact) in contacts.iter().enumerate() {
        let marker = if contact.is_online() {
            "●".bright_green().to_string()
        } else {
            "○".bright_black().to_string()
        };
        lines.push(format!(
            "{:>3}. {} {} {}",
            index + 1,
            marker,
            contact.display_name(),
            format!("({})", contact.id).bright_black()
        ));
    }
    lines
}

/// Renders a conversation with day separators and relative times.
///
/// `user_id` decides which side a message is shown on; locally authored
/// messages are always "mine".
pub fn conversation<Tz>(
    contact: Option<&Contact>,
    messages: &[Message],
    user_id: Option<&str>,
    now: &DateTime<Tz>,
) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut lines = Vec::new();
    if let Some(contact) = contact {
        lines.push(
            format!("=== {} ===", contact.display_name())
                .bright_magenta()
                .bold()
                .to_string(),
        );
    }
    if messages.is_empty() {
        lines.push("No messages yet. Say hello!".bright_black().to_string());
        return lines;
    }

    for group in group_by_day(messages, now) {
        if let Some(label) = &group.label {
            lines.push(format!("── {label} ──").bright_black().to_string());
        }
        for message in group.messages {
            lines.push(message_line(message, user_id, now));
        }
    }
    lines
}

fn message_line<Tz>(message: &Message, user_id: Option<&str>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mine = message.is_from(user_id);
    let when = message
        .created_at
        .as_ref()
        .map(|ts| format_relative_time(ts, now))
        .unwrap_or_default();

    let mut body = message.text().unwrap_or_default().to_string();
    if let Some(image) = message.image() {
        let attachment = if is_data_url(image) {
            "[image]".to_string()
        } else {
            format!("[image: {image}]")
        };
        if !body.is_empty() {
            body.push(' ');
        }
        body.push_str(&attachment);
    }

    if mine {
        format!("{} {} {}", "me ›".green(), body, when.bright_black())
    } else {
        format!("{} {} {}", "  ‹".bright_blue(), body.bright_blue(), when.bright_black())
    }
}

pub fn user(user: &AuthUser) -> String {
    let avatar = if user.avatar().is_some() {
        " [avatar set]"
    } else {
        ""
    };
    format!("{} <{}>{}", user.display_name().bold(), user.email, avatar)
}

pub fn notification(notification: &Notification) -> String {
    match notification.level {
        NotificationLevel::Success => format!("✓ {}", notification.message).bright_green().to_string(),
        NotificationLevel::Info => format!("ℹ {}", notification.message).bright_cyan().to_string(),
        NotificationLevel::Error => format!("✗ {}", notification.message).red().to_string(),
    }
}

pub fn help(commands: &[(&str, &str, &str)]) -> Vec<String> {
    let mut lines = vec!["Commands:".bold().to_string()];
    for (name, synopsis, description) in commands {
        let usage = if synopsis.is_empty() {
            name.to_string()
        } else {
            format!("{name} {synopsis}")
        };
        lines.push(format!("  {:<36} {}", usage.bright_cyan(), description));
    }
    lines.push(
        "Anything that does not start with '/' is sent to the open conversation."
            .bright_black()
            .to_string(),
    );
    lines
}
