use std::path::Path;

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use parley_application::{ChatApp, DEFAULT_REFETCH_INTERVAL};
use parley_core::message::OutgoingMessage;
use parley_core::notification::Notification;
use parley_core::user::{LoginRequest, ProfileUpdate, SignupRequest};
use parley_infrastructure::media::image_file_to_data_url;
use rustyline::Editor;
use rustyline::history::DefaultHistory;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::commands::{self, COMMANDS, ReplCommand, Selector};
use crate::completion::CliHelper;
use crate::render;

enum Flow {
    Continue,
    Quit,
}

pub struct Repl {
    app: ChatApp,
    notifications: UnboundedReceiver<Notification>,
    editor: Editor<CliHelper, DefaultHistory>,
}

impl Repl {
    pub fn new(app: ChatApp, notifications: UnboundedReceiver<Notification>) -> Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(CliHelper::new()));
        Ok(Self {
            app,
            notifications,
            editor,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("{}", "=== Parley ===".bright_magenta().bold());
        println!(
            "{}",
            "Type /help for commands, or /quit to exit.".bright_black()
        );

        if self.app.bootstrap().await {
            self.print_me();
            self.print_contacts();
        } else {
            println!(
                "{}",
                "Not signed in. Use /login or /signup.".bright_black()
            );
        }
        self.drain_notifications();
        self.sync_completions();

        loop {
            let prompt = self.prompt();
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(line.as_str());

                    let flow = match commands::parse(&line) {
                        Ok(Some(command)) => self.execute(command).await,
                        Ok(None) => Flow::Continue,
                        Err(e) => {
                            println!("{}", e.to_string().yellow());
                            Flow::Continue
                        }
                    };
                    self.drain_notifications();
                    self.sync_completions();

                    if matches!(flow, Flow::Quit) {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("{}", "CTRL-D detected. Exiting...".bright_green());
                    break;
                }
                Err(err) => {
                    tracing::error!("[Repl] Readline failed: {:?}", err);
                    eprintln!("{}", format!("Error: {:?}", err).red());
                    break;
                }
            }
        }

        Ok(())
    }

    async fn execute(&self, command: ReplCommand) -> Flow {
        let session = self.app.session();
        let conversation = self.app.conversation();

        match command {
            ReplCommand::SignUp {
                email,
                password,
                full_name,
            } => {
                session
                    .sign_up(SignupRequest::new(full_name, email, password))
                    .await;
                self.after_authentication().await;
            }
            ReplCommand::LogIn { email, password } => {
                session.log_in(LoginRequest::new(email, password)).await;
                self.after_authentication().await;
            }
            ReplCommand::LogOut => self.app.sign_out().await,
            ReplCommand::Check => {
                if self.app.bootstrap().await {
                    self.print_me();
                } else {
                    println!("{}", "Not signed in.".bright_black());
                }
            }
            ReplCommand::Me => self.print_me(),
            ReplCommand::Avatar(path) => {
                if let Some(image) = self.load_image(&path).await {
                    session.update_profile(ProfileUpdate::avatar(image)).await;
                }
            }
            ReplCommand::Contacts => {
                conversation.list_contacts().await;
                self.print_contacts();
            }
            ReplCommand::Online => {
                let online = conversation.online_contacts();
                if online.is_empty() {
                    println!("{}", "Nobody is online.".bright_black());
                }
                for contact in online {
                    println!("{} {}", "●".bright_green(), contact.display_name());
                }
            }
            ReplCommand::Select(selector) => self.select(selector).await,
            ReplCommand::Messages => self.print_conversation(),
            ReplCommand::Refresh => match conversation.selected_contact() {
                Some(contact) => {
                    conversation.fetch_messages(&contact.id).await;
                    self.print_conversation();
                }
                None => println!("{}", "No conversation open. Use /select.".yellow()),
            },
            ReplCommand::Image { path, caption } => {
                if let Some(image) = self.load_image(&path).await {
                    let mut payload = OutgoingMessage::image(image);
                    if let Some(caption) = caption {
                        payload = payload.with_caption(caption);
                    }
                    self.send(payload).await;
                }
            }
            ReplCommand::Send(text) => self.send(OutgoingMessage::text(text)).await,
            ReplCommand::Help => {
                for line in render::help(COMMANDS) {
                    println!("{line}");
                }
            }
            ReplCommand::Quit => return Flow::Quit,
        }

        Flow::Continue
    }

    async fn after_authentication(&self) {
        if self.app.session().is_authenticated() {
            self.app.conversation().list_contacts().await;
            self.print_contacts();
        }
    }

    async fn select(&self, selector: Selector) {
        let conversation = self.app.conversation();
        let id = match selector {
            Selector::Id(id) => Some(id),
            Selector::Index(index) => conversation
                .snapshot()
                .contacts
                .get(index - 1)
                .map(|contact| contact.id.clone()),
        };

        let Some(contact) = id.and_then(|id| conversation.select_contact_by_id(&id)) else {
            println!("{}", "No such contact. Use /contacts to list them.".yellow());
            return;
        };
        conversation
            .fetch_messages_if_stale(&contact.id, DEFAULT_REFETCH_INTERVAL)
            .await;
        self.print_conversation();
    }

    async fn send(&self, payload: OutgoingMessage) {
        let conversation = self.app.conversation();
        if conversation.selected_contact().is_none() {
            println!("{}", "No conversation open. Use /select.".yellow());
            return;
        }
        let before = conversation.messages().len();
        conversation.send_message(payload).await;
        if conversation.messages().len() > before {
            self.print_conversation();
        }
    }

    async fn load_image(&self, path: &Path) -> Option<String> {
        match image_file_to_data_url(path).await {
            Ok(image) => Some(image),
            Err(e) => {
                println!("{}", e.to_string().red());
                None
            }
        }
    }

    fn print_me(&self) {
        match self.app.session().user() {
            Some(user) => println!("Signed in as {}", render::user(&user)),
            None => println!("{}", "Not signed in.".bright_black()),
        }
    }

    fn print_contacts(&self) {
        let state = self.app.conversation().snapshot();
        for line in render::contact_list(&state.contacts, state.demo_mode) {
            println!("{line}");
        }
    }

    fn print_conversation(&self) {
        let state = self.app.conversation().snapshot();
        if state.selected_contact.is_none() {
            println!("{}", "No conversation open. Use /select.".yellow());
            return;
        }
        let user_id = self.app.session().snapshot().user.map(|user| user.id);
        let lines = render::conversation(
            state.selected_contact.as_ref(),
            &state.messages,
            user_id.as_deref(),
            &Local::now(),
        );
        for line in lines {
            println!("{line}");
        }
    }

    fn drain_notifications(&mut self) {
        while let Ok(notification) = self.notifications.try_recv() {
            println!("{}", render::notification(&notification));
        }
    }

    fn sync_completions(&mut self) {
        let contacts = self.app.conversation().snapshot().contacts;
        if let Some(helper) = self.editor.helper_mut() {
            helper.set_contacts(&contacts);
        }
    }

    fn prompt(&self) -> String {
        match self.app.conversation().selected_contact() {
            Some(contact) => format!("{} >> ", contact.display_name()),
            None => ">> ".to_string(),
        }
    }
}
