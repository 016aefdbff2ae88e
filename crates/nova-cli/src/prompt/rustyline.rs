use std::io::{self, Write};

use anyhow::Result;
use bat::WrappingMode;
use cliclack::spinner;
use console::style;
use nova::models::message::{Body, Message, MessageKind};

use super::{parse_command, Command, Input, InputType, Prompt, Theme, HELP};

const PROMPT: &str = "\x1b[1m\x1b[38;5;30m(nova)> \x1b[0m";

pub struct RustylinePrompt {
    spinner: cliclack::ProgressBar,
    theme: Theme,
    editor: rustyline::DefaultEditor,
    assistant_name: String,
    last_line: Option<String>,
}

impl RustylinePrompt {
    pub fn new(assistant_name: &str) -> Result<Self> {
        Ok(RustylinePrompt {
            spinner: spinner(),
            theme: Theme::Dark,
            editor: rustyline::DefaultEditor::new()?,
            assistant_name: assistant_name.to_string(),
            last_line: None,
        })
    }

    fn theme_name(&self) -> &'static str {
        match self.theme {
            Theme::Light => "GitHub",
            Theme::Dark => "zenburn",
        }
    }
}

fn print_markdown(content: &str, theme: &str) {
    let printed = bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .theme(theme)
        .language("Markdown")
        .wrapping_mode(WrappingMode::Character)
        .print();
    if printed.is_err() {
        println!("{}", content);
    }
}

impl Prompt for RustylinePrompt {
    fn render(&mut self, message: &Message) {
        match (&message.body, message.kind) {
            // the line the user just typed is already on screen
            (Body::Text { text }, MessageKind::User) => {
                if self.last_line.as_deref() != Some(text.as_str()) {
                    println!("{}", style(text).dim());
                }
            }
            (Body::Text { text }, MessageKind::Error) => println!("{}", style(text).red()),
            (Body::Text { text }, MessageKind::Assistant) => {
                print_markdown(text, self.theme_name())
            }
            (Body::Link { title, url }, _) => {
                println!("{} {}", style(title).bold().cyan(), style(url).underlined().dim())
            }
        }
        let _ = io::stdout().flush();
    }

    fn show_busy(&mut self) {
        self.spinner = spinner();
        self.spinner
            .start(format!("Waiting for {}...", self.assistant_name));
    }

    fn hide_busy(&self) {
        self.spinner.stop("");
    }

    fn get_input(&mut self) -> Result<Input> {
        let line = match self.editor.readline(PROMPT) {
            Ok(line) => line,
            Err(e) => {
                match e {
                    rustyline::error::ReadlineError::Interrupted
                    | rustyline::error::ReadlineError::Eof => (),
                    _ => eprintln!("Input error: {}", e),
                }
                return Ok(Input::exit());
            }
        };
        let _ = self.editor.add_history_entry(line.as_str());

        match parse_command(&line) {
            Command::Exit => Ok(Input::exit()),
            Command::Blank => Ok(Input::ask_again()),
            Command::ToggleTheme => {
                self.theme = match self.theme {
                    Theme::Light => {
                        println!("Switching to Dark theme");
                        Theme::Dark
                    }
                    Theme::Dark => {
                        println!("Switching to Light theme");
                        Theme::Light
                    }
                };
                Ok(Input::ask_again())
            }
            Command::Help => {
                println!("{}", HELP);
                Ok(Input::ask_again())
            }
            Command::Pdf(path) => Ok(Input::new(InputType::Pdf, Some(path))),
            Command::Image(path) => Ok(Input::new(InputType::Image, Some(path))),
            Command::Message(text) => {
                self.last_line = Some(text.clone());
                Ok(Input::new(InputType::Message, Some(text)))
            }
        }
    }

    fn close(&self) {
        // No cleanup required
    }
}
