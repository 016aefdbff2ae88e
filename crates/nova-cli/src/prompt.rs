use anyhow::Result;
use nova::models::message::Message;

pub mod lines;
pub mod rustyline;

pub trait Prompt {
    fn render(&mut self, message: &Message);
    fn get_input(&mut self) -> Result<Input>;
    fn show_busy(&mut self);
    fn hide_busy(&self);
    fn close(&self);
    fn nova_ready(&self, assistant_name: &str) {
        println!("\n");
        println!(
            "{} is running! Ask a question, or try \"weather in Paris\", \
             \"news about AI\" or /help.",
            assistant_name
        );
        println!("\n");
    }
}

pub struct Input {
    pub input_type: InputType,
    pub content: Option<String>, // the message text or the file path
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    AskAgain, // Ask the user for input again. Control flow command.
    Message,
    Pdf,
    Image,
    Exit,
}

impl Input {
    pub fn new(input_type: InputType, content: Option<String>) -> Self {
        Input {
            input_type,
            content,
        }
    }

    pub fn ask_again() -> Self {
        Self::new(InputType::AskAgain, None)
    }

    pub fn exit() -> Self {
        Self::new(InputType::Exit, None)
    }
}

pub enum Theme {
    Light,
    Dark,
}

/// A typed line, before any prompt-specific handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    ToggleTheme,
    Help,
    Pdf(String),
    Image(String),
    Message(String),
    Blank,
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Blank;
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    match head.to_ascii_lowercase().as_str() {
        "/exit" | "/quit" => Command::Exit,
        "/t" => Command::ToggleTheme,
        "/?" | "/help" => Command::Help,
        "/pdf" => Command::Pdf(rest.to_string()),
        "/image" => Command::Image(rest.to_string()),
        _ => Command::Message(line.to_string()),
    }
}

pub const HELP: &str = "Commands:
/pdf <path> - Analyze a PDF
/image <path> - Extract text from an image
/t - Toggle Light/Dark theme
/? | /help - Display this help message
/exit - Exit the session";
