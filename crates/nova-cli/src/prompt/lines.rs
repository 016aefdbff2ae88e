use std::io::{BufRead, Write};

use anyhow::Result;
use nova::models::message::{Body, Message};

use super::{parse_command, Command, Input, InputType, Prompt};

/// Reads one submission per line from a non-interactive source and writes the
/// transcript as plain text.
pub struct LinePrompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        LinePrompt { reader, writer }
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn render(&mut self, message: &Message) {
        let line = match &message.body {
            Body::Text { text } => format!("[{}] {}", message.kind, text),
            Body::Link { title, url } => format!("[link] {} <{}>", title, url),
        };
        let _ = writeln!(self.writer, "{}", line);
    }

    fn get_input(&mut self) -> Result<Input> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(Input::exit());
        }
        Ok(match parse_command(&line) {
            Command::Exit => Input::exit(),
            Command::Pdf(path) => Input::new(InputType::Pdf, Some(path)),
            Command::Image(path) => Input::new(InputType::Image, Some(path)),
            Command::Message(text) => Input::new(InputType::Message, Some(text)),
            Command::ToggleTheme | Command::Help | Command::Blank => Input::ask_again(),
        })
    }

    fn show_busy(&mut self) {}

    fn hide_busy(&self) {}

    fn close(&self) {}

    fn nova_ready(&self, _assistant_name: &str) {}
}
