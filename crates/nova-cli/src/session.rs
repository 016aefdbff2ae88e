use anyhow::Result;
use std::path::Path;

use crate::prompt::{InputType, Prompt};
use nova::assistant::Assistant;

/// Drives one conversation: read input, hand it to the assistant, print
/// whatever landed in the transcript since the last turn.
pub struct Session<'a> {
    assistant: Assistant,
    prompt: Box<dyn Prompt + 'a>,
    assistant_name: String,
    cursor: usize,
}

impl<'a> Session<'a> {
    pub fn new(assistant: Assistant, prompt: Box<dyn Prompt + 'a>, assistant_name: &str) -> Self {
        Session {
            assistant,
            prompt,
            assistant_name: assistant_name.to_string(),
            cursor: 0,
        }
    }

    pub async fn start(&mut self) -> Result<()> {
        self.assistant.greet();
        self.flush_transcript();
        self.prompt.nova_ready(&self.assistant_name);

        loop {
            let input = self.prompt.get_input()?;
            let content = input.content.unwrap_or_default();
            match input.input_type {
                InputType::Exit => break,
                InputType::AskAgain => continue,
                InputType::Message => self.ask(&content).await,
                InputType::Pdf => self.upload(InputType::Pdf, &content).await,
                InputType::Image => self.upload(InputType::Image, &content).await,
            }
        }
        self.prompt.close();
        Ok(())
    }

    /// Submit a single message, print the outcome and stop
    pub async fn headless_start(&mut self, text: &str) -> Result<()> {
        self.assistant.greet();
        self.ask(text).await;
        self.prompt.close();
        Ok(())
    }

    pub async fn headless_upload(&mut self, input_type: InputType, path: &Path) -> Result<()> {
        self.upload(input_type, &path.to_string_lossy()).await;
        self.prompt.close();
        Ok(())
    }

    async fn ask(&mut self, text: &str) {
        self.prompt.show_busy();
        self.assistant.submit(text).await;
        self.prompt.hide_busy();
        self.flush_transcript();
    }

    async fn upload(&mut self, input_type: InputType, path: &str) {
        let path = Path::new(path);
        self.prompt.show_busy();
        let uploaded = match input_type {
            InputType::Image => self.assistant.upload_image(path).await,
            _ => self.assistant.upload_pdf(path).await,
        };
        self.prompt.hide_busy();
        if !uploaded {
            println!("Usage: /pdf <path> or /image <path>");
        }
        self.flush_transcript();
    }

    fn flush_transcript(&mut self) {
        let fresh = {
            let transcript = self.assistant.transcript().lock();
            transcript.entries_since(self.cursor).to_vec()
        };
        self.cursor += fresh.len();
        for message in &fresh {
            self.prompt.render(message);
        }
    }
}
