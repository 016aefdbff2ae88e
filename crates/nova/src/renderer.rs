use crate::capabilities::analysis::{ImageAnalysis, PdfAnalysis};
use crate::capabilities::news::{NewsReport, NewsSubject};
use crate::capabilities::search::{SearchResultItem, SearchResults};
use crate::capabilities::weather::WeatherReport;
use crate::capabilities::{CapabilityKind, Reply};
use crate::errors::CapabilityError;
use crate::models::message::Message;

/// Longest extracted text shown inline, in characters
pub const DISPLAY_LIMIT: usize = 500;
pub const TRUNCATION_MARKER: &str = "... [truncated]";

const SEARCH_HEADER: &str = "🔎 Search Results:";
const NO_SEARCH_RESULTS: &str = "No results found";
const NO_IMAGE_TEXT: &str = "No text could be extracted from the image";

/// Cut `text` to `DISPLAY_LIMIT` characters, appending the marker when anything
/// was removed
pub fn truncate_for_display(text: &str) -> String {
    match text.char_indices().nth(DISPLAY_LIMIT) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Turns capability results into transcript entries
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseRenderer;

impl ResponseRenderer {
    pub fn new() -> Self {
        ResponseRenderer
    }

    /// Search yields a header plus one entry per result; everything else yields
    /// exactly one entry.
    pub fn render(
        &self,
        result: &Result<Reply, CapabilityError>,
        kind: CapabilityKind,
    ) -> Vec<Message> {
        let reply = match result {
            Ok(reply) => reply,
            Err(error) => return vec![render_error(error, kind)],
        };
        match reply {
            Reply::Search(results) => render_search(results),
            Reply::Chat(text) => vec![Message::assistant(text.as_str())],
            Reply::News(report) => vec![render_news(report)],
            Reply::Weather(report) => vec![render_weather(report)],
            Reply::Pdf(analysis) => vec![render_pdf(analysis)],
            Reply::Image(analysis) => vec![render_image(analysis)],
        }
    }
}

fn render_search(results: &SearchResults) -> Vec<Message> {
    let mut messages = vec![Message::assistant(SEARCH_HEADER)];
    match &results.items {
        Some(items) => messages.extend(items.iter().map(|item| match item {
            SearchResultItem::Snippet(text) => Message::assistant(text.as_str()),
            SearchResultItem::Link { title, url } => Message::link(title.as_str(), url.as_str()),
        })),
        None => messages.push(Message::assistant(NO_SEARCH_RESULTS)),
    }
    messages
}

fn render_news(report: &NewsReport) -> Message {
    match &report.subject {
        NewsSubject::Country(country) => {
            Message::assistant(format!("📰 News in {}:\n{}", country, report.text))
        }
        NewsSubject::Topic(topic) => {
            Message::assistant(format!("🗞️ News about {}:\n{}", topic, report.text))
        }
    }
}

fn render_weather(report: &WeatherReport) -> Message {
    Message::assistant(format!(
        "🌤️ Weather in {}: {}, {}°C ({}°F)",
        report.location, report.condition, report.temp_c, report.temp_f
    ))
}

fn render_pdf(analysis: &PdfAnalysis) -> Message {
    let pages = analysis
        .page_count
        .map(|count| count.to_string())
        .unwrap_or_else(|| "?".to_string());
    Message::assistant(format!(
        "📄 PDF Analysis ({} pages):\n{}",
        pages,
        truncate_for_display(&analysis.text)
    ))
}

fn render_image(analysis: &ImageAnalysis) -> Message {
    let text = if analysis.text.is_empty() {
        NO_IMAGE_TEXT
    } else {
        analysis.text.as_str()
    };
    Message::assistant(format!("Image Analysis:\n{}", text))
}

fn render_error(error: &CapabilityError, kind: CapabilityKind) -> Message {
    let text = match error {
        CapabilityError::Geolocation(e) => format!("⚠️ {}", e),
        CapabilityError::Application(message) => match kind {
            CapabilityKind::Pdf => format!("❌ Error: {}", message),
            CapabilityKind::Image => format!("Error: {}", message),
            _ => format!("⚠️ {}", message),
        },
        failure => match kind {
            CapabilityKind::Chat => format!("⚠️ Error getting response: {}", failure),
            CapabilityKind::Search => format!("⚠️ Search failed: {}", failure),
            CapabilityKind::News => format!("⚠️ Error getting news: {}", failure),
            CapabilityKind::Weather => format!("⚠️ Error getting weather: {}", failure),
            CapabilityKind::Pdf => format!("❌ Failed to process PDF: {}", failure),
            CapabilityKind::Image => format!("Failed to process image: {}", failure),
        },
    };
    Message::error(text)
}
