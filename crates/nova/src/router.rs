use crate::capabilities::CapabilityKind;

const SEARCH_PREFIX: &str = "search ";
const NEWS_COUNTRY_PHRASE: &str = "news in";
const NEWS_TOPIC_PHRASE: &str = "news about";
const WEATHER_CITY_PHRASE: &str = "weather in";
const WEATHER_KEYWORDS: [&str; 2] = ["weather", "temperature"];

/// What a submitted line asks for. Payloads keep the user's original casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Search(String),
    NewsCountry(String),
    NewsTopic(String),
    WeatherCity(String),
    WeatherHere,
    Chat(String),
}

impl Intent {
    pub fn capability(&self) -> CapabilityKind {
        match self {
            Intent::Search(_) => CapabilityKind::Search,
            Intent::NewsCountry(_) | Intent::NewsTopic(_) => CapabilityKind::News,
            Intent::WeatherCity(_) | Intent::WeatherHere => CapabilityKind::Weather,
            Intent::Chat(_) => CapabilityKind::Chat,
        }
    }
}

/// Classifies a line of text with a fixed precedence list; the first rule that
/// matches wins even when later phrases also appear in the text.
///
/// 1. starts with `search `
/// 2. contains `news in`
/// 3. contains `news about`
/// 4. contains `weather in`
/// 5. contains `weather` or `temperature`
/// 6. anything else is chat
///
/// Matching ignores ASCII case. Callers must not pass blank text.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentRouter;

impl IntentRouter {
    pub fn new() -> Self {
        IntentRouter
    }

    pub fn classify(&self, text: &str) -> Intent {
        let text = text.trim();
        // ASCII lowering keeps byte offsets aligned with `text`
        let lowered = text.to_ascii_lowercase();

        if lowered.starts_with(SEARCH_PREFIX) {
            return Intent::Search(text[SEARCH_PREFIX.len()..].trim().to_string());
        }
        if let Some(country) = remove_phrase(text, &lowered, NEWS_COUNTRY_PHRASE) {
            return Intent::NewsCountry(country);
        }
        if let Some(topic) = remove_phrase(text, &lowered, NEWS_TOPIC_PHRASE) {
            return Intent::NewsTopic(topic);
        }
        if let Some(city) = remove_phrase(text, &lowered, WEATHER_CITY_PHRASE) {
            return Intent::WeatherCity(city);
        }
        if WEATHER_KEYWORDS
            .iter()
            .any(|keyword| lowered.contains(keyword))
        {
            return Intent::WeatherHere;
        }
        Intent::Chat(text.to_string())
    }
}

/// Remove the first occurrence of `phrase` and trim what is left
fn remove_phrase(text: &str, lowered: &str, phrase: &str) -> Option<String> {
    let start = lowered.find(phrase)?;
    let end = start + phrase.len();
    let mut remainder = String::with_capacity(text.len() - phrase.len());
    remainder.push_str(&text[..start]);
    remainder.push_str(&text[end..]);
    Some(remainder.trim().to_string())
}
