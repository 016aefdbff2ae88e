pub mod analysis;
pub mod chat;
pub mod news;
pub mod search;
pub mod utils;
pub mod weather;

use std::sync::Arc;
use strum_macros::{Display, EnumIter};

use crate::transport::AuthenticatedTransport;
use analysis::{AnalysisClient, ImageAnalysis, PdfAnalysis};
use chat::ChatClient;
use news::{NewsClient, NewsReport};
use search::{SearchClient, SearchResults};
use weather::{WeatherClient, WeatherReport};

/// One backend function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum CapabilityKind {
    Chat,
    Search,
    News,
    Weather,
    Pdf,
    Image,
}

/// Successful payload of any capability
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Chat(String),
    Search(SearchResults),
    News(NewsReport),
    Weather(WeatherReport),
    Pdf(PdfAnalysis),
    Image(ImageAnalysis),
}

impl Reply {
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Reply::Chat(_) => CapabilityKind::Chat,
            Reply::Search(_) => CapabilityKind::Search,
            Reply::News(_) => CapabilityKind::News,
            Reply::Weather(_) => CapabilityKind::Weather,
            Reply::Pdf(_) => CapabilityKind::Pdf,
            Reply::Image(_) => CapabilityKind::Image,
        }
    }
}

/// All capability clients, sharing one transport
pub struct Capabilities {
    pub chat: ChatClient,
    pub search: SearchClient,
    pub news: NewsClient,
    pub weather: WeatherClient,
    pub analysis: AnalysisClient,
}

impl Capabilities {
    pub fn new(transport: Arc<AuthenticatedTransport>) -> Self {
        Self {
            chat: ChatClient::new(Arc::clone(&transport)),
            search: SearchClient::new(Arc::clone(&transport)),
            news: NewsClient::new(Arc::clone(&transport)),
            weather: WeatherClient::new(Arc::clone(&transport)),
            analysis: AnalysisClient::new(transport),
        }
    }
}
