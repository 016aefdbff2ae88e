use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::auth::AuthProvider;
use crate::capabilities::analysis::{display_name, Upload};
use crate::capabilities::{Capabilities, CapabilityKind, Reply};
use crate::errors::CapabilityResult;
use crate::geolocation::Geolocator;
use crate::models::message::Message;
use crate::renderer::ResponseRenderer;
use crate::router::{Intent, IntentRouter};
use crate::transcript::SharedTranscript;
use crate::transport::AuthenticatedTransport;

/// Wires router, capability clients and renderer around one transcript.
///
/// `submit` takes `&self`, so several submissions may be in flight at once. Their
/// responses are appended in completion order, which is not necessarily
/// submission order.
pub struct Assistant {
    router: IntentRouter,
    renderer: ResponseRenderer,
    capabilities: Capabilities,
    geolocator: Arc<dyn Geolocator>,
    auth: Arc<dyn AuthProvider>,
    transcript: SharedTranscript,
}

impl Assistant {
    pub fn new(transport: Arc<AuthenticatedTransport>, geolocator: Arc<dyn Geolocator>) -> Self {
        Self {
            router: IntentRouter::new(),
            renderer: ResponseRenderer::new(),
            auth: transport.auth(),
            capabilities: Capabilities::new(transport),
            geolocator,
            transcript: SharedTranscript::new(),
        }
    }

    pub fn transcript(&self) -> &SharedTranscript {
        &self.transcript
    }

    /// Greet a signed-in user. Returns whether anyone was signed in.
    pub fn greet(&self) -> bool {
        let Some(user) = self.auth.current_user() else {
            return false;
        };
        info!(user = %user.id, "signed in");
        let name = user.first_name.as_deref().unwrap_or("friend");
        self.transcript.lock().append(Message::assistant(format!(
            "Welcome back, {}! Your personal settings and history have been loaded.",
            name
        )));
        true
    }

    /// Route one line of text and append the outcome to the transcript.
    ///
    /// Blank text is dropped before anything is shown or sent; the routed intent
    /// is returned otherwise.
    pub async fn submit(&self, text: &str) -> Option<Intent> {
        let text = text.trim();
        if text.is_empty() {
            debug!("ignoring blank submission");
            return None;
        }

        {
            let mut transcript = self.transcript.lock();
            transcript.append(Message::user(text));
            transcript.show_pending();
        }

        let intent = self.router.classify(text);
        debug!(?intent, "routed submission");
        let result = self.dispatch(&intent).await;
        self.finish(result, intent.capability());
        Some(intent)
    }

    pub async fn upload_pdf(&self, path: &Path) -> bool {
        self.upload(path, CapabilityKind::Pdf).await
    }

    pub async fn upload_image(&self, path: &Path) -> bool {
        self.upload(path, CapabilityKind::Image).await
    }

    async fn upload(&self, path: &Path, kind: CapabilityKind) -> bool {
        if path.as_os_str().is_empty() {
            return false;
        }

        let label = match kind {
            CapabilityKind::Pdf => "PDF",
            _ => "image",
        };
        {
            let mut transcript = self.transcript.lock();
            transcript.append(Message::user(format!(
                "Uploaded {}: {}",
                label,
                display_name(path)
            )));
            transcript.show_pending();
        }

        let result = self.analyze(path, kind).await;
        self.finish(result, kind);
        true
    }

    async fn analyze(&self, path: &Path, kind: CapabilityKind) -> CapabilityResult<Reply> {
        let upload = Upload::from_path(path).await?;
        let analysis = &self.capabilities.analysis;
        match kind {
            CapabilityKind::Pdf => analysis.analyze_pdf(upload).await.map(Reply::Pdf),
            _ => analysis.analyze_image(upload).await.map(Reply::Image),
        }
    }

    async fn dispatch(&self, intent: &Intent) -> CapabilityResult<Reply> {
        let capabilities = &self.capabilities;
        match intent {
            Intent::Search(query) => capabilities.search.search(query).await.map(Reply::Search),
            Intent::NewsCountry(country) => {
                capabilities.news.by_country(country).await.map(Reply::News)
            }
            Intent::NewsTopic(topic) => capabilities.news.by_topic(topic).await.map(Reply::News),
            Intent::WeatherCity(city) => {
                capabilities.weather.by_city(city).await.map(Reply::Weather)
            }
            Intent::WeatherHere => capabilities
                .weather
                .here(self.geolocator.as_ref())
                .await
                .map(Reply::Weather),
            Intent::Chat(text) => capabilities.chat.send(text).await.map(Reply::Chat),
        }
    }

    fn finish(&self, result: CapabilityResult<Reply>, kind: CapabilityKind) {
        if let Err(e) = &result {
            error!(capability = %kind, error = %e, "capability call failed");
        }
        let messages = self.renderer.render(&result, kind);

        let mut transcript = self.transcript.lock();
        transcript.extend(messages);
        transcript.clear_pending();
    }
}
