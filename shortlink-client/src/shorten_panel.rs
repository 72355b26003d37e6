use crate::models::ShortenedLink;

#[derive(Debug, Clone, Default, PartialEq)]
/// Landing-page shorten box: the last result, the error line and the busy
/// flag.
///
/// A new submission hides the previous result, so an old short URL is never
/// shown next to a fresh error.
pub struct ShortenPanel {
    result: Option<ShortenedLink>,
    error: Option<String>,
    loading: bool,
}

impl ShortenPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request about to be sent.
    pub fn begin(&mut self) {
        self.result = None;
        self.error = None;
        self.loading = true;
    }

    pub fn succeed(&mut self, link: ShortenedLink) {
        self.result = Some(link);
        self.error = None;
        self.loading = false;
    }

    /// Local rejection or failed request.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    pub fn result(&self) -> Option<&ShortenedLink> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
