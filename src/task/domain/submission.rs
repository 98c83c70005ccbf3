//! Content handed in when a task is submitted.

/// Review text and media links for a submission.
///
/// Stored verbatim; content rules are enforced at the request boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    review_text: String,
    image_urls: Vec<String>,
    screenshot_urls: Vec<String>,
}

impl Submission {
    /// Creates a submission with review text and image links.
    #[must_use]
    pub fn new(review_text: impl Into<String>, image_urls: impl IntoIterator<Item = String>) -> Self {
        Self {
            review_text: review_text.into(),
            image_urls: image_urls.into_iter().collect(),
            screenshot_urls: Vec::new(),
        }
    }

    /// Sets screenshot links.
    #[must_use]
    pub fn with_screenshot_urls(mut self, urls: impl IntoIterator<Item = String>) -> Self {
        self.screenshot_urls = urls.into_iter().collect();
        self
    }

    /// Returns the review text.
    #[must_use]
    pub fn review_text(&self) -> &str {
        &self.review_text
    }

    /// Returns the image links.
    #[must_use]
    pub fn image_urls(&self) -> &[String] {
        &self.image_urls
    }

    /// Returns the screenshot links.
    #[must_use]
    pub fn screenshot_urls(&self) -> &[String] {
        &self.screenshot_urls
    }

    pub(super) fn into_parts(self) -> (String, Vec<String>, Vec<String>) {
        (self.review_text, self.image_urls, self.screenshot_urls)
    }
}
