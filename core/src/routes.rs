//! Endpoint registry for the similarity service.
//!
//! Pure string building: each route is a fixed path suffix concatenated onto
//! the configured base address. No parameterization, no query strings.

/// The known routes of the similarity service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Upload,
    ListImages,
}

impl Route {
    /// The fixed path suffix for this route.
    pub fn path(self) -> &'static str {
        match self {
            Route::Upload => "/upload",
            Route::ListImages => "/images",
        }
    }

    /// The fully-qualified URL for this route under `base_url`.
    ///
    /// `base_url` is expected without a trailing slash; `SimilarityClient`
    /// strips one on construction.
    pub fn url(self, base_url: &str) -> String {
        format!("{base_url}{}", self.path())
    }
}
