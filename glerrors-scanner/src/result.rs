/// A link found on the index page, pointing at one function's reference page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    /// The `href` exactly as written on the index page
    pub href: String,
    /// `href` resolved against the index URL
    pub url: String,
}

/// Text pulled out of a single reference page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtract {
    pub signatures: Vec<String>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PageResult {
    pub page: PageRef,
    pub status_code: u16,
    pub extract: PageExtract,
    pub error: Option<String>,
}

impl PageResult {
    pub fn new(page: PageRef) -> Self {
        Self {
            page,
            status_code: 0,
            extract: PageExtract::default(),
            error: None,
        }
    }

    pub fn with_error(page: PageRef, error: String) -> Self {
        Self {
            page,
            status_code: 0,
            extract: PageExtract::default(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
