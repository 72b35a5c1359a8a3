use std::time::Duration;

/// `rel` for links that open in a new browsing context.
pub const EXTERNAL_REL: &str = "noopener noreferrer";

/// Static content of the page. Provided to the component tree as context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub owner: &'static str,
    pub email: &'static str,
    pub profile_url: &'static str,
    pub resume_path: &'static str,
    pub headshot_path: &'static str,
    /// How long the copy button shows its confirmation.
    pub copied_display: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            owner: "Justin Tufte",
            email: "justin.tufte@gmail.com",
            profile_url: "https://www.linkedin.com/in/justin-tufte/",
            resume_path: "/Justin-Tufte-Resume.pdf",
            headshot_path: "/headshot.jpeg",
            copied_display: Duration::from_millis(2000),
        }
    }
}
