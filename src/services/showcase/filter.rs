use std::{convert::Infallible, fmt, str::FromStr};

/// Category filter for the video list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every video.
    #[default]
    All,

    /// Only videos in this category.
    Only(String),
}

impl CategoryFilter {
    /// The category name, or `None` for [`CategoryFilter::All`].
    pub fn category(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(category) => Some(category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "all" => Self::All,
            category => Self::Only(category.to_string()),
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category().unwrap_or("all"))
    }
}
