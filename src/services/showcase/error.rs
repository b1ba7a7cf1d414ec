/// Errors from showcase navigation
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShowcaseError {
    /// No catalog entry has this id
    #[error("Video {0:?} not found in catalog")]
    UnknownVideo(String),

    /// The video exists but is hidden by the current category filter
    #[error("Video {id:?} is not in category {category:?}")]
    NotInCategory {
        /// Requested video
        id: String,
        /// Active category
        category: String,
    },
}
