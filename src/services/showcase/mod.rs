//! Video showcase: the host that decides what the player shows.
//!
//! Keeps the catalog, the active category filter and the current
//! selection, and drives a [`PlayerLifecycleManager`] whenever the
//! selection changes or the view is left.

mod error;
mod filter;

pub use error::ShowcaseError;
pub use filter::CategoryFilter;

use tracing::{debug, info};

use crate::{
    config::{CatalogConfig, PlayerConfig, VideoEntry},
    services::player::{MediaReference, PlayerLifecycleManager},
};

/// Navigation state for the video page.
#[derive(Debug)]
pub struct Showcase {
    catalog: CatalogConfig,
    player_config: PlayerConfig,
    filter: CategoryFilter,
    current: Option<String>,
    player: PlayerLifecycleManager,
}

impl Showcase {
    /// Opens the showcase on the first catalog video and binds it.
    pub fn new(catalog: CatalogConfig, config: &PlayerConfig, player: PlayerLifecycleManager) -> Self {
        let mut showcase = Self {
            catalog,
            player_config: config.clone(),
            filter: CategoryFilter::All,
            current: None,
            player,
        };

        let first = showcase.catalog.videos.first().map(|video| video.id.clone());
        showcase.show(first);
        showcase
    }

    /// Videos visible under the current filter, in catalog order.
    pub fn videos(&self) -> Vec<&VideoEntry> {
        self.catalog.videos_in(self.filter.category()).collect()
    }

    /// Configured categories followed by any others used in the catalog.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.catalog.categories.iter().map(String::as_str).collect();

        for video in &self.catalog.videos {
            if !categories.contains(&video.category.as_str()) {
                categories.push(&video.category);
            }
        }

        categories
    }

    /// Active category filter.
    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Currently selected video.
    pub fn current(&self) -> Option<&VideoEntry> {
        self.current.as_deref().and_then(|id| self.catalog.video(id))
    }

    /// The player this showcase drives.
    pub fn player(&self) -> &PlayerLifecycleManager {
        &self.player
    }

    /// Media reference the provider needs to play `video`.
    pub fn media_reference(&self, video: &VideoEntry) -> MediaReference {
        MediaReference::for_video(video, &self.player_config)
    }

    /// Selects a visible video. Selecting the current video again does nothing.
    ///
    /// # Errors
    /// Returns `ShowcaseError::UnknownVideo` if no entry has this id, or
    /// `ShowcaseError::NotInCategory` if the active filter hides it
    pub fn select(&mut self, video_id: &str) -> Result<(), ShowcaseError> {
        let video = self
            .catalog
            .video(video_id)
            .ok_or_else(|| ShowcaseError::UnknownVideo(video_id.to_string()))?;

        if let Some(category) = self.filter.category() {
            if video.category != category {
                return Err(ShowcaseError::NotInCategory {
                    id: video_id.to_string(),
                    category: category.to_string(),
                });
            }
        }

        if self.current.as_deref() != Some(video_id) {
            self.show(Some(video_id.to_string()));
        }

        Ok(())
    }

    /// Switches the category filter.
    ///
    /// If the current video is hidden by the new filter, the first visible
    /// video becomes current. With nothing visible the player is released.
    pub fn set_category(&mut self, filter: CategoryFilter) {
        info!(category = %filter, "Switching category");
        self.filter = filter;

        let visible = self.videos();
        let still_visible = self
            .current
            .as_deref()
            .is_some_and(|id| visible.iter().any(|video| video.id == id));

        if !still_visible {
            let first = visible.first().map(|video| video.id.clone());
            self.show(first);
        }
    }

    /// Binds the current video again. Used by the retry affordance.
    pub fn reload(&self) {
        if let Some(video) = self.current() {
            debug!(video_id = %video.id, "Reloading player");
            self.player.bind(self.media_reference(video));
        }
    }

    /// Releases the player before the host navigates to another view.
    pub fn navigate_away(&self) {
        self.player.release();
    }

    fn show(&mut self, video_id: Option<String>) {
        self.current = video_id;

        match self.current() {
            Some(video) => {
                info!(video_id = %video.id, title = %video.title, "Showing video");
                self.player.bind(self.media_reference(video));
            }
            None => self.player.release(),
        }
    }
}
