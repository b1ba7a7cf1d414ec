use std::sync::Arc;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config::Config,
    services::player::MediaReference,
};

/// Prints the provider player options for one catalog video.
///
/// This is exactly the object handed to the vendor runtime when the video
/// is mounted.
pub struct MediaCommand {
    config: Arc<Config>,
}

impl MediaCommand {
    /// Creates a MediaCommand over the configured catalog.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl Command for MediaCommand {
    fn execute(&self, args: &[String]) -> CommandResult {
        let video_id = args.first().ok_or_else(|| {
            CliError::InvalidArguments("Expected <video-id> argument".to_string())
        })?;

        let video = self
            .config
            .catalog
            .video(video_id)
            .ok_or_else(|| CliError::CatalogError(format!("Video '{video_id}' not found")))?;

        let media = MediaReference::for_video(video, &self.config.player);

        Ok(serde_json::to_string_pretty(&media)?)
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "media".to_string(),
            description: "Print provider player options for a video".to_string(),
            category: "catalog".to_string(),
            args: vec![CommandArg {
                name: "video-id".to_string(),
                description: "Catalog video id".to_string(),
                required: true,
                value_type: ArgType::VideoId,
            }],
            examples: vec!["showreel catalog media 1397757906801587829".to_string()],
        }
    }
}
