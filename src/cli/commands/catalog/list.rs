use std::sync::Arc;

use crate::{
    cli::{
        Command, CommandResult,
        formatting::{format_description, format_highlight},
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config::Config,
    services::showcase::CategoryFilter,
};

/// Lists catalog videos, optionally limited to one category.
///
/// The first listed video is the one the showcase opens on.
pub struct ListCommand {
    config: Arc<Config>,
}

impl ListCommand {
    /// Creates a ListCommand over the configured catalog.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl Command for ListCommand {
    fn execute(&self, args: &[String]) -> CommandResult {
        let filter = args
            .first()
            .and_then(|arg| arg.parse::<CategoryFilter>().ok())
            .unwrap_or_default();

        let videos: Vec<_> = self.config.catalog.videos_in(filter.category()).collect();

        if videos.is_empty() {
            return Ok(format!("No videos in category '{filter}'"));
        }

        let mut output = format!("{} video(s) in '{filter}':\n\n", videos.len());

        for (index, video) in videos.iter().enumerate() {
            let marker = if index == 0 {
                format_highlight(" (opens first)")
            } else {
                String::new()
            };
            let signed = if video.access_token.is_empty() {
                ""
            } else {
                " [signed]"
            };

            output.push_str(&format!(
                "{:2}. {:<24} {:<12} {}{signed}{marker}\n",
                index + 1,
                video.id,
                video.category,
                video.title,
            ));

            if !video.description.is_empty() {
                output.push_str(&format!("    {}\n", format_description(&video.description)));
            }
        }

        Ok(output)
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "list".to_string(),
            description: "List catalog videos".to_string(),
            category: "catalog".to_string(),
            args: vec![CommandArg {
                name: "category".to_string(),
                description: "Only list this category ('all' for every video)".to_string(),
                required: false,
                value_type: ArgType::String,
            }],
            examples: vec![
                "showreel catalog list".to_string(),
                "showreel catalog list editing".to_string(),
            ],
        }
    }
}
