/// News entity shapes and content block rules
///
/// A news article owns an ordered list of content blocks; each block carries
/// text, an image, or both. The image position is only meaningful when a
/// block has both elements.

use crate::domain::{rules, rules::FieldErrors};
use crate::error::FieldError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placement of a block's image relative to its text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    Left,
    Right,
    Top,
    Bottom,
}

impl ImagePosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImagePosition::Left => "left",
            ImagePosition::Right => "right",
            ImagePosition::Top => "top",
            ImagePosition::Bottom => "bottom",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "left" => Some(ImagePosition::Left),
            "right" => Some(ImagePosition::Right),
            "top" => Some(ImagePosition::Top),
            "bottom" => Some(ImagePosition::Bottom),
            _ => None,
        }
    }
}

/// Content block fields; also the create shape for blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsBlockFields {
    /// Block heading (max 200 chars)
    pub title: Option<String>,
    pub text_content: Option<String>,
    pub image_url: Option<String>,
    /// Only allowed when the block has both text and image
    pub image_position: Option<ImagePosition>,
    /// Display order, starting at 0
    #[serde(default)]
    pub order: i32,
    /// Free-form metadata
    pub meta: Option<Value>,
}

impl NewsBlockFields {
    fn has_text(&self) -> bool {
        self.text_content.as_deref().is_some_and(|t| !t.is_empty())
    }

    fn has_image(&self) -> bool {
        self.image_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Validate one block, reporting errors under blocks[index]
    fn validate_into(&self, index: usize, errors: &mut FieldErrors) {
        if let Some(url) = &self.image_url {
            if !url.is_empty() && !rules::is_valid_image_url(url) {
                errors.add(
                    format!("blocks[{}].image_url", index),
                    "image URL must start with http://, https:// or /media/",
                );
            }
        }

        if self.image_position.is_some() && !(self.has_text() && self.has_image()) {
            errors.add(
                format!("blocks[{}].image_position", index),
                "image position requires both text and an image on the block",
            );
        }

        if self.order < 0 {
            errors.add(format!("blocks[{}].order", index), "order must not be negative");
        }

        if !self.has_text() && !self.has_image() {
            errors.add(
                format!("blocks[{}]", index),
                "block must contain text or an image",
            );
        }
    }
}

/// Payload for creating a news article with its blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsCreate {
    /// Headline (max 200 chars)
    pub title: String,
    /// Short preview text
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    /// Defaults to the moment of creation when absent
    pub publication_date: Option<DateTime<Utc>>,
    /// Author staff id
    pub author_id: i64,
    /// Content blocks, at least one
    pub blocks: Vec<NewsBlockFields>,
}

impl NewsCreate {
    /// Validate the article and every block
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();

        if let Some(url) = &self.cover_image {
            if !rules::is_valid_image_url(url) {
                errors.add(
                    "cover_image",
                    "image URL must start with http://, https:// or /media/",
                );
            }
        }

        if self.blocks.is_empty() {
            errors.add("blocks", "news must contain at least one block");
        }
        for (index, block) in self.blocks.iter().enumerate() {
            block.validate_into(index, &mut errors);
        }

        errors.into_result()
    }
}

/// Partial update payload; blocks are managed through creation only
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsUpdate {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub is_published: Option<bool>,
    pub publication_date: Option<DateTime<Utc>>,
}

/// Content block as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsBlock {
    pub id: i64,
    pub news_id: i64,
    #[serde(flatten)]
    pub block: NewsBlockFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// News article as returned by the API, blocks in display order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub is_published: bool,
    pub publication_date: DateTime<Utc>,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub blocks: Vec<NewsBlock>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_block() -> NewsBlockFields {
        NewsBlockFields {
            title: None,
            text_content: Some("We are open on holidays.".to_string()),
            image_url: None,
            image_position: None,
            order: 0,
            meta: None,
        }
    }

    fn valid_news() -> NewsCreate {
        NewsCreate {
            title: "Holiday schedule".to_string(),
            excerpt: None,
            cover_image: None,
            is_published: false,
            publication_date: None,
            author_id: 1,
            blocks: vec![text_block()],
        }
    }

    #[test]
    fn article_with_one_text_block_passes() {
        assert!(valid_news().validate().is_ok());
    }

    #[test]
    fn article_without_blocks_is_rejected() {
        let news = NewsCreate {
            blocks: vec![],
            ..valid_news()
        };
        let errors = news.validate().unwrap_err();
        assert_eq!(errors[0].field, "blocks");
    }

    #[test]
    fn empty_block_is_rejected() {
        let news = NewsCreate {
            blocks: vec![
                text_block(),
                NewsBlockFields {
                    text_content: None,
                    ..text_block()
                },
            ],
            ..valid_news()
        };
        let errors = news.validate().unwrap_err();
        assert_eq!(errors[0].field, "blocks[1]");
    }

    #[test]
    fn image_position_requires_text_and_image() {
        let block = NewsBlockFields {
            image_position: Some(ImagePosition::Left),
            ..text_block()
        };
        let news = NewsCreate {
            blocks: vec![block],
            ..valid_news()
        };
        let errors = news.validate().unwrap_err();
        assert_eq!(errors[0].field, "blocks[0].image_position");

        let block = NewsBlockFields {
            image_url: Some("/media/open.jpg".to_string()),
            image_position: Some(ImagePosition::Left),
            ..text_block()
        };
        let news = NewsCreate {
            blocks: vec![block],
            ..valid_news()
        };
        assert!(news.validate().is_ok());
    }

    #[test]
    fn cover_and_block_image_urls_are_prefix_checked() {
        let news = NewsCreate {
            cover_image: Some("covers/spring.jpg".to_string()),
            ..valid_news()
        };
        assert_eq!(news.validate().unwrap_err()[0].field, "cover_image");

        let block = NewsBlockFields {
            image_url: Some("pictures/cat.jpg".to_string()),
            ..text_block()
        };
        let news = NewsCreate {
            blocks: vec![block],
            ..valid_news()
        };
        assert_eq!(news.validate().unwrap_err()[0].field, "blocks[0].image_url");
    }
}
