/// Validation of entities before they are written to the store.
use std::collections::HashSet;

use thiserror::Error;

use crate::block::model::{BlockBody, ContentBlock};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("page slug is required")]
    MissingSlug,
    #[error("page slug {0:?} may only contain letters, digits, '-' and '_'")]
    InvalidSlug(String),
    #[error("page title is required")]
    MissingTitle,
    #[error("form name is required")]
    MissingName,
    #[error("block id cannot be empty")]
    EmptyBlockId,
    #[error("duplicate block id {0:?} in the same sequence")]
    DuplicateBlockId(String),
    #[error("duplicate slide id {0:?} in slider {1:?}")]
    DuplicateSlideId(String, String),
}

/// Validate a page slug. Slugs appear in URLs, so they are restricted to a
/// path-safe alphabet.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() {
        return Err(ValidationError::MissingSlug);
    }
    let path_safe = slug
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
    if !path_safe {
        return Err(ValidationError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    Ok(())
}

pub fn validate_form_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    Ok(())
}

/// Check that every block id is non-empty and unique within its sequence,
/// recursing into slides.
pub fn validate_blocks(blocks: &[ContentBlock]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for block in blocks {
        if block.id.is_empty() {
            return Err(ValidationError::EmptyBlockId);
        }
        if !seen.insert(block.id.as_str()) {
            return Err(ValidationError::DuplicateBlockId(block.id.clone()));
        }
        if let BlockBody::Slider(slider) = &block.body {
            let mut slide_ids = HashSet::new();
            for slide in &slider.slides {
                if !slide_ids.insert(slide.id.as_str()) {
                    return Err(ValidationError::DuplicateSlideId(
                        slide.id.clone(),
                        block.id.clone(),
                    ));
                }
                validate_blocks(&slide.content)?;
            }
        }
    }
    Ok(())
}
