//! Slide content: the YAML deck format and the built-in sample deck.

mod color;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use color::parse_color;

const SAMPLE_DECK: &str = include_str!("sample.yaml");

#[derive(Error, Debug, PartialEq)]
pub enum DeckError {
    #[error("Slide {slide}: invalid color '{value}' (expected #RRGGBB or #RRGGBBAA)")]
    InvalidColor { slide: usize, value: String },

    #[error("Slide {slide}: {layout} layout needs a '{field}' field")]
    MissingField {
        slide: usize,
        layout: &'static str,
        field: &'static str,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Short brand mark drawn in the top-left of branded layouts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Label drawn in the top-centre of branded layouts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default)]
    pub slides: Vec<DeckSlide>,

    /// Directory that relative image paths resolve against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    Cover,
    #[default]
    Content,
    Cards,
    Quote,
    Contact,
}

impl Layout {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Content => "content",
            Self::Cards => "cards",
            Self::Quote => "quote",
            Self::Contact => "contact",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckSlide {
    pub layout: Layout,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kicker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<Stat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<Card>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<Contact>,
    /// Page marker shown top-right, e.g. "Page 002".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    pub background: Background,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub value: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// A single glyph drawn above the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub text: String,
}

/// The visual content behind a slide's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Background {
    Solid {
        color: String,
    },
    Gradient {
        top: String,
        bottom: String,
    },
    Image {
        path: PathBuf,
        /// Black overlay opacity for text legibility, 0..1.
        #[serde(default)]
        dim: f32,
    },
}

impl Default for Background {
    fn default() -> Self {
        Self::Solid {
            color: "#000000".to_string(),
        }
    }
}

impl Deck {
    pub fn from_yaml(content: &str, base_dir: &Path) -> Result<Self> {
        let mut deck: Deck = serde_yaml::from_str(content).context("Failed to parse deck")?;
        deck.base_dir = base_dir.to_path_buf();
        deck.validate()?;
        Ok(deck)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read deck {}", path.display()))?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        Self::from_yaml(&content, base_dir)
            .with_context(|| format!("Invalid deck {}", path.display()))
    }

    /// The built-in five-slide pitch deck.
    pub fn sample() -> Result<Self> {
        Self::from_yaml(SAMPLE_DECK, Path::new("."))
    }

    pub fn sample_source() -> &'static str {
        SAMPLE_DECK
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("pitchdeck")
    }

    /// Check colours and per-layout required fields. Slide numbers in errors are 1-indexed.
    pub fn validate(&self) -> std::result::Result<(), DeckError> {
        for (i, slide) in self.slides.iter().enumerate() {
            let number = i + 1;
            slide.background.validate(number)?;

            let required: Option<(&'static str, bool)> = match slide.layout {
                Layout::Cover | Layout::Content => None,
                Layout::Quote => Some(("quote", slide.quote.is_some())),
                Layout::Cards => Some(("cards", !slide.cards.is_empty())),
                Layout::Contact => Some(("contacts", !slide.contacts.is_empty())),
            };
            if let Some((field, present)) = required {
                if !present {
                    return Err(DeckError::MissingField {
                        slide: number,
                        layout: slide.layout.name(),
                        field,
                    });
                }
            }
        }
        Ok(())
    }

    /// Absolute path of an image background, resolved against the deck directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl Background {
    fn validate(&self, slide: usize) -> std::result::Result<(), DeckError> {
        let check = |value: &str| {
            parse_color(value).ok_or_else(|| DeckError::InvalidColor {
                slide,
                value: value.to_string(),
            })
        };
        match self {
            Self::Solid { color } => check(color).map(|_| ()),
            Self::Gradient { top, bottom } => check(top).and(check(bottom)).map(|_| ()),
            Self::Image { .. } => Ok(()),
        }
    }

    /// Colour painted before anything else; images also fall back to it while loading.
    pub fn base_color(&self) -> Color32 {
        match self {
            Self::Solid { color } => parse_color(color).unwrap_or(Color32::BLACK),
            Self::Gradient { top, .. } => parse_color(top).unwrap_or(Color32::BLACK),
            Self::Image { .. } => Color32::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_deck_parses() {
        let deck = Deck::sample().unwrap();
        assert_eq!(deck.slides.len(), 5);
        assert_eq!(deck.slides[0].layout, Layout::Cover);
        assert_eq!(deck.slides[2].layout, Layout::Cards);
        assert_eq!(deck.slides[2].cards.len(), 5);
        assert_eq!(deck.slides[3].layout, Layout::Quote);
        assert_eq!(deck.slides[4].layout, Layout::Contact);
        assert_eq!(deck.brand.as_deref(), Some("VOSS AI"));
    }

    #[test]
    fn test_minimal_slide_defaults() {
        let yaml = "slides:\n  - title: Hello\n";
        let deck = Deck::from_yaml(yaml, Path::new(".")).unwrap();
        assert_eq!(deck.slides.len(), 1);
        assert_eq!(deck.slides[0].layout, Layout::Content);
        assert_eq!(deck.slides[0].background, Background::default());
        assert_eq!(deck.display_title(), "pitchdeck");
    }

    #[test]
    fn test_malformed_yaml_keeps_parse_error() {
        let err = Deck::from_yaml("slides: [\n", Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("Failed to parse deck"));
        assert!(err.downcast_ref::<DeckError>().is_none());
    }

    #[test]
    fn test_empty_deck_parses() {
        let deck = Deck::from_yaml("title: Nothing\n", Path::new(".")).unwrap();
        assert!(deck.slides.is_empty());
    }

    #[test]
    fn test_invalid_color_names_slide() {
        let yaml = "slides:\n  - title: A\n  - title: B\n    background:\n      type: solid\n      color: blue\n";
        let err = Deck::from_yaml(yaml, Path::new(".")).unwrap_err();
        let deck_err = err.downcast_ref::<DeckError>().unwrap();
        assert_eq!(
            *deck_err,
            DeckError::InvalidColor {
                slide: 2,
                value: "blue".to_string()
            }
        );
    }

    #[test]
    fn test_quote_layout_requires_quote() {
        let yaml = "slides:\n  - layout: quote\n    attribution: Someone\n";
        let err = Deck::from_yaml(yaml, Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("quote layout needs a 'quote' field"));
    }

    #[test]
    fn test_gradient_and_image_backgrounds() {
        let yaml = r##"
slides:
  - background:
      type: gradient
      top: "#101020"
      bottom: "#000000"
  - background:
      type: image
      path: photos/bg.png
      dim: 0.4
"##;
        let deck = Deck::from_yaml(yaml, Path::new("/decks")).unwrap();
        assert_eq!(
            deck.slides[0].background.base_color(),
            Color32::from_rgb(0x10, 0x10, 0x20)
        );
        match &deck.slides[1].background {
            Background::Image { path, dim } => {
                assert_eq!(*dim, 0.4);
                assert_eq!(deck.resolve(path), Path::new("/decks/photos/bg.png"));
            }
            other => panic!("Expected image background, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_layout_is_error() {
        let yaml = "slides:\n  - layout: spiral\n";
        assert!(Deck::from_yaml(yaml, Path::new(".")).is_err());
    }
}
