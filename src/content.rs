//! Storefront content
//!
//! Marketing copy for the storefront surface as typed data: the benefit
//! cards and the marquee phrases. How the cards and the banner are drawn
//! (markup, icons, animation) is a rendering concern and lives elsewhere.

use serde::Deserialize;

/// One marketing benefit card (title plus supporting blurb).
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct BenefitCard {
    title: String,
    blurb: String,
}

impl BenefitCard {
    /// Create a new card.
    pub fn new(title: impl Into<String>, blurb: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blurb: blurb.into(),
        }
    }

    /// The card headline.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The supporting copy.
    pub fn blurb(&self) -> &str {
        &self.blurb
    }
}

/// Static storefront copy consumed by the presentation layer.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct StorefrontContent {
    #[serde(default)]
    benefits: Vec<BenefitCard>,

    #[serde(default)]
    marquee: Vec<String>,
}

impl StorefrontContent {
    /// Create content from parts.
    pub fn new(benefits: Vec<BenefitCard>, marquee: Vec<String>) -> Self {
        Self { benefits, marquee }
    }

    /// The benefit cards, in display order.
    pub fn benefits(&self) -> &[BenefitCard] {
        &self.benefits
    }

    /// The marquee phrases, in display order.
    pub fn marquee(&self) -> &[String] {
        &self.marquee
    }

    /// The marquee as a single banner line. Duplicating the line to fake an
    /// endless ticker is left to the visual layer.
    #[must_use]
    pub fn marquee_line(&self, separator: &str) -> String {
        self.marquee.join(separator)
    }
}
