//! Promotional campaigns shown in the home carousel.

use crate::ids::{CampaignId, ProductId};
use serde::{Deserialize, Serialize};

const STORY_SEPARATOR: &str = "\r\n";
const HEADLINE_LINES: usize = 3;

/// A promotional campaign linked to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// Campaign identifier.
    #[serde(default)]
    pub id: Option<CampaignId>,
    /// Product the campaign links to.
    #[serde(rename = "product_id")]
    pub linked_product_id: ProductId,
    /// Background image URL.
    #[serde(rename = "picture")]
    pub image: String,
    /// Story text, lines separated by CRLF.
    #[serde(rename = "story")]
    pub story_text: String,
}

impl Campaign {
    /// Create a new campaign.
    pub fn new(
        linked_product_id: impl Into<ProductId>,
        image: impl Into<String>,
        story_text: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            linked_product_id: linked_product_id.into(),
            image: image.into(),
            story_text: story_text.into(),
        }
    }

    /// The first three story lines.
    pub fn headline(&self) -> String {
        self.story_text
            .split(STORY_SEPARATOR)
            .take(HEADLINE_LINES)
            .collect::<Vec<_>>()
            .join(STORY_SEPARATOR)
    }

    /// The fourth story line, if present.
    pub fn title(&self) -> Option<&str> {
        self.story_text.split(STORY_SEPARATOR).nth(HEADLINE_LINES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_split() {
        let campaign = Campaign::new(
            "201807242228",
            "https://cdn/keyvisual.jpg",
            "於是\r\n我也想要給你\r\n一個那麼美好的自己。\r\n不否認美\r\n",
        );
        assert_eq!(campaign.headline(), "於是\r\n我也想要給你\r\n一個那麼美好的自己。");
        assert_eq!(campaign.title(), Some("不否認美"));
    }

    #[test]
    fn test_short_story() {
        let campaign = Campaign::new("1", "img", "only one line");
        assert_eq!(campaign.headline(), "only one line");
        assert_eq!(campaign.title(), None);
    }

    #[test]
    fn test_campaign_from_api_json() {
        let json = r#"{"id":1,"product_id":201807242228,"picture":"https://cdn/kv.jpg","story":"a\r\nb"}"#;
        let campaign: Campaign = serde_json::from_str(json).unwrap();
        assert_eq!(campaign.linked_product_id.as_str(), "201807242228");
        assert_eq!(campaign.id, Some(CampaignId::new("1")));
    }
}
