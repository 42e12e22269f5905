//! Layout prompts
//!
//! The system prompt primes the model with the site and the catalogue of
//! page components it may use. The page prompt asks for one page.

/// Site identity the layout prompt is primed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePrompt {
    pub site_name: String,
    pub site_description: String,
}

impl SitePrompt {
    pub fn new(site_name: impl Into<String>, site_description: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            site_description: site_description.into(),
        }
    }

    /// System prompt describing the site and the component catalogue
    pub fn system_prompt(&self) -> String {
        format!(
            r#"We are designing a website for {description}. The company name is {name}.

## Components

Pages are built from these components:
- Section: a large title and image with a description and action buttons.
- Carousel: scrollable images shown one at a time.
- Recent posts: the latest blog posts.
- Pricing: pricing plans and their descriptions.
- Featured items: a few items with text descriptions.
- Featured people: cards of people.
- Image gallery: a list of images.

## Fields

- Section: title (required, big headline text), subtitle, text (long form markdown), actions (list of buttons with label and url), media (required, an image description).
- Carousel: title (required), subtitle, items (list of featured items).
- Featured item: title (required), subtitle, text (markdown), image (required, description used to search for an image).
- Featured items: items (required, list of featured items).
- Featured people: people (required, list of people, each with a name, title and image).
- Pricing: title, subtitle, plans (list of plans, each with a title and price).
- Image gallery: images (required, list of image descriptions).

Every image is a clear description of what appears in it. Use as many images as possible.

## Response

Return a JSON object with a "components" array. Each component has a "type" field naming the component plus its field values. For example:

{example}

Use as many components as fit the purpose of the page. Return the JSON only, with no additional text."#,
            description = self.site_description,
            name = self.site_name,
            example = LAYOUT_EXAMPLE,
        )
    }

    /// User prompt for a single page
    pub fn page_prompt(title: Option<&str>, description: Option<&str>) -> String {
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("Untitled page");
        match description.map(str::trim).filter(|d| !d.is_empty()) {
            Some(description) => format!(
                "create the page: {}. the description of the page: {}",
                title, description
            ),
            None => format!("create the page: {}", title),
        }
    }
}

const LAYOUT_EXAMPLE: &str = r#"{
    "components": [
        {
            "type": "GenericSection",
            "title": { "text": "My large title" },
            "subtitle": "My smaller subtitle",
            "text": "My *markdown* text",
            "actions": [{ "label": "Action label", "url": "/contact" }],
            "media": "A team working together around a whiteboard"
        },
        {
            "type": "CarouselSection",
            "title": "Carousel title",
            "items": [
                {
                    "title": "Carousel item title",
                    "subtitle": "Carousel item subtitle",
                    "text": "markdown *text*",
                    "image": "mountain lake at sunrise"
                }
            ]
        },
        {
            "type": "PricingSection",
            "title": { "text": "Pricing title" },
            "plans": [{ "title": "Starter", "price": "$10" }]
        },
        {
            "type": "FeaturedPeopleSection",
            "title": { "text": "Our team" },
            "people": ["content/data/team/Asher-Schmitt.json"]
        },
        {
            "type": "ImageGallery",
            "images": ["whale jumping out of the water", "three orange flowers"]
        }
    ]
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_mentions_site() {
        let prompt = SitePrompt::new("Acme", "a bakery in Lisbon").system_prompt();
        assert!(prompt.contains("The company name is Acme."));
        assert!(prompt.contains("a website for a bakery in Lisbon"));
        assert!(prompt.contains("\"components\""));
    }

    #[test]
    fn test_example_is_valid_json() {
        let example: serde_json::Value = serde_json::from_str(LAYOUT_EXAMPLE).unwrap();
        assert_eq!(example["components"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_page_prompt() {
        assert_eq!(
            SitePrompt::page_prompt(Some("Pricing"), Some("our plans")),
            "create the page: Pricing. the description of the page: our plans"
        );
        assert_eq!(
            SitePrompt::page_prompt(Some("About"), Some("  ")),
            "create the page: About"
        );
        assert_eq!(
            SitePrompt::page_prompt(None, None),
            "create the page: Untitled page"
        );
    }
}
