//! View models for the page sections.
//!
//! Every section implements `Default` with the published placeholder copy, so a
//! section whose content could not be resolved still renders in full.

use fino_integrino_core::SiteImage;

use super::markdown::render_markdown;

/// Image shown when a section has no image or its reference is dangling.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.svg";

const PEXELS_PARAMS: &str = "?auto=compress&cs=tinysrgb&w=800";
const LOGO_PARAMS: &str = "?auto=compress&cs=tinysrgb&w=100&h=100";

fn pexels(id: u32, params: &str) -> String {
    format!("https://images.pexels.com/photos/{id}/pexels-photo-{id}.jpeg{params}")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

// =============================================================================
// Shared pieces
// =============================================================================

/// An image ready for an `<img>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

impl ImageView {
    pub fn new(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: alt.into(),
        }
    }

    pub fn placeholder(alt: impl Into<String>) -> Self {
        Self::new(PLACEHOLDER_IMAGE, alt)
    }

    /// Use `url` unless it is missing or blank.
    pub fn or_placeholder(url: Option<&str>, alt: impl Into<String>) -> Self {
        match url.map(str::trim) {
            Some(url) if !url.is_empty() => Self::new(url, alt),
            _ => Self::placeholder(alt),
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.url == PLACEHOLDER_IMAGE
    }
}

impl From<&SiteImage> for ImageView {
    fn from(image: &SiteImage) -> Self {
        Self::new(image.url.clone(), image.alt())
    }
}

/// A headline figure such as "0g Added Sugar".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

impl Stat {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

// =============================================================================
// Hero
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroSection {
    pub eyebrow: String,
    pub heading: String,
    pub subheading: String,
    pub image: ImageView,
    pub cta_primary: String,
    pub cta_secondary: String,
    pub stats: Vec<Stat>,
    pub highlights: Vec<String>,
}

impl Default for HeroSection {
    fn default() -> Self {
        Self {
            eyebrow: "Acta Non Verba - Actions, Not Words".to_string(),
            heading: "Premium Healthy Food Solutions for Your Business".to_string(),
            subheading: "Discover our range of integral breadsticks and oat bars. No added sugar, \
                         vegan-friendly, rich in fiber, and palm-free. Trusted by leading retailers \
                         across Serbia and beyond."
                .to_string(),
            image: ImageView::new(pexels(1_640_777, PEXELS_PARAMS), "Healthy Food Products"),
            cta_primary: "Partner with Us".to_string(),
            cta_secondary: "Find Our Products".to_string(),
            stats: vec![
                Stat::new("100%", "Natural Ingredients"),
                Stat::new("0g", "Added Sugar"),
                Stat::new("50+", "Retail Partners"),
            ],
            highlights: strings(&[
                "No Added Sugar",
                "Vegan Friendly",
                "Rich in Fiber",
                "Palm-Free",
                "Carefully Selected Ingredients",
            ]),
        }
    }
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub name: String,
    pub description: String,
    pub image: ImageView,
    pub flavors: Vec<String>,
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductsSection {
    pub title: String,
    pub description: String,
    pub items: Vec<ProductCard>,
    pub private_label_title: String,
    pub private_label_text: String,
    pub private_label_cta: String,
    pub facility_badges: Vec<String>,
}

fn default_products() -> Vec<ProductCard> {
    vec![
        ProductCard {
            name: "Integral Breadsticks".to_string(),
            description: "Crunchy, wholesome breadsticks made with 100% integral flour. Perfect for \
                          snacking or pairing with your favorite dips."
                .to_string(),
            image: ImageView::new(pexels(1_775_283, PEXELS_PARAMS), "Integral Breadsticks"),
            flavors: strings(&["Classic", "Sesame", "Rosemary", "Multi-grain"]),
            benefits: strings(&["No Added Sugar", "High Fiber", "Vegan", "Palm-Free"]),
        },
        ProductCard {
            name: "Oat Bars - Classic".to_string(),
            description: "Nutritious oat bars that deliver sustained energy without the sugar \
                          crash. Made with premium oats and natural ingredients."
                .to_string(),
            image: ImageView::new(pexels(5_560_763, PEXELS_PARAMS), "Oat Bars - Classic"),
            flavors: strings(&["Natural Oat", "Honey & Nuts", "Dark Chocolate", "Cranberry"]),
            benefits: strings(&["No Added Sugar", "Rich in Fiber", "Vegan", "Clean Label"]),
        },
        ProductCard {
            name: "Oat Bars - Premium".to_string(),
            description: "Our premium line featuring exotic flavors and superfoods. Crafted for \
                          health-conscious consumers seeking exceptional taste."
                .to_string(),
            image: ImageView::new(pexels(7_262_775, PEXELS_PARAMS), "Oat Bars - Premium"),
            flavors: strings(&[
                "Matcha Green Tea",
                "Coconut & Mango",
                "Blueberry",
                "Protein Plus",
            ]),
            benefits: strings(&[
                "No Added Sugar",
                "Superfood Ingredients",
                "Vegan",
                "High Protein",
            ]),
        },
    ]
}

impl Default for ProductsSection {
    fn default() -> Self {
        Self {
            title: "Our Product Range".to_string(),
            description: "Carefully crafted products that combine exceptional taste with premium \
                          nutritional value. Each product is made with carefully selected \
                          ingredients and manufactured to the highest standards."
                .to_string(),
            items: default_products(),
            private_label_title: "Custom Solutions Available".to_string(),
            private_label_text: "We offer private label manufacturing with customizable flavors, \
                                 sizes, and packaging. Perfect for retailers looking to expand \
                                 their healthy snack offerings."
                .to_string(),
            private_label_cta: "Learn About Private Label".to_string(),
            facility_badges: strings(&[
                "Modern Production Facility",
                "Quality Certified",
                "International Distribution",
                "Custom Packaging",
            ]),
        }
    }
}

// =============================================================================
// Story
// =============================================================================

const DEFAULT_STORY: &str = "\
At Fino Integrino, we live by our motto: **Acta Non Verba** - Actions, Not Words. \
We don't just talk about quality and health; we demonstrate it through every product we create.

Our commitment to carefully selected raw materials, innovative production processes, and \
unwavering dedication to nutritional excellence has made us a trusted partner for leading \
retailers across the region.

Every ingredient is chosen with purpose. Every recipe is refined with care. Every product is \
crafted to inspire healthier living without compromising on taste.
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreValue {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorySection {
    pub title: String,
    /// Rendered from markdown; raw HTML in the source is not passed through.
    pub body_html: String,
    pub image: ImageView,
    pub mission: String,
    pub vision: String,
    pub values: Vec<CoreValue>,
    pub stats: Vec<Stat>,
}

impl Default for StorySection {
    fn default() -> Self {
        Self {
            title: "Quality Through Actions".to_string(),
            body_html: render_markdown(DEFAULT_STORY),
            image: ImageView::new(pexels(5_855_375, PEXELS_PARAMS), "Quality Production"),
            mission: "To inspire healthier living by providing premium, nutritious food products \
                      that combine exceptional taste with uncompromising quality. We aim to make \
                      healthy choices accessible and enjoyable for everyone."
                .to_string(),
            vision: "To become the regional leader in healthy snack solutions, recognized for \
                     innovation, quality, and partnership excellence. We envision a future where \
                     healthy eating is the norm, not the exception."
                .to_string(),
            values: vec![
                CoreValue {
                    title: "Quality First".to_string(),
                    text: "We never compromise on quality. From raw material selection to final \
                           packaging, excellence is our standard."
                        .to_string(),
                },
                CoreValue {
                    title: "Social Responsibility".to_string(),
                    text: "We're committed to sustainable practices and contributing positively \
                           to the communities we serve."
                        .to_string(),
                },
                CoreValue {
                    title: "Innovation".to_string(),
                    text: "Continuous innovation in recipes, processes, and products keeps us at \
                           the forefront of the healthy food industry."
                        .to_string(),
                },
            ],
            stats: vec![
                Stat::new("10+", "Years Experience"),
                Stat::new("3", "Countries"),
                Stat::new("15+", "Product Variants"),
                Stat::new("100%", "Natural"),
            ],
        }
    }
}

// =============================================================================
// Partnership
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionRegion {
    pub country: String,
    pub partners: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub email: String,
    pub phone: String,
    /// `tel:` form of `phone`.
    pub phone_href: String,
    pub company: String,
    pub city: String,
}

impl Default for ContactDetails {
    fn default() -> Self {
        Self {
            email: "b2b@finointegrino.rs".to_string(),
            phone: "+381 (0)23 456 7890".to_string(),
            phone_href: "tel:+381234567890".to_string(),
            company: "Fino Integrino d.o.o.".to_string(),
            city: "Novi Sad, Serbia".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnershipSection {
    pub eyebrow: String,
    pub title: String,
    pub description: String,
    pub capabilities: Vec<Capability>,
    pub network: Vec<DistributionRegion>,
    pub contact: ContactDetails,
}

impl Default for PartnershipSection {
    fn default() -> Self {
        Self {
            eyebrow: "B2B Partnership Hub".to_string(),
            title: "Grow Your Business with Us".to_string(),
            description: "Partner with a proven leader in healthy food manufacturing. We offer \
                          comprehensive solutions for wholesale, distribution, and private label \
                          production."
                .to_string(),
            capabilities: vec![
                Capability {
                    title: "Private Label Manufacturing".to_string(),
                    description: "Full private label (Robne Marke) production with your \
                                  branding. Customize flavors, sizes, and packaging to match \
                                  your brand identity."
                        .to_string(),
                    features: strings(&[
                        "Custom recipes",
                        "Flexible packaging",
                        "Small to large batches",
                        "Brand consultation",
                    ]),
                },
                Capability {
                    title: "Wholesale Distribution".to_string(),
                    description: "Reliable wholesale supply for retailers and distributors. \
                                  Consistent quality and on-time delivery guaranteed."
                        .to_string(),
                    features: strings(&[
                        "Competitive pricing",
                        "Flexible order volumes",
                        "Regular delivery schedules",
                        "Inventory support",
                    ]),
                },
                Capability {
                    title: "International Expansion".to_string(),
                    description: "Proven track record in international markets. We support \
                                  partners in Croatia, Slovenia, and expanding into new \
                                  territories."
                        .to_string(),
                    features: strings(&[
                        "Export documentation",
                        "Market insights",
                        "Logistics support",
                        "Regional expertise",
                    ]),
                },
            ],
            network: vec![
                DistributionRegion {
                    country: "Serbia".to_string(),
                    partners: strings(&["Idea", "Univerexport", "Gomex", "DIS", "Maxi"]),
                },
                DistributionRegion {
                    country: "Croatia".to_string(),
                    partners: strings(&["Multiple regional distributors"]),
                },
                DistributionRegion {
                    country: "Slovenia".to_string(),
                    partners: strings(&["Established distribution network"]),
                },
            ],
            contact: ContactDetails::default(),
        }
    }
}

// =============================================================================
// Where to buy
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetailerCard {
    pub name: String,
    pub kind: Option<String>,
    pub locations: Option<String>,
    /// Link to the retailer's site, when published.
    pub url: Option<String>,
    pub logo: ImageView,
}

/// Availability outside the domestic market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternationalEntry {
    pub country: String,
    pub name: Option<String>,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereToBuySection {
    pub title: String,
    pub description: String,
    pub domestic: Vec<RetailerCard>,
    pub international: Vec<InternationalEntry>,
    pub coverage: String,
    pub contact_email: String,
}

fn retailer(name: &str, kind: &str, locations: &str, logo_id: u32) -> RetailerCard {
    RetailerCard {
        name: name.to_string(),
        kind: Some(kind.to_string()),
        locations: Some(locations.to_string()),
        url: None,
        logo: ImageView::new(pexels(logo_id, LOGO_PARAMS), name),
    }
}

impl Default for WhereToBuySection {
    fn default() -> Self {
        Self {
            title: "Where to Buy Our Products".to_string(),
            description: "Find Fino Integrino products at leading retail chains across Serbia. \
                          Available in the healthy snacks and organic food sections."
                .to_string(),
            domestic: vec![
                retailer("Idea", "Supermarket Chain", "200+ stores nationwide", 3_962_285),
                retailer("Univerexport", "Supermarket Chain", "150+ stores nationwide", 264_636),
                retailer("Gomex", "Retail Chain", "100+ stores nationwide", 1_005_638),
                retailer("Maxi", "Hypermarket Chain", "80+ stores nationwide", 1_797_428),
                retailer("DIS", "Discount Chain", "120+ stores nationwide", 6_238_297),
                retailer("Tempo", "Supermarket Chain", "90+ stores nationwide", 2_292_919),
                retailer("Aman", "Retail Chain", "60+ stores nationwide", 4_050_315),
                retailer("Roda", "Supermarket Chain", "50+ stores nationwide", 5_632_402),
            ],
            international: vec![
                InternationalEntry {
                    country: "Croatia".to_string(),
                    name: None,
                    detail: "Available through our distribution partners in major Croatian \
                             cities. Expanding coverage across the region."
                        .to_string(),
                },
                InternationalEntry {
                    country: "Slovenia".to_string(),
                    name: None,
                    detail: "Growing presence through established distribution networks. \
                             Contact us for specific retailer information."
                        .to_string(),
                },
            ],
            coverage: "With 800+ retail locations across Serbia, you're never far from Fino \
                       Integrino products."
                .to_string(),
            contact_email: "info@finointegrino.rs".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_or_placeholder() {
        assert!(ImageView::or_placeholder(None, "x").is_placeholder());
        assert!(ImageView::or_placeholder(Some("  "), "x").is_placeholder());

        let image = ImageView::or_placeholder(Some("/static/images/bars.jpg"), "Bars");
        assert_eq!(image.url, "/static/images/bars.jpg");
        assert_eq!(image.alt, "Bars");
    }

    #[test]
    fn test_defaults_are_populated() {
        let hero = HeroSection::default();
        assert_eq!(hero.stats.len(), 3);
        assert!(!hero.image.is_placeholder());

        assert_eq!(ProductsSection::default().items.len(), 3);
        assert_eq!(WhereToBuySection::default().domestic.len(), 8);
        assert_eq!(PartnershipSection::default().capabilities.len(), 3);
    }

    #[test]
    fn test_default_story_renders_motto() {
        let story = StorySection::default();
        assert!(story.body_html.contains("<strong>Acta Non Verba</strong>"));
        assert_eq!(story.body_html.matches("<p>").count(), 3);
    }
}
