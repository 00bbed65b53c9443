//! Static site content: navigation, marketing copy, pagination limits.

pub const SITE_NAME: &str = "Artist Easel Shop";
pub const SITE_DESCRIPTION: &str = "Premium easels, brushes, and studio supplies for artists who \
     demand the best. Bulk pricing available for schools and studios.";

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const MAX_PAGE_SIZE: u32 = 48;

/// A header/footer navigation entry.
#[derive(Debug, Clone, Copy)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

pub const NAV_LINKS: &[NavLink] = &[
    NavLink {
        label: "Shop All",
        href: "/collections",
    },
    NavLink {
        label: "Easels",
        href: "/collections/easels",
    },
    NavLink {
        label: "Brushes",
        href: "/collections/brushes",
    },
    NavLink {
        label: "Studio Supplies",
        href: "/collections/studio-supplies",
    },
    NavLink {
        label: "About",
        href: "/about",
    },
];

/// A studio-type marketing card on the home page.
#[derive(Debug, Clone, Copy)]
pub struct StudioType {
    pub name: &'static str,
    pub description: &'static str,
    pub href: &'static str,
}

pub const STUDIO_TYPES: &[StudioType] = &[
    StudioType {
        name: "Home Studio",
        description: "Compact easels and essentials for artists working from home. \
             Space-saving designs without compromising quality.",
        href: "/collections?studio=home",
    },
    StudioType {
        name: "Professional Studio",
        description: "Heavy-duty easels and premium supplies built for daily professional use. \
             The tools the masters choose.",
        href: "/collections?studio=professional",
    },
    StudioType {
        name: "School & University",
        description: "Durable, affordable easels in bulk quantities for classrooms and art \
             programs. Volume discounts available.",
        href: "/collections?studio=education",
    },
];

/// A trust-signal banner entry.
#[derive(Debug, Clone, Copy)]
pub struct ValueProp {
    pub title: &'static str,
    pub description: &'static str,
}

/// Site URL for a product, from the API's catalog path (`/french-field-easel/`).
#[must_use]
pub fn product_href(api_path: &str) -> String {
    format!("/products/{}", api_path.trim_matches('/'))
}

/// Site URL for a collection, from the API's category path. Nested categories
/// keep their inner segments.
#[must_use]
pub fn collection_href(api_path: &str) -> String {
    format!("/collections/{}", api_path.trim_matches('/'))
}

pub const VALUE_PROPS: &[ValueProp] = &[
    ValueProp {
        title: "Free Shipping $75+",
        description: "Complimentary ground shipping on all orders over $75.",
    },
    ValueProp {
        title: "Expert Curation",
        description: "Every product hand-selected by working artists and educators.",
    },
    ValueProp {
        title: "Bulk Pricing",
        description: "Tiered discounts for schools, studios, and large orders. Save up to 25%.",
    },
    ValueProp {
        title: "30-Day Returns",
        description: "Not satisfied? Return any unused item within 30 days for a full refund.",
    },
];

/// A customer quote on the home page.
#[derive(Debug, Clone, Copy)]
pub struct Testimonial {
    pub quote: &'static str,
    pub author: &'static str,
    pub role: &'static str,
}

pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        quote: "My field easel has survived three summers of plein air trips. You can \
             feel the quality the moment you unfold it.",
        author: "Maria G.",
        role: "Landscape Painter",
    },
    Testimonial {
        quote: "We outfitted two classrooms through the bulk program and saved nearly \
             20%. The quote process could not have been easier.",
        author: "James T.",
        role: "Art Department Chair",
    },
    Testimonial {
        quote: "Fast shipping, honest advice, and brushes that keep their shape. My \
             students order here now too.",
        author: "Priya S.",
        role: "Studio Instructor",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_href_strips_slashes() {
        assert_eq!(product_href("/french-field-easel/"), "/products/french-field-easel");
    }

    #[test]
    fn test_collection_href_keeps_nested_segments() {
        assert_eq!(collection_href("/easels/field-easels/"), "/collections/easels/field-easels");
    }
}
