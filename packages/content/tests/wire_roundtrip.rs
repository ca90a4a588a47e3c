//! Wire format round-trips for every section kind

use pagecraft_content::payloads::*;
use pagecraft_content::{
    validate, ComponentId, Content, ReusableRef, Section, SectionId, SectionKind, StyleOverride,
};

fn image(id: &str) -> ImageRef {
    ImageRef {
        media_id: id.to_string(),
        url: format!("https://cdn.example.com/{id}.jpg"),
        alt: format!("Picture {id}"),
    }
}

fn link(url: &str, text: &str) -> Link {
    Link {
        url: url.to_string(),
        text: text.to_string(),
    }
}

fn populated(kind: SectionKind) -> Content {
    match kind {
        SectionKind::Hero => Content::Hero(HeroContent {
            headline: "Summer Sale".into(),
            subheadline: "Everything must go".into(),
            overlay: false,
        }),
        SectionKind::Text => Content::Text(TextContent {
            heading: "About".into(),
            body: "<p>We make <strong>things</strong>.</p>".into(),
            alignment: "center".into(),
        }),
        SectionKind::Image => Content::Image(ImageContent {
            image: image("m1"),
            caption: "Our shop".into(),
            full_width: true,
        }),
        SectionKind::Button => Content::Button(ButtonContent {
            link: link("/contact", "Contact us"),
            variant: "outline".into(),
            new_tab: true,
        }),
        SectionKind::Columns => Content::Columns(ColumnsContent {
            columns: vec![
                Column { heading: "Left".into(), body: "<p>a</p>".into(), image: image("m2") },
                Column { heading: "Right".into(), body: "<p>b</p>".into(), image: ImageRef::default() },
            ],
        }),
        SectionKind::CardGrid => Content::CardGrid(CardGridContent {
            heading: "Services".into(),
            columns_per_row: 2,
            cards: vec![Card {
                title: "Repairs".into(),
                description: "Fast".into(),
                image: image("m3"),
                link: link("/repairs", "More"),
            }],
        }),
        SectionKind::Accordion => Content::Accordion(AccordionContent {
            heading: "Details".into(),
            allow_multiple: true,
            items: vec![AccordionItem { title: "Shipping".into(), body: "2 days".into(), open: true }],
        }),
        SectionKind::Features => Content::Features(FeaturesContent {
            heading: "Why us".into(),
            subheading: "Three reasons".into(),
            features: vec![Feature { icon: "bolt".into(), title: "Fast".into(), description: "Really".into() }],
        }),
        SectionKind::Testimonials => Content::Testimonials(TestimonialsContent {
            heading: "Customers".into(),
            testimonials: vec![Testimonial {
                quote: "Lovely".into(),
                author: "Sam".into(),
                role: "Buyer".into(),
                avatar: image("m4"),
            }],
        }),
        SectionKind::Faq => Content::Faq(FaqContent {
            heading: "FAQ".into(),
            items: vec![
                FaqItem { question: "Open on Sunday?".into(), answer: "No".into() },
                FaqItem { question: "Parking?".into(), answer: "Yes".into() },
            ],
        }),
        SectionKind::Pricing => Content::Pricing(PricingContent {
            heading: "Plans".into(),
            valid_until: "2026-12-31".into(),
            plans: vec![PricingPlan {
                name: "Pro".into(),
                price: 19.5,
                period: "year".into(),
                features: "Support\nUpdates".into(),
                highlighted: true,
                cta: link("/buy", "Buy"),
            }],
        }),
    }
}

#[test]
fn test_every_kind_round_trips_through_wire_json() -> anyhow::Result<()> {
    for kind in SectionKind::ALL {
        let content = populated(kind);
        let json = content.to_wire_string()?;
        let back = Content::from_wire_str(kind, &json)?;
        assert_eq!(back, content, "round trip changed {kind}");
    }
    Ok(())
}

#[test]
fn test_populated_samples_pass_validation() {
    for kind in SectionKind::ALL {
        let wire = populated(kind).to_wire().unwrap();
        let issues = validate(&kind.schema(), &wire);
        assert!(issues.is_empty(), "{kind}: {issues:?}");
    }
}

#[test]
fn test_page_export_round_trips() -> anyhow::Result<()> {
    let mut linked = Section::new(SectionId::new("s2"), populated(SectionKind::Faq), 1);
    linked.reusable_ref = Some(ReusableRef {
        component_id: ComponentId::new("c1"),
        component_name: "Shared FAQ".into(),
        is_linked: true,
    });
    linked.style_override = Some(StyleOverride {
        use_custom_styles: true,
        accent_color: Some("#00ff00".into()),
        ..Default::default()
    });
    let mut hidden = Section::new(SectionId::new("s3"), populated(SectionKind::Pricing), 2);
    hidden.is_visible = false;
    hidden.is_locked = true;

    let page = vec![
        Section::new(SectionId::new("s1"), populated(SectionKind::Hero), 0),
        linked,
        hidden,
    ];

    let json = serde_json::to_string_pretty(&page)?;
    let back: Vec<Section> = serde_json::from_str(&json)?;
    assert_eq!(back, page);
    Ok(())
}
