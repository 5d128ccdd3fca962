// Demo page - the bundled preview document
//
// Builds the portfolio page layout as a Page model: fixed header with theme
// and menu buttons, a hero with the typing line, reveal sections and a
// skills grid with percentage bars. Geometry is in page pixels against a
// 600px viewport so the scroll behaviors have room to work.

use crate::page::{Element, Page};

/// Build the bundled portfolio preview page
pub fn build_demo_page() -> Page {
    let mut page = Page::new(600.0, 2800.0).with_meta_theme_color("#f8fafc");

    // Fixed header: brand, nav links, theme toggle, menu button
    let header = page.insert(Element::new().with_class("main-header").at(0.0, 64.0));
    page.insert_child(
        header,
        Element::new().with_class("brand").with_text("Portfolio"),
    );
    let nav = page.insert_child(header, Element::new().with_class("header-nav"));
    for (label, href) in [
        ("About", "#about"),
        ("Skills", "#skills"),
        ("Projects", "#projects"),
        ("Contact", "#contact"),
    ] {
        page.insert_child(
            nav,
            Element::new()
                .with_class("nav-link")
                .with_attr("href", href)
                .with_text(label),
        );
    }
    page.insert_child(
        header,
        Element::new()
            .with_id("dark-mode-toggle")
            .with_attr("aria-label", "Toggle theme"),
    );
    page.insert_child(
        header,
        Element::new()
            .with_id("mobile-menu-button")
            .with_attr("aria-expanded", "false"),
    );

    // Hero with the typewriter line
    let hero = page.insert(Element::new().with_id("hero").at(64.0, 536.0));
    page.insert_child(
        hero,
        Element::new()
            .with_class("hero-title")
            .with_text("Hi, I'm Sanju")
            .at(220.0, 48.0),
    );
    page.insert_child(hero, Element::new().with_id("typing-text").at(280.0, 32.0));

    // About section
    let about = page.insert(
        Element::new()
            .with_id("about")
            .with_class("reveal-element")
            .at(640.0, 420.0),
    );
    page.insert_child(
        about,
        Element::new()
            .with_class("section-title")
            .with_text("About Me")
            .at(660.0, 40.0),
    );

    // Skills section with percentage bars
    let skills = page.insert(
        Element::new()
            .with_id("skills")
            .with_class("reveal-element")
            .at(1100.0, 520.0),
    );
    page.insert_child(
        skills,
        Element::new()
            .with_class("section-title")
            .with_text("Skills")
            .at(1120.0, 40.0),
    );
    for (i, (name, percent)) in [
        ("Python", "90"),
        ("Machine Learning", "85"),
        ("LLMs & RAG", "80"),
        ("SQL", "75"),
        ("JavaScript", "70"),
    ]
    .into_iter()
    .enumerate()
    {
        let top = 1180.0 + i as f64 * 70.0;
        let item = page.insert_child(
            skills,
            Element::new()
                .with_class("skill-item")
                .with_text(name)
                .at(top, 60.0),
        );
        page.insert_child(
            item,
            Element::new()
                .with_class("skill-bar-fill")
                .with_attr("data-percentage", percent),
        );
    }

    // Projects section
    let projects = page.insert(
        Element::new()
            .with_id("projects")
            .with_class("reveal-element")
            .at(1680.0, 560.0),
    );
    for (i, title) in ["RAG Chat Assistant", "Churn Prediction", "This Site"]
        .into_iter()
        .enumerate()
    {
        page.insert_child(
            projects,
            Element::new()
                .with_class("project-card")
                .with_class("reveal-element")
                .with_text(title)
                .at(1760.0 + i as f64 * 160.0, 140.0),
        );
    }

    // Contact section
    let contact = page.insert(
        Element::new()
            .with_id("contact")
            .with_class("reveal-element")
            .at(2300.0, 380.0),
    );
    page.insert_child(
        contact,
        Element::new()
            .with_class("section-title")
            .with_text("Get In Touch")
            .at(2320.0, 40.0),
    );

    page
}
