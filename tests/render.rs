#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use serde_json::json;
use textcard::batch;
use textcard::settings::{self, resolve_json};
use textcard::{
    FontSystem, GraphicSettings, PostContent, PostSettings, QuoteContent, QuoteSettings,
    RenderError,
};

/// A font system with the host's fonts, or `None` when the host has none.
fn system() -> Option<FontSystem> {
    let system = FontSystem::new();
    system.load_system_fonts();
    system.sized_font("sans-serif", 12.0).ok().map(|_| system)
}

fn small_quote_settings() -> QuoteSettings {
    QuoteSettings::from_json_value(json!({
        "font_family": "sans-serif",
        "font_size": 40,
        "size": [600, 400],
        "color_scheme": ["#000000", "#ffffff"],
        "wrap_limit": 20,
        "margin_bottom": 4
    }))
    .unwrap()
}

#[test]
fn quote_is_written_as_title_png() {
    let Some(system) = system() else { return };
    let dir = tempfile::tempdir().unwrap();
    let content = QuoteContent::new(
        "Who needs memories",
        "You don't get anything playing the part when it's insincere",
    )
    .unwrap();

    let path = system
        .render_quote(&content, &small_quote_settings(), Some(dir.path()))
        .unwrap();

    assert_eq!(path, dir.path().join("Who needs memories.png"));
    let image = image::open(&path).unwrap().into_rgba8();
    assert_eq!(image.dimensions(), (600, 400));
    // corners stay background, something white got drawn
    assert_eq!(*image.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    assert!(image.pixels().any(|p| p[0] > 200));
}

#[test]
fn quote_layout_is_deterministic_and_centered() {
    let Some(system) = system() else { return };
    let settings = small_quote_settings();
    let content = QuoteContent::new("t", "anything playing the part").unwrap();

    let (first, _) = system.layout_quote(&content, &settings).unwrap();
    let (second, _) = system.layout_quote(&content, &settings).unwrap();
    assert_eq!(first, second);

    let expected_y = ((400.0 - first.total_height()) / 2.0).floor() as i32;
    assert_eq!(first.origin.y, expected_y);
    for line in &first.lines {
        let expected_x = ((600.0 - line.metrics.width) / 2.0).floor() as i32;
        assert_eq!(line.position.x, expected_x);
    }
}

#[test]
fn transparent_background_stays_transparent() {
    let Some(system) = system() else { return };
    let settings = QuoteSettings::from_json_value(json!({
        "font_family": "sans-serif",
        "font_size": 30,
        "size": [300, 200],
        "color_scheme": [null, "rgba(255, 0, 0, 1)"],
        "wrap_limit": 30,
        "margin_bottom": 0
    }))
    .unwrap();
    let content = QuoteContent::new("t", "clear").unwrap();

    let image = system.quote_image(&content, &settings).unwrap();
    assert_eq!(image.get_pixel(0, 0)[3], 0);
    assert!(image.pixels().any(|p| p[3] > 0 && p[0] > 0));
}

#[test]
fn post_with_avatar_pastes_a_circle() {
    let Some(system) = system() else { return };
    let dir = tempfile::tempdir().unwrap();
    let avatar = dir.path().join("me.png");
    RgbaImage::from_pixel(64, 64, Rgba([0, 200, 0, 255]))
        .save(&avatar)
        .unwrap();

    let settings: PostSettings = settings::resolve(None, Some("dark")).unwrap();
    let content = PostContent::new(
        "sample",
        "José Fernando Costa",
        "Soulsinporto",
        Some(avatar),
        "Who needs memories when you have the whole internet",
    )
    .unwrap();

    let layout = system.layout_post(&content, &settings).unwrap();
    let placement = layout.header.avatar.unwrap();
    assert_eq!(placement.size, 180);
    assert_eq!(layout.header.handle.text, "@Soulsinporto");

    let image = system.post_image(&content, &settings).unwrap();
    let center = placement.position + euclid::vec2(90, 90);
    let inside = image.get_pixel(center.x as u32, center.y as u32);
    assert!(inside[0] < 10 && inside[1] > 190 && inside[3] == 255, "{inside:?}");
    // the avatar square's corner is outside the circle
    let corner = placement.position;
    assert_eq!(*image.get_pixel(corner.x as u32, corner.y as u32), Rgba([0, 0, 0, 255]));

    let path = system
        .render_post(&content, &settings, Some(&dir.path().join("out")))
        .unwrap();
    assert_eq!(path, dir.path().join("out").join("sample.png"));
    assert!(path.exists());
}

#[test]
fn avatar_changes_the_username_column() {
    let Some(system) = system() else { return };
    let settings = PostSettings::preset("light").unwrap();
    let name = "José Fernando Costa Almeida";

    let with = PostContent::new("a", name, "@h", Some(PathBuf::from("x.png")), "body").unwrap();
    let without = PostContent::new("a", name, "@h", None, "body").unwrap();

    let with = system.post_dimensions(&with, &settings).unwrap();
    let without = system.post_dimensions(&without, &settings).unwrap();

    // two username lines beside the avatar, one without it
    assert!(with.header.height > without.header.height);
    assert_eq!(with.text, without.text);
}

#[test]
fn missing_avatar_fails_without_output() {
    let Some(system) = system() else { return };
    let dir = tempfile::tempdir().unwrap();
    let settings = PostSettings::preset("blue").unwrap();
    let content = PostContent::new(
        "sample",
        "name",
        "@h",
        Some(dir.path().join("nope.png")),
        "body",
    )
    .unwrap();

    let err = system
        .render_post(&content, &settings, Some(dir.path()))
        .unwrap_err();
    assert!(matches!(err, RenderError::ProfilePictureUnavailable { .. }));
    assert!(!dir.path().join("sample.png").exists());
}

#[test]
fn resolver_prefers_custom_settings() {
    let preset: QuoteSettings = resolve_json(&json!(null), Some("lyrics")).unwrap();
    assert_eq!(preset.canvas().width, 2800);

    let custom: QuoteSettings = resolve_json(
        &json!({
            "font_family": "sans-serif",
            "font_size": 12,
            "size": [100, 50],
            "color_scheme": ["#fff", "#000"],
            "wrap_limit": 5,
            "margin_bottom": 1.5
        }),
        Some("lyrics"),
    )
    .unwrap();
    assert_eq!(custom.canvas().width, 100);
}

#[test]
fn batch_skips_bad_posts_and_renders_the_rest() {
    let Some(system) = system() else { return };
    let dir = tempfile::tempdir().unwrap();
    let settings = PostSettings::preset("dark").unwrap();

    let posts = vec![
        json!({"tweet_name": "good", "user_name": "Ana", "user_tag": "ana",
               "user_pic": "", "tweet_text": "fine"}),
        json!({"tweet_name": "bad", "user_name": "Ana", "user_tag": "ana",
               "user_pic": "", "tweet_text": ""}),
    ];

    let report = batch::render_posts(&system, posts, &settings, Some(dir.path()));
    assert_eq!(report.items.len(), 2);
    assert_eq!(report.rendered().count(), 1);
    assert!(dir.path().join("good.png").exists());
    assert!(!dir.path().join("bad.png").exists());

    let (name, err) = report.failures().next().unwrap();
    assert_eq!(name, "bad");
    assert!(err.is_input_error());
}
