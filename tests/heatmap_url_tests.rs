// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Embed URL contract tests.
//!
//! Embedded links are permanent, so these pin the exact strings.

use docker_heatmap_web::services::{HeatmapOptions, ResourceUrls};

const API: &str = "http://localhost:8080/api";

#[test]
fn test_documented_example() {
    let urls = ResourceUrls::new(API);
    let opts = HeatmapOptions {
        theme: Some("github".to_string()),
        days: Some(90),
        radius: Some(0),
        hide_total: Some(true),
        ..Default::default()
    };

    assert_eq!(
        urls.svg_url("alice", Some(&opts)),
        "http://localhost:8080/api/heatmap/alice.svg?theme=github&days=90&radius=0&hide_total=true"
    );
}

#[test]
fn test_empty_options_match_bare_url() {
    let urls = ResourceUrls::new(API);
    let bare = urls.svg_url("alice", None);

    assert_eq!(bare, "http://localhost:8080/api/heatmap/alice.svg");
    assert_eq!(urls.svg_url("alice", Some(&HeatmapOptions::default())), bare);

    let all_off = HeatmapOptions {
        hide_legend: Some(false),
        hide_total: Some(false),
        hide_labels: Some(false),
        ..Default::default()
    };
    assert_eq!(urls.svg_url("alice", Some(&all_off)), bare);
}

#[test]
fn test_radius_zero_is_explicit() {
    let urls = ResourceUrls::new(API);

    let zero = HeatmapOptions {
        radius: Some(0),
        ..Default::default()
    };
    assert!(urls.svg_url("alice", Some(&zero)).ends_with("?radius=0"));

    let unset = HeatmapOptions {
        theme: Some("dracula".to_string()),
        ..Default::default()
    };
    assert!(!urls.svg_url("alice", Some(&unset)).contains("radius"));
}

#[test]
fn test_legacy_days_entry_point_is_identical() {
    let urls = ResourceUrls::new(API);

    for days in [0, 1, 30, 90, 365, 1000] {
        assert_eq!(
            urls.svg_url_for_days("alice", days),
            urls.svg_url("alice", Some(&HeatmapOptions::with_days(days))),
            "days = {}",
            days
        );
    }
    assert_eq!(
        urls.svg_url_for_days("alice", 365),
        "http://localhost:8080/api/heatmap/alice.svg?days=365"
    );
}

#[test]
fn test_parameter_order_is_fixed() {
    let urls = ResourceUrls::new(API);
    let opts = HeatmapOptions {
        title: Some("Builds".to_string()),
        hide_labels: Some(true),
        hide_legend: Some(true),
        hide_total: Some(true),
        radius: Some(4),
        cell_size: Some(12),
        days: Some(180),
        theme: Some("nord".to_string()),
    };

    assert_eq!(
        urls.svg_url("alice", Some(&opts)),
        "http://localhost:8080/api/heatmap/alice.svg?theme=nord&days=180&cell_size=12&radius=4\
         &hide_legend=true&hide_total=true&hide_labels=true&title=Builds"
    );
}

#[test]
fn test_query_parses_back() {
    let opts = HeatmapOptions {
        theme: Some("github".to_string()),
        days: Some(90),
        radius: Some(0),
        hide_total: Some(true),
        title: Some("Pushes & pulls".to_string()),
        ..Default::default()
    };

    assert_eq!(HeatmapOptions::from_query(&opts.to_query()), opts);
}

#[test]
fn test_json_url() {
    let urls = ResourceUrls::new(API);
    assert_eq!(
        urls.json_url("alice", 365),
        "http://localhost:8080/api/activity/alice.json?days=365"
    );
}

#[test]
fn test_embed_codes() {
    let urls = ResourceUrls::new(API);
    let opts = HeatmapOptions {
        theme: Some("github".to_string()),
        days: Some(90),
        ..Default::default()
    };

    let codes = urls.embed_codes("alice", "https://heatmap.example.com/", Some(&opts));
    let svg = "http://localhost:8080/api/heatmap/alice.svg?theme=github&days=90";

    assert_eq!(codes.svg_url, svg);
    assert_eq!(
        codes.json_url,
        "http://localhost:8080/api/activity/alice.json?days=90"
    );
    assert_eq!(codes.markdown, format!("![Docker Activity]({})", svg));
    assert_eq!(
        codes.html,
        format!(r#"<img src="{}" alt="Docker Activity Heatmap" />"#, svg)
    );
    assert!(codes
        .html_link
        .starts_with(r#"<a href="https://heatmap.example.com/profile/alice"><img "#));
}
