// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Copy-paste embed snippets for a heatmap.

use serde::{Deserialize, Serialize};

/// Embed snippets for one Docker Hub user, same shape as `/user/embed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedCodes {
    pub svg_url: String,
    pub json_url: String,
    pub markdown: String,
    pub html: String,
    pub html_link: String,
}

impl EmbedCodes {
    /// Build the snippets from already-built resource URLs.
    pub fn new(svg_url: String, json_url: String, profile_url: &str) -> Self {
        let img = format!(r#"<img src="{}" alt="Docker Activity Heatmap" />"#, svg_url);
        Self {
            markdown: format!("![Docker Activity]({})", svg_url),
            html_link: format!(r#"<a href="{}">{}</a>"#, profile_url, img),
            html: img,
            svg_url,
            json_url,
        }
    }
}
