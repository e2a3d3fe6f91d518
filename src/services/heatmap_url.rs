// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Embeddable heatmap URLs.
//!
//! These URLs get pasted into READMEs and static pages and live there for
//! years, so the encoding must never change shape:
//! - only options that are set are emitted, so the renderer's own defaults
//!   apply and links made before an option existed keep their look
//! - toggles are emitted only when on (`hide_total=true`)
//! - `radius=0` is a real value and is emitted; an unset radius is not
//! - parameter order is fixed
//!
//! Nothing here talks to the network or checks ranges; the renderer clamps.

use crate::models::EmbedCodes;
use serde::{Deserialize, Serialize};

/// Time window used when a caller does not pick one.
pub const DEFAULT_DAYS: u32 = 365;

/// Rendering options for a heatmap.
///
/// Every field is optional. `None` means "renderer default"; it is not the
/// same as an explicit value (notably `radius: Some(0)`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapOptions {
    pub theme: Option<String>,
    pub days: Option<u32>,
    pub cell_size: Option<u32>,
    pub radius: Option<u32>,
    pub hide_legend: Option<bool>,
    pub hide_total: Option<bool>,
    pub hide_labels: Option<bool>,
    pub title: Option<String>,
}

impl HeatmapOptions {
    /// Options carrying only a time window.
    pub fn with_days(days: u32) -> Self {
        Self {
            days: Some(days),
            ..Default::default()
        }
    }

    /// Query parameters in their fixed order.
    ///
    /// Empty strings and zero `days`/`cell_size` are treated as unset, like
    /// the renderer does.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(theme) = self.theme.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("theme", theme.to_string()));
        }
        if let Some(days) = self.days.filter(|&d| d > 0) {
            pairs.push(("days", days.to_string()));
        }
        if let Some(cell_size) = self.cell_size.filter(|&s| s > 0) {
            pairs.push(("cell_size", cell_size.to_string()));
        }
        if let Some(radius) = self.radius {
            pairs.push(("radius", radius.to_string()));
        }

        let toggles = [
            ("hide_legend", self.hide_legend),
            ("hide_total", self.hide_total),
            ("hide_labels", self.hide_labels),
        ];
        for (name, flag) in toggles {
            if flag == Some(true) {
                pairs.push((name, "true".to_string()));
            }
        }

        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("title", title.to_string()));
        }

        pairs
    }

    /// Form-encoded query string without the leading `?` (empty when nothing
    /// is set).
    pub fn to_query(&self) -> String {
        // Flat string pairs always serialize.
        serde_urlencoded::to_string(self.query_pairs()).unwrap_or_default()
    }

    /// Parse options back out of an embed URL's query string.
    ///
    /// Unknown parameters and unparseable numbers are ignored. Toggles accept
    /// `true` or `1`, matching the renderer.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(query) {
            Ok(pairs) => pairs,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring malformed heatmap query");
                return Self::default();
            }
        };

        let mut opts = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "theme" => opts.theme = Some(value),
                "days" => opts.days = value.parse().ok().or(opts.days),
                "cell_size" => opts.cell_size = value.parse().ok().or(opts.cell_size),
                "radius" => opts.radius = value.parse().ok().or(opts.radius),
                "hide_legend" => opts.hide_legend = Some(is_truthy(&value)),
                "hide_total" => opts.hide_total = Some(is_truthy(&value)),
                "hide_labels" => opts.hide_labels = Some(is_truthy(&value)),
                "title" => opts.title = Some(value),
                _ => {}
            }
        }
        opts
    }
}

fn is_truthy(value: &str) -> bool {
    value == "true" || value == "1"
}

/// Builds heatmap and activity URLs against one API base URL.
#[derive(Debug, Clone)]
pub struct ResourceUrls {
    api_url: String,
}

impl ResourceUrls {
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL of the rendered SVG heatmap for `subject` (a Docker Hub username).
    pub fn svg_url(&self, subject: &str, options: Option<&HeatmapOptions>) -> String {
        let base = format!(
            "{}/heatmap/{}.svg",
            self.api_url,
            urlencoding::encode(subject)
        );

        let query = options.map(HeatmapOptions::to_query).unwrap_or_default();
        if query.is_empty() {
            base
        } else {
            format!("{}?{}", base, query)
        }
    }

    /// Older day-count-only entry point. Must stay byte-identical to
    /// `svg_url` with only `days` set; embedded links depend on it.
    pub fn svg_url_for_days(&self, subject: &str, days: u32) -> String {
        self.svg_url(subject, Some(&HeatmapOptions::with_days(days)))
    }

    /// URL of the JSON activity data for `subject`.
    pub fn json_url(&self, subject: &str, days: u32) -> String {
        format!(
            "{}/activity/{}.json?days={}",
            self.api_url,
            urlencoding::encode(subject),
            days
        )
    }

    /// Embed snippets for `subject`, linking to its profile page on
    /// `public_url`.
    pub fn embed_codes(
        &self,
        subject: &str,
        public_url: &str,
        options: Option<&HeatmapOptions>,
    ) -> EmbedCodes {
        let days = options.and_then(|o| o.days).unwrap_or(DEFAULT_DAYS);
        let profile_url = format!(
            "{}/profile/{}",
            public_url.trim_end_matches('/'),
            urlencoding::encode(subject)
        );

        EmbedCodes::new(
            self.svg_url(subject, options),
            self.json_url(subject, days),
            &profile_url,
        )
    }
}
