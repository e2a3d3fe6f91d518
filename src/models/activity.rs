// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public activity, profile and theme data served by the heatmap API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Aggregated activity for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub count: u32,
    /// Intensity bucket 0-4
    pub level: u8,
    #[serde(default)]
    pub pushes: Option<u32>,
    #[serde(default)]
    pub pulls: Option<u32>,
    #[serde(default)]
    pub builds: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityTotals {
    pub activities: u64,
    pub pushes: u64,
    pub pulls: u64,
    pub builds: u64,
}

/// Response of `/activity/{handle}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub username: String,
    pub days: u32,
    pub totals: ActivityTotals,
    pub activity: Vec<ActivityDay>,
}

/// Public part of a user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub github_username: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicDockerAccount {
    pub username: String,
    pub last_sync_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileStats {
    pub total_activities: u64,
}

/// Response of `/profile/{handle}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileData {
    pub user: PublicUser,
    pub docker: PublicDockerAccount,
    pub stats: ProfileStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_themes: Option<Vec<String>>,
}

/// Heatmap color theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub bg_color: String,
    pub text_color: String,
    /// Level 0-4 cell colors
    pub colors: Vec<String>,
}

/// Response of `/themes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemesResponse {
    pub themes: Vec<Theme>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_response_parses_dates() {
        let json = serde_json::json!({
            "username": "alice",
            "days": 30,
            "totals": { "activities": 5, "pushes": 3, "pulls": 2, "builds": 0 },
            "activity": [
                { "date": "2025-06-01", "count": 5, "level": 2, "pushes": 3, "pulls": 2 }
            ]
        });

        let resp: ActivityResponse = serde_json::from_value(json).unwrap();
        assert_eq!(
            resp.activity[0].date,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
        assert_eq!(resp.activity[0].builds, None);
        assert_eq!(resp.totals.activities, 5);
    }
}
