// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models exchanged with the heatmap API.

pub mod activity;
pub mod docker;
pub mod embed;
pub mod user;

pub use activity::{
    ActivityDay, ActivityResponse, ActivityTotals, ProfileData, Theme, ThemesResponse,
};
pub use docker::{AccountEnvelope, ConnectDockerRequest, ConnectDockerResponse, DockerAccount};
pub use embed::EmbedCodes;
pub use user::{
    AuthUrlResponse, Identity, MessageResponse, UpdateProfileRequest, UpdateProfileResponse,
    UserEnvelope,
};
