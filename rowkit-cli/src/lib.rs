// SPDX-FileCopyrightText: 2026 rowkit contributors
// SPDX-License-Identifier: MIT

pub mod commands;
pub mod config;
pub mod error;
