// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Partial updates to [`Settings`].

use serde::Deserialize;

use crate::model::{Repository, SecretSettings, Settings};

/// A partial update naming zero or more top-level settings fields.
///
/// `None` means "leave unchanged". There is no field-level validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsAction {
    pub repositories: Option<Vec<Repository>>,
    pub font_size: Option<u32>,
    pub theme: Option<String>,
    pub tab_size: Option<u32>,
    pub line_numbers: Option<bool>,
    pub word_wrap: Option<bool>,
    #[serde(skip)]
    pub secrets: Option<SecretSettings>,
}

impl SettingsAction {
    /// True when the action names no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Shallow-merge `action` into `state`.
///
/// Every field present in `action` replaces the corresponding field of
/// `state`; absent fields are carried over untouched.
pub fn apply_action(state: Settings, action: SettingsAction) -> Settings {
    Settings {
        repositories: action.repositories.unwrap_or(state.repositories),
        font_size: action.font_size.unwrap_or(state.font_size),
        theme: action.theme.unwrap_or(state.theme),
        tab_size: action.tab_size.unwrap_or(state.tab_size),
        line_numbers: action.line_numbers.unwrap_or(state.line_numbers),
        word_wrap: action.word_wrap.unwrap_or(state.word_wrap),
        secrets: action.secrets.unwrap_or(state.secrets),
    }
}
