// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status query command.

use serde_json::Value;

use crate::command::{Command, STATUS_PATH};

/// Command to read the abbreviated status snapshot.
///
/// # Examples
///
/// ```
/// use wavetherm_lib::command::{Command, Method, StatusCommand};
///
/// assert_eq!(StatusCommand.resource_path(), "ecus/rrc/uiStatus");
/// assert_eq!(StatusCommand.method(), Method::Get);
/// assert!(StatusCommand.value().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StatusCommand;

impl Command for StatusCommand {
    fn resource_path(&self) -> &'static str {
        STATUS_PATH
    }

    fn value(&self) -> Option<Value> {
        None
    }
}
