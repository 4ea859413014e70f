// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Acknowledgements for write requests.

use crate::response::split_reply;

/// How the thermostat answered a write request.
///
/// # Examples
///
/// ```
/// use wavetherm_lib::response::CommandAck;
///
/// assert_eq!(
///     CommandAck::classify("HTTP/1.0 204 No Content\n\n"),
///     Some(CommandAck::Accepted)
/// );
/// assert!(matches!(
///     CommandAck::classify("HTTP/1.0 400 Bad Request\n\n"),
///     Some(CommandAck::Rejected(_))
/// ));
/// assert_eq!(CommandAck::classify("HTTP/1.0 102 Processing\n\n"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAck {
    /// The device applied the value.
    Accepted,
    /// The device refused the value; carries the status line.
    Rejected(String),
}

impl CommandAck {
    /// Classifies a raw reply.
    ///
    /// Only the header block is inspected when one can be separated, so an
    /// encrypted body cannot trigger a match. Returns `None` for replies that
    /// are neither an acceptance nor a rejection.
    #[must_use]
    pub fn classify(raw: &str) -> Option<Self> {
        let headers = split_reply(raw).map_or(raw, |(headers, _)| headers);

        if headers.contains("No Content") || headers.contains("OK") {
            return Some(Self::Accepted);
        }
        if headers.contains("Bad Request") || headers.contains("400") {
            let status = headers.lines().next().unwrap_or_default().trim();
            return Some(Self::Rejected(status.to_string()));
        }
        None
    }

    /// Returns `true` for [`CommandAck::Accepted`].
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}
