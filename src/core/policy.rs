//! Whether to generate keys, given what is on disk and the force flag.
//!
//! | existing | force = false | force = true |
//! |----------|---------------|--------------|
//! | absent   | generate      | generate     |
//! | partial  | repair        | repair       |
//! | complete | skip          | rotate       |
//!
//! A partial pair is never left in place: a lone public key with no private
//! key (or the reverse) is unusable, so it is always regenerated.

use serde::Serialize;

use crate::core::keys::KeyState;

/// Why a new pair is being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reason {
    /// No keys existed.
    Fresh,
    /// Only one of the two files existed.
    Repair,
    /// A complete pair existed and `force` was given.
    Rotate,
}

/// Decision taken for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Generate(Reason),
    Skip,
}

/// Apply the policy table.
pub fn decide(existing: KeyState, force: bool) -> Action {
    match (existing, force) {
        (KeyState::Absent, _) => Action::Generate(Reason::Fresh),
        (KeyState::Partial(_), _) => Action::Generate(Reason::Repair),
        (KeyState::Complete, true) => Action::Generate(Reason::Rotate),
        (KeyState::Complete, false) => Action::Skip,
    }
}
