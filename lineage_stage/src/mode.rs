// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Which of the two chart styles is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Nodes at their authored boxes, edges along traced control points.
    #[default]
    Ancient,
    /// Nodes at tidy layout positions, edges as elbows.
    Modern,
}

impl Mode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Ancient => Self::Modern,
            Self::Modern => Self::Ancient,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ancient => "ancient",
            Self::Modern => "modern",
        })
    }
}
