//! Console rendering of resolved variables.
//!
//! [`Table`] renders a [`ResolvedVariables`](crate::core::ResolvedVariables) snapshot with one row per variable,
//! sorted by name, and colors each source so that overridden values stand out.
//!
//! ```text
//! Name   Value  Type     Original  Source      Path
//! -----  -----  -------  --------  ----------  ---------
//! DEBUG  true   Boolean  "1"       DOTENV      /app/.env
//! PORT   8080   Integer  "8080"    OVERRIDDEN
//! ```

mod table;

pub use table::Table;

use crate::core::Source;
use yansi::Color;

impl Source {
    /// Display color used when rendering this source.
    pub fn color(self) -> Color {
        match self {
            Self::Overridden => Color::Red,
            Self::Bound => Color::Primary,
            Self::EnvVar => Color::Blue,
            Self::File => Color::White,
            Self::Dotenv => Color::Green,
        }
    }
}
