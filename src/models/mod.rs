//! Project domain models.
//!
//! | Type | Role |
//! |------|------|
//! | `ProjectRecord` | Raw record as stored, every field optional except the name |
//! | `Project` | Resolved, immutable project with derived status/due/defer |
//! | `Status`, `Priority` | Closed enums with fixed ranking ordinals |
//! | `Resolved`, `Origin` | A resolved value and whether it was explicit or derived |

mod project;
mod record;
mod status;

pub use project::{Project, Recurrence, TimeRoi};
pub use record::ProjectRecord;
pub use status::{Origin, Priority, Resolved, Status};
