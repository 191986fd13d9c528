pub mod config;
pub mod id;
pub mod layout;
pub mod model;
pub mod seed;
pub mod tooltip;

pub use config::{ConfigError, GlyphMetrics, MapConfig, TooltipMetrics};
pub use id::DeskId;
pub use layout::{Letterbox, Surface};
pub use model::*;
pub use seed::{reference_layout, reference_layout_seeded};
pub use tooltip::{TooltipLine, TooltipPlacement, place_tooltip, tooltip_lines};

// Re-export kurbo geometry so downstream crates share one version
pub use kurbo::{Circle, Point, Rect, Size};
