//! Multi-goal weighted distance fields for grid games.
//!
//! A [`DijkstraMap`] holds a level (walls and per-cell entry costs) and a
//! working distance field. A scan relaxes the field outward from every goal
//! at once in full wavefront passes, so each open cell ends up holding its
//! weighted distance to the nearest goal. Behaviours are then read off the
//! field by greedy descent:
//!
//! | Operation | Walks toward |
//! |---|---|
//! | [`find_path`](DijkstraMap::find_path) | the nearest target |
//! | [`find_flee_path`](DijkstraMap::find_flee_path) | far, open cells away from fear sources |
//! | [`find_attack_path`](DijkstraMap::find_attack_path) | a cell within attack range (and sight) of a target |
//! | [`find_covered_attack_path`](DijkstraMap::find_covered_attack_path) | an attack cell, preferring routes threats cannot see |
//! | [`find_shortcut_path`](DijkstraMap::find_shortcut_path) | the nearest target, scanning only as far as needed |
//! | [`find_path_prescanned`](DijkstraMap::find_path_prescanned) | a goal of a field the caller already scanned |
//!
//! Every walking operation has a `_large` variant for creatures that cover
//! a `size × size` square. Paths report why they ended through
//! [`PathStatus`]; only invalid input is an [`Err`].
//!
//! Line of sight and visibility are collaborators: implement
//! [`LineOfSight`] or [`Visibility`], or use [`BresenhamLos`] and
//! [`SightVisibility`].

mod attack;
mod config;
mod distance;
mod error;
mod flee;
mod gradient;
mod los;
mod map;
mod measurement;
mod nearest;
mod path;
mod scan;
mod seek;
mod walk;

pub use config::MapConfig;
pub use distance::{chebyshev, euclidean, manhattan};
pub use error::PathError;
pub use gradient::Gradient;
pub use los::{BresenhamLos, LineOfSight, ResistanceMap, SightVisibility, Visibility};
pub use map::DijkstraMap;
pub use measurement::Measurement;
pub use path::{AttackRange, Path, PathRequest, PathStatus, Threat};
pub use scan::ScanContext;
