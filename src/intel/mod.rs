//! Threat-intelligence inputs
//!
//! Record and registry types, indicator normalization, actor alias
//! resolution and registry assembly.

pub mod alias;
pub mod indicator;
pub mod normalize;
pub mod record;
pub mod registry;

pub use alias::{AliasResolver, ResolverStats};
pub use indicator::{Indicator, IndicatorBreakdown, IndicatorKind, IndicatorTable};
pub use normalize::{normalize_name, normalize_record};
pub use record::{parse_timestamp, ActorEntry, ActorGroup, TargetingRow, ThreatRecord};
pub use registry::assemble_registry;
