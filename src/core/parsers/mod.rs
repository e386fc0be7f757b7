//! Resource file parsers.
//!
//! - `properties`: full `.properties` decoder producing keys, values and lines
//! - `line_index`: key to line mapping, either from parsed entries or from
//!   the line-oriented `=` scan

pub mod line_index;
pub mod properties;

pub use line_index::LineIndex;
pub use properties::{
    Properties, PropertiesError, PropertyEntry, ResourceFile, parse_properties,
    parse_properties_file,
};
