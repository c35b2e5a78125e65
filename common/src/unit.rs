//! Marker types.

/// Marker type describing the last update of an entity.
#[derive(Clone, Copy, Debug)]
pub struct LastUpdate;
