pub mod filter;
pub mod geometry;
pub mod relation;
pub mod spatial_reference;

pub use filter::FilterDescriptor;
pub use geometry::{
    Envelope, Geometry, GeometryType, Multipoint, Point, Polygon, Polyline, Position,
    ValidityMode,
};
pub use relation::SpatialRelation;
pub use spatial_reference::SpatialReference;
