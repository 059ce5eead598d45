//! Array types: shape, layout, storage, iteration, and the NArray container

mod core;
mod iter;
mod layout;
mod loops;
mod shape;
mod storage;
mod strides;

pub use self::core::NArray;
pub use self::iter::{Order, PositionIter};
pub use self::layout::{broadcast_dims, Layout};
pub use self::loops::{ChunkKind, ChunkPositions, LoopSpec};
pub use self::shape::Shape;
pub use self::storage::Storage;
pub use self::strides::Strides;

pub(crate) use self::core::{combine_impl, map_impl, reduce_all_impl, reduce_axis_impl};
