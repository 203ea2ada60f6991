pub mod allocator;
pub mod booking;
pub mod capacity;
pub mod lifecycle;
pub mod projector;
