//! Repositories: thin data-access wrappers over the shared connection.

mod account;
mod booking;
mod couple;
mod event;
mod order;
mod product;
mod wishlist;

pub use account::AccountRepository;
pub use booking::BookingRepository;
pub use couple::CoupleRepository;
pub use event::EventRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use wishlist::WishlistRepository;
