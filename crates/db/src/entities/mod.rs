//! Database entities.

pub mod account;
pub mod booking;
pub mod couple;
pub mod event;
pub mod order;
pub mod product;
pub mod wishlist_item;

pub use account::Entity as Account;
pub use booking::Entity as Booking;
pub use couple::Entity as Couple;
pub use event::Entity as Event;
pub use order::Entity as Order;
pub use product::Entity as Product;
pub use wishlist_item::Entity as WishlistItem;
