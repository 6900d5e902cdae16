//! Business logic services.

#![allow(missing_docs)]

pub mod account;
pub mod admin_team;
pub mod authorize;
pub mod booking;
pub mod couple;
pub mod event;
pub mod order;
pub mod product;
pub mod reports;
pub mod wishlist;

pub use account::{AccountService, AuthenticateInput, RegisterInput, ReviewInput};
pub use admin_team::{AdminTeamService, GrantAdminRoleInput, PermissionOverlay};
pub use authorize::{Capability, allows, authorize, default_permissions, require_admin};
pub use booking::{BookingService, CreateBookingInput};
pub use couple::{CoupleService, LinkCoupleInput};
pub use event::{CreateEventInput, EventService, UpdateEventInput};
pub use order::{OrderItemInput, OrderService, PlaceOrderInput};
pub use product::{CreateProductInput, ProductService, UpdateProductInput};
pub use reports::{ReportSummary, ReportsService};
pub use wishlist::WishlistService;
