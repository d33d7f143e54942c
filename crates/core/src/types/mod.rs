//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers and DTOs mirroring the backend schema.

pub mod cart;
pub mod email;
pub mod id;
pub mod order;
pub mod product;
pub mod status;
pub mod timestamp;
pub mod user;

pub use cart::{CartItem, CartItemCreate, CartItemUpdate};
pub use email::{Email, EmailError};
pub use id::*;
pub use order::{Order, OrderItem, Payment};
pub use product::{Paginated, Product, ProductCreate, ProductFilter, ProductPage, ProductUpdate};
pub use status::*;
pub use user::{ChangePassword, SensitiveInfo, TokenPair, User, UserLogin, UserRegister};
