//! Database access layer

pub mod admins;
pub mod menu;
pub mod orders;

pub(crate) use crate::BoxError;
