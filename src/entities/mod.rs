//! Business records: customers, installers, materials and orders

pub mod customer;
pub mod installer;
pub mod material;
pub mod order;
pub mod service;

pub use customer::{Customer, CustomerQuery};
pub use installer::{Installer, InstallerQuery};
pub use material::{Material, MaterialQuery};
pub use order::{Order, OrderItem, OrderQuery};
pub use service::RecordService;
