//! Core types for Fino Integrino.
//!
//! This module provides type-safe wrappers for the content model.

pub mod hero;
pub mod id;
pub mod image;
pub mod product;
pub mod retailer;
pub mod section;
pub mod validation;

pub use hero::{HeroChanges, HeroContent, NewHeroContent};
pub use id::*;
pub use image::{ImageCategory, ImageCategoryError, ImageChanges, NewImage, SiteImage};
pub use product::{NewProduct, Product, ProductChanges};
pub use retailer::{
    DOMESTIC_COUNTRY, NewRetailer, Retailer, RetailerChanges, RetailerPartition,
    partition_retailers,
};
pub use section::{SectionId, UnknownSection};
pub use validation::{ValidationError, parse_list};
