//! Core business logic for Caixa.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here; the `db`
//! crate turns the plans produced here into rows.
//!
//! # Modules
//!
//! - `calendar` - Day/month arithmetic and schedule cadences
//! - `cost_center` - Cost center classification and normalization
//! - `schedule` - Installment and recurrence generation for ledger entries
//! - `payment` - Advanced payment wizard and settlement of ledger entries
//! - `stock` - Signed stock movements and their reversal
//! - `trade` - Purchases and sales: line validation, totals, new products
//! - `conditional` - Consignment transfers and their resolution
//! - `cash` - Real cash balance and daily forecast

pub mod calendar;
pub mod cash;
pub mod conditional;
pub mod cost_center;
pub mod payment;
pub mod schedule;
pub mod stock;
pub mod trade;
