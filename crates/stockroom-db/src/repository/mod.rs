//! # Repository Module
//!
//! Records bound to the store by an explicit `&mut Store` argument.
//!
//! ## Record Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a Record Reaches the Database                    │
//! │                                                                         │
//! │  Caller                                                                │
//! │       │                                                                 │
//! │       │  let mut p = Product::new("Widget", "Hardware", price, 10);    │
//! │       │  p.add(&mut store).await?;                                     │
//! │       ▼                                                                 │
//! │  Product                                                               │
//! │  ├── add(&self, store)             INSERT + COMMIT                     │
//! │  └── update_stock(&mut self, ...)  UPDATE + COMMIT                     │
//! │       │                                                                 │
//! │       │  store.execute(...) / store.commit()                           │
//! │       ▼                                                                 │
//! │  Store (one SQLite connection)                                         │
//! │                                                                         │
//! │  Each write commits on its own. Nothing spans two records, so a sale  │
//! │  and a stock change are never atomic with respect to each other.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Records
//!
//! - [`Product`](product::Product) - Insert and stock adjustment
//! - [`Sale`](sale::Sale) - Priced, discounted sale recording
//! - [`Supplier`](supplier::Supplier) - Supplier contacts

pub mod product;
pub mod sale;
pub mod supplier;
