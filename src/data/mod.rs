//! Data layer: table model, loading, and the query operations.
//!
//! Architecture:
//! ```text
//!   a.csv  b.csv ...
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  read files, check headers → Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  column<op>value            → Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │   sort    │  column=asc|desc            → Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────────────┐
//!   │ aggregate | report │  terminal statistic
//!   └───────────────────┘
//! ```
//!
//! `condition` holds the two condition grammars used by filter, sort and
//! aggregate.

pub mod aggregate;
pub mod condition;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod report;
pub mod sort;
