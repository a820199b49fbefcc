//! Declarative queries and the filters they compile to.
//!
//! A [Query] is data: a list of clauses over document fields plus the
//! combinators `$and`, `$or`, `$not` and `$where`. It is usually decoded from
//! a JSON-like [Value](crate::common::Value), or built with [field] and the
//! [Query] builder methods. Before running, a query is validated and compiled
//! into a [Filter], a tree of [FilterProvider]s.
//!
//! # Examples
//!
//! ```rust
//! use jsondb::doc;
//! use jsondb::filter::{field, Filter, Query};
//!
//! // {age: {$gte: 18}, $or: [{role: "admin"}, {tags: {$includes: "ops"}}]}
//! let query = Query::from(doc! { age: { "$gte": 18 } })
//!     .or(vec![field("role").eq("admin"), field("tags").includes("ops")]);
//!
//! let filter = Filter::compile(&query).unwrap();
//! assert!(filter.apply(&doc! { age: 20, tags: ["ops", "dev"] }));
//! assert!(!filter.apply(&doc! { age: 20, role: "user" }));
//! ```
//!
//! # Supported Operators
//!
//! - **Equality**: literal values, `$eq`, `$ne`
//! - **Comparison**: `$gt`, `$gte`, `$lt`, `$lte` (numbers or strings)
//! - **Membership**: `$in`, `$nin`, `$includes`
//! - **Shape**: `$exists`, `$type`
//! - **Pattern**: `$regex`
//! - **Logical**: `$and`, `$or`, `$not`, `$where`

mod filter;
mod fluent;
mod query;

mod basic_filters;
mod logical_filters;
mod pattern_filters;
mod range_filters;

pub(crate) use basic_filters::*;
pub use filter::*;
pub use fluent::*;
pub(crate) use logical_filters::{AndFilter, NotFilter, OrFilter, WhereFilter};
pub use logical_filters::WherePredicate;
pub(crate) use pattern_filters::*;
pub use query::*;
pub(crate) use range_filters::*;
