//! benford-stats - Leading-digit analysis against Benford's Law
//!
//! This crate is the numeric core of benford. It is pure and synchronous:
//! no I/O, no shared state, and every call is independent.
//!
//! - **Digit**: normalize raw text (`"$1,234"`, `"-0.25"`) and extract the
//!   first significant digit
//! - **Distribution**: expected (Benford) and observed digit counts, and the
//!   chi-square statistic comparing them
//! - **Critical**: fixed chi-square critical values for 8 degrees of freedom
//! - **Analysis**: one call from a column of strings to a full result
//!
//! # Example
//!
//! ```
//! use benford_stats::{analyze, SignificanceLevel};
//!
//! let column = ["1,024", "$2,048", "4096", "n/a", "8192"];
//! let analysis = analyze(column);
//!
//! assert_eq!(analysis.n, 4);
//! assert_eq!(analysis.discarded, 1);
//! let _rejected = analysis.rejected_at(SignificanceLevel::P05);
//! ```

pub mod analysis;
pub mod critical;
pub mod digit;
pub mod distribution;

pub use analysis::*;
pub use critical::*;
pub use digit::*;
pub use distribution::*;
